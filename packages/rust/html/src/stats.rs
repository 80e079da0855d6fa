//! Stat table with proportional bars.
//!
//! A bar is `width` pixels wide inside a 255px cell; the width is the stat
//! value scaled linearly so that [`STAT_MAX`] fills the cell.

use std::fmt::{self, Write};

use dexgen_shared::{STAT_MAX, Stats};

/// Width in pixels of a full bar.
pub const BAR_WIDTH_PX: u32 = 255;

/// Bar width for a stat value. Values above [`STAT_MAX`] fill the bar.
pub fn bar_width(value: u32) -> u32 {
    value.min(STAT_MAX) * BAR_WIDTH_PX / STAT_MAX
}

pub(crate) fn stat_table(out: &mut String, indent: &str, stats: &Stats) -> fmt::Result {
    writeln!(out, "{indent}<table class=\"stats\">")?;
    writeln!(out, "{indent}  <tbody>")?;
    for (key, value) in stats.iter() {
        writeln!(out, "{indent}    <tr>")?;
        writeln!(out, "{indent}      <th scope=\"row\">{key}</th>")?;
        writeln!(out, "{indent}      <td class=\"value\">{value}</td>")?;
        writeln!(out, "{indent}      <td class=\"bar\">")?;
        writeln!(
            out,
            "{indent}        <div style=\"width:{}px\"></div>",
            bar_width(value)
        )?;
        writeln!(out, "{indent}      </td>")?;
        writeln!(out, "{indent}    </tr>")?;
    }
    writeln!(out, "{indent}    <tr class=\"total\">")?;
    writeln!(out, "{indent}      <th scope=\"row\">total</th>")?;
    writeln!(out, "{indent}      <td class=\"value\">{}</td>", stats.total())?;
    writeln!(out, "{indent}      <td></td>")?;
    writeln!(out, "{indent}    </tr>")?;
    writeln!(out, "{indent}  </tbody>")?;
    writeln!(out, "{indent}</table>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use scraper::{Html, Selector};

    fn stats(values: [u32; 6]) -> Stats {
        Stats {
            hp: values[0],
            attack: values[1],
            defense: values[2],
            special_attack: values[3],
            special_defense: values[4],
            speed: values[5],
        }
    }

    /// Read every bar width back out of rendered markup.
    fn parse_widths(html: &str) -> Vec<u32> {
        let width_re = Regex::new(r"width:(\d+)px").unwrap();
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("td.bar div").unwrap();
        fragment
            .select(&selector)
            .map(|div| {
                let style = div.value().attr("style").expect("style attribute");
                width_re.captures(style).expect("width")[1].parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn bar_width_is_linear_up_to_max() {
        assert_eq!(bar_width(0), 0);
        assert_eq!(bar_width(1), 1);
        assert_eq!(bar_width(128), 128);
        assert_eq!(bar_width(255), 255);
        assert_eq!(bar_width(300), 255);
    }

    #[test]
    fn rendered_bars_round_trip() {
        for sample in [[45, 49, 49, 65, 65, 45], [0, 1, 2, 253, 254, 255], [255; 6]] {
            let mut out = String::new();
            stat_table(&mut out, "", &stats(sample)).unwrap();
            assert_eq!(parse_widths(&out), sample.to_vec());
        }
    }

    #[test]
    fn table_lists_stats_in_order_with_total() {
        let mut out = String::new();
        stat_table(&mut out, "", &stats([45, 49, 49, 65, 65, 45])).unwrap();

        let fragment = Html::parse_fragment(&out);
        let th = Selector::parse("th").unwrap();
        let labels: Vec<String> = fragment
            .select(&th)
            .map(|e| e.text().collect::<String>())
            .collect();
        assert_eq!(
            labels,
            ["hp", "attack", "defense", "special attack", "special defense", "speed", "total"]
        );
        assert!(out.contains("<td class=\"value\">318</td>"));
    }
}
