//! HTML rendering for dexgen sites.
//!
//! Produces one detail page per record, a single index page, and the
//! built-in stylesheet. Rendering is pure: callers decide where the
//! returned markup is written.

mod family;
mod index;
mod markup;
mod page;
mod stats;

use tracing::{debug, instrument};

pub use index::IndexRow;
pub use markup::escape;
pub use page::RecordPage;
pub use stats::{BAR_WIDTH_PX, bar_width};

/// File name of the generated index page.
pub const INDEX_FILE: &str = "index.html";

/// File name pages link their stylesheet as.
pub const STYLESHEET_FILE: &str = "style.css";

/// Stylesheet written when no custom one is configured.
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/style.css");

/// Render a record's detail page.
#[instrument(skip_all, fields(name = %page.record.name, index = page.record.index))]
pub fn render_record_page(page: &RecordPage<'_>) -> String {
    let mut out = String::new();
    page::write_record_page(&mut out, page).expect("writing to a String cannot fail");
    debug!(len = out.len(), "record page rendered");
    out
}

/// Render the index page listing every record by ordinal.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn render_index_page(title: &str, rows: &[IndexRow<'_>]) -> String {
    let mut out = String::new();
    index::write_index_page(&mut out, title, rows).expect("writing to a String cannot fail");
    debug!(len = out.len(), "index page rendered");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexgen_shared::{
        FamilyBranch, FamilyNode, FamilyTree, OrdinalEntry, Record, Stats, Transformation,
        TransformationCondition,
    };
    use scraper::{Html, Selector};
    use serde_json::json;

    fn stats(v: u32) -> Stats {
        Stats {
            hp: v,
            attack: v,
            defense: v,
            special_attack: v,
            special_defense: v,
            speed: v,
        }
    }

    fn record(name: &str, index: u32) -> Record {
        Record {
            name: name.into(),
            index,
            category: "Seed".into(),
            types: vec!["grass".into(), "poison".into()],
            stats: stats(60),
            evolutions: vec![],
            transformations: vec![],
        }
    }

    fn entry(name: &str, index: u32) -> OrdinalEntry {
        OrdinalEntry {
            index,
            name: name.into(),
            file_key: format!("ka{}", name.to_lowercase()),
        }
    }

    fn select_text(html: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn record_page_structure() {
        let ivysaur = record("Ivysaur", 2);
        let prev = entry("Bulbasaur", 1);
        let next = entry("Venusaur", 3);
        let tree = FamilyTree {
            focus: "Ivysaur".into(),
            base: FamilyNode {
                name: "Bulbasaur".into(),
                file_key: "kabulbasaur".into(),
                ordinal: 1,
                evolutions: vec![FamilyBranch {
                    method: "Level 16".into(),
                    node: FamilyNode {
                        name: "Ivysaur".into(),
                        file_key: "kaivysaur".into(),
                        ordinal: 2,
                        evolutions: vec![],
                    },
                }],
            },
        };

        let out = render_record_page(&RecordPage {
            record: &ivysaur,
            prev: Some(&prev),
            next: Some(&next),
            family: Some(&tree),
        });
        assert!(out.starts_with("<!DOCTYPE html>"));

        let html = Html::parse_document(&out);
        assert_eq!(select_text(&html, "title"), ["Ivysaur"]);
        assert_eq!(select_text(&html, "h1"), ["#002 Ivysaur"]);
        assert_eq!(select_text(&html, ".types .type"), ["grass", "poison"]);
        assert_eq!(select_text(&html, "nav a.prev"), ["#001 Bulbasaur"]);
        assert_eq!(select_text(&html, "nav a.next"), ["#003 Venusaur"]);
        assert_eq!(select_text(&html, ".family .method"), ["Level 16"]);
        assert!(select_text(&html, "section.forms").is_empty());

        let home = Selector::parse("nav a.home").unwrap();
        let home = html.select(&home).next().expect("home link");
        assert_eq!(home.value().attr("href"), Some(INDEX_FILE));
    }

    #[test]
    fn first_record_has_no_prev_link() {
        let bulbasaur = record("Bulbasaur", 1);
        let next = entry("Ivysaur", 2);
        let out = render_record_page(&RecordPage {
            record: &bulbasaur,
            prev: None,
            next: Some(&next),
            family: None,
        });

        let html = Html::parse_document(&out);
        assert!(select_text(&html, "nav a.prev").is_empty());
        assert_eq!(select_text(&html, "nav a.next"), ["#002 Ivysaur"]);
        assert_eq!(
            select_text(&html, ".no-evolution"),
            ["This creature does not evolve."]
        );
    }

    #[test]
    fn forms_section_lists_each_transformation() {
        let mut castform = record("Castform", 9);
        castform.transformations = vec![Transformation {
            name: "Rainy Form".into(),
            types: vec!["water".into()],
            stats: stats(70),
            condition: TransformationCondition {
                activation: [("weather".to_string(), json!("rain"))].into_iter().collect(),
                deactivation: [("weather".to_string(), json!("clear"))].into_iter().collect(),
            },
        }];

        let out = render_record_page(&RecordPage {
            record: &castform,
            prev: None,
            next: None,
            family: None,
        });

        let html = Html::parse_document(&out);
        assert_eq!(select_text(&html, "section.forms h3"), ["Rainy Form"]);
        assert_eq!(select_text(&html, ".form .type"), ["water"]);
        assert_eq!(
            select_text(&html, ".form-condition dd"),
            ["weather: rain", "weather: clear"]
        );
        // Base stats table plus the form's own table.
        assert_eq!(select_text(&html, "table.stats").len(), 2);
    }

    #[test]
    fn names_are_escaped() {
        let mut odd = record("<Mr. Mime>", 1);
        odd.types = vec!["psychic & fairy".into()];
        let out = render_record_page(&RecordPage {
            record: &odd,
            prev: None,
            next: None,
            family: None,
        });
        assert!(out.contains("&lt;Mr. Mime&gt;"));
        assert!(!out.contains("<Mr. Mime>"));
        assert!(out.contains("psychic &amp; fairy"));
    }

    #[test]
    fn index_page_sorted_by_ordinal() {
        let records = [record("Venusaur", 3), record("Bulbasaur", 1), record("Ivysaur", 2)];
        let entries = [entry("Venusaur", 3), entry("Bulbasaur", 1), entry("Ivysaur", 2)];
        let rows: Vec<IndexRow<'_>> = records
            .iter()
            .zip(&entries)
            .map(|(record, entry)| IndexRow { entry, record })
            .collect();

        let out = render_index_page("Pokédex", &rows);
        let html = Html::parse_document(&out);

        assert_eq!(select_text(&html, "h1"), ["Pokédex"]);
        assert_eq!(
            select_text(&html, "tbody tr td a"),
            ["Bulbasaur", "Ivysaur", "Venusaur"]
        );

        let link = Selector::parse("tbody a").unwrap();
        let hrefs: Vec<&str> = html
            .select(&link)
            .filter_map(|a| a.value().attr("href"))
            .collect();
        assert_eq!(hrefs, ["kabulbasaur.html", "kaivysaur.html", "kavenusaur.html"]);
    }

    #[test]
    fn default_stylesheet_is_bundled() {
        assert!(DEFAULT_STYLESHEET.contains("td.bar"));
    }
}
