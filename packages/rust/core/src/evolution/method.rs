//! Display text for evolution methods.
//!
//! Rules are tried in order and the first match wins. A method no rule
//! recognises is dumped as compact JSON.

use dexgen_shared::{EvolutionMethod, MethodCondition};

type Rule = fn(&EvolutionMethod) -> Option<String>;

const RULES: &[Rule] = &[
    level_only,
    level_with_gender,
    level_during_time,
    level_holding_item,
    use_item,
    happiness_reached,
];

/// Format an evolution method for display.
pub fn format_method(method: &EvolutionMethod) -> String {
    RULES
        .iter()
        .find_map(|rule| rule(method))
        .unwrap_or_else(|| dump(method))
}

fn dump(method: &EvolutionMethod) -> String {
    serde_json::to_string(method).unwrap_or_else(|_| format!("{method:?}"))
}

/// The level threshold of a method that carries nothing but a level and,
/// optionally, a condition.
fn bare_level(method: &EvolutionMethod) -> Option<u32> {
    let only_level =
        method.item.is_none() && method.happiness.is_none() && method.extra.is_empty();
    if only_level { method.level } else { None }
}

/// The level and condition of a level-up that requires exactly one extra
/// condition field, selected by `pick`.
fn level_with<'a>(
    method: &'a EvolutionMethod,
    pick: fn(&MethodCondition) -> Option<&String>,
) -> Option<(u32, &'a str)> {
    let level = bare_level(method)?;
    let condition = method.condition.as_ref()?;
    let value = pick(condition)?;

    let set = [&condition.hold, &condition.gender, &condition.time]
        .iter()
        .filter(|field| field.is_some())
        .count();
    if set == 1 && condition.extra.is_empty() {
        Some((level, value.as_str()))
    } else {
        None
    }
}

fn level_only(method: &EvolutionMethod) -> Option<String> {
    let level = bare_level(method)?;
    method.condition.is_none().then(|| format!("Level {level}"))
}

fn level_with_gender(method: &EvolutionMethod) -> Option<String> {
    let (level, gender) = level_with(method, |c| c.gender.as_ref())?;
    Some(format!("Level {level} while {}", title_case(gender)))
}

fn level_during_time(method: &EvolutionMethod) -> Option<String> {
    let (level, time) = level_with(method, |c| c.time.as_ref())?;
    Some(format!("Level {level} during {}", title_case(time)))
}

fn level_holding_item(method: &EvolutionMethod) -> Option<String> {
    let (level, item) = level_with(method, |c| c.hold.as_ref())?;
    Some(if level == 1 {
        format!("Level Up While Holding {item}")
    } else {
        format!("Level {level} While Holding {item}")
    })
}

fn use_item(method: &EvolutionMethod) -> Option<String> {
    let item = method.item.as_ref()?;
    let only_item = method.level.is_none()
        && method.happiness.is_none()
        && method.condition.is_none()
        && method.extra.is_empty();
    only_item.then(|| format!("Use {item}"))
}

fn happiness_reached(method: &EvolutionMethod) -> Option<String> {
    let happiness = method.happiness.as_ref()?;
    let threshold = happiness.eq_exceeds?;
    let only_happiness = method.level.is_none()
        && method.item.is_none()
        && method.condition.is_none()
        && method.extra.is_empty()
        && happiness.extra.is_empty();
    only_happiness.then(|| format!("Happiness Level Reaches {threshold}"))
}

/// `female` → `Female`, `late night` → `Late Night`.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexgen_shared::HappinessThreshold;
    use serde_json::json;

    fn method(value: serde_json::Value) -> EvolutionMethod {
        serde_json::from_value(value).expect("valid method")
    }

    #[test]
    fn plain_level() {
        assert_eq!(format_method(&method(json!({"level": 16}))), "Level 16");
    }

    #[test]
    fn level_with_gender_condition() {
        let m = method(json!({"level": 21, "condition": {"gender": "female"}}));
        assert_eq!(format_method(&m), "Level 21 while Female");
    }

    #[test]
    fn level_during_time_of_day() {
        let m = method(json!({"level": 25, "condition": {"time": "night"}}));
        assert_eq!(format_method(&m), "Level 25 during Night");
    }

    #[test]
    fn held_item_at_level_one() {
        let m = method(json!({"level": 1, "condition": {"hold": "Razor Claw"}}));
        assert_eq!(format_method(&m), "Level Up While Holding Razor Claw");
    }

    #[test]
    fn held_item_above_level_one() {
        let m = method(json!({"level": 30, "condition": {"hold": "Metal Coat"}}));
        assert_eq!(format_method(&m), "Level 30 While Holding Metal Coat");
    }

    #[test]
    fn item_use() {
        let m = method(json!({"item": "Thunder Stone"}));
        assert_eq!(format_method(&m), "Use Thunder Stone");
    }

    #[test]
    fn happiness_threshold() {
        let m = method(json!({"happiness": {"eq_exceeds": 220}}));
        assert_eq!(format_method(&m), "Happiness Level Reaches 220");

        let built = EvolutionMethod {
            happiness: Some(HappinessThreshold {
                eq_exceeds: Some(160),
                ..HappinessThreshold::default()
            }),
            ..EvolutionMethod::default()
        };
        assert_eq!(format_method(&built), "Happiness Level Reaches 160");
    }

    #[test]
    fn combined_conditions_fall_back_to_dump() {
        let m = method(json!({"level": 20, "happiness": {"eq_exceeds": 220}}));
        let text = format_method(&m);
        assert!(text.starts_with('{'), "{text}");
        assert!(text.contains("\"level\":20"), "{text}");
        assert!(text.contains("\"eq_exceeds\":220"), "{text}");

        let m = method(json!({"level": 20, "condition": {"gender": "male", "time": "day"}}));
        assert!(format_method(&m).starts_with('{'));
    }

    #[test]
    fn unknown_keys_fall_back_to_dump() {
        let m = method(json!({"trade": true}));
        assert_eq!(format_method(&m), r#"{"trade":true}"#);

        let m = method(json!({"level": 36, "location": "Mt. Coronet"}));
        assert!(format_method(&m).contains("Mt. Coronet"));
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("female"), "Female");
        assert_eq!(title_case("late night"), "Late Night");
        assert_eq!(title_case(""), "");
    }
}
