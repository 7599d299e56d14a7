use serde::Serialize;

/// Serialize a serde-backed enum into its string name (e.g. SCREAMING_SNAKE_CASE).
pub fn serde_enum_name<T: Serialize>(val: &T) -> Option<String> {
    serde_json::to_value(val).ok()?.as_str().map(|s| s.to_string())
}

/// Mask all but the last four characters of a secret for log and debug output.
pub fn redact(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::netro::{ScheduleStatus, WeatherCondition};

    #[test]
    fn enum_names_follow_serde_renames() {
        assert_eq!(serde_enum_name(&ScheduleStatus::Executing).as_deref(), Some("EXECUTING"));
        // numeric enums have no string name
        assert_eq!(serde_enum_name(&WeatherCondition::Rain), None);
    }

    #[test]
    fn redacts_all_but_tail() {
        assert_eq!(redact("abcdef123456"), "********3456");
        assert_eq!(redact("abc"), "***");
        assert_eq!(redact(""), "");
    }
}
