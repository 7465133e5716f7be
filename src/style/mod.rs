use gpui::SharedString;

/// Joins the names whose flag is set, in first-seen order.
///
/// Empty names are skipped. A repeated name keeps its first position and takes
/// the flag of its last occurrence.
pub fn class_names<I, S>(names: I) -> SharedString
where
    I: IntoIterator<Item = (S, bool)>,
    S: AsRef<str>,
{
    let mut entries: Vec<(String, bool)> = Vec::new();
    for (name, enabled) in names {
        let name = name.as_ref();
        if let Some(entry) = entries.iter_mut().find(|(existing, _)| existing.as_str() == name) {
            entry.1 = enabled;
        } else {
            entries.push((name.to_owned(), enabled));
        }
    }

    entries
        .into_iter()
        .filter(|(name, enabled)| *enabled && !name.is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" ")
        .into()
}

/// Class flags shared by inputs, fields and groups.
pub fn state_class_names(valid: Option<bool>, touched: bool) -> SharedString {
    class_names([
        ("valid", valid == Some(true)),
        ("invalid", valid == Some(false)),
        ("touched", touched),
    ])
}

pub fn has_class(class_name: &str, name: &str) -> bool {
    class_name.split_whitespace().any(|part| part == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_enabled_names_in_order() {
        let class = class_names([("form", true), ("valid", false), ("touched", true)]);
        assert_eq!(class.as_str(), "form touched");
    }

    #[test]
    fn skips_empty_names() {
        let class = class_names([("", true), ("input", true), ("", true)]);
        assert_eq!(class.as_str(), "input");
    }

    #[test]
    fn repeated_name_keeps_position_and_last_flag() {
        let class = class_names([("a", true), ("b", true), ("a", false)]);
        assert_eq!(class.as_str(), "b");

        let class = class_names([("a", false), ("b", true), ("a", true)]);
        assert_eq!(class.as_str(), "a b");
    }

    #[test]
    fn nothing_enabled_gives_empty_string() {
        assert!(class_names([("valid", false)]).is_empty());
        assert!(class_names(Vec::<(&str, bool)>::new()).is_empty());
    }

    #[test]
    fn state_classes_distinguish_unevaluated() {
        assert_eq!(state_class_names(None, false).as_str(), "");
        assert_eq!(state_class_names(Some(true), false).as_str(), "valid");
        assert_eq!(
            state_class_names(Some(false), true).as_str(),
            "invalid touched"
        );
        assert!(has_class("form invalid touched", "invalid"));
        assert!(!has_class("form invalid touched", "valid"));
    }
}
