/// Short display key for a field of study.
///
/// Multi-word labels collapse to the first character of each word
/// ("Computer Science" -> "CS"); single-word labels are kept as-is.
pub fn abbreviate(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();

    if words.len() >= 2 {
        words.iter().filter_map(|word| word.chars().next()).collect()
    } else {
        label.to_string()
    }
}

/// Returns the major if one is actually assigned.
pub fn assigned(major: Option<&str>) -> Option<&str> {
    major.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn multi_word_majors_become_initials() {
        assert_eq!(abbreviate("Computer Science"), "CS");
        assert_eq!(abbreviate("Electrical Computer Engineering"), "ECE");
        assert_eq!(abbreviate("First Year Engineering"), "FYE");
        assert_eq!(abbreviate("computer  graphics technology"), "cgt");
    }

    #[test]
    fn single_word_majors_are_unchanged() {
        assert_eq!(abbreviate("Math"), "Math");
        assert_eq!(abbreviate("Other"), "Other");
    }

    #[test]
    fn blank_majors_are_not_assigned() {
        assert_eq!(assigned(None), None);
        assert_eq!(assigned(Some("")), None);
        assert_eq!(assigned(Some("   ")), None);
        assert_eq!(assigned(Some("Math")), Some("Math"));
    }

    proptest! {
        #[test]
        fn abbreviation_is_idempotent(label in "[A-Za-z]{1,10}( [A-Za-z]{1,10}){0,4}") {
            let once = abbreviate(&label);
            prop_assert_eq!(abbreviate(&once), once);
        }
    }
}
