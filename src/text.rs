/// Uppercase the first letter of each whitespace-separated word, leaving the
/// rest unchanged: "school of evocation" → "School Of Evocation".
pub fn title_case(s: &str) -> String {
    capitalize_words(s)
}

/// Uppercase the first alphabetic character of each word, rest unchanged.
/// Words led by digits keep them: "3rd level" → "3Rd Level".
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut done = false;
    word.chars()
        .map(|c| {
            if !done && c.is_alphabetic() {
                done = true;
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Truncate to at most `max` chars total, replacing the overflow with "...".
pub fn truncate(s: &str, max: usize) -> String {
    const ELLIPSIS: &str = "...";
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_plain_word() {
        assert_eq!(capitalize_words("evocation"), "Evocation");
    }

    #[test]
    fn capitalize_digit_led_word() {
        assert_eq!(capitalize_words("3rd level"), "3Rd Level");
    }

    #[test]
    fn capitalize_leaves_rest_unchanged() {
        assert_eq!(capitalize_words("McGuffin"), "McGuffin");
    }

    #[test]
    fn title_case_multi_word() {
        assert_eq!(title_case("blood hunter"), "Blood Hunter");
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("Tashas Otherworldly Guise", 15), "Tashas Other...");
        assert_eq!(truncate("Tashas Otherworldly Guise", 15).chars().count(), 15);
    }

    #[test]
    fn truncate_short_unchanged() {
        assert_eq!(truncate("Fireball", 15), "Fireball");
    }
}
