/// Headings whose text is broken into per-character spans at startup.
pub const SPLIT_SELECTOR: &str = "h1, h2, .edu h3";

/// Class on each generated character span.
pub const CHAR_CLASS: &str = "char";

/// One cell per character; spaces become no-break spaces so the spans keep
/// their width.
pub fn char_cells(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c == ' ' { '\u{a0}' } else { c })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_are_kept_as_nbsp() {
        assert_eq!(char_cells("Hi there"), vec!["H", "i", "\u{a0}", "t", "h", "e", "r", "e"]);
    }

    #[test]
    fn markup_characters_stay_literal() {
        assert_eq!(char_cells("<b>"), vec!["<", "b", ">"]);
        assert!(char_cells("").is_empty());
    }
}
