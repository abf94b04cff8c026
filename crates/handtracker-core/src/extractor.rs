use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A newline, any whitespace, then another newline: at least one blank line.
    static ref BLANK_LINE_RUN: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Split the contents of one hand history file into candidate hand blocks.
///
/// Blocks are separated by one or more blank lines. Each block is trimmed and
/// blocks that end up empty are dropped, so whitespace-only input yields nothing.
pub fn split_hands(text: &str) -> impl Iterator<Item = &str> {
    BLANK_LINE_RUN
        .split(text.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        let text = "Hand #1\nfoo\n\nHand #2\nbar\n\n\n\nHand #3";
        let blocks: Vec<&str> = split_hands(text).collect();
        assert_eq!(blocks, vec!["Hand #1\nfoo", "Hand #2\nbar", "Hand #3"]);
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let text = "first\n   \t\nsecond\r\n\r\nthird";
        let blocks: Vec<&str> = split_hands(text).collect();
        assert_eq!(blocks, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_no_separator_is_single_block() {
        let text = "\n\n  line one\nline two  \n\n";
        let blocks: Vec<&str> = split_hands(text).collect();
        assert_eq!(blocks, vec!["line one\nline two"]);
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        assert_eq!(split_hands("").count(), 0);
        assert_eq!(split_hands(" \n\n\t\n ").count(), 0);
    }
}
