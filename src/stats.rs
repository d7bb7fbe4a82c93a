use serde::Serialize;
use std::fmt;

/// Descriptive statistics of a processed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextStats {
    /// Number of whitespace-delimited tokens
    pub word_count: usize,
    /// Number of characters
    pub char_count: usize,
    /// Number of characters once literal spaces are removed
    pub char_count_no_spaces: usize,
    /// Display name of the selected language
    pub language_display_name: String,
}

/// Compute statistics for `text`.
///
/// Only U+0020 is discounted in `char_count_no_spaces`; tabs and newlines
/// still count.
pub fn compute_stats(text: &str, language_display_name: &str) -> TextStats {
    let char_count = text.chars().count();
    let spaces = text.chars().filter(|c| *c == ' ').count();

    TextStats {
        word_count: text.split_whitespace().count(),
        char_count,
        char_count_no_spaces: char_count - spaces,
        language_display_name: language_display_name.to_string(),
    }
}

impl TextStats {
    /// Heading line of the rendered block
    pub const HEADING: &'static str = "Text statistics:";
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::HEADING)?;
        writeln!(f, "        Words: {}", self.word_count)?;
        writeln!(f, "        Characters: {}", self.char_count)?;
        writeln!(f, "        Characters (no spaces): {}", self.char_count_no_spaces)?;
        writeln!(f, "        Selected language: {}", self.language_display_name)
    }
}
