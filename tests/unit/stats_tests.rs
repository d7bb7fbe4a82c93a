/*!
 * Tests for text statistics
 */

use pdfaudio::stats::{compute_stats, TextStats};

/// Test the documented counting rules on a simple sentence
#[test]
fn test_compute_stats_withHelloWorld_shouldCountWordsAndChars() {
    let stats = compute_stats("Hello world", "Inglés");
    assert_eq!(stats.word_count, 2);
    assert_eq!(stats.char_count, 11);
    assert_eq!(stats.char_count_no_spaces, 10);
    assert_eq!(stats.language_display_name, "Inglés");
}

/// Test counting of multi-byte characters
#[test]
fn test_compute_stats_withNonAsciiText_shouldCountScalarValues() {
    let stats = compute_stats("añadió 日本語", "Japonés");
    assert_eq!(stats.char_count, 10);
    assert_eq!(stats.char_count_no_spaces, 9);
    assert_eq!(stats.word_count, 2);
}

/// Test the relation between the counts on varied inputs
#[test]
fn test_compute_stats_shouldHoldCountIdentities() {
    for text in ["", " ", "a  b", "\tx\ny ", "una frase   con    espacios", "中文 文本"] {
        let stats = compute_stats(text, "Español");
        assert!(stats.char_count_no_spaces <= stats.char_count, "{:?}", text);
        assert_eq!(
            stats.char_count - stats.char_count_no_spaces,
            text.chars().filter(|c| *c == ' ').count(),
            "{:?}",
            text
        );
        assert_eq!(stats.word_count == 0, text.trim().is_empty(), "{:?}", text);
    }
}

/// Test that the computation is deterministic
#[test]
fn test_compute_stats_calledTwice_shouldBeEqual() {
    let text = "Primera línea\nSegunda línea";
    assert_eq!(compute_stats(text, "Español"), compute_stats(text, "Español"));
}

/// Test the rendered block
#[test]
fn test_display_shouldRenderIndentedBlock() {
    let rendered = compute_stats("Hello world", "Francés").to_string();
    assert_eq!(
        rendered,
        "Text statistics:\n        Words: 2\n        Characters: 11\n        Characters (no spaces): 10\n        Selected language: Francés\n"
    );
    assert!(rendered.starts_with(TextStats::HEADING));
}
