//! Formatting of generated study material.

/// Column limit applied to generated material.
pub const MATERIAL_WIDTH: usize = 100;

/// Word wrap that keeps existing line breaks.
///
/// Each input line is wrapped on its own and blank lines survive as
/// paragraph separators. A word longer than `width` gets a line to itself
/// and is never split, so URLs stay intact.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = textwrap::Options::new(width.max(1)).break_words(false);
    textwrap::fill(text, options)
}
