//! Terminal syntax highlighting for generated skeletons.

use once_cell::sync::Lazy;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style, ThemeSet},
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};

use crate::error::{Result, SkelError};

/// Syntax definitions, loaded on first use.
static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
/// Bundled themes, loaded on first use.
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Theme used when none is named.
pub const DEFAULT_THEME: &str = "Solarized (dark)";

/// Highlight Rust source for a 24-bit colour terminal using [`DEFAULT_THEME`].
pub fn highlight_code(code: &str) -> Result<String> {
    highlight_with_theme(code, DEFAULT_THEME)
}

/// Highlight Rust source with a named bundled theme.
pub fn highlight_with_theme(code: &str, theme: &str) -> Result<String> {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension("rs")
        .ok_or_else(|| SkelError::Highlight("Rust syntax not found".to_string()))?;
    let theme = THEME_SET
        .themes
        .get(theme)
        .ok_or_else(|| SkelError::Highlight(format!("unknown theme: {theme}")))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut output = String::with_capacity(code.len());
    for line in LinesWithEndings::from(code) {
        let ranges: Vec<(Style, &str)> = highlighter.highlight_line(line, &SYNTAX_SET)?;
        output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
    }
    // Reset attributes so the terminal is left in its default state.
    output.push_str("\x1b[0m");
    Ok(output)
}
