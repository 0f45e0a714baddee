//! Styled status lines.
//!
//! Status goes to stderr so stdout carries only the readback and timing
//! data lines.

use console::Style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

fn render(line: String, style: &Style, color: bool) -> String {
    if color {
        style.apply_to(line).to_string()
    } else {
        line
    }
}

/// `[TAG] text`, with only the tag styled.
fn tagged(tag: &str, text: &str, style: &Style, color: bool) -> String {
    format!("{} {text}", render(tag.to_string(), style, color))
}

/// Print a section header.
pub fn print_header(text: &str) {
    let style = Style::new().bold().cyan();
    eprintln!("{}", render(format!("=== {text} ==="), &style, !is_color_disabled()));
}

/// Print a success message.
pub fn print_success(text: &str) {
    let style = Style::new().green().bold();
    eprintln!("{}", tagged("[OK]", text, &style, !is_color_disabled()));
}

/// Print an error message.
pub fn print_error(text: &str) {
    let style = Style::new().red().bold();
    eprintln!("{}", tagged("[ERROR]", text, &style, !is_color_disabled()));
}
