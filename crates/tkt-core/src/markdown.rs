//! Markdown rendering for ticket descriptions and comments.
//!
//! Conversion is delegated entirely to pulldown-cmark; there is no custom
//! parsing or sanitization here.

use pulldown_cmark::{Event, Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders markdown to an HTML string.
pub fn render(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Flattens markdown to plain text for single-line previews.
pub fn render_plain(text: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markup() {
        let html = render("# Title\n\nSome *emphasis* and `code`.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_render_strikethrough_extension() {
        let html = render("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_plain_strips_markup() {
        assert_eq!(render_plain("Some *emphasis* and `code`."), "Some emphasis and code.");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(""), "");
        assert_eq!(render_plain(""), "");
    }
}
