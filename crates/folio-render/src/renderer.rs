use folio_types::{DocumentName, Extension};
use pulldown_cmark::{html, Options, Parser};
use thiserror::Error;

/// Content type for documents served verbatim.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Content type for rendered markdown and HTML pages.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Errors produced while rendering a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The document's extension has no rendering strategy.
    #[error("no renderer for {name}")]
    Unsupported { name: DocumentName },
}

/// How a document of a given extension is turned into a response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Serve the bytes unchanged as plain text.
    Plain,
    /// Convert CommonMark to HTML.
    Markdown,
    /// Refuse to serve the document.
    Reject,
}

impl RenderStrategy {
    pub fn for_extension(extension: Extension) -> Self {
        match extension {
            Extension::Text => Self::Plain,
            Extension::Markdown => Self::Markdown,
            Extension::Unknown => Self::Reject,
        }
    }
}

/// A rendered response body with its content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Renders document content according to its extension.
///
/// Rendering is a pure function of the name and content.
#[derive(Clone, Debug, Default)]
pub struct ContentRenderer {
    /// Tables, strikethrough and task lists on top of CommonMark.
    extended_markdown: bool,
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extended_markdown(mut self, enabled: bool) -> Self {
        self.extended_markdown = enabled;
        self
    }

    fn markdown_options(&self) -> Options {
        if self.extended_markdown {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    pub fn render(&self, name: &DocumentName, content: &[u8]) -> Result<Rendered, RenderError> {
        match RenderStrategy::for_extension(name.extension()) {
            RenderStrategy::Plain => Ok(Rendered {
                body: content.to_vec(),
                content_type: TEXT_CONTENT_TYPE,
            }),
            RenderStrategy::Markdown => Ok(Rendered {
                body: self.markdown_to_html(&String::from_utf8_lossy(content)).into_bytes(),
                content_type: HTML_CONTENT_TYPE,
            }),
            RenderStrategy::Reject => {
                tracing::debug!(document = %name, "no render strategy for extension");
                Err(RenderError::Unsupported { name: name.clone() })
            }
        }
    }

    pub fn markdown_to_html(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.markdown_options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> DocumentName {
        DocumentName::parse(raw).unwrap()
    }

    #[test]
    fn strategy_is_total() {
        assert_eq!(RenderStrategy::for_extension(Extension::Text), RenderStrategy::Plain);
        assert_eq!(RenderStrategy::for_extension(Extension::Markdown), RenderStrategy::Markdown);
        assert_eq!(RenderStrategy::for_extension(Extension::Unknown), RenderStrategy::Reject);
    }

    #[test]
    fn text_is_passed_through() {
        let content = b"# not a header\n<b>raw</b>\n";
        let out = ContentRenderer::new().render(&name("hello.txt"), content).unwrap();
        assert_eq!(out.body, content);
        assert_eq!(out.content_type, TEXT_CONTENT_TYPE);
    }

    #[test]
    fn markdown_is_rendered() {
        let out = ContentRenderer::new()
            .render(&name("about.md"), b"# Hello\n\n**This is bold**")
            .unwrap();
        assert_eq!(out.content_type, HTML_CONTENT_TYPE);
        assert_eq!(
            String::from_utf8(out.body).unwrap(),
            "<h1>Hello</h1>\n<p><strong>This is bold</strong></p>\n"
        );
    }

    #[test]
    fn markdown_emphasis_and_paragraphs() {
        let html = ContentRenderer::new().markdown_to_html("one *two*\n\nthree");
        assert_eq!(html, "<p>one <em>two</em></p>\n<p>three</p>\n");
    }

    #[test]
    fn extended_markdown_renders_strikethrough() {
        let plain = ContentRenderer::new().markdown_to_html("~~gone~~");
        assert!(!plain.contains("<del>"));
        let extended = ContentRenderer::new()
            .with_extended_markdown(true)
            .markdown_to_html("~~gone~~");
        assert_eq!(extended, "<p><del>gone</del></p>\n");
    }

    #[test]
    fn markdown_rendering_is_deterministic() {
        let renderer = ContentRenderer::new();
        let a = renderer.render(&name("a.md"), b"## Title\n- item").unwrap();
        let b = renderer.render(&name("a.md"), b"## Title\n- item").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = ContentRenderer::new().render(&name("report.pdf"), b"%PDF").unwrap_err();
        assert_eq!(err, RenderError::Unsupported { name: name("report.pdf") });
        assert!(ContentRenderer::new().render(&name("README"), b"").is_err());
    }
}
