//! Extension-driven content rendering for Folio.
//!
//! The renderer maps a document's [`Extension`](folio_types::Extension) to a
//! [`RenderStrategy`] and produces the response body and content type. The
//! mapping is total: every extension yields a strategy, and unknown
//! extensions yield [`RenderStrategy::Reject`].

pub mod renderer;

pub use renderer::{
    ContentRenderer, RenderError, RenderStrategy, Rendered, HTML_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
