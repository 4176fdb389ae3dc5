//! HTML renderer for Notion-style block documents.
//!
//! Takes a decoded [`Page`] from `folio-model` and walks its block tree
//! depth-first, emitting semantic HTML that mirrors what the service's
//! own exporter produces: the same element shapes, class names, id
//! attributes and file-path conventions, so output can be diffed
//! against reference exports.
//!
//! The basic flow:
//!
//! ```ignore
//! let page: Page = serde_json::from_str(&raw)?;
//! let html = folio_html::render_page(&page, HtmlOptions::default())?;
//! ```
//!
//! For anything beyond the defaults, build a [`Converter`] directly and
//! attach hooks: a URL rewriter applied to every emitted link, a block
//! override that can claim whole subtrees, and related pages for
//! cross-page reference resolution.
//!
//! File structure:
//!
//! ```text
//! converter.rs - traversal state, buffer stack, rule dispatch
//! blocks.rs    - structural rules (pages, text, headings, lists, ...)
//! inline.rs    - text spans and attribute nesting
//! media.rs     - bookmarks, embeds, files, images
//! table.rs     - collection tables and collection page cards
//! toc.rs       - table-of-contents scan and indent rule
//! katex.rs     - external equation typesetting
//! paths.rs     - exported file and directory naming
//! escape.rs    - entity escaping, class attribute cleanup
//! ```
//!
//! Library Choices:
//!
//! We use `which` to locate the katex CLI before any rendering starts,
//! so a misconfigured setup fails fast instead of half-way through a
//! page. `log` carries recoverable diagnostics (skipped blocks,
//! unresolved references, failed typesetting); strict failures surface
//! as [`RenderError`]. `once_cell` backs the lazily built related-page
//! index.

mod blocks;
pub mod converter;
pub mod error;
pub mod escape;
mod inline;
mod katex;
mod media;
pub mod paths;
mod table;
mod toc;

pub use converter::{Converter, HtmlOptions, UnsupportedBlocks};
pub use error::RenderError;

use folio_model::Page;

/// Converts one page with the given options.
pub fn render_page(page: &Page, options: HtmlOptions) -> Result<String, RenderError> {
    Converter::with_options(page, options).to_html()
}
