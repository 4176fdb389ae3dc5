//! The conversion engine: traversal state, buffer stack, rule dispatch
//! and the per-page entry point.
//!
//! A [`Converter`] borrows one decoded [`Page`] and walks its block
//! tree depth-first. Each block kind maps to one rendering rule; rules
//! append markup to the active output buffer and recurse into children
//! through [`Converter::render_children`], which keeps the sibling
//! window (previous/next block of the one being rendered) intact
//! across nesting levels.

use std::collections::HashMap;
use std::path::PathBuf;

use folio_model::{to_no_dash_id, Block, BlockKind, Page};
use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::error::RenderError;
use crate::escape::escape_html;
use crate::katex;

type UrlRewriter<'a> = Box<dyn Fn(&str) -> String + 'a>;
type BlockOverride<'a> = Box<dyn FnMut(&mut String, &Block) -> bool + 'a>;
type RenderFn<'a> = fn(&mut Converter<'a>, &'a Block) -> Result<(), RenderError>;

/// Behavior switches for a conversion. The zero value renders a bare
/// `<article>` fragment, fails on unsupported blocks and leaves
/// equations un-typeset.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Emit a complete HTML document with the embedded stylesheet
    /// instead of just the `<article>` fragment.
    pub full_document: bool,
    /// Prefix each heading with an anchor link to its own id.
    pub heading_anchors: bool,
    /// Align output with the service's own exporter: implies
    /// `render_equations` and drops blocks the exporter skips.
    pub exporter_compat: bool,
    /// Typeset equation blocks through the katex CLI.
    pub render_equations: bool,
    /// Explicit katex binary location; PATH is searched when unset.
    pub katex_path: Option<PathBuf>,
    /// What to do with block kinds that have no rendering rule.
    pub unsupported_blocks: UnsupportedBlocks,
}

/// Policy for block kinds without a rendering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedBlocks {
    /// Abort the conversion with [`RenderError::UnsupportedBlock`].
    #[default]
    Fail,
    /// Log a warning and emit a placeholder `<div>` instead.
    Placeholder,
}

/// One page-to-HTML conversion.
///
/// The converter is reusable: [`Converter::to_html`] resets all
/// traversal state on entry, so calling it twice with the same
/// configuration produces identical output.
pub struct Converter<'a> {
    pub(crate) page: &'a Page,
    /// Behavior switches, read during [`Converter::to_html`].
    pub options: HtmlOptions,
    url_rewriter: Option<UrlRewriter<'a>>,
    block_override: Option<BlockOverride<'a>>,
    related_pages: &'a [Page],
    related_index: OnceCell<HashMap<String, usize>>,

    buf: String,
    bufs: Vec<String>,
    siblings: &'a [Block],
    sibling_idx: usize,
    pub(crate) list_no: u32,
    /// Safe names of the ancestor pages of the block being rendered,
    /// outermost first. Feeds relative path construction.
    pub(crate) page_trail: Vec<String>,
    pub(crate) katex_bin: Option<PathBuf>,
    pub(crate) katex_css_imported: bool,
}

impl<'a> Converter<'a> {
    pub fn new(page: &'a Page) -> Converter<'a> {
        Converter {
            page,
            options: HtmlOptions::default(),
            url_rewriter: None,
            block_override: None,
            related_pages: &[],
            related_index: OnceCell::new(),
            buf: String::new(),
            bufs: Vec::new(),
            siblings: &[],
            sibling_idx: 0,
            list_no: 0,
            page_trail: Vec::new(),
            katex_bin: None,
            katex_css_imported: false,
        }
    }

    pub fn with_options(page: &'a Page, options: HtmlOptions) -> Converter<'a> {
        let mut converter = Converter::new(page);
        converter.options = options;
        converter
    }

    /// Hook applied to every URL the renderer emits, e.g. to point
    /// workspace links at locally exported files.
    pub fn with_url_rewriter(mut self, rewrite: impl Fn(&str) -> String + 'a) -> Converter<'a> {
        self.url_rewriter = Some(Box::new(rewrite));
        self
    }

    /// Hook consulted before every block. Returning `true` claims the
    /// block: the hook has written whatever output it wants and the
    /// built-in rule is skipped. Children are not visited either, so a
    /// claiming hook takes over the whole subtree.
    pub fn with_block_override(
        mut self,
        hook: impl FnMut(&mut String, &Block) -> bool + 'a,
    ) -> Converter<'a> {
        self.block_override = Some(Box::new(hook));
        self
    }

    /// Other pages of the same export, used to resolve cross-page
    /// references by id.
    pub fn with_related_pages(mut self, pages: &'a [Page]) -> Converter<'a> {
        self.related_pages = pages;
        self.related_index = OnceCell::new();
        self
    }

    /// Converts the page, returning the rendered markup.
    pub fn to_html(&mut self) -> Result<String, RenderError> {
        if self.options.exporter_compat {
            self.options.render_equations = true;
        }
        self.katex_bin = if self.options.render_equations {
            Some(katex::resolve_binary(self.options.katex_path.as_deref())?)
        } else {
            None
        };
        self.buf = String::new();
        self.bufs.clear();
        self.siblings = &[];
        self.sibling_idx = 0;
        self.list_no = 0;
        self.page_trail.clear();
        self.katex_css_imported = false;

        let page = self.page;
        self.push_buffer();
        self.render_block(&page.root)?;
        Ok(self.pop_buffer())
    }

    // ---- output buffers ----

    /// Appends to the active output buffer.
    pub(crate) fn out(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Starts a fresh capture buffer; writes go there until the
    /// matching [`Converter::pop_buffer`].
    pub(crate) fn push_buffer(&mut self) {
        let prior = std::mem::take(&mut self.buf);
        self.bufs.push(prior);
    }

    /// Ends the innermost capture scope and returns its content.
    /// Popping without a matching push is a bug in the calling rule.
    pub(crate) fn pop_buffer(&mut self) -> String {
        let outer = self.bufs.pop().expect("buffer stack underflow");
        std::mem::replace(&mut self.buf, outer)
    }

    // ---- sibling window ----

    /// The block before the one currently being rendered, within the
    /// same parent.
    pub fn prev_block(&self) -> Option<&'a Block> {
        if self.sibling_idx == 0 {
            return None;
        }
        self.siblings.get(self.sibling_idx - 1)
    }

    /// The block after the one currently being rendered, within the
    /// same parent.
    pub fn next_block(&self) -> Option<&'a Block> {
        self.siblings.get(self.sibling_idx + 1)
    }

    pub(crate) fn prev_block_is(&self, kind: &BlockKind) -> bool {
        self.prev_block().map_or(false, |b| b.kind == *kind)
    }

    // ---- link helpers ----

    pub(crate) fn rewrite_url(&self, uri: &str) -> String {
        match &self.url_rewriter {
            Some(rewrite) => rewrite(uri),
            None => uri.to_string(),
        }
    }

    /// Writes an `<a>` element. The href goes through the URL rewriter,
    /// both href and text are escaped, and an empty href yields a bare
    /// `<a>` like the service's exporter produces.
    pub(crate) fn a(&mut self, uri: &str, text: &str, cls: &str) {
        let uri = escape_html(&self.rewrite_url(uri));
        let text = escape_html(text);
        let cls = if cls.is_empty() {
            String::new()
        } else {
            format!(r#" class="{cls}""#)
        };
        if uri.is_empty() {
            self.out(&format!("<a{cls}>{text}</a>"));
        } else {
            self.out(&format!(r#"<a{cls} href="{uri}">{text}</a>"#));
        }
    }

    /// Looks up a related page by id, with or without dashes.
    pub(crate) fn find_page_by_id(&self, id: &str) -> Option<&'a Page> {
        if self.related_pages.is_empty() {
            return None;
        }
        let pages = self.related_pages;
        let index = self.related_index.get_or_init(|| {
            let mut map = HashMap::new();
            for (i, page) in pages.iter().enumerate() {
                map.insert(to_no_dash_id(page.id()), i);
            }
            map
        });
        let i = *index.get(&to_no_dash_id(id))?;
        pages.get(i)
    }

    // ---- traversal ----

    pub(crate) fn render_block(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if let Some(hook) = self.block_override.as_mut() {
            if hook(&mut self.buf, block) {
                return Ok(());
            }
        }
        match Self::rule_for(&block.kind) {
            Some(rule) => rule(self, block),
            None => self.render_unsupported(block),
        }
    }

    /// Renders a block's children, making them the active sibling
    /// window for the duration. Children of plain text blocks are
    /// wrapped in an indentation container.
    pub(crate) fn render_children(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if block.content.is_empty() {
            return Ok(());
        }
        let indent = block.kind == BlockKind::Text;
        if indent {
            self.out(r#"<div class="indented">"#);
        }
        let saved_siblings = std::mem::replace(&mut self.siblings, &block.content);
        let saved_idx = self.sibling_idx;
        let mut result = Ok(());
        for (i, child) in block.content.iter().enumerate() {
            self.sibling_idx = i;
            result = self.render_block(child);
            if result.is_err() {
                break;
            }
        }
        self.siblings = saved_siblings;
        self.sibling_idx = saved_idx;
        result?;
        if indent {
            self.out("</div>");
        }
        Ok(())
    }

    fn render_unsupported(&mut self, block: &'a Block) -> Result<(), RenderError> {
        match self.options.unsupported_blocks {
            UnsupportedBlocks::Fail => Err(RenderError::UnsupportedBlock {
                kind: block.kind.wire_name().to_string(),
                id: block.id.clone(),
            }),
            UnsupportedBlocks::Placeholder => {
                warn!("no rendering rule for block '{}' ({})", block.kind, block.id);
                self.out(&format!(
                    "<div>unsupported block '{}'</div>",
                    escape_html(block.kind.wire_name())
                ));
                Ok(())
            }
        }
    }

    pub(crate) fn render_factory(&mut self, block: &'a Block) -> Result<(), RenderError> {
        debug!("skipping template button {}", block.id);
        Ok(())
    }

    fn rule_for(kind: &BlockKind) -> Option<RenderFn<'a>> {
        match kind {
            BlockKind::Page => Some(Self::render_page),
            BlockKind::Text => Some(Self::render_text),
            BlockKind::Header => Some(Self::render_header),
            BlockKind::SubHeader => Some(Self::render_sub_header),
            BlockKind::SubSubHeader => Some(Self::render_sub_sub_header),
            BlockKind::BulletedList => Some(Self::render_bulleted_list),
            BlockKind::NumberedList => Some(Self::render_numbered_list),
            BlockKind::Todo => Some(Self::render_todo),
            BlockKind::Toggle => Some(Self::render_toggle),
            BlockKind::Quote => Some(Self::render_quote),
            BlockKind::Divider => Some(Self::render_divider),
            BlockKind::Code => Some(Self::render_code),
            BlockKind::Callout => Some(Self::render_callout),
            BlockKind::Equation => Some(Self::render_equation),
            BlockKind::ColumnList => Some(Self::render_column_list),
            BlockKind::Column => Some(Self::render_column),
            BlockKind::TableOfContents => Some(Self::render_table_of_contents),
            BlockKind::Breadcrumb => Some(Self::render_breadcrumb),
            BlockKind::Bookmark => Some(Self::render_bookmark),
            BlockKind::Image => Some(Self::render_image),
            BlockKind::Audio => Some(Self::render_audio),
            BlockKind::Video => Some(Self::render_video),
            BlockKind::Embed => Some(Self::render_embed),
            BlockKind::Gist
            | BlockKind::Maps
            | BlockKind::Codepen
            | BlockKind::Tweet
            | BlockKind::Figma => Some(Self::render_generic_embed),
            BlockKind::File | BlockKind::Pdf => Some(Self::render_attachment),
            BlockKind::Drive => Some(Self::render_drive),
            BlockKind::CollectionView => Some(Self::render_collection_view),
            BlockKind::CollectionViewPage => Some(Self::render_collection_view_page),
            BlockKind::Factory => Some(Self::render_factory),
            BlockKind::Comment | BlockKind::Unrecognized(_) => None,
        }
    }
}
