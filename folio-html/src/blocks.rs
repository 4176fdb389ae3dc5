//! Rendering rules for structural block kinds: pages, text, headings,
//! lists, toggles, callouts, code, equations and layout containers.
//!
//! Each rule writes its opening markup, renders inline content, then
//! recurses through [`Converter::render_children`] so nested blocks end
//! up inside the parent element the way the service's exporter nests
//! them.

use folio_model::{spans_to_text, Block, BlockKind};
use log::{debug, warn};

use crate::converter::Converter;
use crate::error::RenderError;
use crate::escape::{clean_attr, escape_html};
use crate::katex;
use crate::paths;

const PAGE_CSS: &str = include_str!("../css/page.css");

const KATEX_CSS_IMPORT: &str = "<style>@import url('https://cdnjs.cloudflare.com/ajax/libs/KaTeX/0.10.0/katex.min.css')</style>";

const HEADING_ANCHOR_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8" width="14" height="14"><path d="M1.5 4.5h5M3 2.5H2a1.5 1.5 0 0 0 0 3h1M5 2.5h1a1.5 1.5 0 0 1 0 3H5" fill="none" stroke="currentColor" stroke-linecap="round"/></svg>"#;

/// Class contributed by the block's color annotation, or an empty
/// string when the block is uncolored.
pub(crate) fn block_color_class(block: &Block) -> String {
    match block.format_str("block_color") {
        Some(color) if !color.is_empty() => format!("block-color-{color}"),
        _ => String::new(),
    }
}

impl<'a> Converter<'a> {
    // ---- pages ----

    pub(crate) fn render_page(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if block.id == self.page.root.id {
            self.render_root_page(block)
        } else {
            self.render_page_link(block);
            Ok(())
        }
    }

    fn render_root_page(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if self.options.full_document {
            self.out("<html>");
            self.out("<head>");
            self.out(r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#);
            self.out(&format!("<title>{}</title>", escape_html(&block.title)));
            self.out(&format!("<style>{PAGE_CSS}\t\n</style>"));
            self.out("</head>");
            self.out("<body>");
        }
        let font = block
            .format_str("page_font")
            .filter(|f| !f.is_empty())
            .unwrap_or("sans");
        self.out(&format!(r#"<article id="{}" class="page {font}">"#, block.id));
        self.render_page_header(block);
        self.out(r#"<div class="page-body">"#);
        self.page_trail.push(paths::safe_name(&block.title));
        let result = self.render_children(block);
        self.page_trail.pop();
        result?;
        self.out("</div>");
        self.out("</article>");
        if self.options.full_document {
            self.out("</body></html>");
        }
        Ok(())
    }

    fn render_page_header(&mut self, block: &'a Block) {
        self.out("<header>");
        let cover = block.format_str("page_cover").unwrap_or_default();
        if !cover.is_empty() {
            let position = (1.0 - block.format_f64("page_cover_position").unwrap_or(0.0)) * 100.0;
            let cover_url = escape_html(&paths::cover_image_url(cover, &block.title));
            self.out(&format!(
                r#"<img class="page-cover-image" src="{cover_url}" style="object-position:center {position}%"/>"#
            ));
        }
        let icon = block.format_str("page_icon").unwrap_or_default();
        if !icon.is_empty() {
            let with_cover = if cover.is_empty() {
                "undefined"
            } else {
                "page-header-icon-with-cover"
            };
            self.out(&format!(r#"<div class="page-header-icon {with_cover}">"#));
            self.render_icon(icon, block);
            self.out("</div>");
        }
        self.out(r#"<h1 class="page-title">"#);
        self.render_text_spans(&block.inline_content);
        self.out("</h1>");
        self.out("</header>");
    }

    /// Page icons are either an emoji or a URL of an uploaded image.
    fn render_icon(&mut self, icon: &str, block: &'a Block) {
        if paths::is_url(icon) {
            let file = paths::downloaded_file_name(icon, block, &self.page_trail);
            self.out(&format!(r#"<img class="icon" src="{}"/>"#, escape_html(&file)));
        } else {
            self.out(&format!(r#"<span class="icon">{icon}</span>"#));
        }
    }

    /// A page block below the root renders as a card linking to the
    /// sub-page's own exported file.
    fn render_page_link(&mut self, block: &'a Block) {
        let uri = self.rewrite_url(&paths::file_path_for_page(&self.page_trail, &block.title));
        let cls = clean_attr(&format!("{} link-to-page", block_color_class(block)));
        self.out(&format!(r#"<figure id="{}" class="{cls}">"#, block.id));
        self.out(&format!(r#"<a href="{}">"#, escape_html(&uri)));
        if let Some(icon) = block.format_str("page_icon") {
            self.render_icon(icon, block);
        }
        self.out(&escape_html(&block.title));
        self.out("</a>");
        self.out("</figure>");
    }

    // ---- text and headings ----

    pub(crate) fn render_text(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let cls = block_color_class(block);
        self.out(&format!(r#"<p id="{}" class="{cls}">"#, block.id));
        self.render_text_spans(&block.inline_content);
        self.render_children(block)?;
        self.out("</p>");
        Ok(())
    }

    pub(crate) fn render_header(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.render_heading_level(block, 1)
    }

    pub(crate) fn render_sub_header(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.render_heading_level(block, 2)
    }

    pub(crate) fn render_sub_sub_header(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.render_heading_level(block, 3)
    }

    fn render_heading_level(&mut self, block: &'a Block, level: u8) -> Result<(), RenderError> {
        let cls = block_color_class(block);
        self.out(&format!(r#"<h{level} id="{}" class="{cls}">"#, block.id));
        if self.options.heading_anchors {
            self.out(&format!(
                r##"<a class="header-anchor" href="#{}" aria-hidden="true">{HEADING_ANCHOR_SVG}</a>"##,
                block.id
            ));
        }
        self.render_text_spans(&block.inline_content);
        self.out(&format!("</h{level}>"));
        Ok(())
    }

    // ---- lists ----

    pub(crate) fn render_bulleted_list(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let cls = clean_attr(&format!("{} bulleted-list", block_color_class(block)));
        self.out(&format!(r#"<ul id="{}" class="{cls}">"#, block.id));
        self.out("<li>");
        self.render_text_spans(&block.inline_content);
        self.render_children(block)?;
        self.out("</li>");
        self.out("</ul>");
        Ok(())
    }

    /// Each numbered-list block is its own `<ol>`; continuity across
    /// adjacent siblings comes from the `start` attribute, which resets
    /// whenever the previous sibling is not a numbered list.
    pub(crate) fn render_numbered_list(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if self.prev_block_is(&BlockKind::NumberedList) {
            self.list_no += 1;
        } else {
            self.list_no = 1;
        }
        let cls = clean_attr(&format!("{} numbered-list", block_color_class(block)));
        self.out(&format!(
            r#"<ol id="{}" class="{cls}" start="{}">"#,
            block.id, self.list_no
        ));
        self.out("<li>");
        self.render_text_spans(&block.inline_content);
        self.render_children(block)?;
        self.out("</li>");
        self.out("</ol>");
        Ok(())
    }

    pub(crate) fn render_todo(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<ul id="{}" class="to-do-list">"#, block.id));
        self.out("<li>");
        let checkbox = if block.is_checked { "checkbox-on" } else { "checkbox-off" };
        self.out(&format!(r#"<div class="checkbox {checkbox}"></div>"#));
        let children_cls = if block.is_checked {
            "to-do-children-checked"
        } else {
            "to-do-children-unchecked"
        };
        self.out(&format!(r#"<span class="{children_cls}">"#));
        self.render_text_spans(&block.inline_content);
        self.out("</span>");
        self.render_children(block)?;
        self.out("</li>");
        self.out("</ul>");
        Ok(())
    }

    pub(crate) fn render_toggle(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let cls = clean_attr(&format!("{} toggle", block_color_class(block)));
        self.out(&format!(r#"<ul id="{}" class="{cls}">"#, block.id));
        self.out("<li>");
        self.out(r#"<details open="">"#);
        self.out("<summary>");
        self.render_text_spans(&block.inline_content);
        self.out("</summary>");
        self.render_children(block)?;
        self.out("</details>");
        self.out("</li>");
        self.out("</ul>");
        Ok(())
    }

    // ---- simple blocks ----

    pub(crate) fn render_quote(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<blockquote id="{}" class="">"#, block.id));
        self.render_text_spans(&block.inline_content);
        self.render_children(block)?;
        self.out("</blockquote>");
        Ok(())
    }

    pub(crate) fn render_divider(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<hr id="{}"/>"#, block.id));
        Ok(())
    }

    pub(crate) fn render_code(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<pre id="{}" class="code">"#, block.id));
        self.out(&format!("<code>{}</code>", escape_html(&block.title)));
        self.out("</pre>");
        Ok(())
    }

    pub(crate) fn render_callout(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let cls = clean_attr(&format!("{} callout", block_color_class(block)));
        self.out(&format!(
            r#"<figure class="{cls}" style="white-space:pre-wrap;display:flex" id="{}">"#,
            block.id
        ));
        let icon = block.format_str("page_icon").unwrap_or_default();
        self.out(&format!(
            r#"<div style="font-size:1.5em"><span class="icon">{icon}</span></div>"#
        ));
        self.out(r#"<div style="width:100%">"#);
        self.render_text_spans(&block.inline_content);
        self.out("</div>");
        self.out("</figure>");
        Ok(())
    }

    // ---- equations ----

    pub(crate) fn render_equation(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let Some(binary) = self.katex_bin.clone() else {
            self.render_raw_equation(block);
            return Ok(());
        };
        let source = spans_to_text(&block.inline_content);
        match katex::typeset(&binary, &source) {
            Ok(html) => {
                self.out(&format!(r#"<figure id="{}" class="equation">"#, block.id));
                if !self.katex_css_imported {
                    self.out(KATEX_CSS_IMPORT);
                    self.katex_css_imported = true;
                }
                self.out(r#"<div class="equation-container">"#);
                self.out(&html);
                self.out("</div>");
                self.out("</figure>");
            }
            Err(err) => {
                warn!("typesetting equation {} failed, keeping raw source: {err}", block.id);
                self.render_raw_equation(block);
            }
        }
        Ok(())
    }

    fn render_raw_equation(&mut self, block: &'a Block) {
        self.out(&format!(r#"<figure id="{}" class="equation">"#, block.id));
        self.render_text_spans(&block.inline_content);
        self.out("</figure>");
    }

    // ---- layout ----

    pub(crate) fn render_column_list(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if block.content.is_empty() {
            warn!("column list {} has no columns", block.id);
            return Ok(());
        }
        self.out(&format!(r#"<div id="{}" class="column-list">"#, block.id));
        self.render_children(block)?;
        self.out("</div>");
        Ok(())
    }

    pub(crate) fn render_column(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let ratio = block.format_f64("column_ratio").map_or(50.0, |r| r * 100.0);
        self.out(&format!(
            r#"<div id="{}" style="width:{ratio}%" class="column">"#,
            block.id
        ));
        self.render_children(block)?;
        self.out("</div>");
        Ok(())
    }

    pub(crate) fn render_breadcrumb(&mut self, block: &'a Block) -> Result<(), RenderError> {
        if self.options.exporter_compat {
            debug!("dropping breadcrumb {} from exporter-compat output", block.id);
            return Ok(());
        }
        self.out(&format!(
            "<div>'{}' is not implemented yet</div>",
            block.kind
        ));
        Ok(())
    }
}
