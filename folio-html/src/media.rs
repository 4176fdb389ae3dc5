//! Rendering rules for media and embed block kinds.

use folio_model::Block;

use crate::blocks::block_color_class;
use crate::converter::Converter;
use crate::error::RenderError;
use crate::escape::{clean_attr, escape_html};
use crate::paths;

impl<'a> Converter<'a> {
    fn render_caption(&mut self, block: &'a Block) {
        let Some(caption) = &block.caption else {
            return;
        };
        self.out("<figcaption>");
        self.render_text_spans(caption);
        self.out("</figcaption>");
    }

    pub(crate) fn render_bookmark(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<figure id="{}">"#, block.id));
        let cls = clean_attr(&format!("{} bookmark source", block_color_class(block)));
        self.out(&format!(r#"<div class="{cls}">"#));
        self.a(&block.link, &block.title, "");
        self.out("<br/>");
        self.a(&block.link, &block.link, "bookmark-href");
        self.out("</div>");
        self.render_caption(block);
        self.out("</figure>");
        Ok(())
    }

    /// Audio and video share one shape: a link to the uploaded copy
    /// when the block carries one, to the remote source otherwise.
    fn render_av_source(&mut self, block: &'a Block) {
        self.out(&format!(r#"<figure id="{}">"#, block.id));
        self.out(r#"<div class="source">"#);
        if block.source.is_empty() {
            self.out("<a></a>");
        } else {
            let file_name = if block.file_ids.is_empty() {
                block.source.clone()
            } else {
                paths::downloaded_file_name(&block.source, block, &self.page_trail)
            };
            self.a(&file_name, &block.source, "");
        }
        self.out("</div>");
        self.render_caption(block);
        self.out("</figure>");
    }

    pub(crate) fn render_audio(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.render_av_source(block);
        Ok(())
    }

    pub(crate) fn render_video(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.render_av_source(block);
        Ok(())
    }

    pub(crate) fn render_embed(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let uri = paths::file_or_source_url(block, &self.page_trail);
        self.a(&uri, &block.source, "");
        Ok(())
    }

    /// Third-party embeds (tweets, gists, pens, maps, design files)
    /// export as a plain link to the source.
    pub(crate) fn render_generic_embed(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.a(&block.source, &block.source, "");
        Ok(())
    }

    /// Uploaded files and PDFs link to their downloaded copy, labelled
    /// with the original source URL.
    pub(crate) fn render_attachment(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let uri = paths::downloaded_file_name(&block.source, block, &self.page_trail);
        self.a(&uri, &block.source, "");
        Ok(())
    }

    pub(crate) fn render_drive(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<figure id="{}">"#, block.id));
        self.out(r#"<div class="bookmark source">"#);
        let icon = block.format_str("drive_properties.icon").unwrap_or_default();
        self.out(&format!(
            r#"<img style="width:1em;height:1em;margin-right:0.5em;vertical-align:text-bottom" src="{}"/>"#,
            escape_html(icon)
        ));
        let doc_url = block.format_str("drive_properties.url").unwrap_or_default().to_string();
        let title = block.format_str("drive_properties.title").unwrap_or_default().to_string();
        self.a(&doc_url, &title, "");
        self.out("<br/>");
        self.a(&doc_url, &doc_url, "bookmark-href");
        self.out("</div>");
        self.render_caption(block);
        self.out("</figure>");
        Ok(())
    }

    pub(crate) fn render_image(&mut self, block: &'a Block) -> Result<(), RenderError> {
        self.out(&format!(r#"<figure id="{}" class="image">"#, block.id));
        let uri = self.rewrite_url(&paths::file_or_source_url(block, &self.page_trail));
        let uri = escape_html(&uri);
        let style = match block.format_f64("block_width") {
            Some(width) if width != 0.0 => format!(r#"style="width:{}px" "#, width as i64),
            _ => String::new(),
        };
        self.out(&format!(r#"<a href="{uri}"><img {style}src="{uri}"/></a>"#));
        self.render_caption(block);
        self.out("</figure>");
        Ok(())
    }
}
