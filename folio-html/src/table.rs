//! Rendering rules for collections: inline tables and stand-alone
//! collection page cards.
//!
//! Row cells are kept as raw JSON in the model and only decoded here,
//! so a page whose tables are never rendered never pays for parsing
//! them. A malformed cell is corrupt input and aborts the conversion;
//! a cell that is merely absent renders empty.

use folio_model::{parse_text_spans, Block, ColumnKind};
use log::warn;

use crate::converter::Converter;
use crate::error::RenderError;
use crate::escape::escape_html;
use crate::paths;

impl<'a> Converter<'a> {
    pub(crate) fn render_collection_view(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let Some(set) = block.collection_views.first() else {
            warn!("collection view block {} has no views", block.id);
            return Ok(());
        };
        if set.view.visible_columns.is_empty() {
            warn!("collection view {} has no column layout", set.view.id);
            return Ok(());
        }
        let collection = &set.collection;

        self.out(&format!(r#"<div id="{}" class="collection-content">"#, block.id));
        self.out(&format!(
            r#"<h4 class="collection-title">{}</h4>"#,
            collection.name
        ));
        self.out(r#"<table class="collection-content">"#);

        self.out("<thead><tr>");
        for key in &set.view.visible_columns {
            let name = collection
                .schema
                .get(key)
                .map(|column| escape_html(&column.name))
                .unwrap_or_default();
            self.out(&format!("<th>{name}</th>"));
        }
        self.out("</tr></thead>");

        self.out("<tbody>");
        for row in &set.rows {
            self.out(&format!(r#"<tr id="{}">"#, row.id));
            for key in &set.view.visible_columns {
                let spans = match row.properties.get(key) {
                    Some(value) => parse_text_spans(value)?,
                    None => Vec::new(),
                };
                let mut cell = self.get_inline_content(&spans);
                match collection.schema.get(key).map(|column| &column.kind) {
                    Some(ColumnKind::Title) => {
                        let row_title = spans.first().map(|s| s.text.as_str()).unwrap_or("");
                        let uri = self.rewrite_url(&paths::title_cell_path(
                            &self.page_trail,
                            &collection.name,
                            row_title,
                        ));
                        if cell.is_empty() {
                            cell = "Untitled".to_string();
                        }
                        cell = format!(r#"<a href="{}">{cell}</a>"#, escape_html(&uri));
                    }
                    Some(ColumnKind::MultiSelect) => {
                        // tag order is reversed relative to the stored value
                        let mut tags = String::new();
                        for value in cell.split(',').rev() {
                            let value = escape_html(value);
                            if value.is_empty() {
                                continue;
                            }
                            tags.push_str(&format!(
                                r#"<span class="selected-value">{value}</span>"#
                            ));
                        }
                        cell = tags;
                    }
                    _ => {}
                }
                self.out(&format!(r#"<td class="cell-{}">{cell}</td>"#, escape_html(key)));
            }
            self.out("</tr>\n");
        }
        self.out("</tbody>");

        self.out("</table>");
        self.out("</div>");
        Ok(())
    }

    /// A collection page below the root renders as a card, like a
    /// sub-page link but resolved through the collection's name.
    pub(crate) fn render_collection_view_page(
        &mut self,
        block: &'a Block,
    ) -> Result<(), RenderError> {
        let Some(set) = block.collection_views.first() else {
            warn!("collection view page {} has no collection", block.id);
            return Ok(());
        };
        let collection = &set.collection;
        let root_title = self.page.title().to_string();

        self.out(&format!(r#"<figure id="{}" class="link-to-page">"#, block.id));
        let uri = self.rewrite_url(&paths::collection_file_path(&root_title, &collection.name));
        self.out(&format!(r#"<a href="{}">"#, escape_html(&uri)));
        let icon = paths::collection_icon_path(&root_title, &collection.name, &collection.icon);
        self.out(&format!(r#"<img class="icon" src="{}"/>"#, escape_html(&icon)));
        self.out(&collection.name);
        self.out("</a>");
        self.out("</figure>");
        Ok(())
    }
}
