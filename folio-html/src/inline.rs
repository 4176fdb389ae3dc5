//! Inline rendering: text spans and their attribute stacks.

use folio_model::{to_no_dash_id, Attr, TextSpan};
use log::debug;

use crate::converter::Converter;
use crate::escape::escape_html;
use crate::paths::safe_name;

pub(crate) const WORKSPACE_URL: &str = "https://www.notion.so/";

impl<'a> Converter<'a> {
    /// Renders one span. Attributes are processed in reverse declaration
    /// order, so the first-declared attribute wraps the text tightest:
    /// `[bold, link]` becomes `<a ..><strong>text</strong></a>`.
    ///
    /// Replacing attributes (page, user, date) contribute a fragment of
    /// their own and clear the span text.
    pub(crate) fn render_text_span(&mut self, span: &TextSpan) {
        let mut open = String::new();
        let mut close = String::new();
        let mut text: &str = &span.text;
        for attr in span.attrs.iter().rev() {
            match attr {
                Attr::Bold => {
                    open.push_str("<strong>");
                    close = format!("</strong>{close}");
                }
                Attr::Italic => {
                    open.push_str("<em>");
                    close = format!("</em>{close}");
                }
                Attr::Strikethrough => {
                    open.push_str("<del>");
                    close = format!("</del>{close}");
                }
                Attr::Code => {
                    open.push_str("<code>");
                    close = format!("</code>{close}");
                }
                Attr::Highlight(color) => {
                    open.push_str(&format!(r#"<mark class="highlight-{color}">"#));
                    close = format!("</mark>{close}");
                }
                Attr::Link(uri) => {
                    let uri = self.rewrite_url(uri);
                    if uri.is_empty() {
                        open.push_str("<a>");
                    } else {
                        open.push_str(&format!(r#"<a href="{}">"#, escape_html(&uri)));
                    }
                    close = format!("</a>{close}");
                }
                Attr::Page(page_id) => {
                    let fragment = self.page_link_fragment(page_id);
                    open.push_str(&fragment);
                    text = "";
                }
                Attr::User(user_id) => {
                    let name = self.resolve_user_name(user_id);
                    open.push_str(&format!(
                        r#"<span class="user">@{}</span>"#,
                        escape_html(&name)
                    ));
                    text = "";
                }
                Attr::Date(date) => {
                    open.push_str(&format!("<time>@{}</time>", escape_html(&date.format())));
                    text = "";
                }
                Attr::Comment(_) => {
                    // threads carry no visible styling
                }
            }
        }
        let escaped = escape_html(text);
        self.out(&open);
        self.out(&escaped);
        self.out(&close);
    }

    pub(crate) fn render_text_spans(&mut self, spans: &[TextSpan]) {
        for span in spans {
            self.render_text_span(span);
        }
    }

    /// Renders spans into a capture buffer and returns the markup as a
    /// string instead of writing it to the active output.
    pub(crate) fn get_inline_content(&mut self, spans: &[TextSpan]) -> String {
        if spans.is_empty() {
            return String::new();
        }
        self.push_buffer();
        self.render_text_spans(spans);
        self.pop_buffer()
    }

    /// Builds the permalink fragment for an inline page reference:
    /// `https://www.notion.so/{Title-Slug-}{id}` with the title slugged
    /// and dashes stripped from the id. Falls back to the bare id when
    /// the page cannot be resolved.
    fn page_link_fragment(&self, page_id: &str) -> String {
        let mut title = String::new();
        if let Some(block) = self.page.block_by_id(page_id) {
            title = block.title.clone();
        } else if let Some(page) = self.find_page_by_id(page_id) {
            title = page.title().to_string();
        } else {
            debug!("page reference {page_id} did not resolve");
        }
        let mut rel = to_no_dash_id(page_id);
        if !title.is_empty() {
            rel = format!("{}-{rel}", safe_name(&title).replace(' ', "-"));
        }
        let uri = self.rewrite_url(&format!("{WORKSPACE_URL}{rel}"));
        format!(r#"<a href="{}">{}</a>"#, escape_html(&uri), escape_html(&title))
    }

    fn resolve_user_name(&self, user_id: &str) -> String {
        match self.page.user_by_id(user_id) {
            Some(user) => user.full_name(),
            None => {
                debug!("user reference {user_id} did not resolve");
                String::new()
            }
        }
    }
}
