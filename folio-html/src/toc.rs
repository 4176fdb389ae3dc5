//! Table-of-contents rendering: heading collection and the indent rule.

use std::cmp::Ordering;

use folio_model::{Block, BlockKind};

use crate::blocks::block_color_class;
use crate::converter::Converter;
use crate::error::RenderError;
use crate::escape::clean_attr;

/// Collects heading blocks across the subtree in document order. A
/// heading's own children are not descended into; any other block with
/// children is.
fn heading_blocks<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
    for block in blocks {
        if block.kind.is_heading() {
            out.push(block);
            continue;
        }
        if !block.content.is_empty() {
            heading_blocks(&block.content, out);
        }
    }
}

/// Indent delta between two adjacent headings. The rule is local: 0
/// between equal ranks, +1 when the rank increases and -1 when it
/// decreases, regardless of how far it jumps. Running totals are not
/// clamped and may go negative.
fn indent_delta(prev: &BlockKind, curr: &BlockKind) -> i32 {
    let (Some(prev), Some(curr)) = (prev.heading_rank(), curr.heading_rank()) else {
        return 0;
    };
    match prev.cmp(&curr) {
        Ordering::Equal => 0,
        Ordering::Less => 1,
        Ordering::Greater => -1,
    }
}

impl<'a> Converter<'a> {
    pub(crate) fn render_table_of_contents(&mut self, block: &'a Block) -> Result<(), RenderError> {
        let cls = clean_attr(&format!("{} table_of_contents", block_color_class(block)));
        self.out(&format!(r#"<nav id="{}" class="{cls}">"#, block.id));
        let page = self.page;
        let mut headings = Vec::new();
        heading_blocks(&page.root.content, &mut headings);
        let mut indent = 0i32;
        for (i, heading) in headings.iter().enumerate() {
            if i > 0 {
                indent += indent_delta(&headings[i - 1].kind, &heading.kind);
            }
            let text = self.get_inline_content(&heading.inline_content);
            self.out(&format!(
                r#"<div class="table_of_contents-item table_of_contents-indent-{indent}">"#
            ));
            self.out(&format!(
                r##"<a class="table_of_contents-link" href="#{}">{text}</a>"##,
                heading.id
            ));
            self.out("</div>");
        }
        self.out("</nav>");
        Ok(())
    }
}
