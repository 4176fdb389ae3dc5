//! Table-of-contents emission: entry order, indent classes, link text.

use folio_model::{Attr, BlockKind, TextSpan};

use crate::common::{block, render, root_page, titled};

#[test]
fn toc_indents_follow_heading_steps() {
    let page = root_page(vec![
        block("toc1", BlockKind::TableOfContents),
        titled("a1", BlockKind::Header, "Alpha"),
        titled("b1", BlockKind::SubHeader, "Beta"),
        titled("c1", BlockKind::SubSubHeader, "Gamma"),
        titled("d1", BlockKind::SubHeader, "Delta"),
        titled("e1", BlockKind::Header, "Omega"),
    ]);
    let html = render(&page);

    assert!(html.contains(r#"<nav id="toc1" class="table_of_contents">"#));
    for (indent, id, name) in [
        (0, "a1", "Alpha"),
        (1, "b1", "Beta"),
        (2, "c1", "Gamma"),
        (1, "d1", "Delta"),
        (0, "e1", "Omega"),
    ] {
        let entry = format!(
            r##"<div class="table_of_contents-item table_of_contents-indent-{indent}"><a class="table_of_contents-link" href="#{id}">{name}</a></div>"##
        );
        assert!(html.contains(&entry), "missing entry: {entry}");
    }
}

#[test]
fn toc_indent_goes_negative_when_the_page_starts_deep() {
    let page = root_page(vec![
        block("toc1", BlockKind::TableOfContents),
        titled("b1", BlockKind::SubHeader, "Deep start"),
        titled("a1", BlockKind::Header, "Back up"),
    ]);
    let html = render(&page);

    assert!(html.contains(r##"table_of_contents-indent-0"><a class="table_of_contents-link" href="#b1">"##));
    assert!(html.contains(r##"table_of_contents-indent--1"><a class="table_of_contents-link" href="#a1">"##));
}

#[test]
fn toc_finds_headings_nested_in_other_blocks() {
    let mut toggle = titled("g1", BlockKind::Toggle, "wrapper");
    toggle
        .content
        .push(titled("n1", BlockKind::SubHeader, "Hidden"));
    let page = root_page(vec![block("toc1", BlockKind::TableOfContents), toggle]);
    let html = render(&page);

    assert!(html.contains(r##"href="#n1">Hidden</a>"##));
}

#[test]
fn toc_entries_keep_inline_styling() {
    let mut heading = block("a1", BlockKind::Header);
    heading.inline_content = vec![TextSpan::styled("Alpha", vec![Attr::Bold])];
    let page = root_page(vec![block("toc1", BlockKind::TableOfContents), heading]);
    let html = render(&page);

    assert!(html.contains(r##"href="#a1"><strong>Alpha</strong></a>"##));
}
