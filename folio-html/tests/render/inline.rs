//! Inline span rendering: attribute nesting, links, references and
//! escaping.

use folio_html::{Converter, HtmlOptions};
use folio_model::{Attr, BlockKind, DateValue, TextSpan, User};

use crate::common::{paragraph, render, root_page, titled};

fn span_paragraph(id: &str, spans: Vec<TextSpan>) -> folio_model::Block {
    let mut b = folio_model::Block::new(id, BlockKind::Text);
    b.inline_content = spans;
    b
}

// ============================================================================
// NESTING AND WRAPPING
// ============================================================================

#[test]
fn first_declared_attribute_wraps_tightest() {
    let spans = vec![TextSpan::styled(
        "text",
        vec![Attr::Bold, Attr::Link("https://example.com/a".to_string())],
    )];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains(r#"<a href="https://example.com/a"><strong>text</strong></a>"#));
}

#[test]
fn flag_attributes_use_semantic_elements() {
    let spans = vec![
        TextSpan::styled("b", vec![Attr::Bold]),
        TextSpan::styled("i", vec![Attr::Italic]),
        TextSpan::styled("s", vec![Attr::Strikethrough]),
        TextSpan::styled("c", vec![Attr::Code]),
        TextSpan::styled("h", vec![Attr::Highlight("yellow".to_string())]),
    ];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains("<strong>b</strong>"));
    assert!(html.contains("<em>i</em>"));
    assert!(html.contains("<del>s</del>"));
    assert!(html.contains("<code>c</code>"));
    assert!(html.contains(r#"<mark class="highlight-yellow">h</mark>"#));
}

#[test]
fn empty_links_stay_href_less() {
    let spans = vec![TextSpan::styled("dangling", vec![Attr::Link(String::new())])];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains("<a>dangling</a>"));
}

// ============================================================================
// ESCAPING
// ============================================================================

#[test]
fn literal_text_is_escaped() {
    let html = render(&root_page(vec![paragraph("p1", r#"<b> & "quoted" 'raw'"#)]));

    assert!(html.contains("&lt;b&gt; &amp; &quot;quoted&quot; &#x27;raw&#x27;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn link_hrefs_are_escaped() {
    let spans = vec![TextSpan::styled(
        "q",
        vec![Attr::Link("https://example.com/?a=1&b=2".to_string())],
    )];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains(r#"<a href="https://example.com/?a=1&amp;b=2">q</a>"#));
}

// ============================================================================
// REFERENCE ATTRIBUTES
// ============================================================================

#[test]
fn user_references_render_the_resolved_name() {
    let spans = vec![TextSpan::styled("", vec![Attr::User("u-1".to_string())])];
    let mut page = root_page(vec![span_paragraph("p1", spans)]);
    page.users.push(User {
        id: "u-1".to_string(),
        given_name: "Ada".to_string(),
        family_name: "Lovelace".to_string(),
    });
    let html = render(&page);

    assert!(html.contains(r#"<span class="user">@Ada Lovelace</span>"#));
}

#[test]
fn unresolved_user_references_render_empty() {
    let spans = vec![TextSpan::styled("", vec![Attr::User("nobody".to_string())])];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains(r#"<span class="user">@</span>"#));
}

#[test]
fn date_references_render_a_time_element() {
    let date = DateValue {
        kind: "date".to_string(),
        start_date: "2019-05-28".to_string(),
        start_time: None,
        end_date: None,
        end_time: None,
        time_zone: None,
    };
    let spans = vec![TextSpan::styled("ignored", vec![Attr::Date(date)])];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains("<time>@May 28, 2019</time>"));
    assert!(!html.contains("ignored"));
}

#[test]
fn page_references_build_a_permalink_from_the_resolved_title() {
    let sub = titled("subp-age1", BlockKind::Page, "Sub Page");
    let spans = vec![TextSpan::styled(
        "replaced",
        vec![Attr::Page("subp-age1".to_string())],
    )];
    let page = root_page(vec![sub, span_paragraph("p1", spans)]);
    let html = render(&page);

    assert!(html.contains(r#"<a href="https://www.notion.so/Sub-Page-subpage1">Sub Page</a>"#));
    assert!(!html.contains("replaced"));
}

#[test]
fn page_references_resolve_through_related_pages() {
    let other = folio_model::Page::new(titled("aaaa1111", BlockKind::Page, "Elsewhere"));
    let related = vec![other];
    let spans = vec![TextSpan::styled(
        "",
        vec![Attr::Page("aaaa-1111".to_string())],
    )];
    let page = root_page(vec![span_paragraph("p1", spans)]);
    let html = Converter::with_options(&page, HtmlOptions::default())
        .with_related_pages(&related)
        .to_html()
        .unwrap();

    assert!(html.contains(r#"<a href="https://www.notion.so/Elsewhere-aaaa1111">Elsewhere</a>"#));
}

#[test]
fn unresolved_page_references_keep_the_bare_id() {
    let spans = vec![TextSpan::styled(
        "",
        vec![Attr::Page("dead-beef".to_string())],
    )];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains(r#"<a href="https://www.notion.so/deadbeef"></a>"#));
}

#[test]
fn comment_references_leave_text_unstyled() {
    let spans = vec![TextSpan::styled(
        "annotated",
        vec![Attr::Comment("disc-1".to_string())],
    )];
    let html = render(&root_page(vec![span_paragraph("p1", spans)]));

    assert!(html.contains(r#"<p id="p1" class="">annotated</p>"#));
}
