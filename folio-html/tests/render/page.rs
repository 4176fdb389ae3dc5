//! Page-level behavior: document envelope, header region, sub-page
//! cards, hooks and repeat conversions.

use folio_html::{Converter, HtmlOptions};
use folio_model::{Attr, BlockKind, TextSpan};
use serde_json::json;

use crate::common::{block, paragraph, render, render_with, root_page, titled, ROOT_ID};

// ============================================================================
// DOCUMENT ENVELOPE
// ============================================================================

#[test]
fn full_documents_carry_head_and_inline_styles() {
    let page = root_page(vec![paragraph("p1", "body")]);
    let options = HtmlOptions {
        full_document: true,
        ..Default::default()
    };
    let html = render_with(&page, options).unwrap();

    assert!(html.starts_with("<html><head>"));
    assert!(html.contains(r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#));
    assert!(html.contains("<title>Test Page</title>"));
    assert!(html.contains("<style>"));
    assert!(html.contains(".page-body"));
    assert!(html.contains("\t\n</style>"));
    assert!(html.ends_with("</article></body></html>"));
}

// ============================================================================
// HEADER REGION
// ============================================================================

#[test]
fn covers_are_absolutized_and_positioned() {
    let mut page = root_page(vec![]);
    page.root
        .format
        .insert("page_cover".to_string(), json!("/images/page-cover/woodcut_1.jpg"));
    page.root
        .format
        .insert("page_cover_position".to_string(), json!(0.25));
    page.root.format.insert("page_icon".to_string(), json!("🌿"));
    let html = render(&page);

    assert!(html.contains(
        r#"<img class="page-cover-image" src="https://www.notion.so/images/page-cover/woodcut_1.jpg" style="object-position:center 75%"/>"#
    ));
    assert!(html.contains(
        r#"<div class="page-header-icon page-header-icon-with-cover"><span class="icon">🌿</span></div>"#
    ));
}

#[test]
fn icons_without_covers_use_the_undefined_class() {
    let mut page = root_page(vec![]);
    page.root.format.insert("page_icon".to_string(), json!("🌿"));
    let html = render(&page);

    assert!(html.contains(r#"<div class="page-header-icon undefined">"#));
}

#[test]
fn uploaded_icons_point_at_the_downloaded_copy() {
    let mut page = root_page(vec![]);
    page.root.format.insert(
        "page_icon".to_string(),
        json!("https://s3-us-west-2.amazonaws.com/secure.notion-static.com/ic/rocket.png"),
    );
    let html = render(&page);

    assert!(html.contains(r#"<img class="icon" src="Test Page/rocket.png"/>"#));
}

// ============================================================================
// SUB-PAGE CARDS
// ============================================================================

#[test]
fn sub_pages_render_as_cards_without_descending() {
    let mut sub = titled("sp1", BlockKind::Page, "Side Quest");
    sub.content.push(paragraph("hidden1", "not rendered"));
    let html = render(&root_page(vec![sub]));

    assert!(html.contains(
        r#"<figure id="sp1" class="link-to-page"><a href="Test Page/Side Quest.html">Side Quest</a></figure>"#
    ));
    assert!(!html.contains("not rendered"));
}

#[test]
fn sub_page_cards_keep_their_color_and_icon() {
    let mut sub = titled("sp1", BlockKind::Page, "Side Quest");
    sub.format.insert("block_color".to_string(), json!("red"));
    sub.format.insert("page_icon".to_string(), json!("⚔️"));
    let html = render(&root_page(vec![sub]));

    assert!(html.contains(r#"<figure id="sp1" class="block-color-red link-to-page">"#));
    assert!(html.contains(r#"<span class="icon">⚔️</span>Side Quest</a>"#));
}

// ============================================================================
// HOOKS
// ============================================================================

#[test]
fn url_rewriter_applies_to_every_emitted_link() {
    let mut bookmark = block("bm1", BlockKind::Bookmark);
    bookmark.title = "Example".to_string();
    bookmark.link = "https://example.com".to_string();
    let sub = titled("subp-age1", BlockKind::Page, "Sub Page");
    let mut reference = block("p1", BlockKind::Text);
    reference.inline_content = vec![TextSpan::styled(
        "",
        vec![Attr::Page("subp-age1".to_string())],
    )];
    let page = root_page(vec![bookmark, sub, reference]);

    let html = Converter::new(&page)
        .with_url_rewriter(|uri| {
            uri.replace("https://example.com", "https://mirror.test")
                .replace("https://www.notion.so/", "./")
        })
        .to_html()
        .unwrap();

    assert!(html.contains(r#"<a href="https://mirror.test">Example</a>"#));
    assert!(html.contains(r#"<a href="./Sub-Page-subpage1">Sub Page</a>"#));
}

#[test]
fn block_overrides_claim_whole_subtrees() {
    let mut toggle = titled("g1", BlockKind::Toggle, "wrapper");
    toggle.content.push(paragraph("p1", "inside"));
    let page = root_page(vec![toggle, block("d1", BlockKind::Divider)]);

    let html = Converter::new(&page)
        .with_block_override(|buf, b| {
            if b.kind == BlockKind::Toggle {
                buf.push_str(r#"<aside id="custom"></aside>"#);
                return true;
            }
            false
        })
        .to_html()
        .unwrap();

    assert!(html.contains(r#"<aside id="custom"></aside>"#));
    assert!(!html.contains("wrapper"));
    assert!(!html.contains("inside"));
    assert!(html.contains(r#"<hr id="d1"/>"#));
}

// ============================================================================
// REPEAT CONVERSIONS
// ============================================================================

#[test]
fn repeated_conversions_produce_identical_output() {
    let page = root_page(vec![
        titled("n1", BlockKind::NumberedList, "one"),
        titled("n2", BlockKind::NumberedList, "two"),
        titled("sp1", BlockKind::Page, "Nested"),
        block("toc1", BlockKind::TableOfContents),
        titled("h1", BlockKind::Header, "Alpha"),
    ]);
    let mut converter = Converter::with_options(&page, HtmlOptions::default());
    let first = converter.to_html().unwrap();
    let second = converter.to_html().unwrap();

    assert_eq!(first, second);
    assert!(second.contains(r#"<ol id="n2" class="numbered-list" start="2">"#));
    assert!(second.contains(r#"<a href="Test Page/Nested.html">"#));
}

#[test]
fn root_id_is_used_verbatim() {
    let page = root_page(vec![]);
    let html = render(&page);

    assert!(html.contains(&format!(r#"<article id="{ROOT_ID}" class="page sans">"#)));
}
