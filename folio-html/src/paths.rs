//! Output path construction for pages, collections and downloaded files.
//!
//! Exported assets live next to the page that references them, in
//! directories derived from page and collection titles. All names pass
//! through [`safe_name`] so the layout survives any filesystem.

use folio_model::{Block, BlockKind};

/// Attachments uploaded to the service are rehosted under this prefix.
/// Only such URLs are rewritten to local downloaded-file paths; anything
/// else is left pointing at its origin.
pub(crate) const ATTACHMENT_URL_PREFIX: &str =
    "https://s3-us-west-2.amazonaws.com/secure.notion-static.com/";

/// Makes a title safe for use as a file or directory name: every
/// character that is not a letter or digit becomes a space, runs of
/// spaces collapse and the ends are trimmed.
pub fn safe_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            out.push(c);
        } else {
            out.push(' ');
        }
    }
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.trim().to_string()
}

/// File name for an exported page, without any directory prefix.
pub fn html_file_name(title: &str) -> String {
    format!("{}.html", safe_name(title))
}

pub(crate) fn is_url(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

/// Last path segment of a URL.
pub(crate) fn url_base_name(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

fn prefix_trail(trail: &[String], name: &str) -> String {
    let mut full = trail.join("/");
    if !full.is_empty() {
        full.push('/');
    }
    full.push_str(name);
    // empty titles leave doubled separators behind
    while full.contains("//") {
        full = full.replace("//", "/");
    }
    full
}

/// Relative path of a sub-page's exported file, seen from the export
/// root. `trail` holds the safe names of the ancestor pages, outermost
/// first.
pub(crate) fn file_path_for_page(trail: &[String], title: &str) -> String {
    prefix_trail(trail, &html_file_name(title))
}

/// Local path a rehosted attachment will be downloaded to. URLs outside
/// the attachment host are returned unchanged.
pub(crate) fn downloaded_file_name(uri: &str, block: &Block, trail: &[String]) -> String {
    if !uri.starts_with(ATTACHMENT_URL_PREFIX) {
        return uri.to_string();
    }
    let base = url_base_name(uri);
    let name = if block.kind == BlockKind::File {
        base.to_string()
    } else {
        format!("{}/{}", safe_name(&block.title), base)
    };
    prefix_trail(trail, &name)
}

/// The URL a media block should point at: the downloaded copy when the
/// block carries an uploaded file, its original source otherwise.
pub(crate) fn file_or_source_url(block: &Block, trail: &[String]) -> String {
    if !block.file_ids.is_empty() {
        downloaded_file_name(&block.source, block, trail)
    } else {
        block.source.clone()
    }
}

/// Resolves a page cover URL. Hosted stock covers stay remote,
/// service-relative covers are absolutized and anything else is assumed
/// to be downloaded next to the page.
pub(crate) fn cover_image_url(uri: &str, page_title: &str) -> String {
    if uri.contains("images.unsplash.com") || uri.contains("www.notion.so/images/") {
        return uri.to_string();
    }
    if uri.starts_with("/images/page-cover/") {
        return format!("https://www.notion.so{uri}");
    }
    format!("{}/{}", safe_name(page_title), url_base_name(uri))
}

/// Exported file for a stand-alone collection page, placed under the
/// root page's directory.
pub(crate) fn collection_file_path(root_title: &str, collection_name: &str) -> String {
    format!("{}/{}", safe_name(root_title), html_file_name(collection_name))
}

/// Downloaded icon of a stand-alone collection page.
pub(crate) fn collection_icon_path(root_title: &str, collection_name: &str, icon_uri: &str) -> String {
    format!(
        "{}/{}/{}",
        safe_name(root_title),
        safe_name(collection_name),
        url_base_name(icon_uri)
    )
}

/// Exported file for one row of an inline collection table. Untitled
/// rows and collections get placeholder names so the path stays valid.
pub(crate) fn title_cell_path(trail: &[String], collection_name: &str, row_title: &str) -> String {
    let title = if row_title.is_empty() { "Untitled" } else { row_title };
    let collection = if collection_name.is_empty() {
        "Untitled Database"
    } else {
        collection_name
    };
    let name = format!("{}/{}", safe_name(collection), html_file_name(title));
    prefix_trail(trail, &name)
}
