//! Markup escaping helpers shared by every rendering rule.

/// Escapes literal text for inclusion in HTML.
///
/// The entity choices match the service's own exporter: `'` becomes
/// `&#x27;` and `"` becomes `&quot;`, so output diffs cleanly against
/// reference exports.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalizes a space-joined class list: trims the ends and collapses
/// runs of spaces left behind by empty fragments.
pub fn clean_attr(v: &str) -> String {
    let mut out = v.trim().to_string();
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out
}
