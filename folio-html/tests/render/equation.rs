//! Equation blocks: raw fallback, external typesetting through a
//! stubbed katex binary, and configuration failures.

use std::path::PathBuf;

use folio_html::{HtmlOptions, RenderError};
use folio_model::{Block, BlockKind, TextSpan};

use crate::common::{block, render, render_with, root_page};

fn equation(id: &str, source: &str) -> Block {
    let mut b = block(id, BlockKind::Equation);
    b.title = source.to_string();
    b.inline_content = vec![TextSpan::plain(source)];
    b
}

#[test]
fn equations_render_raw_when_typesetting_is_off() {
    let html = render(&root_page(vec![equation("eq1", "E = mc^2")]));

    assert!(html.contains(r#"<figure id="eq1" class="equation">E = mc^2</figure>"#));
    assert!(!html.contains("katex.min.css"));
}

#[test]
fn missing_katex_binary_is_a_config_error() {
    if which::which("katex").is_ok() {
        return; // an installed binary would satisfy the PATH fallback
    }
    let options = HtmlOptions {
        render_equations: true,
        katex_path: Some(PathBuf::from("/nonexistent/katex")),
        ..Default::default()
    };
    let err = render_with(&root_page(vec![equation("eq1", "x")]), options.clone()).unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));

    // the preflight runs even when the page has no equations
    let err = render_with(&root_page(vec![]), options).unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
}

#[cfg(unix)]
mod with_stub_binary {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    use folio_html::HtmlOptions;
    use folio_model::BlockKind;
    use tempfile::TempDir;

    use super::equation;
    use crate::common::{block, paragraph, render_with, root_page};

    fn stub_katex(dir: &TempDir, script: &str) -> PathBuf {
        let path = dir.path().join("katex");
        fs::write(&path, script).expect("write stub");
        let mut perms = fs::metadata(&path).expect("stat stub").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod stub");
        path
    }

    fn options_with(katex: PathBuf) -> HtmlOptions {
        HtmlOptions {
            render_equations: true,
            katex_path: Some(katex),
            ..Default::default()
        }
    }

    #[test]
    fn typeset_equations_import_the_stylesheet_once() {
        let dir = TempDir::new().expect("tempdir");
        let katex = stub_katex(
            &dir,
            "#!/bin/sh\ncat >/dev/null\nprintf '%s' '<span class=\"katex\">ok</span>'\n",
        );
        let page = root_page(vec![equation("eq1", "a^2"), equation("eq2", "b^2")]);
        let html = render_with(&page, options_with(katex)).unwrap();

        assert_eq!(html.matches("katex.min.css").count(), 1);
        assert!(html.contains(
            r#"<figure id="eq1" class="equation"><style>@import url('https://cdnjs.cloudflare.com/ajax/libs/KaTeX/0.10.0/katex.min.css')</style><div class="equation-container"><span class="katex">ok</span></div></figure>"#
        ));
        assert!(html.contains(
            r#"<figure id="eq2" class="equation"><div class="equation-container"><span class="katex">ok</span></div></figure>"#
        ));
    }

    #[test]
    fn failed_typesetting_falls_back_to_raw_source() {
        let dir = TempDir::new().expect("tempdir");
        let katex = stub_katex(&dir, "#!/bin/sh\nexit 3\n");
        let page = root_page(vec![equation("eq1", "x^2")]);
        let html = render_with(&page, options_with(katex)).unwrap();

        assert!(html.contains(r#"<figure id="eq1" class="equation">x^2</figure>"#));
        assert!(!html.contains("equation-container"));
    }

    #[test]
    fn exporter_compat_drops_breadcrumbs() {
        let dir = TempDir::new().expect("tempdir");
        let katex = stub_katex(
            &dir,
            "#!/bin/sh\ncat >/dev/null\nprintf '%s' '<span class=\"katex\">ok</span>'\n",
        );
        let page = root_page(vec![
            block("bc1", BlockKind::Breadcrumb),
            paragraph("p1", "kept"),
        ]);
        let options = HtmlOptions {
            exporter_compat: true,
            katex_path: Some(katex),
            ..Default::default()
        };
        let html = render_with(&page, options).unwrap();

        assert!(!html.contains("bc1"));
        assert!(!html.contains("not implemented"));
        assert!(html.contains(r#"<p id="p1" class="">kept</p>"#));
    }
}
