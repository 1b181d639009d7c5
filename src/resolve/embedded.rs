//! `e-*` resolution.

use super::Context;
use crate::dom::NodeId;
use crate::value::Markup;

/// Inner markup and trimmed rendered text of `id`.
pub fn resolve_embedded(cx: &Context<'_>, id: NodeId) -> Markup {
    Markup {
        html: cx.dom.inner_html(id, cx.base),
        text: cx.dom.rendered_text(id).trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::backcompat::Backcompat;
    use crate::dom::Dom;
    use crate::resolve::test_support::element_with_class;

    #[test]
    fn test_markup_kept_verbatim() {
        let dom = Dom::parse(r#"<div class="e-x"> <p>Hello <b>world</b></p> </div>"#);
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        let markup = resolve_embedded(&cx, element_with_class(&dom, "e-x"));

        assert_eq!(markup.html, " <p>Hello <b>world</b></p> ");
        assert_eq!(markup.text, "Hello world");
    }

    #[test]
    fn test_relative_links_resolved() {
        let dom = Dom::parse(r#"<div class="e-x"><a href="/p">p</a></div>"#);
        let base = Url::parse("http://example.com/a/b").unwrap();
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, Some(&base), &backcompat);
        let markup = resolve_embedded(&cx, element_with_class(&dom, "e-x"));

        assert_eq!(markup.html, r#"<a href="http://example.com/p">p</a>"#);
    }

    #[test]
    fn test_text_skips_scripts_and_uses_alt() {
        let dom = Dom::parse(
            r#"<div class="e-x">Hi <script>track()</script><img src="w.png" alt="wave"></div>"#,
        );
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        let markup = resolve_embedded(&cx, element_with_class(&dom, "e-x"));

        assert_eq!(markup.text, "Hi wave");
        assert!(markup.html.contains("<script>track()</script>"));
    }
}
