//! `u-*` resolution.

use super::value_class::value_class_text;
use super::{Context, Rule, abbr_title, data_value, first_match, rendered_text};
use crate::dom::NodeId;

fn linked_attr(cx: &Context<'_>, id: NodeId, tags: &[&str], attr: &str) -> Option<String> {
    if !cx.dom.tag_is(id, tags) {
        return None;
    }
    cx.dom.attr(id, attr).map(|value| cx.absolute_url(value))
}

/// `<a href>`, `<area href>`
pub fn link_href(cx: &Context<'_>, id: NodeId) -> Option<String> {
    linked_attr(cx, id, &["a", "area"], "href")
}

/// `<img src>` and media sources.
pub fn media_src(cx: &Context<'_>, id: NodeId) -> Option<String> {
    linked_attr(cx, id, &["img", "audio", "video", "source"], "src")
}

/// `<object data>`
pub fn object_data(cx: &Context<'_>, id: NodeId) -> Option<String> {
    linked_attr(cx, id, &["object"], "data")
}

pub const URL_RULES: &[Rule] = &[
    link_href,
    media_src,
    object_data,
    value_class_text,
    abbr_title,
    data_value,
    rendered_text,
];

/// Resolve a `u-*` property. Never fails.
pub fn resolve_url(cx: &Context<'_>, id: NodeId) -> String {
    first_match(URL_RULES, cx, id).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::backcompat::Backcompat;
    use crate::dom::Dom;
    use crate::resolve::test_support::element_with_class;

    fn url_of(html: &str, base: Option<&str>) -> String {
        let dom = Dom::parse(html);
        let base = base.map(|b| Url::parse(b).unwrap());
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, base.as_ref(), &backcompat);
        resolve_url(&cx, element_with_class(&dom, "u-x"))
    }

    #[test]
    fn test_href_resolved_against_base() {
        let html = r#"<a class="u-x" href="/about">About</a>"#;
        assert_eq!(url_of(html, Some("http://example.com/blog/")), "http://example.com/about");
        assert_eq!(url_of(html, None), "/about");
    }

    #[test]
    fn test_absolute_url_kept_verbatim() {
        let html = r#"<a class="u-x" href="HTTP://Example.com/A">x</a>"#;
        assert_eq!(url_of(html, Some("http://other.example/")), "HTTP://Example.com/A");
    }

    #[test]
    fn test_media_and_object() {
        let base = Some("http://example.com/");
        assert_eq!(
            url_of(r#"<img class="u-x" src="me.png">"#, base),
            "http://example.com/me.png"
        );
        assert_eq!(
            url_of(r#"<video class="u-x" src="v.mp4"></video>"#, base),
            "http://example.com/v.mp4"
        );
        assert_eq!(
            url_of(r#"<object class="u-x" data="d.swf"></object>"#, base),
            "http://example.com/d.swf"
        );
    }

    #[test]
    fn test_missing_attribute_falls_through() {
        assert_eq!(url_of(r#"<a class="u-x">http://a.example/</a>"#, None), "http://a.example/");
        assert_eq!(
            url_of(r#"<abbr class="u-x" title="http://b.example/">b</abbr>"#, None),
            "http://b.example/"
        );
        assert_eq!(
            url_of(r#"<data class="u-x" value="http://c.example/"></data>"#, None),
            "http://c.example/"
        );
    }

    #[test]
    fn test_value_class() {
        let html = r#"<span class="u-x">see <span class="value">http://d.example/</span></span>"#;
        assert_eq!(url_of(html, None), "http://d.example/");
    }
}
