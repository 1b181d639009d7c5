//! `p-*` plain-text resolution.

use super::value_class::value_class_text;
use super::{Context, Rule, abbr_title, data_value, first_match, rendered_text};
use crate::dom::NodeId;

/// `<img alt>`, `<area alt>`
fn img_alt(cx: &Context<'_>, id: NodeId) -> Option<String> {
    super::attr_on(cx, id, &["img", "area"], "alt")
}

/// `<br>` and `<hr>` never carry text.
fn empty_break(cx: &Context<'_>, id: NodeId) -> Option<String> {
    cx.dom.tag_is(id, &["br", "hr"]).then(String::new)
}

/// Priority order for `p-*`.
pub const PLAIN_RULES: &[Rule] = &[
    value_class_text,
    abbr_title,
    data_value,
    img_alt,
    empty_break,
    rendered_text,
];

/// Resolve a `p-*` value. Always produces a string, possibly empty.
pub fn resolve_plain(cx: &Context<'_>, id: NodeId) -> String {
    first_match(PLAIN_RULES, cx, id).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backcompat::Backcompat;
    use crate::dom::Dom;
    use crate::resolve::test_support::element_with_class;

    fn plain(html: &str) -> String {
        let dom = Dom::parse(html);
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        resolve_plain(&cx, element_with_class(&dom, "p-x"))
    }

    #[test]
    fn test_inner_text_trimmed() {
        assert_eq!(plain(r#"<p class="p-x">  Example <b>User</b>
        </p>"#), "Example User");
    }

    #[test]
    fn test_attribute_sources() {
        assert_eq!(plain(r#"<abbr class="p-x" title="V">@v</abbr>"#), "V");
        assert_eq!(plain(r#"<data class="p-x" value="V">ignored</data>"#), "V");
        assert_eq!(plain(r#"<input class="p-x" value=" V ">"#), "V");
        assert_eq!(plain(r#"<img class="p-x" alt="V">"#), "V");
        assert_eq!(plain(r#"<map><area class="p-x" alt="V"></map>"#), "V");
    }

    #[test]
    fn test_br_hr_empty() {
        assert_eq!(plain(r#"<br class="p-x">"#), "");
        assert_eq!(plain(r#"<hr class="p-x">"#), "");
    }

    #[test]
    fn test_missing_attribute_falls_back_to_text() {
        assert_eq!(plain(r#"<abbr class="p-x">Short</abbr>"#), "Short");
        assert_eq!(plain(r#"<data class="p-x">Text</data>"#), "Text");
        assert_eq!(plain(r#"<img class="p-x" src="a.png">"#), "");
    }

    #[test]
    fn test_rendered_text_skips_scripts() {
        assert_eq!(
            plain(r#"<div class="p-x">Hi<script>alert(1)</script> <img alt="there"></div>"#),
            "Hi there"
        );
    }

    #[test]
    fn test_value_class_wins() {
        assert_eq!(
            plain(r#"<span class="p-x"><span class="value">+1</span> (<span class="value">555</span>) call me</span>"#),
            "+1555"
        );
        assert_eq!(
            plain(r#"<abbr class="p-x" title="ignored"><span class="value-title" title="V"></span>x</abbr>"#),
            "V"
        );
    }
}
