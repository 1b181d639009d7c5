//! Value-class pattern.
//!
//! A property element may mark the parts of its value with `class="value"`
//! (read from text or the usual attributes) or `class="value-title"` (read
//! from `title`). Nested properties and items are not searched.

use super::Context;
use crate::dom::NodeId;
use crate::value::DateTimeValue;

/// `value`/`value-title` elements under `id`, in document order.
fn value_elements(cx: &Context<'_>, id: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack: Vec<NodeId> = cx.dom.element_children(id).collect();
    stack.reverse();

    while let Some(child) = stack.pop() {
        if cx.dom.has_class(child, "value") || cx.dom.has_class(child, "value-title") {
            found.push(child);
        } else if !cx.is_microformat_element(child) {
            let start = stack.len();
            stack.extend(cx.dom.element_children(child));
            stack[start..].reverse();
        }
    }
    found
}

/// Raw value of one `value` element.
fn part_value(cx: &Context<'_>, id: NodeId, datetime: bool) -> String {
    let dom = cx.dom;
    let attr = |name: &str| dom.attr(id, name).map(str::to_string);

    if dom.has_class(id, "value-title") {
        return attr("title").unwrap_or_default();
    }
    let from_attr = match dom.tag(id) {
        Some("img" | "area") => attr("alt"),
        Some("data") => attr("value"),
        Some("abbr") => attr("title"),
        Some("time" | "ins" | "del") if datetime => attr("datetime"),
        _ => None,
    };
    from_attr.unwrap_or_else(|| dom.text_content(id))
}

/// `p-*`/`u-*` rule: concatenated parts.
pub fn value_class_text(cx: &Context<'_>, id: NodeId) -> Option<String> {
    let parts = value_elements(cx, id);
    if parts.is_empty() {
        return None;
    }
    let joined: String = parts.iter().map(|&p| part_value(cx, p, false)).collect();
    Some(joined.trim().to_string())
}

/// `dt-*` rule: first date, first time and first offset among the parts.
///
/// When parts exist but none parse, an empty string is returned so the
/// value is dropped rather than read from the element's other sources.
pub fn value_class_datetime(cx: &Context<'_>, id: NodeId) -> Option<String> {
    let parts = value_elements(cx, id);
    if parts.is_empty() {
        return None;
    }
    let combined = parts
        .iter()
        .filter_map(|&p| DateTimeValue::parse_part(&part_value(cx, p, true)))
        .fold(DateTimeValue::default(), DateTimeValue::or);

    if combined.date.is_none() && combined.time.is_none() {
        return Some(String::new());
    }
    Some(combined.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backcompat::Backcompat;
    use crate::dom::Dom;
    use crate::resolve::test_support::element_with_class;

    fn with_cx<T>(html: &str, f: impl FnOnce(&Context<'_>, NodeId) -> T) -> T {
        let dom = Dom::parse(html);
        let backcompat = Backcompat::empty();
        let cx = Context::new(&dom, None, &backcompat);
        f(&cx, element_with_class(&dom, "prop"))
    }

    #[test]
    fn test_no_value_elements() {
        assert_eq!(with_cx(r#"<p class="prop">plain</p>"#, value_class_text), None);
        assert_eq!(with_cx(r#"<p class="prop">plain</p>"#, value_class_datetime), None);
    }

    #[test]
    fn test_nested_properties_are_not_searched() {
        let html = r#"<div class="prop"><span class="p-other"><span class="value">no</span></span><span class="value">yes</span></div>"#;
        assert_eq!(with_cx(html, value_class_text).as_deref(), Some("yes"));
    }

    #[test]
    fn test_datetime_parts_combine() {
        let html = r#"<span class="prop"><abbr class="value" title="2012-03-01">March 1st</abbr>, <span class="value">5pm</span><span class="value">-08:00</span></span>"#;
        assert_eq!(
            with_cx(html, value_class_datetime).as_deref(),
            Some("2012-03-01T17:00:00-08:00")
        );
    }

    #[test]
    fn test_datetime_first_part_wins() {
        let html = r#"<span class="prop"><time class="value" datetime="2012-03-01">x</time><span class="value">2013-01-01</span><span class="value">09:30</span></span>"#;
        assert_eq!(
            with_cx(html, value_class_datetime).as_deref(),
            Some("2012-03-01T09:30:00")
        );
    }

    #[test]
    fn test_unparseable_parts_yield_empty() {
        let html = r#"<span class="prop"><span class="value">someday</span></span>"#;
        assert_eq!(with_cx(html, value_class_datetime).as_deref(), Some(""));
    }
}
