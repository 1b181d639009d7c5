//! `dt-*` resolution.

use super::value_class::value_class_datetime;
use super::{Context, Rule, abbr_title, attr_on, data_value, first_match, rendered_text};
use crate::dom::NodeId;
use crate::value::DateTimeValue;

/// `<time datetime>`, `<ins datetime>`, `<del datetime>`
pub fn datetime_attr(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_on(cx, id, &["time", "ins", "del"], "datetime")
}

fn img_alt(cx: &Context<'_>, id: NodeId) -> Option<String> {
    attr_on(cx, id, &["img"], "alt")
}

pub const DATETIME_RULES: &[Rule] = &[
    value_class_datetime,
    datetime_attr,
    abbr_title,
    data_value,
    img_alt,
    rendered_text,
];

/// Resolve a `dt-*` property. `None` when the source does not parse.
pub fn resolve_datetime(cx: &Context<'_>, id: NodeId) -> Option<DateTimeValue> {
    let raw = first_match(DATETIME_RULES, cx, id)?;
    let parsed = DateTimeValue::parse(&raw);
    if parsed.is_none() {
        tracing::debug!(raw = %raw, "dropping unparseable datetime");
    }
    parsed
}
