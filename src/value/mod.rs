//! Typed property values.

mod datetime;
mod merge;

pub use datetime::DateTimeValue;
pub use merge::merge_datetimes;

use std::sync::Arc;

use crate::model::Item;

/// Embedded markup from an `e-*` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    /// Inner HTML as authored, with relative URLs made absolute.
    pub html: String,
    /// Plain-text rendering, trimmed.
    pub text: String,
}

/// One value in a property slot.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `p-*`: plain text.
    Text(String),
    /// `u-*`: a URL, absolute when a base was available.
    Url(String),
    /// `dt-*`: a parsed, possibly partial, datetime.
    DateTime(DateTimeValue),
    /// `e-*`: embedded markup.
    Markup(Markup),
    /// A nested microformat used as a property value.
    Item(Arc<Item>),
}

impl PropertyValue {
    /// The string form of scalar text and URL values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) | PropertyValue::Url(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTimeValue> {
        match self {
            PropertyValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_markup(&self) -> Option<&Markup> {
        match self {
            PropertyValue::Markup(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Arc<Item>> {
        match self {
            PropertyValue::Item(item) => Some(item),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PropertyValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            PropertyValue::Text(s) | PropertyValue::Url(s) => serializer.serialize_str(s),
            PropertyValue::DateTime(dt) => serializer.collect_str(dt),
            PropertyValue::Markup(markup) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("html", &markup.html)?;
                map.serialize_entry("value", &markup.text)?;
                map.end()
            }
            PropertyValue::Item(item) => serde::Serialize::serialize(item.as_ref(), serializer),
        }
    }
}
