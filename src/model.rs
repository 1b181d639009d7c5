//! Parsed items and the top-level result mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::value::PropertyValue;

/// One parsed microformat.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    types: Vec<String>,
    properties: BTreeMap<String, Vec<PropertyValue>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    value: Option<String>,
}

impl Item {
    pub fn new(types: Vec<String>) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    /// Type names, without the `h-` prefix.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }

    pub fn properties(&self) -> &BTreeMap<String, Vec<PropertyValue>> {
        &self.properties
    }

    /// All values of a property, in document order. Empty when absent.
    pub fn get(&self, name: &str) -> &[PropertyValue] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, name: &str) -> Option<&PropertyValue> {
        self.get(name).first()
    }

    /// First text or URL value of a property.
    pub fn first_str(&self, name: &str) -> Option<&str> {
        self.get(name).iter().find_map(PropertyValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// The value this item stands for when used as another item's property.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn push(&mut self, name: &str, value: PropertyValue) {
        self.properties
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    pub(crate) fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// Apply `f` to every property's values; properties left empty are
    /// removed.
    pub(crate) fn rewrite_properties<F>(&mut self, mut f: F)
    where
        F: FnMut(Vec<PropertyValue>) -> Vec<PropertyValue>,
    {
        let properties = std::mem::take(&mut self.properties);
        self.properties = properties
            .into_iter()
            .map(|(name, values)| (name, f(values)))
            .filter(|(_, values)| !values.is_empty())
            .collect();
    }
}

/// Extraction result: item type name to items, in document order.
///
/// An item with several types is listed under each of them as the same
/// shared [`Arc`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Microformats {
    items: BTreeMap<String, Vec<Arc<Item>>>,
}

impl Microformats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, item: Arc<Item>) {
        for name in item.types() {
            self.items
                .entry(name.clone())
                .or_default()
                .push(Arc::clone(&item));
        }
    }

    /// Items of a type. Empty when none were found.
    pub fn get(&self, type_name: &str) -> &[Arc<Item>] {
        self.items.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.items.contains_key(type_name)
    }

    /// Type names found, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Arc<Item>])> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<Arc<Item>>> {
        self.items
    }
}
