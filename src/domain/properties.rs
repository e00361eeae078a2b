//! Plain values extracted from a page's typed property bag.

use std::collections::HashMap;

use crate::notion::{PropertyValue, plain_text};

/// Candidate property names for the post title, in priority order.
pub const TITLE_KEYS: &[&str] = &["Title", "Name", "标题"];

/// Candidate property names for the publish date, in priority order.
pub const DATE_KEYS: &[&str] = &["Date", "PublishedAt", "发布日期"];

/// Candidate property names for the tag list, in priority order.
pub const TAG_KEYS: &[&str] = &["Tags", "标签"];

/// Candidate property names for the description, in priority order.
pub const DESCRIPTION_KEYS: &[&str] = &["Description", "简介"];

/// A property value reduced to plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl Extracted {
    /// Empty text, an empty list and `false` all count as "no value".
    pub fn is_empty(&self) -> bool {
        match self {
            Extracted::Text(text) => text.is_empty(),
            Extracted::List(items) => items.is_empty(),
            Extracted::Flag(flag) => !flag,
        }
    }

    /// Flattens the value into a single string. Lists are joined with `", "`.
    pub fn into_text(self) -> String {
        match self {
            Extracted::Text(text) => text,
            Extracted::List(items) => items.join(", "),
            Extracted::Flag(flag) => flag_text(flag),
        }
    }

    /// Widens the value into a list. Scalars become a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Extracted::Text(text) => vec![text],
            Extracted::List(items) => items,
            Extracted::Flag(flag) => vec![flag_text(flag)],
        }
    }
}

fn flag_text(flag: bool) -> String {
    let text = if flag { "True" } else { "False" };
    text.to_string()
}

/// Maps one typed property value to plain data.
///
/// Returns `None` for property types that carry nothing this tool reads, and
/// for a select or date property with nothing set.
pub fn extract(value: &PropertyValue) -> Option<Extracted> {
    match value {
        PropertyValue::Title { title } => Some(Extracted::Text(plain_text(title))),
        PropertyValue::RichText { rich_text } => Some(Extracted::Text(plain_text(rich_text))),
        PropertyValue::Select { select } => select
            .as_ref()
            .map(|option| Extracted::Text(option.name.clone())),
        PropertyValue::MultiSelect { multi_select } => Some(Extracted::List(
            multi_select.iter().map(|option| option.name.clone()).collect(),
        )),
        PropertyValue::Date { date } => date
            .as_ref()
            .and_then(|date| date.start.clone())
            .map(Extracted::Text),
        PropertyValue::Checkbox { checkbox } => Some(Extracted::Flag(*checkbox)),
        PropertyValue::Unsupported => None,
    }
}

/// Tries each candidate key in order and returns the first non-empty value.
pub fn lookup(properties: &HashMap<String, PropertyValue>, keys: &[&str]) -> Option<Extracted> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .filter_map(extract)
        .find(|value| !value.is_empty())
}

/// Resolves a text field, falling back to `default` when every candidate is empty.
pub fn lookup_text(
    properties: &HashMap<String, PropertyValue>,
    keys: &[&str],
    default: &str,
) -> String {
    lookup(properties, keys)
        .map(Extracted::into_text)
        .unwrap_or_else(|| default.to_string())
}

/// Resolves a list field, falling back to an empty list.
pub fn lookup_list(properties: &HashMap<String, PropertyValue>, keys: &[&str]) -> Vec<String> {
    lookup(properties, keys)
        .map(Extracted::into_list)
        .unwrap_or_default()
}
