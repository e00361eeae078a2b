//! Assembles a page's front matter and rendered body into a Markdown document.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::properties::{DATE_KEYS, DESCRIPTION_KEYS, TAG_KEYS, TITLE_KEYS, lookup_list, lookup_text};
use crate::notion::PropertyValue;

/// Title used when a page has no usable title property.
pub const UNTITLED: &str = "Untitled";

/// Metadata emitted at the top of every generated post.
///
/// Values are written as-is: quotes or newlines inside `title` or
/// `description` are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl FrontMatter {
    /// Resolves every field from a property bag.
    ///
    /// `today` is the fallback date when no date property is set.
    pub fn from_properties(properties: &HashMap<String, PropertyValue>, today: NaiveDate) -> Self {
        let fallback_date = today.format("%Y-%m-%d").to_string();
        Self {
            title: resolve_title(properties),
            date: lookup_text(properties, DATE_KEYS, &fallback_date),
            tags: lookup_list(properties, TAG_KEYS),
            description: lookup_text(properties, DESCRIPTION_KEYS, ""),
        }
    }

    /// Renders the header, including the closing delimiter and blank line.
    ///
    /// # Format
    /// ```text
    /// ---
    /// title: "Post Title"
    /// date: 2024-01-01
    /// draft: false
    /// tags: ['a', 'b']
    /// description: "Short summary"
    /// ---
    ///
    /// ```
    ///
    /// `tags` and `description` lines are omitted when empty.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("title: \"{}\"\n", self.title));
        out.push_str(&format!("date: {}\n", self.date));
        out.push_str("draft: false\n");

        if !self.tags.is_empty() {
            out.push_str(&format!("tags: {}\n", list_literal(&self.tags)));
        }

        if !self.description.is_empty() {
            out.push_str(&format!("description: \"{}\"\n", self.description));
        }

        out.push_str("---\n\n");
        out
    }
}

/// Resolves the title of a page, or `"Untitled"`.
pub fn resolve_title(properties: &HashMap<String, PropertyValue>) -> String {
    lookup_text(properties, TITLE_KEYS, UNTITLED)
}

/// Builds the final document text: front matter followed by the body.
pub fn assemble(
    properties: &HashMap<String, PropertyValue>,
    body: &str,
    today: NaiveDate,
) -> String {
    let mut document = FrontMatter::from_properties(properties, today).render();
    document.push_str(body);
    document
}

/// Formats a flow-style list: `['a', 'b']`.
fn list_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote_item(item)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Quotes one list item.
///
/// Single quotes are used unless the item contains a single quote and no
/// double quote. Backslashes, the chosen quote character and control
/// characters are backslash-escaped.
fn quote_item(item: &str) -> String {
    let quote = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(item.len() + 2);
    out.push(quote);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
