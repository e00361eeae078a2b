//! Wire types for Notion database rows and content blocks.
//!
//! Only the parts of the Notion object model this tool reads are modelled.
//! Decoding is lenient below the page level: an unknown or missing `type`
//! tag becomes a catch-all variant, and a missing, null or malformed
//! payload decodes as its empty value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// A database row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: HashMap<String, PropertyValue>,
}

/// One segment of a rich text run. Styling is dropped at decode time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default, deserialize_with = "null_as_default")]
    pub plain_text: String,
}

/// An option of a select or multi-select property.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelectOption {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// The value of a date property. Only the start is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
}

/// A typed property value, selected by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    Checkbox { checkbox: bool },
    /// Any property type this tool does not read (formula, relation, ...),
    /// or a property with no `type` at all.
    Unsupported,
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        let kind = type_tag(value);
        let payload = value.get(kind);
        match kind {
            "title" => PropertyValue::Title {
                title: lenient(payload),
            },
            "rich_text" => PropertyValue::RichText {
                rich_text: lenient(payload),
            },
            "select" => PropertyValue::Select {
                select: lenient(payload),
            },
            "multi_select" => PropertyValue::MultiSelect {
                multi_select: lenient(payload),
            },
            "date" => PropertyValue::Date {
                date: lenient(payload),
            },
            "checkbox" => PropertyValue::Checkbox {
                checkbox: lenient(payload),
            },
            _ => PropertyValue::Unsupported,
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(PropertyValue::from(&value))
    }
}

/// A content block attached to a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
}

impl From<&Value> for Block {
    fn from(value: &Value) -> Self {
        Block {
            id: lenient(value.get("id")),
            kind: BlockKind::from(value),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Block::from(&value))
    }
}

/// Payload shared by every text-bearing block type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichText>,
}

/// Payload of a code block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rich_text: Vec<RichText>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

/// Block type tag plus its type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph { paragraph: TextPayload },
    Heading1 { heading_1: TextPayload },
    Heading2 { heading_2: TextPayload },
    Heading3 { heading_3: TextPayload },
    BulletedListItem { bulleted_list_item: TextPayload },
    NumberedListItem { numbered_list_item: TextPayload },
    Code { code: CodePayload },
    Quote { quote: TextPayload },
    Divider,
    /// Images, tables, toggles and every other block type.
    Unsupported,
}

impl From<&Value> for BlockKind {
    fn from(value: &Value) -> Self {
        let kind = type_tag(value);
        let payload = value.get(kind);
        match kind {
            "paragraph" => BlockKind::Paragraph {
                paragraph: lenient(payload),
            },
            "heading_1" => BlockKind::Heading1 {
                heading_1: lenient(payload),
            },
            "heading_2" => BlockKind::Heading2 {
                heading_2: lenient(payload),
            },
            "heading_3" => BlockKind::Heading3 {
                heading_3: lenient(payload),
            },
            "bulleted_list_item" => BlockKind::BulletedListItem {
                bulleted_list_item: lenient(payload),
            },
            "numbered_list_item" => BlockKind::NumberedListItem {
                numbered_list_item: lenient(payload),
            },
            "code" => BlockKind::Code {
                code: lenient(payload),
            },
            "quote" => BlockKind::Quote {
                quote: lenient(payload),
            },
            "divider" => BlockKind::Divider,
            _ => BlockKind::Unsupported,
        }
    }
}

/// The `type` tag of a Notion object, or `""` when absent.
fn type_tag(value: &Value) -> &str {
    value.get("type").and_then(Value::as_str).unwrap_or_default()
}

/// Decodes an optional payload, falling back to the empty value when it is
/// missing, null or the wrong shape.
fn lenient<T: DeserializeOwned + Default>(payload: Option<&Value>) -> T {
    payload
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}

/// Field deserializer that reads `null` as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a paginated list response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    #[serde(default)]
    pub has_more: bool,

    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error object returned by the API on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub message: String,
}

/// Concatenates the plain text of every segment, in order, with no separator.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}
