//! Notion API access: wire model, errors and the blocking HTTP client.

mod client;
mod error;
mod model;

pub use client::{HttpNotionClient, NotionApi};
pub use error::NotionError;
pub use model::{
    ApiErrorBody, Block, BlockKind, CodePayload, DateValue, ListResponse, Page, PropertyValue,
    RichText, SelectOption, TextPayload, plain_text,
};
