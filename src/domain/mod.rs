//! Post metadata: property extraction and document assembly

mod document;
mod properties;

pub use document::{FrontMatter, UNTITLED, assemble, resolve_title};
pub use properties::{
    DATE_KEYS, DESCRIPTION_KEYS, Extracted, TAG_KEYS, TITLE_KEYS, extract, lookup, lookup_list,
    lookup_text,
};
