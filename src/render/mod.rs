//! Rendering of Notion content blocks.

mod markdown;

pub use markdown::{render_block, render_blocks};
