//! Block to Markdown conversion.

use crate::notion::{Block, BlockKind, plain_text};

/// Renders one block as a Markdown fragment.
///
/// Inline styling is dropped and children are not visited. Block types
/// without a Markdown mapping render to the empty string.
pub fn render_block(block: &Block) -> String {
    match &block.kind {
        BlockKind::Paragraph { paragraph } => format!("{}\n\n", plain_text(&paragraph.rich_text)),
        BlockKind::Heading1 { heading_1 } => format!("# {}\n\n", plain_text(&heading_1.rich_text)),
        BlockKind::Heading2 { heading_2 } => {
            format!("## {}\n\n", plain_text(&heading_2.rich_text))
        }
        BlockKind::Heading3 { heading_3 } => {
            format!("### {}\n\n", plain_text(&heading_3.rich_text))
        }
        BlockKind::BulletedListItem { bulleted_list_item } => {
            format!("- {}\n", plain_text(&bulleted_list_item.rich_text))
        }
        // Always "1."; Markdown renderers number the list themselves.
        BlockKind::NumberedListItem { numbered_list_item } => {
            format!("1. {}\n", plain_text(&numbered_list_item.rich_text))
        }
        BlockKind::Code { code } => format!(
            "```{}\n{}\n```\n\n",
            code.language,
            plain_text(&code.rich_text)
        ),
        BlockKind::Quote { quote } => format!("> {}\n\n", plain_text(&quote.rich_text)),
        BlockKind::Divider => "---\n\n".to_string(),
        BlockKind::Unsupported => String::new(),
    }
}

/// Renders a page body by concatenating block fragments in order.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().map(render_block).collect()
}
