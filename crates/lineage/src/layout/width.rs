//! Reserved widths of child subtrees.

use crate::config::LayoutConfig;

use super::SubtreeLayout;

/// Returns the horizontal slot each child subtree reserves in its row.
///
/// Every child reserves at least the widest sibling's own block (never less
/// than one box) and at least its own subtree width. Reserving the widest
/// block for everyone keeps a row of mixed single and partnered siblings on
/// a regular pitch.
pub(super) fn reserved_widths(children: &[SubtreeLayout], config: &LayoutConfig) -> Vec<f32> {
    let max_block_width = children
        .iter()
        .map(SubtreeLayout::block_width)
        .fold(config.box_width(), f32::max);

    children
        .iter()
        .map(|child| max_block_width.max(child.subtree_width()))
        .collect()
}

/// Total width of a row of slots separated by `gap`. An empty row is zero wide.
pub(super) fn row_width(widths: &[f32], gap: f32) -> f32 {
    if widths.is_empty() {
        return 0.0;
    }
    widths.iter().sum::<f32>() + gap * (widths.len() - 1) as f32
}
