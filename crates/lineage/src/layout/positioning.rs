//! Horizontal placement of child subtrees under their parent.
//!
//! Child subtrees are laid out around a provisional anchor. Placing a child
//! means choosing the final x of its anchor and rebasing every node and link
//! of the subtree by `delta = final_x - provisional_x`.

use log::trace;

use crate::config::LayoutConfig;

use super::{SubtreeLayout, width};

/// Places `children` under `parent_x` and returns them rebased.
///
/// - No children: nothing to do.
/// - One child: its anchor goes straight under the parent. For a partnered
///   child the anchor is the pair midpoint, which is also the center of the
///   child's platform, so the platform ends up centered under the parent.
/// - Several children: the row of reserved slots is centered under the parent
///   and every child's anchor sits at the center of its own slot, keeping
///   each subtree inside its slot.
pub(super) fn position_children(
    children: Vec<SubtreeLayout>,
    widths: &[f32],
    parent_x: f32,
    config: &LayoutConfig,
) -> Vec<SubtreeLayout> {
    match children.len() {
        0 => children,
        1 => children
            .into_iter()
            .map(|child| {
                let dx = parent_x - child.anchor().x();
                child.translated(dx)
            })
            .collect(),
        _ => {
            let gap = config.min_child_gap();
            let total_width = width::row_width(widths, gap);
            let mut slot_start = parent_x - total_width / 2.0;

            children
                .into_iter()
                .zip(widths)
                .map(|(child, &slot_width)| {
                    let slot_center = slot_start + slot_width / 2.0;
                    slot_start += slot_width + gap;

                    let dx = slot_center - child.anchor().x();
                    trace!(slot_center, dx; "Rebasing child subtree");
                    child.translated(dx)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use lineage_core::{family::Person, geometry::Point};

    use super::*;
    use crate::layout::Engine;

    fn place(parent_x: f32, people: &[Person]) -> Vec<SubtreeLayout> {
        let engine = Engine::default();
        let children: Vec<_> = people
            .iter()
            .map(|p| engine.layout_tree(p, p.partner(), Point::new(0.0, 320.0)))
            .collect();
        let widths = width::reserved_widths(&children, engine.config());
        position_children(children, &widths, parent_x, engine.config())
    }

    #[test]
    fn test_no_children() {
        assert!(place(400.0, &[]).is_empty());
    }

    #[test]
    fn test_single_child_centered_under_parent() {
        let placed = place(400.0, &[Person::new(1, "A")]);
        assert_approx_eq!(f32, placed[0].self_position().x(), 400.0);
        assert_approx_eq!(f32, placed[0].self_position().y(), 320.0);
    }

    #[test]
    fn test_single_partnered_child_pair_midpoint_under_parent() {
        let placed = place(
            400.0,
            &[Person::new(1, "A").with_husband(Person::new(2, "B"))],
        );

        assert_approx_eq!(f32, placed[0].anchor().x(), 400.0);
        assert_approx_eq!(f32, placed[0].self_position().x(), 285.0);
    }

    #[test]
    fn test_two_children_row_centered() {
        let placed = place(400.0, &[Person::new(1, "A"), Person::new(2, "B")]);

        // Row of 170 + 60 + 170 = 400 centered on 400 starts at 200.
        assert_approx_eq!(f32, placed[0].self_position().x(), 285.0);
        assert_approx_eq!(f32, placed[1].self_position().x(), 515.0);
    }

    #[test]
    fn test_rebasing_moves_the_whole_subtree() {
        let child = Person::new(1, "A").with_children([Person::new(2, "B"), Person::new(3, "C")]);
        let placed = place(1000.0, &[child]);

        let xs: Vec<f32> = placed[0].nodes().iter().map(|n| n.x()).collect();
        assert_eq!(xs, vec![1000.0, 885.0, 1115.0]);
        assert_approx_eq!(f32, placed[0].min_x(), 800.0);
        assert_approx_eq!(f32, placed[0].max_x(), 1200.0);
    }

    #[test]
    fn test_siblings_do_not_overlap_with_wide_descendants() {
        let wide = Person::new(2, "B").with_children((10..15).map(|id| Person::new(id, "kid")));
        let placed = place(0.0, &[Person::new(1, "A"), wide, Person::new(3, "C")]);

        for pair in placed.windows(2) {
            assert!(
                pair[1].min_x() >= pair[0].max_x(),
                "{} < {}",
                pair[1].min_x(),
                pair[0].max_x()
            );
        }
    }
}
