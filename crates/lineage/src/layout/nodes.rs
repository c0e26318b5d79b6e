//! Nodes of one generation: the person, the partner and their junction.

use lineage_core::{diagram::Node, family::Person, geometry::Point};

use crate::config::LayoutConfig;

/// Distance between the centers of two partners.
///
/// Half of each box plus the pair gap, or zero when there is no partner
/// (`partner_width == 0`).
pub(super) fn local_pair_gap(partner_width: f32, config: &LayoutConfig) -> f32 {
    if partner_width > 0.0 {
        config.box_width() / 2.0 + partner_width / 2.0 + config.pair_gap()
    } else {
        0.0
    }
}

/// Creates the nodes of `person` and their (named) `partner` around `center`.
///
/// The person sits `local_pair_gap / 2` left of `center`, the partner the
/// same distance right of it, and the marriage junction exactly on it. An
/// unpartnered person is centered on `center` and gets no junction.
pub(super) fn generation_nodes(
    person: &Person,
    partner: Option<&Person>,
    center: Point,
    config: &LayoutConfig,
) -> Vec<Node> {
    let box_width = config.box_width();

    let Some(partner) = partner else {
        return vec![Node::person(person.record(), center, box_width)];
    };

    let half_gap = local_pair_gap(box_width, config) / 2.0;
    vec![
        Node::person(person.record(), center.translate_x(-half_gap), box_width),
        Node::person(partner.record(), center.translate_x(half_gap), box_width),
        Node::marriage(person.id(), partner.id(), center),
    ]
}
