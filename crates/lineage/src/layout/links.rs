//! Connectors of one generation.
//!
//! A partnered person gets two marriage links into the junction. Children
//! hang off the junction (or the person, when unpartnered) either through a
//! single direct link or through a platform: a vertical drop to a horizontal
//! bus halfway between the generations, then one drop per child.

use log::trace;

use lineage_core::{
    diagram::{Link, NodeId},
    family::Person,
    geometry::Point,
};

use crate::config::LayoutConfig;

use super::SubtreeLayout;

/// Width of the bus drawn above a lone partnered child.
pub(super) fn platform_width(config: &LayoutConfig) -> f32 {
    // The child's partner box is always one box wide.
    config.box_width() * 2.0 + config.pair_gap() + config.platform_padding()
}

/// Creates the links of `person` (and their named `partner`) to each other
/// and to the already positioned `children`.
pub(super) fn generation_links(
    person: &Person,
    partner: Option<&Person>,
    center: Point,
    children: &[SubtreeLayout],
    config: &LayoutConfig,
) -> Vec<Link> {
    let mut links = Vec::new();

    let parent_id = match partner {
        Some(partner) => {
            let junction = NodeId::Marriage {
                person: person.id(),
                partner: partner.id(),
            };
            links.push(Link::Marriage {
                from: NodeId::Person(person.id()),
                to: junction,
            });
            links.push(Link::Marriage {
                from: NodeId::Person(partner.id()),
                to: junction,
            });
            junction
        }
        None => NodeId::Person(person.id()),
    };

    match children {
        [] => {}
        [child] if !child.has_partner() => {
            let to = child.self_id();
            links.push(if partner.is_some() {
                Link::MarriageToChild {
                    from: parent_id,
                    to,
                }
            } else {
                Link::PersonToChild {
                    from: parent_id,
                    to,
                }
            });
        }
        [first, ..] => {
            let y_platform = center.y() + config.vertical_gap() / 2.0;

            let (x1, x2) = if let [child] = children {
                let half = platform_width(config) / 2.0;
                (child.anchor().x() - half, child.anchor().x() + half)
            } else {
                let last = &children[children.len() - 1];
                (first.self_position().x(), last.self_position().x())
            };
            trace!(parent:% = parent_id, x1, x2, y = y_platform; "Platform");

            links.push(Link::MarriageToPlatform {
                from: parent_id,
                x: center.x(),
                y1: center.y(),
                y2: y_platform,
            });
            links.push(Link::Platform {
                x1,
                x2,
                y: y_platform,
            });
            links.extend(children.iter().map(|child| Link::PlatformToChild {
                to: child.self_id(),
                x: child.self_position().x(),
                y1: y_platform,
                y2: child.self_position().y(),
            }));
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::Engine;

    /// Lays out `person`'s children under `center` and returns the links of
    /// `person`'s own generation.
    fn links_of(person: &Person, center: Point) -> Vec<Link> {
        let engine = Engine::default();
        let (children, _) = engine.layout_children(person, center);
        let partner = person.partner().filter(|p| p.has_name());
        generation_links(person, partner, center, &children, engine.config())
    }

    fn person_id(id: u64) -> NodeId {
        NodeId::Person(Some(id.into()))
    }

    #[test]
    fn test_platform_width() {
        assert_approx_eq!(f32, platform_width(&LayoutConfig::default()), 460.0);
    }

    #[test]
    fn test_partnered_leaf_has_two_marriage_links() {
        let person = Person::new(1, "A").with_wife(Person::new(2, "B"));
        let links = links_of(&person, Point::new(400.0, 180.0));

        let junction = NodeId::Marriage {
            person: Some(1.into()),
            partner: Some(2.into()),
        };
        assert_eq!(
            links,
            vec![
                Link::Marriage {
                    from: person_id(1),
                    to: junction
                },
                Link::Marriage {
                    from: person_id(2),
                    to: junction
                },
            ]
        );
    }

    #[test]
    fn test_single_unpartnered_child_direct_link() {
        let person = Person::new(1, "A").with_child(Person::new(2, "B"));
        let links = links_of(&person, Point::new(400.0, 180.0));

        assert_eq!(
            links,
            vec![Link::PersonToChild {
                from: person_id(1),
                to: person_id(2)
            }]
        );
    }

    #[test]
    fn test_single_child_of_pair_hangs_off_junction() {
        let person = Person::new(1, "A")
            .with_husband(Person::new(2, "B"))
            .with_child(Person::new(3, "C"));
        let links = links_of(&person, Point::new(400.0, 180.0));

        assert_eq!(links.len(), 3);
        assert_eq!(
            links[2],
            Link::MarriageToChild {
                from: NodeId::Marriage {
                    person: Some(1.into()),
                    partner: Some(2.into())
                },
                to: person_id(3)
            }
        );
    }

    #[test]
    fn test_two_children_platform() {
        let person = Person::new(1, "A").with_children([Person::new(2, "B"), Person::new(3, "C")]);
        let links = links_of(&person, Point::new(400.0, 180.0));

        assert_eq!(
            links,
            vec![
                Link::MarriageToPlatform {
                    from: person_id(1),
                    x: 400.0,
                    y1: 180.0,
                    y2: 250.0
                },
                Link::Platform {
                    x1: 285.0,
                    x2: 515.0,
                    y: 250.0
                },
                Link::PlatformToChild {
                    to: person_id(2),
                    x: 285.0,
                    y1: 250.0,
                    y2: 320.0
                },
                Link::PlatformToChild {
                    to: person_id(3),
                    x: 515.0,
                    y1: 250.0,
                    y2: 320.0
                },
            ]
        );
    }

    #[test]
    fn test_single_partnered_child_platform_spans_pair() {
        let child = Person::new(3, "C").with_wife(Person::new(4, "D"));
        let person = Person::new(1, "A").with_child(child);
        let links = links_of(&person, Point::new(400.0, 180.0));

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].direction(), "marriageToPlatform");
        let Link::Platform { x1, x2, y } = links[1] else {
            panic!("expected a platform, got {:?}", links[1]);
        };
        assert_approx_eq!(f32, x1, 170.0);
        assert_approx_eq!(f32, x2, 630.0);
        assert_approx_eq!(f32, y, 250.0);
        assert_eq!(
            links[2],
            Link::PlatformToChild {
                to: person_id(3),
                x: 285.0,
                y1: 250.0,
                y2: 320.0
            }
        );
    }

    #[test]
    fn test_missing_ids_propagate() {
        let person = Person::default()
            .with_name(Some("A".to_string()))
            .with_wife(Person::default().with_name(Some("B".to_string())));
        let links = links_of(&person, Point::new(0.0, 0.0));

        assert_eq!(links.len(), 2);
        let Link::Marriage { to, .. } = links[0] else {
            panic!("expected a marriage link");
        };
        assert_eq!(to.to_string(), "undefined_undefined_marriage");
    }
}
