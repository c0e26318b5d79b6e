//! Connector descriptors between nodes.

use serde::Serialize;

use super::NodeId;

/// A connector of the family diagram, tagged by its `direction`.
///
/// Links between two nodes carry only the node ids; the renderer looks up
/// their positions. Platform segments start or end in empty space, so they
/// carry explicit coordinates instead.
///
/// ```text
///   person ──●── partner        Marriage (person → junction, partner → junction)
///            │                  MarriageToPlatform
///     ┌──────┴──────┐           Platform
///     │             │           PlatformToChild (one per child)
///   child         child
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "direction", rename_all = "camelCase")]
pub enum Link {
    /// Horizontal link from a partner box to the marriage junction.
    Marriage { from: NodeId, to: NodeId },

    /// Vertical drop from a parent (or junction) at `x` down to the platform.
    MarriageToPlatform {
        from: NodeId,
        x: f32,
        y1: f32,
        y2: f32,
    },

    /// The horizontal bus shared by all children of one parent.
    Platform { x1: f32, x2: f32, y: f32 },

    /// Vertical drop from the platform to one child.
    PlatformToChild {
        to: NodeId,
        x: f32,
        y1: f32,
        y2: f32,
    },

    /// Direct link from a marriage junction to its only child.
    MarriageToChild { from: NodeId, to: NodeId },

    /// Direct link from an unpartnered person to their only child.
    PersonToChild { from: NodeId, to: NodeId },
}

impl Link {
    /// Returns the wire name of this link's direction.
    pub fn direction(&self) -> &'static str {
        match self {
            Self::Marriage { .. } => "marriage",
            Self::MarriageToPlatform { .. } => "marriageToPlatform",
            Self::Platform { .. } => "platform",
            Self::PlatformToChild { .. } => "platformToChild",
            Self::MarriageToChild { .. } => "marriageToChild",
            Self::PersonToChild { .. } => "personToChild",
        }
    }

    /// Returns this link moved horizontally by `dx`.
    ///
    /// Only explicit x coordinates change; y never does, and id-only links are
    /// unaffected because they follow their nodes.
    pub fn translated(self, dx: f32) -> Self {
        match self {
            Self::MarriageToPlatform { from, x, y1, y2 } => Self::MarriageToPlatform {
                from,
                x: x + dx,
                y1,
                y2,
            },
            Self::Platform { x1, x2, y } => Self::Platform {
                x1: x1 + dx,
                x2: x2 + dx,
                y,
            },
            Self::PlatformToChild { to, x, y1, y2 } => Self::PlatformToChild {
                to,
                x: x + dx,
                y1,
                y2,
            },
            link @ (Self::Marriage { .. }
            | Self::MarriageToChild { .. }
            | Self::PersonToChild { .. }) => link,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::family::PersonId;

    fn person(id: u64) -> NodeId {
        NodeId::Person(Some(PersonId::new(id)))
    }

    #[test]
    fn test_translated_platform() {
        let link = Link::Platform {
            x1: 285.0,
            x2: 515.0,
            y: 250.0,
        };

        assert_eq!(
            link.translated(-85.0),
            Link::Platform {
                x1: 200.0,
                x2: 430.0,
                y: 250.0
            }
        );
    }

    #[test]
    fn test_translated_leaves_id_links_untouched() {
        let link = Link::PersonToChild {
            from: person(1),
            to: person(2),
        };
        assert_eq!(link.clone().translated(100.0), link);
    }

    #[test]
    fn test_translated_vertical_links_keep_y() {
        let link = Link::PlatformToChild {
            to: person(2),
            x: 10.0,
            y1: 250.0,
            y2: 320.0,
        };

        let Link::PlatformToChild { x, y1, y2, .. } = link.translated(5.0) else {
            panic!("variant changed");
        };
        assert_eq!((x, y1, y2), (15.0, 250.0, 320.0));
    }

    #[test]
    fn test_serialization_is_tagged_by_direction() {
        let link = Link::MarriageToPlatform {
            from: NodeId::Marriage {
                person: Some(PersonId::new(1)),
                partner: Some(PersonId::new(2)),
            },
            x: 400.0,
            y1: 180.0,
            y2: 250.0,
        };

        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "direction": "marriageToPlatform",
                "from": "1_2_marriage",
                "x": 400.0,
                "y1": 180.0,
                "y2": 250.0
            })
        );
    }

    #[test]
    fn test_direction_matches_serialized_tag() {
        let links = [
            Link::Marriage {
                from: person(1),
                to: person(2),
            },
            Link::Platform {
                x1: 0.0,
                x2: 1.0,
                y: 2.0,
            },
            Link::MarriageToChild {
                from: person(1),
                to: person(3),
            },
            Link::PersonToChild {
                from: person(1),
                to: person(3),
            },
        ];

        for link in links {
            let value = serde_json::to_value(&link).unwrap();
            assert_eq!(value["direction"], json!(link.direction()));
        }
    }
}
