//! Person and marriage-junction nodes.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    family::{PersonId, PersonRecord},
    geometry::Point,
};

/// Keys written by the node itself; record fields with the same name are dropped.
const RESERVED_KEYS: [&str; 7] = ["id", "x", "y", "isPerson", "isMarriage", "rectW", "name"];

/// Identifier of a layout node.
///
/// Person nodes reuse the person's id. A marriage junction is identified by
/// both partners' ids, rendered as `"{person}_{partner}_marriage"`. A missing
/// person id is kept as `None` and shown as `undefined`; it is never invented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Person(Option<PersonId>),
    Marriage {
        person: Option<PersonId>,
        partner: Option<PersonId>,
    },
}

fn fmt_optional_id(id: Option<PersonId>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match id {
        Some(id) => write!(f, "{id}"),
        None => f.write_str("undefined"),
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Person(id) => fmt_optional_id(id, f),
            Self::Marriage { person, partner } => {
                fmt_optional_id(person, f)?;
                f.write_str("_")?;
                fmt_optional_id(partner, f)?;
                f.write_str("_marriage")
            }
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Person(Some(id)) => serializer.serialize_u64(id.value()),
            Self::Person(None) => serializer.serialize_none(),
            Self::Marriage { .. } => serializer.collect_str(self),
        }
    }
}

/// What a node draws as.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A person box of the given width carrying a copy of the person's fields.
    Person { record: PersonRecord, width: f32 },
    /// A zero-size junction between two partners; origin of child connectors.
    Marriage,
}

/// A positioned element of the family diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    position: Point,
    kind: NodeKind,
}

impl Node {
    /// Creates a person node centered at `position`.
    pub fn person(record: PersonRecord, position: Point, width: f32) -> Self {
        Self {
            id: NodeId::Person(record.id()),
            position,
            kind: NodeKind::Person { record, width },
        }
    }

    /// Creates the junction node of a partnered pair.
    pub fn marriage(person: Option<PersonId>, partner: Option<PersonId>, position: Point) -> Self {
        Self {
            id: NodeId::Marriage { person, partner },
            position,
            kind: NodeKind::Marriage,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_person(&self) -> bool {
        matches!(self.kind, NodeKind::Person { .. })
    }

    pub fn is_marriage(&self) -> bool {
        matches!(self.kind, NodeKind::Marriage)
    }

    /// Returns the person's fields for person nodes.
    pub fn record(&self) -> Option<&PersonRecord> {
        match &self.kind {
            NodeKind::Person { record, .. } => Some(record),
            NodeKind::Marriage => None,
        }
    }

    /// Returns this node moved horizontally by `dx`.
    pub fn translated(self, dx: f32) -> Self {
        Self {
            position: self.position.translate_x(dx),
            ..self
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("x", &self.position.x())?;
        map.serialize_entry("y", &self.position.y())?;

        match &self.kind {
            NodeKind::Person { record, width } => {
                map.serialize_entry("isPerson", &true)?;
                map.serialize_entry("rectW", width)?;
                if let Some(name) = record.name() {
                    map.serialize_entry("name", name)?;
                }
                for (key, value) in record.extra() {
                    if !RESERVED_KEYS.contains(&key.as_str()) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
            NodeKind::Marriage => map.serialize_entry("isMarriage", &true)?,
        }

        map.end()
    }
}
