//! The input family model.
//!
//! A family tree arrives as one apex [`Person`] with an optional partner
//! (`wife` or `husband`) and recursively nested `children`. Child order is
//! significant: it is the left-to-right order of the rendered generation.
//!
//! Deserialization is permissive. Every field may be missing, `children`
//! that are not a list mean a leaf, a partner that is not an object means
//! no partner, and any field the layout does not know about is kept in
//! [`Person::extra`] so it can travel to the renderer. Only `id` is typed
//! strictly: it must be a non-negative integer.
//!
//! # Examples
//!
//! ```
//! # use lineage_core::family::Person;
//! let json = r#"{
//!     "id": 1,
//!     "name": "Olena",
//!     "husband": { "id": 2, "name": "Taras" },
//!     "children": [{ "id": 3, "name": "Ivan", "born": 1990 }]
//! }"#;
//!
//! let root: Person = serde_json::from_str(json).unwrap();
//! assert_eq!(root.partner().and_then(|p| p.name()), Some("Taras"));
//! assert_eq!(root.children().len(), 1);
//! assert!(root.children()[0].extra().contains_key("born"));
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

/// Stable numeric identifier of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u64);

impl PersonId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One person of the family tree, with an optional partner and ordered children.
///
/// A partner is person-shaped, but the layout never descends into a
/// partner's own `children`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    #[serde(default)]
    id: Option<PersonId>,

    #[serde(default, deserialize_with = "lenient_name")]
    name: Option<String>,

    #[serde(default, deserialize_with = "lenient_partner")]
    wife: Option<Box<Person>>,

    #[serde(default, deserialize_with = "lenient_partner")]
    husband: Option<Box<Person>>,

    #[serde(default, deserialize_with = "lenient_children")]
    children: Vec<Person>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Strings are kept, numbers and booleans are shown as written, anything
/// else counts as no name.
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => Some(name),
        value @ (Value::Number(_) | Value::Bool(_)) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_partner<'de, D>(deserializer: D) -> Result<Option<Box<Person>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Person::deserialize(value)
            .map(|partner| Some(Box::new(partner)))
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Anything but a list is a leaf. Entries that are not objects are dropped.
fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<Person>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    items
        .into_iter()
        .filter(Value::is_object)
        .map(|item| Person::deserialize(item).map_err(D::Error::custom))
        .collect()
}

impl Person {
    /// Creates a person with an id and a name, no partner and no children.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the wife of this person (builder style).
    pub fn with_wife(mut self, wife: Person) -> Self {
        self.wife = Some(Box::new(wife));
        self
    }

    /// Sets the husband of this person (builder style).
    pub fn with_husband(mut self, husband: Person) -> Self {
        self.husband = Some(Box::new(husband));
        self
    }

    /// Appends a child after the existing ones (builder style).
    pub fn with_child(mut self, child: Person) -> Self {
        self.children.push(child);
        self
    }

    /// Replaces the children of this person (builder style).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Person>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Stores an additional field that is carried verbatim onto the person's node.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Replaces the name (builder style). `None` models a record without one.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn id(&self) -> Option<PersonId> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True when the person carries a non-empty name.
    ///
    /// An unnamed partner is treated as no partner at all.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Returns the recorded partner: the wife if present, otherwise the husband.
    pub fn partner(&self) -> Option<&Person> {
        self.wife.as_deref().or(self.husband.as_deref())
    }

    pub fn children(&self) -> &[Person] {
        &self.children
    }

    /// Fields of the input record the layout does not interpret.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Returns a copy of the fields that are placed on this person's node.
    pub fn record(&self) -> PersonRecord {
        PersonRecord {
            id: self.id,
            name: self.name.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Counts this person and every descendant reachable through `children`.
    pub fn descendant_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Person::descendant_count)
            .sum::<usize>()
    }

    /// Number of generations below and including this person.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Person::depth).max().unwrap_or(0)
    }
}

/// The copy of a person's own fields carried by a person node.
///
/// Partners and children are not part of the record; they get nodes of
/// their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonRecord {
    id: Option<PersonId>,
    name: Option<String>,
    extra: Map<String, Value>,
}

impl PersonRecord {
    pub fn id(&self) -> Option<PersonId> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
