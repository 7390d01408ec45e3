//! JSON:API document model.
//!
//! Schema-agnostic envelopes for the two response shapes the platform returns
//! (single resource / collection), the resource object itself, and the
//! relationship linkage. Attribute values stay as `serde_json::Value`; typed
//! access goes through the helpers in [`attrs`].
//!
//! Key items:
//!   ListDocument / SingleDocument  (read side)
//!   Resource / Relationship / RelationshipData
//!   WriteDocument                  (request bodies for POST / PATCH)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod attrs;
pub mod values;

pub use attrs::{
    IncludedIndex, any_attr, bool_attr, float_attr, format_ref_paren, format_ref_pipe, int_attr,
    relationship_id, relationship_ids, relationship_ref, string_attr, string_slice_attr,
};

pub type Attributes = Map<String, Value>;
pub type Relationships = BTreeMap<String, Relationship>;

/* ---- Identifiers & Relationships ---- */

/// A `{type, id}` pair. This pair is the only join key between `data` and
/// `included`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Linkage carried by a relationship object.
///
/// `NotLoaded` is a relationship object without a `data` member (links-only,
/// or not part of the sparse fieldset). `Null` is an explicit `"data": null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RelationshipData {
    #[default]
    NotLoaded,
    Null,
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

impl RelationshipData {
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, RelationshipData::NotLoaded)
    }
}

impl Serialize for RelationshipData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RelationshipData::NotLoaded | RelationshipData::Null => serializer.serialize_none(),
            RelationshipData::One(identifier) => identifier.serialize(serializer),
            RelationshipData::Many(identifiers) => identifiers.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

// Only invoked when the `data` member is present, so absence stays `NotLoaded`.
fn deserialize_linkage<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RelationshipData, D::Error> {
    Ok(match Option::<Linkage>::deserialize(deserializer)? {
        None => RelationshipData::Null,
        Some(Linkage::One(identifier)) => RelationshipData::One(identifier),
        Some(Linkage::Many(identifiers)) => RelationshipData::Many(identifiers),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(
        default,
        deserialize_with = "deserialize_linkage",
        skip_serializing_if = "RelationshipData::is_not_loaded"
    )]
    pub data: RelationshipData,
}

impl Relationship {
    pub fn to_one(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: RelationshipData::One(ResourceIdentifier::new(kind, id)),
        }
    }

    pub fn to_many<I, S>(kind: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: RelationshipData::Many(
                ids.into_iter()
                    .map(|id| ResourceIdentifier::new(kind, id))
                    .collect(),
            ),
        }
    }

    /// `{"data": null}`, the explicit clearing instruction for a to-one write.
    pub fn null() -> Self {
        Self {
            data: RelationshipData::Null,
        }
    }
}

/* ---- Resources & Documents ---- */

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: Relationships,
}

/// Collection response: `data` is an array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Resource>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub included: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ListDocument {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// Single-resource response: `data` is one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleDocument {
    pub data: Resource,
    #[serde(default, deserialize_with = "null_as_default")]
    pub included: Vec<Resource>,
}

impl SingleDocument {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Reuse collection projection code for a single resource.
    pub fn into_list(self) -> ListDocument {
        ListDocument {
            data: vec![self.data],
            included: self.included,
            meta: None,
        }
    }
}

/* ---- Write Side ---- */

#[derive(Debug, Clone, Serialize)]
pub struct WriteResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: Relationships,
}

/// Request body for create (POST) and update (PATCH).
#[derive(Debug, Clone, Serialize)]
pub struct WriteDocument {
    pub data: WriteResource,
}

impl WriteDocument {
    pub fn new(kind: &str, id: Option<String>) -> Self {
        Self {
            data: WriteResource {
                kind: kind.to_string(),
                id,
                attributes: Attributes::new(),
                relationships: Relationships::new(),
            },
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.data.attributes.is_empty() || !self.data.relationships.is_empty()
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
