//! Typed accessors over the untyped attribute map, relationship resolvers, and
//! the `included` join index.
//!
//! Every getter degrades to the zero value on a missing key, a `null`, or a
//! value of the wrong JSON type. Evolving server payloads show up as blank
//! display fields, never as a crash.

use std::collections::HashMap;

use serde_json::Value;

use super::{Attributes, RelationshipData, Relationships, Resource, ResourceIdentifier};

/* ---- Attribute Getters ---- */

pub fn string_attr(attrs: &Attributes, key: &str) -> String {
    match attrs.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

pub fn bool_attr(attrs: &Attributes, key: &str) -> bool {
    matches!(attrs.get(key), Some(Value::Bool(true)))
}

/// Numbers, plus numeric strings (decimals are often serialized as strings).
pub fn float_attr(attrs: &Attributes, key: &str) -> f64 {
    match attrs.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Integral numbers as-is; floats are truncated toward zero.
pub fn int_attr(attrs: &Attributes, key: &str) -> i64 {
    match attrs.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// String elements of an array attribute; non-string elements are skipped.
pub fn string_slice_attr(attrs: &Attributes, key: &str) -> Vec<String> {
    match attrs.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Raw passthrough; `None` for absent or `null`.
pub fn any_attr<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a Value> {
    attrs.get(key).filter(|v| !v.is_null())
}

/* ---- Relationship Resolvers ---- */

pub fn relationship_ref<'a>(rels: &'a Relationships, key: &str) -> Option<&'a ResourceIdentifier> {
    match &rels.get(key)?.data {
        RelationshipData::One(identifier) => Some(identifier),
        _ => None,
    }
}

/// To-one id, or `""` when the relationship is null, absent, or to-many.
pub fn relationship_id(rels: &Relationships, key: &str) -> String {
    relationship_ref(rels, key)
        .map(|r| r.id.clone())
        .unwrap_or_default()
}

/// Ordered ids of a to-many relationship. A to-one yields its single id.
pub fn relationship_ids(rels: &Relationships, key: &str) -> Vec<String> {
    match rels.get(key).map(|r| &r.data) {
        Some(RelationshipData::One(identifier)) => vec![identifier.id.clone()],
        Some(RelationshipData::Many(identifiers)) => identifiers
            .iter()
            .filter(|i| !i.id.is_empty())
            .map(|i| i.id.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// `brokers|42`
pub fn format_ref_pipe(identifier: &ResourceIdentifier) -> String {
    format!("{}|{}", identifier.kind, identifier.id)
}

/// `brokers (42)`
pub fn format_ref_paren(identifier: &ResourceIdentifier) -> String {
    format!("{} ({})", identifier.kind, identifier.id)
}

/* ---- Included Index ---- */

const KEY_SEPARATOR: char = '|';

/// Join key for `(type, id)`.
///
/// Injective as long as `kind` never contains the separator; JSON:API type
/// names are dasherized identifiers, so only ids may carry it, and splitting
/// at the first separator recovers both parts.
pub fn resource_key(kind: &str, id: &str) -> String {
    let mut key = String::with_capacity(kind.len() + id.len() + 1);
    key.push_str(kind);
    key.push(KEY_SEPARATOR);
    key.push_str(id);
    key
}

/// Lookup of `included` resources by `(type, id)`.
#[derive(Debug, Default)]
pub struct IncludedIndex<'a> {
    by_key: HashMap<String, &'a Resource>,
}

impl<'a> IncludedIndex<'a> {
    pub fn new(included: &'a [Resource]) -> Self {
        let mut by_key = HashMap::with_capacity(included.len());
        for resource in included {
            by_key
                .entry(resource_key(&resource.kind, &resource.id))
                .or_insert(resource);
        }
        Self { by_key }
    }

    pub fn get(&self, kind: &str, id: &str) -> Option<&'a Resource> {
        if id.is_empty() {
            return None;
        }
        self.by_key.get(&resource_key(kind, id)).copied()
    }

    /// First non-blank string among `attrs` of the joined resource, or `""`
    /// when the resource was not included.
    pub fn label(&self, kind: &str, id: &str, attrs: &[&str]) -> String {
        let Some(resource) = self.get(kind, id) else {
            return String::new();
        };
        attrs
            .iter()
            .map(|key| string_attr(&resource.attributes, key))
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::Relationship;
    use serde_json::json;
    use std::collections::HashSet;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn getters_return_zero_values_on_absent_null_or_mistyped() {
        let a = attrs(json!({
            "null": null,
            "num": 12,
            "text": "abc",
            "flag": true,
            "list": ["a", 1, "b"],
            "obj": {"k": "v"}
        }));
        assert_eq!(string_attr(&a, "missing"), "");
        assert_eq!(string_attr(&a, "null"), "");
        assert_eq!(string_attr(&a, "num"), "");
        assert!(!bool_attr(&a, "text"));
        assert!(!bool_attr(&a, "null"));
        assert!(bool_attr(&a, "flag"));
        assert_eq!(float_attr(&a, "flag"), 0.0);
        assert_eq!(float_attr(&a, "text"), 0.0);
        assert_eq!(int_attr(&a, "text"), 0);
        assert_eq!(int_attr(&a, "obj"), 0);
        assert!(string_slice_attr(&a, "text").is_empty());
        assert_eq!(string_slice_attr(&a, "list"), vec!["a", "b"]);
        assert!(any_attr(&a, "null").is_none());
        assert_eq!(any_attr(&a, "obj"), Some(&json!({"k": "v"})));
    }

    #[test]
    fn numeric_coercions() {
        let a = attrs(json!({"price": "12.5", "qty": 3, "hours": 7.9, "neg": -2.7}));
        assert_eq!(float_attr(&a, "price"), 12.5);
        assert_eq!(float_attr(&a, "qty"), 3.0);
        assert_eq!(int_attr(&a, "qty"), 3);
        assert_eq!(int_attr(&a, "hours"), 7);
        assert_eq!(int_attr(&a, "neg"), -2);
    }

    #[test]
    fn relationship_resolvers() {
        let mut rels = Relationships::new();
        rels.insert("job".into(), Relationship::null());
        rels.insert("broker".into(), Relationship::to_one("brokers", "9"));
        rels.insert("tags".into(), Relationship::to_many("tags", ["1", "2"]));
        rels.insert("seller".into(), Relationship::default());

        assert_eq!(relationship_id(&rels, "job"), "");
        assert_eq!(relationship_id(&rels, "seller"), "");
        assert_eq!(relationship_id(&rels, "missing"), "");
        assert_eq!(relationship_id(&rels, "tags"), "");
        assert_eq!(relationship_id(&rels, "broker"), "9");
        assert_eq!(relationship_ids(&rels, "tags"), vec!["1", "2"]);
        assert_eq!(relationship_ids(&rels, "broker"), vec!["9"]);
        assert!(relationship_ids(&rels, "job").is_empty());

        let r = relationship_ref(&rels, "broker").unwrap();
        assert_eq!(format_ref_pipe(r), "brokers|9");
        assert_eq!(format_ref_paren(r), "brokers (9)");
    }

    #[test]
    fn resource_key_is_injective_for_realistic_pairs() {
        let pairs = [
            ("brokers", "1"),
            ("brokers", "11"),
            ("broker", "s1"),
            ("customers", "1"),
            ("customers", "1|2"),
            ("customers", "|"),
            ("customers", ""),
            ("customers|1", "2"), // type with separator: documented limitation
        ];
        let realistic: Vec<_> = pairs.iter().filter(|(t, _)| !t.contains('|')).collect();
        let keys: HashSet<_> = realistic.iter().map(|(t, i)| resource_key(t, i)).collect();
        assert_eq!(keys.len(), realistic.len());

        // The id carrying the separator does not collide with another realistic pair.
        assert_ne!(resource_key("customers", "1|2"), resource_key("customers", "1"));
        // Known limitation: a type containing the separator can collide.
        assert_eq!(resource_key("customers|1", "2"), resource_key("customers", "1|2"));
    }

    #[test]
    fn included_index_joins_on_type_and_id() {
        let included: Vec<Resource> = serde_json::from_value(json!([
            {"type": "brokers", "id": "1", "attributes": {"company-name": "  ", "name": "Acme"}},
            {"type": "customers", "id": "1", "attributes": {"company-name": "Beta"}}
        ]))
        .unwrap();
        let index = IncludedIndex::new(&included);
        assert_eq!(index.len(), 2);
        assert_eq!(index.label("brokers", "1", &["company-name", "name"]), "Acme");
        assert_eq!(index.label("customers", "1", &["company-name"]), "Beta");
        assert_eq!(index.label("truckers", "1", &["company-name"]), "");
        assert!(index.get("brokers", "").is_none());
    }
}
