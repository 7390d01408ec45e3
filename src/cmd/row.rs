/*!
row.rs - projection of JSON:API resources into flat display rows.

A row is an ordered JSON object keyed by the descriptor's field names. Values
keep their JSON type (bools stay bools, decimals stay numbers) so `--json`
output is typed; the table / detail renderers format them for display.

Relationship targets missing from `included` simply project to `""`; the
table falls back to the bare id through its column fallback chain.
*/

use serde_json::{Map, Number, Value};

use crate::jsonapi::values::{format_date, format_datetime, format_decimal};
use crate::jsonapi::{
    IncludedIndex, ListDocument, Resource, any_attr, bool_attr, float_attr, format_ref_paren,
    format_ref_pipe, int_attr, relationship_id, relationship_ids, relationship_ref, string_attr,
    string_slice_attr,
};
use crate::resources::{AttrKind, Field, RefStyle, ResourceSpec, Source};

pub type Row = Map<String, Value>;

pub fn project_rows(spec: &ResourceSpec, doc: &ListDocument) -> Vec<Row> {
    let index = IncludedIndex::new(&doc.included);
    tracing::trace!(rows = doc.data.len(), included = index.len(), "projecting rows");
    doc.data
        .iter()
        .map(|resource| project_row(spec, resource, &index))
        .collect()
}

pub fn project_row(spec: &ResourceSpec, resource: &Resource, index: &IncludedIndex<'_>) -> Row {
    let mut row = Row::new();
    for field in spec.fields {
        let value = evaluate(&field.source, resource, index);
        if field.omit_empty && is_empty(&value) {
            continue;
        }
        row.insert(field.name.to_string(), value);
    }
    row
}

fn evaluate(source: &Source, resource: &Resource, index: &IncludedIndex<'_>) -> Value {
    let rels = &resource.relationships;
    match source {
        Source::Id => Value::String(resource.id.clone()),
        Source::Attr(key, kind) => attr_value(resource, key, *kind),
        Source::RelId(rel) => Value::String(relationship_id(rels, rel)),
        Source::RelIds(rel) => Value::from(relationship_ids(rels, rel)),
        Source::RelType(rel) => Value::String(
            relationship_ref(rels, rel)
                .map(|r| r.kind.clone())
                .unwrap_or_default(),
        ),
        Source::RelRef(rel, style) => Value::String(
            relationship_ref(rels, rel)
                .filter(|r| !r.id.is_empty())
                .map(|r| match style {
                    RefStyle::Pipe => format_ref_pipe(r),
                    RefStyle::Paren => format_ref_paren(r),
                })
                .unwrap_or_default(),
        ),
        Source::Joined { rel, attrs } => Value::String(
            relationship_ref(rels, rel)
                .map(|r| index.label(&r.kind, &r.id, attrs))
                .unwrap_or_default(),
        ),
        Source::FallbackRel {
            rels: candidates,
            label,
        } => {
            let chosen = candidates.iter().find_map(|(rel, attrs)| {
                relationship_ref(rels, rel)
                    .filter(|r| !r.id.trim().is_empty())
                    .map(|r| (r, *attrs))
            });
            Value::String(match chosen {
                Some((r, attrs)) if *label => index.label(&r.kind, &r.id, attrs),
                Some((r, _)) => r.id.clone(),
                None => String::new(),
            })
        }
    }
}

fn attr_value(resource: &Resource, key: &str, kind: AttrKind) -> Value {
    let attrs = &resource.attributes;
    match kind {
        AttrKind::Text | AttrKind::DateTime | AttrKind::Date => {
            Value::String(string_attr(attrs, key).trim().to_string())
        }
        AttrKind::Bool => Value::Bool(bool_attr(attrs, key)),
        AttrKind::Decimal => Number::from_f64(float_attr(attrs, key))
            .map(Value::Number)
            .unwrap_or(Value::from(0)),
        AttrKind::Integer => Value::from(int_attr(attrs, key)),
        AttrKind::List => Value::from(string_slice_attr(attrs, key)),
        AttrKind::Raw => any_attr(attrs, key).cloned().unwrap_or(Value::Null),
    }
}

/// Empty string, zero, empty array/object or null. `false` is a value.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) => false,
    }
}

/* ---- Display ---- */

/// Human rendering of a row value according to the field's kind.
pub fn display_value(field: Option<&Field>, value: &Value) -> String {
    let kind = field.map(Field::display_kind).unwrap_or(AttrKind::Text);
    match (kind, value) {
        (_, Value::Null) => String::new(),
        (_, Value::Bool(b)) => String::from(if *b { "yes" } else { "no" }),
        (AttrKind::Decimal, Value::Number(n)) => format_decimal(n.as_f64().unwrap_or(0.0)),
        (AttrKind::DateTime, Value::String(s)) => format_datetime(s),
        (AttrKind::Date, Value::String(s)) => format_date(s),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Number(n)) => n.to_string(),
        (_, Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        (_, Value::Object(_)) => value.to_string(),
    }
}

/// First non-empty display value among `keys`.
pub fn display_first(spec: &ResourceSpec, row: &Row, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| row.get(*key).map(|v| display_value(spec.field(key), v)))
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

/// Removes `null` members (the `--omit-null` output mode).
pub fn omit_nulls(row: &mut Row) {
    row.retain(|_, v| !v.is_null());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::registry;
    use serde_json::json;

    fn doc(value: Value) -> ListDocument {
        serde_json::from_value(value).unwrap()
    }

    fn spec(name: &str) -> &'static ResourceSpec {
        registry::find(name).unwrap()
    }

    #[test]
    fn null_to_one_projects_to_empty_string() {
        let d = doc(json!({
            "data": [{
                "type": "customer-tenders",
                "id": "1",
                "attributes": {"status": "editing"},
                "relationships": {
                    "job": {"data": null},
                    "buyer": {"data": null},
                    "seller": {"data": {"type": "brokers", "id": "9"}}
                }
            }]
        }));
        let rows = project_rows(spec("customer-tenders"), &d);
        let row = &rows[0];
        // Optional fields drop out, required ones stay as "".
        assert!(!row.contains_key("job_id"));
        assert_eq!(row["broker_id"], json!("9"));

        let d = doc(json!({
            "data": [{
                "type": "broker-memberships",
                "id": "2",
                "relationships": {"user": {"data": null}, "broker": {"data": null}}
            }]
        }));
        let row = &project_rows(spec("broker-memberships"), &d)[0];
        assert_eq!(row["user_id"], json!(""));
        assert_eq!(row["user_name"], json!(""));
        assert_eq!(row["broker_id"], json!(""));
        assert_eq!(row["broker_name"], json!(""));
    }

    #[test]
    fn joins_included_by_type_and_id() {
        let d = doc(json!({
            "data": [
                {"type": "broker-memberships", "id": "1", "attributes": {"kind": "manager"},
                 "relationships": {
                    "user": {"data": {"type": "users", "id": "7"}},
                    "broker": {"data": {"type": "brokers", "id": "123"}}
                 }},
                {"type": "broker-memberships", "id": "2", "attributes": {"kind": "operations"},
                 "relationships": {
                    "organization": {"data": {"type": "brokers", "id": "123"}}
                 }}
            ],
            "included": [
                {"type": "users", "id": "123", "attributes": {"name": "Wrong Type"}},
                {"type": "brokers", "id": "123", "attributes": {"company-name": "Acme Hauling"}},
                {"type": "users", "id": "7", "attributes": {"name": " Jane Doe "}}
            ]
        }));
        let rows = project_rows(spec("broker-memberships"), &d);
        assert_eq!(rows[0]["user_name"], json!("Jane Doe"));
        assert_eq!(rows[0]["broker_name"], json!("Acme Hauling"));
        // Falls back to the organization relationship.
        assert_eq!(rows[1]["broker_id"], json!("123"));
        assert_eq!(rows[1]["broker_name"], json!("Acme Hauling"));
        assert_eq!(rows[1]["user_id"], json!(""));
    }

    #[test]
    fn broker_name_comes_from_the_relationship_that_supplied_the_id() {
        let d = doc(json!({
            "data": [{"type": "broker-memberships", "id": "1",
                      "relationships": {
                        "broker": {"data": {"type": "brokers", "id": "1"}},
                        "organization": {"data": {"type": "brokers", "id": "2"}}
                      }}],
            "included": [
                {"type": "brokers", "id": "2", "attributes": {"company-name": "Other Co"}}
            ]
        }));
        let s = spec("broker-memberships");
        let row = &project_rows(s, &d)[0];
        assert_eq!(row["broker_id"], json!("1"));
        assert_eq!(row["broker_name"], json!(""));
        assert_eq!(display_first(s, row, &["broker_name", "broker_id"]), "1");
    }

    #[test]
    fn raw_attributes_pass_through() {
        let d = doc(json!({
            "data": [
                {"type": "brokers", "id": "1",
                 "attributes": {"company-name": "Acme", "active-equipment-rental-notification-days": [1, 3, 5]}},
                {"type": "brokers", "id": "2", "attributes": {"company-name": "Bare"}}
            ]
        }));
        let s = spec("brokers");
        let rows = project_rows(s, &d);
        let days = &rows[0]["active_equipment_rental_notification_days"];
        assert_eq!(days, &json!([1, 3, 5]));
        assert_eq!(
            display_value(s.field("active_equipment_rental_notification_days"), days),
            "1, 3, 5"
        );
        assert!(!rows[1].contains_key("active_equipment_rental_notification_days"));
    }

    #[test]
    fn missing_include_falls_back_to_id_in_table_cells() {
        let d = doc(json!({
            "data": [{"type": "job-sites", "id": "5", "attributes": {"name": "Quarry"},
                      "relationships": {"customer": {"data": {"type": "customers", "id": "44"}}}}]
        }));
        let s = spec("job-sites");
        let row = &project_rows(s, &d)[0];
        assert!(!row.contains_key("customer"));
        assert_eq!(display_first(s, row, &["customer", "customer_id"]), "44");
    }

    #[test]
    fn typed_values_and_display() {
        let d = doc(json!({
            "data": [{"type": "time-cards", "id": "3", "attributes": {
                "total-hours": "8.5", "approval-count": 2.0, "start-at": "2024-03-01T14:05:00Z",
                "status": 17
            }}]
        }));
        let s = spec("time-cards");
        let row = &project_rows(s, &d)[0];
        assert_eq!(row["total_hours"], json!(8.5));
        assert_eq!(row["approval_count"], json!(2));
        assert!(!row.contains_key("status"));
        assert_eq!(display_value(s.field("total_hours"), &row["total_hours"]), "8.50");
        assert_eq!(display_value(s.field("start_at"), &row["start_at"]), "2024-03-01 14:05 UTC");
        // JSON keeps the raw timestamp.
        assert_eq!(row["start_at"], json!("2024-03-01T14:05:00Z"));
    }

    #[test]
    fn polymorphic_refs() {
        let d = doc(json!({
            "data": [{"type": "tenders", "id": "8", "relationships": {
                "buyer": {"data": {"type": "customers", "id": "4"}},
                "seller": {"data": null}
            }}]
        }));
        let s = spec("tenders");
        let row = &project_rows(s, &d)[0];
        assert_eq!(row["buyer_ref"], json!("customers|4"));
        assert_eq!(row["buyer_type"], json!("customers"));
        assert!(!row.contains_key("seller_ref"));
        assert_eq!(display_first(s, row, &["buyer", "buyer_ref"]), "customers|4");

        let d = doc(json!({
            "data": [{"type": "safety-incidents", "id": "1", "relationships": {
                "subject": {"data": {"type": "truckers", "id": "12"}}
            }}]
        }));
        let row = &project_rows(spec("safety-incidents"), &d)[0];
        assert_eq!(row["subject"], json!("truckers (12)"));
    }

    #[test]
    fn to_many_ids_keep_order() {
        let d = doc(json!({
            "data": [{"type": "jobs", "id": "1", "relationships": {
                "material-types": {"data": [
                    {"type": "material-types", "id": "9"},
                    {"type": "material-types", "id": "2"}
                ]}
            }}]
        }));
        let s = spec("jobs");
        let row = &project_rows(s, &d)[0];
        assert_eq!(row["material_type_ids"], json!(["9", "2"]));
        assert_eq!(display_value(s.field("material_type_ids"), &row["material_type_ids"]), "9, 2");
    }

    #[test]
    fn omit_nulls_drops_only_nulls() {
        let mut row = Row::new();
        row.insert("a".into(), Value::Null);
        row.insert("b".into(), json!(""));
        row.insert("c".into(), json!(false));
        omit_nulls(&mut row);
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }
}
