/*!
body.rs - JSON:API request bodies for create (POST) and update (PATCH).

Input is the set of flags actually given on the command line (flag name ->
raw string). Anything not in that set never reaches the body, which is what
gives update its partial-PATCH semantics and keeps omitted relationships out
of a create body entirely.

Blank values:
  - create: skipped (same as not given)
  - update: clear the field; a to-one sends `{"data": null}`, a to-many
    `{"data": []}`, a non-text attribute `null`
*/

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cmd::shared::ValidationError;
use crate::jsonapi::values::split_comma_list;
use crate::jsonapi::{Relationship, WriteDocument};
use crate::resources::{Input, InputKind, ResourceSpec, Target};

/// Flag name -> raw value, for flags given on the command line only.
pub type InputValues = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update,
}

pub fn build_write_document(
    spec: &ResourceSpec,
    mode: WriteMode,
    id: Option<&str>,
    values: &InputValues,
) -> Result<WriteDocument, ValidationError> {
    validate(spec, mode, values)?;

    let mut doc = WriteDocument::new(spec.name, id.map(str::to_string));
    for input in spec.inputs {
        let Some(raw) = values.get(input.flag) else {
            continue;
        };
        let blank = raw.trim().is_empty();
        if blank && mode == WriteMode::Create {
            continue;
        }
        match input.target {
            Target::Attr(key, kind) => {
                let value = coerce_attr(input, kind, raw, blank)?;
                doc.data.attributes.insert(key.to_string(), value);
            }
            Target::ToOne { rel, kind } => {
                let rel_value = if blank {
                    Relationship::null()
                } else {
                    Relationship::to_one(kind, raw.trim())
                };
                doc.data.relationships.insert(rel.to_string(), rel_value);
            }
            Target::ToMany { rel, kind } => {
                let ids = split_comma_list(raw);
                doc.data
                    .relationships
                    .insert(rel.to_string(), Relationship::to_many(kind, ids));
            }
            Target::PolyType { rel } => {
                let id_raw = partner_value(spec, values, Target::PolyId { rel }).unwrap_or("");
                let rel_value = if blank || id_raw.trim().is_empty() {
                    Relationship::null()
                } else {
                    Relationship::to_one(raw.trim(), id_raw.trim())
                };
                doc.data.relationships.insert(rel.to_string(), rel_value);
            }
            // Emitted together with its type half.
            Target::PolyId { .. } => {}
        }
    }

    if mode == WriteMode::Update && !doc.has_changes() {
        return Err(ValidationError::NoChanges);
    }
    Ok(doc)
}

fn validate(spec: &ResourceSpec, mode: WriteMode, values: &InputValues) -> Result<(), ValidationError> {
    let given = |input: &Input| {
        values
            .get(input.flag)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    };

    if mode == WriteMode::Create
        && let Some(missing) = spec.inputs.iter().find(|i| i.required && !given(i))
    {
        return Err(ValidationError::Required(missing.flag.to_string()));
    }

    for input in spec.inputs {
        if let Target::PolyType { rel } = input.target
            && let Some(id_input) = spec
                .inputs
                .iter()
                .find(|i| i.target == Target::PolyId { rel })
        {
            // Both halves are given together, or neither is.
            if values.contains_key(input.flag) != values.contains_key(id_input.flag)
                || given(input) != given(id_input)
            {
                return Err(ValidationError::Paired {
                    first: input.flag.to_string(),
                    second: id_input.flag.to_string(),
                });
            }
        }

        let Some(raw) = values.get(input.flag) else {
            continue;
        };
        let value = raw.trim();
        if !value.is_empty() && !input.choices.is_empty() && !input.choices.contains(&value) {
            return Err(ValidationError::InvalidChoice {
                flag: input.flag.to_string(),
                value: value.to_string(),
                allowed: input.choices.join(", "),
            });
        }
    }
    Ok(())
}

fn partner_value<'v>(spec: &ResourceSpec, values: &'v InputValues, target: Target) -> Option<&'v str> {
    let partner = spec.inputs.iter().find(|i| i.target == target)?;
    values.get(partner.flag).map(String::as_str)
}

fn coerce_attr(input: &Input, kind: InputKind, raw: &str, blank: bool) -> Result<Value, ValidationError> {
    if blank {
        return Ok(match kind {
            InputKind::Text => Value::String(raw.to_string()),
            InputKind::List => Value::Array(Vec::new()),
            _ => Value::Null,
        });
    }
    let value = raw.trim();
    match kind {
        InputKind::Text => Ok(Value::String(raw.to_string())),
        InputKind::Bool => match value.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ValidationError::InvalidBool {
                flag: input.flag.to_string(),
                value: value.to_string(),
            }),
        },
        InputKind::Integer => value
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| ValidationError::InvalidNumber {
                flag: input.flag.to_string(),
                value: value.to_string(),
            }),
        InputKind::Number => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::String(value.to_string())),
            _ => Err(ValidationError::InvalidNumber {
                flag: input.flag.to_string(),
                value: value.to_string(),
            }),
        },
        InputKind::List => Ok(Value::from(split_comma_list(value))),
        InputKind::Json => serde_json::from_str(value).map_err(|e| ValidationError::InvalidJson {
            flag: input.flag.to_string(),
            reason: e.to_string(),
        }),
    }
}
