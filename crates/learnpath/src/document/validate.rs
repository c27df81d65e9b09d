//! Ordered, fail-fast shape validation.
//!
//! Checks run in a fixed order: top-level keys, then each phase (name and
//! non-empty step list), then each step (title, description, resources).
//! Text fields are type-checked where they are required, so the first
//! defect in document order is the one reported, with the dotted path of
//! the field.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{
    Document, HybridDocument, Platform, PlainDocument, SchemaVersion, SpecializedDocument, schema,
};
use crate::error::PathError;

type Object = Map<String, Value>;

const MISSING: &str = "missing required field";

/// Validate a decoded value against `version` and produce a typed document.
pub fn validate(value: Value, version: SchemaVersion) -> Result<Document, PathError> {
    let root = value
        .as_object()
        .ok_or_else(|| PathError::violation("$", "expected a JSON object"))?;

    match version {
        SchemaVersion::V1 => check_phased(root, plain_resources)?,
        SchemaVersion::V2 => check_phased(root, hybrid_resources)?,
        SchemaVersion::V3 => check_specialized(root)?,
    }
    schema::check_types(&value, version)?;

    Ok(match version {
        SchemaVersion::V1 => Document::Plain(into_typed::<PlainDocument>(value)?),
        SchemaVersion::V2 => Document::Hybrid(into_typed::<HybridDocument>(value)?),
        SchemaVersion::V3 => Document::Specialized(into_typed::<SpecializedDocument>(value)?),
    })
}

fn into_typed<T: DeserializeOwned>(value: Value) -> Result<T, PathError> {
    serde_json::from_value(value).map_err(|e| PathError::violation("$", e.to_string()))
}

type ResourceCheck = fn(&Object, &str) -> Result<(), PathError>;

/// V1 and V2: `title` and a non-empty `phases` list.
fn check_phased(root: &Object, resources: ResourceCheck) -> Result<(), PathError> {
    require_keys(root, "", &["title", "phases"])?;
    require_strings(root, "", &["title"])?;
    let phases = require_array(root, "", "phases")?;
    if phases.is_empty() {
        return Err(PathError::violation(
            "phases",
            "must contain at least one phase",
        ));
    }
    for (i, phase) in phases.iter().enumerate() {
        check_phase(phase, &format!("phases[{i}]"), resources)?;
    }
    Ok(())
}

/// V3: `title`, a `coreTopic` phase and a `specializations` list.
fn check_specialized(root: &Object) -> Result<(), PathError> {
    require_keys(root, "", &["title", "coreTopic", "specializations"])?;
    require_strings(root, "", &["title"])?;
    check_phase(&root["coreTopic"], "coreTopic", hybrid_resources)?;
    let specializations = require_array(root, "", "specializations")?;
    for (i, phase) in specializations.iter().enumerate() {
        check_phase(phase, &format!("specializations[{i}]"), hybrid_resources)?;
    }
    Ok(())
}

fn check_phase(value: &Value, path: &str, resources: ResourceCheck) -> Result<(), PathError> {
    let phase = as_object(value, path)?;
    require_keys(phase, path, &["phaseName", "steps"])?;
    require_strings(phase, path, &["phaseName"])?;
    let steps = require_array(phase, path, "steps")?;
    if steps.is_empty() {
        return Err(PathError::violation(
            field_path(path, "steps"),
            "must contain at least one step",
        ));
    }
    for (i, step) in steps.iter().enumerate() {
        let step_path = format!("{path}.steps[{i}]");
        let step = as_object(step, &step_path)?;
        require_strings(step, &step_path, &["title", "description"])?;
        resources(step, &step_path)?;
    }
    Ok(())
}

fn plain_resources(step: &Object, path: &str) -> Result<(), PathError> {
    require_strings(step, path, &["resourceUrl"])
}

fn hybrid_resources(step: &Object, path: &str) -> Result<(), PathError> {
    let resources = require_object(step, path, "resources")?;
    let path = field_path(path, "resources");

    let primary = require_object(resources, &path, "primaryResource")?;
    require_strings(primary, &field_path(&path, "primaryResource"), &["title", "url"])?;

    let alternatives = require_array(resources, &path, "alternatives")?;
    let alt_path = field_path(&path, "alternatives");
    if alternatives.len() != 2 {
        return Err(PathError::violation(
            alt_path,
            format!("expected exactly 2 entries, found {}", alternatives.len()),
        ));
    }
    for (i, alternative) in alternatives.iter().enumerate() {
        let entry_path = format!("{alt_path}[{i}]");
        let entry = as_object(alternative, &entry_path)?;
        require_keys(entry, &entry_path, &["platform", "query"])?;
        if entry["platform"].as_str().and_then(Platform::parse).is_none() {
            let allowed: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();
            return Err(PathError::violation(
                field_path(&entry_path, "platform"),
                format!("must be one of {}", allowed.join(", ")),
            ));
        }
        require_strings(entry, &entry_path, &["query"])?;
    }
    Ok(())
}

// ── Helpers ────────────────────────────────────────────────────────

fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn require_keys(obj: &Object, parent: &str, keys: &[&str]) -> Result<(), PathError> {
    match keys.iter().find(|k| !obj.contains_key(**k)) {
        Some(missing) => Err(PathError::violation(field_path(parent, missing), MISSING)),
        None => Ok(()),
    }
}

/// Each key must be present and hold a string, checked in order.
fn require_strings(obj: &Object, parent: &str, keys: &[&str]) -> Result<(), PathError> {
    for key in keys {
        match obj.get(*key) {
            None => return Err(PathError::violation(field_path(parent, key), MISSING)),
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(PathError::violation(
                    field_path(parent, key),
                    "expected a string",
                ));
            }
        }
    }
    Ok(())
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, PathError> {
    value
        .as_object()
        .ok_or_else(|| PathError::violation(path, "expected an object"))
}

fn require_object<'a>(obj: &'a Object, parent: &str, key: &str) -> Result<&'a Object, PathError> {
    let path = field_path(parent, key);
    match obj.get(key) {
        None => Err(PathError::violation(path, MISSING)),
        Some(v) => as_object(v, &path),
    }
}

fn require_array<'a>(obj: &'a Object, parent: &str, key: &str) -> Result<&'a [Value], PathError> {
    let path = field_path(parent, key);
    match obj.get(key) {
        None => Err(PathError::violation(path, MISSING)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(PathError::violation(path, "expected an array")),
    }
}
