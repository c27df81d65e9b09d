//! JSON Schemas for the document versions.
//!
//! Generated from the typed documents with `schemars`, so the schema and
//! deserialization logic can never diverge. [`check_types`] runs a decoded
//! value through the compiled schema as a backstop behind the ordered shape
//! checks. A schema that does not compile is an internal error, never a
//! skipped check.

use std::sync::OnceLock;

use schemars::JsonSchema;
use serde_json::Value;

use super::{HybridDocument, PlainDocument, SchemaVersion, SpecializedDocument};
use crate::error::PathError;

/// Generate a JSON Schema `serde_json::Value` for a type.
pub fn json_schema_for<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

/// The JSON Schema describing `version`'s document shape.
pub fn json_schema(version: SchemaVersion) -> Value {
    match version {
        SchemaVersion::V1 => json_schema_for::<PlainDocument>(),
        SchemaVersion::V2 => json_schema_for::<HybridDocument>(),
        SchemaVersion::V3 => json_schema_for::<SpecializedDocument>(),
    }
}

fn compiled(version: SchemaVersion) -> Result<&'static jsonschema::Validator, PathError> {
    static PLAIN: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();
    static HYBRID: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();
    static SPECIALIZED: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

    let cell = match version {
        SchemaVersion::V1 => &PLAIN,
        SchemaVersion::V2 => &HYBRID,
        SchemaVersion::V3 => &SPECIALIZED,
    };
    cell.get_or_init(|| jsonschema::validator_for(&json_schema(version)).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| PathError::Internal(format!("{version} document schema does not compile: {e}")))
}

/// Check `value` against `version`'s JSON Schema, reporting the first error.
///
/// The ordered walk in `validate` runs first and reports defects in
/// document order; this pass catches whatever it does not look at.
pub fn check_types(value: &Value, version: SchemaVersion) -> Result<(), PathError> {
    match compiled(version)?.iter_errors(value).next() {
        None => Ok(()),
        Some(e) => Err(PathError::violation(
            pointer_to_field(&e.instance_path().to_string()),
            e.to_string(),
        )),
    }
}

/// Render a JSON pointer (`/phases/0/title`) as a dotted field path
/// (`phases[0].title`).
pub(crate) fn pointer_to_field(pointer: &str) -> String {
    let mut field = String::new();
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            field.push_str(&format!("[{token}]"));
        } else {
            if !field.is_empty() {
                field.push('.');
            }
            field.push_str(&token);
        }
    }
    if field.is_empty() {
        "$".to_string()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::example::example_document;

    #[test]
    fn every_version_schema_compiles() {
        for version in SchemaVersion::ALL {
            assert!(compiled(version).is_ok(), "{version} schema should compile");
        }
    }

    #[test]
    fn examples_conform_to_their_schema() {
        for version in SchemaVersion::ALL {
            let doc = serde_json::to_value(example_document(version, "Learn Rust")).unwrap();
            assert!(
                check_types(&doc, version).is_ok(),
                "{version} example should satisfy its schema"
            );
        }
    }

    #[test]
    fn schema_carries_exactly_two_alternatives() {
        let mut doc = serde_json::to_value(example_document(SchemaVersion::V2, "x")).unwrap();
        let alternatives = &mut doc["phases"][0]["steps"][0]["resources"]["alternatives"];
        let first = alternatives[0].clone();
        alternatives.as_array_mut().unwrap().push(first);
        assert!(check_types(&doc, SchemaVersion::V2).is_err());
    }

    #[test]
    fn type_mismatch_names_field() {
        let mut doc = serde_json::to_value(example_document(SchemaVersion::V1, "x")).unwrap();
        doc["phases"][0]["steps"][0]["title"] = serde_json::json!(42);
        match check_types(&doc, SchemaVersion::V1) {
            Err(PathError::SchemaViolation { field, .. }) => {
                assert_eq!(field, "phases[0].steps[0].title");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn pointer_rendering() {
        assert_eq!(pointer_to_field(""), "$");
        assert_eq!(pointer_to_field("/title"), "title");
        assert_eq!(
            pointer_to_field("/coreTopic/steps/3/resources/alternatives/1/platform"),
            "coreTopic.steps[3].resources.alternatives[1].platform"
        );
        assert_eq!(pointer_to_field("/a~1b"), "a/b");
    }
}
