//! Parse normalized reply text into a generic JSON value.

use serde_json::Value;

use crate::error::PathError;

/// Parse `text` as JSON.
///
/// Any syntax error, including empty input, is a
/// [`PathError::MalformedResponse`] carrying the offending text for logs.
pub fn decode(text: &str) -> Result<Value, PathError> {
    serde_json::from_str(text).map_err(|e| PathError::MalformedResponse {
        raw: text.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn parses_valid_json() {
        let value = decode(r#"{"title": "Learn CSS", "phases": []}"#).unwrap();
        assert_eq!(value["title"], "Learn CSS");
    }

    #[test]
    fn malformed_input_is_classified() {
        for text in [
            r#"{"title": "Learn CSS", "phases": ["#,
            "{",
            "",
            "Here is your learning path!",
            r#"{"title": "x",}"#,
            "{} trailing",
        ] {
            let err = decode(text).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::MalformedResponse, "{text:?}");
            match err {
                PathError::MalformedResponse { raw, .. } => assert_eq!(raw, text),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
