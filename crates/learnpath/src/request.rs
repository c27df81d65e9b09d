//! Incoming learning-path requests and the guard that vets them.
//!
//! [`RawPathRequest`] is deliberately lenient (every field optional) so that
//! a missing goal is reported as an [`InvalidRequest`](PathError::InvalidRequest)
//! by [`LearningPathRequest::from_raw`] rather than by the deserializer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::SchemaVersion;
use crate::error::PathError;

pub const GOAL_REQUIRED: &str = "A learning goal is required.";
pub const LEVEL_UNKNOWN: &str = "Level must be one of Beginner, Intermediate or Advanced.";
pub const SCHEMA_VERSION_UNKNOWN: &str =
    "schemaVersion must be one of v1 (plain), v2 (hybrid) or v3 (specialized).";

/// Proficiency level of the learner.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Level::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LEVEL_UNKNOWN.to_string())
    }
}

/// Request body as received.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPathRequest {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    /// Overrides the configured schema version for this request.
    #[serde(default)]
    pub schema_version: Option<String>,
}

impl RawPathRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = Some(version.into());
        self
    }
}

/// A request that passed the guard.
///
/// The goal is kept exactly as the user typed it.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningPathRequest {
    goal: String,
    level: Option<Level>,
    schema_version: Option<SchemaVersion>,
}

impl LearningPathRequest {
    pub fn new(goal: impl Into<String>, level: Option<Level>) -> Result<Self, PathError> {
        let goal = goal.into();
        if goal.trim().is_empty() {
            return Err(PathError::InvalidRequest(GOAL_REQUIRED.to_string()));
        }
        Ok(Self {
            goal,
            level,
            schema_version: None,
        })
    }

    /// Vet a raw request. Runs before any model call.
    ///
    /// A blank level counts as absent.
    pub fn from_raw(raw: RawPathRequest) -> Result<Self, PathError> {
        let mut request = Self::new(raw.goal.unwrap_or_default(), None)?;
        request.level = match raw.level.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(level) => Some(level.parse::<Level>().map_err(PathError::InvalidRequest)?),
        };
        request.schema_version = raw
            .schema_version
            .as_deref()
            .map(str::parse::<SchemaVersion>)
            .transpose()
            .map_err(|_| PathError::InvalidRequest(SCHEMA_VERSION_UNKNOWN.to_string()))?;
        Ok(request)
    }

    pub fn with_schema_version(mut self, version: Option<SchemaVersion>) -> Self {
        self.schema_version = version;
        self
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn schema_version(&self) -> Option<SchemaVersion> {
        self.schema_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(result: Result<LearningPathRequest, PathError>) -> String {
        match result {
            Err(PathError::InvalidRequest(msg)) => msg,
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn empty_or_missing_goal_is_rejected() {
        let empty = RawPathRequest::new("").with_level("Beginner");
        assert_eq!(invalid(LearningPathRequest::from_raw(empty)), GOAL_REQUIRED);

        let blank = RawPathRequest::new("   \n").with_level("Beginner");
        assert_eq!(invalid(LearningPathRequest::from_raw(blank)), GOAL_REQUIRED);

        let missing = RawPathRequest {
            level: Some("Beginner".into()),
            ..Default::default()
        };
        assert_eq!(invalid(LearningPathRequest::from_raw(missing)), GOAL_REQUIRED);
    }

    #[test]
    fn goal_is_kept_verbatim() {
        let req = LearningPathRequest::from_raw(RawPathRequest::new("  Learn \"CSS\" grids ")).unwrap();
        assert_eq!(req.goal(), "  Learn \"CSS\" grids ");
        assert_eq!(req.level(), None);
    }

    #[test]
    fn level_is_case_insensitive() {
        let req =
            LearningPathRequest::from_raw(RawPathRequest::new("Learn Go").with_level(" advanced"))
                .unwrap();
        assert_eq!(req.level(), Some(Level::Advanced));
    }

    #[test]
    fn blank_level_means_unspecified() {
        let req =
            LearningPathRequest::from_raw(RawPathRequest::new("Learn Go").with_level("")).unwrap();
        assert_eq!(req.level(), None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let raw = RawPathRequest::new("Learn Go").with_level("Expert");
        assert_eq!(invalid(LearningPathRequest::from_raw(raw)), LEVEL_UNKNOWN);
    }

    #[test]
    fn schema_version_override() {
        let raw = RawPathRequest::new("Learn Go").with_schema_version("plain");
        let req = LearningPathRequest::from_raw(raw).unwrap();
        assert_eq!(req.schema_version(), Some(SchemaVersion::V1));

        let raw = RawPathRequest::new("Learn Go").with_schema_version("v9");
        assert_eq!(
            invalid(LearningPathRequest::from_raw(raw)),
            SCHEMA_VERSION_UNKNOWN
        );
    }

    #[test]
    fn raw_request_deserializes_camel_case() {
        let raw: RawPathRequest =
            serde_json::from_str(r#"{"goal":"Learn CSS","level":"Beginner","schemaVersion":"v3"}"#)
                .unwrap();
        assert_eq!(raw.goal.as_deref(), Some("Learn CSS"));
        assert_eq!(raw.schema_version.as_deref(), Some("v3"));

        let empty: RawPathRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RawPathRequest::default());
    }
}
