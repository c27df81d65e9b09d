//! Curriculum document shapes and the schema versions that select them.
//!
//! Three incompatible shapes exist and are kept apart rather than merged:
//!
//! | Version | Shape |
//! |---------|-------|
//! | [`SchemaVersion::V1`] | `title` + `phases`, each step has a single `resourceUrl` |
//! | [`SchemaVersion::V2`] | `title` + `phases`, each step has a primary resource and two search alternatives |
//! | [`SchemaVersion::V3`] | `title` + `coreTopic` phase + `specializations` phases, V2-style steps |
//!
//! [`validate`] turns a decoded [`serde_json::Value`] into a typed
//! [`Document`]. Wire field names are camelCase.

pub mod example;
pub mod schema;
mod validate;

pub use validate::validate;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema versions ────────────────────────────────────────────────

/// Which document shape a generation is expected to produce.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Plain: one resource URL per step.
    V1,
    /// Hybrid resources: primary link plus two search alternatives.
    #[default]
    V2,
    /// Core topic plus specializations, hybrid resources.
    V3,
}

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 3] = [SchemaVersion::V1, SchemaVersion::V2, SchemaVersion::V3];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
            SchemaVersion::V3 => "v3",
        }
    }

    /// Descriptive alias accepted by [`FromStr`].
    pub fn alias(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "plain",
            SchemaVersion::V2 => "hybrid",
            SchemaVersion::V3 => "specialized",
        }
    }

    /// JSON Schema of this version's document shape.
    pub fn json_schema(self) -> serde_json::Value {
        schema::json_schema(self)
    }

    /// How big a document of this version is meant to be.
    ///
    /// These are instructions to the model, not validation rules: a
    /// document outside them is still accepted.
    pub fn bounds(self) -> PathBounds {
        match self {
            SchemaVersion::V1 => PathBounds {
                phases: 2..=4,
                steps: 3..=5,
            },
            SchemaVersion::V2 | SchemaVersion::V3 => PathBounds {
                phases: 3..=5,
                steps: 4..=7,
            },
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SchemaVersion::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted || v.alias() == wanted)
            .ok_or_else(|| {
                format!("unknown schema version '{s}' (expected v1/plain, v2/hybrid or v3/specialized)")
            })
    }
}

/// Intended phase and step counts for a schema version.
///
/// For [`SchemaVersion::V3`], `phases` counts specializations; `steps`
/// applies to the core topic and to every specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBounds {
    pub phases: RangeInclusive<usize>,
    pub steps: RangeInclusive<usize>,
}

impl PathBounds {
    pub fn contains(&self, phase_count: usize, step_counts: &[usize]) -> bool {
        self.phases.contains(&phase_count) && step_counts.iter().all(|n| self.steps.contains(n))
    }
}

// ── Document parts ─────────────────────────────────────────────────

/// A named group of steps.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phase<S> {
    pub phase_name: String,
    pub steps: Vec<S>,
}

/// V1 step: a single resource URL.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlainStep {
    pub title: String,
    pub description: String,
    pub resource_url: String,
}

/// V2/V3 step: a primary link plus backup searches.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HybridStep {
    pub title: String,
    pub description: String,
    pub resources: StepResources,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepResources {
    pub primary_resource: PrimaryResource,
    /// Always exactly two.
    pub alternatives: [SearchAlternative; 2],
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct PrimaryResource {
    pub title: String,
    pub url: String,
}

/// A backup search to run if the primary link is dead.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct SearchAlternative {
    pub platform: Platform,
    pub query: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Google,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::YouTube, Platform::Google];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Google => "Google",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

// ── Documents ──────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct PlainDocument {
    pub title: String,
    pub phases: Vec<Phase<PlainStep>>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct HybridDocument {
    pub title: String,
    pub phases: Vec<Phase<HybridStep>>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecializedDocument {
    pub title: String,
    pub core_topic: Phase<HybridStep>,
    pub specializations: Vec<Phase<HybridStep>>,
}

/// A validated curriculum, tagged with the version it was validated against.
///
/// Serializes as the bare version shape, without the tag.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Document {
    Plain(PlainDocument),
    Hybrid(HybridDocument),
    Specialized(SpecializedDocument),
}

impl Document {
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            Document::Plain(_) => SchemaVersion::V1,
            Document::Hybrid(_) => SchemaVersion::V2,
            Document::Specialized(_) => SchemaVersion::V3,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Plain(d) => &d.title,
            Document::Hybrid(d) => &d.title,
            Document::Specialized(d) => &d.title,
        }
    }

    /// Number of phases (specializations for V3).
    pub fn phase_count(&self) -> usize {
        match self {
            Document::Plain(d) => d.phases.len(),
            Document::Hybrid(d) => d.phases.len(),
            Document::Specialized(d) => d.specializations.len(),
        }
    }

    /// Step count of every phase, core topic first for V3.
    pub fn step_counts(&self) -> Vec<usize> {
        match self {
            Document::Plain(d) => d.phases.iter().map(|p| p.steps.len()).collect(),
            Document::Hybrid(d) => d.phases.iter().map(|p| p.steps.len()).collect(),
            Document::Specialized(d) => std::iter::once(&d.core_topic)
                .chain(&d.specializations)
                .map(|p| p.steps.len())
                .collect(),
        }
    }

    /// Whether the document respects its version's [`PathBounds`].
    pub fn within_bounds(&self) -> bool {
        self.schema_version()
            .bounds()
            .contains(self.phase_count(), &self.step_counts())
    }

    /// Every hybrid step in document order. Empty for V1.
    pub fn hybrid_steps(&self) -> Vec<&HybridStep> {
        match self {
            Document::Plain(_) => Vec::new(),
            Document::Hybrid(d) => d.phases.iter().flat_map(|p| &p.steps).collect(),
            Document::Specialized(d) => std::iter::once(&d.core_topic)
                .chain(&d.specializations)
                .flat_map(|p| &p.steps)
                .collect(),
        }
    }
}
