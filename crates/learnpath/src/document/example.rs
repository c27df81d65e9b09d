//! Literal example documents shown to the model.
//!
//! The prompt embeds one of these, serialized, as the exact format to
//! follow. Building them from the typed structs keeps the example in step
//! with the validator.

use super::{
    Document, HybridDocument, HybridStep, Phase, PlainDocument, PlainStep, Platform,
    PrimaryResource, SchemaVersion, SearchAlternative, SpecializedDocument, StepResources,
};

/// Example document for `version`, titled after the learner's goal.
pub fn example_document(version: SchemaVersion, title: impl Into<String>) -> Document {
    let title = title.into();
    match version {
        SchemaVersion::V1 => Document::Plain(PlainDocument {
            title,
            phases: vec![Phase {
                phase_name: "Phase 1: Solid Foundations".into(),
                steps: vec![PlainStep {
                    title: "Understand the CSS Box Model".into(),
                    description: BOX_MODEL_DESCRIPTION.into(),
                    resource_url: BOX_MODEL_URL.into(),
                }],
            }],
        }),
        SchemaVersion::V2 => Document::Hybrid(HybridDocument {
            title,
            phases: vec![Phase {
                phase_name: "Phase 1: Solid Foundations".into(),
                steps: vec![box_model_step()],
            }],
        }),
        SchemaVersion::V3 => Document::Specialized(SpecializedDocument {
            title,
            core_topic: Phase {
                phase_name: "Core: Solid Foundations".into(),
                steps: vec![box_model_step()],
            },
            specializations: vec![Phase {
                phase_name: "Specialization: Modern Layouts".into(),
                steps: vec![HybridStep {
                    title: "Master Flexbox Alignment".into(),
                    description: "Flexbox distributes space along one axis. You will learn how \
                                  justify-content and align-items position items and why it \
                                  replaced float-based layouts."
                        .into(),
                    resources: StepResources {
                        primary_resource: PrimaryResource {
                            title: "A Complete Guide to Flexbox - CSS-Tricks".into(),
                            url: "https://css-tricks.com/snippets/css/a-guide-to-flexbox/".into(),
                        },
                        alternatives: [
                            SearchAlternative {
                                platform: Platform::YouTube,
                                query: "flexbox tutorial justify-content align-items".into(),
                            },
                            SearchAlternative {
                                platform: Platform::Google,
                                query: "css flexbox complete guide".into(),
                            },
                        ],
                    },
                }],
            }],
        }),
    }
}

const BOX_MODEL_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Learn/CSS/Building_blocks/The_box_model";

const BOX_MODEL_DESCRIPTION: &str = "The most fundamental layout concept on the web. You will \
    learn how padding, border, margin and content interact to define the size and spacing of \
    an element.";

fn box_model_step() -> HybridStep {
    HybridStep {
        title: "Understand the CSS Box Model".into(),
        description: BOX_MODEL_DESCRIPTION.into(),
        resources: StepResources {
            primary_resource: PrimaryResource {
                title: "The Box Model - MDN".into(),
                url: BOX_MODEL_URL.into(),
            },
            alternatives: [
                SearchAlternative {
                    platform: Platform::YouTube,
                    query: "css box model visual explanation".into(),
                },
                SearchAlternative {
                    platform: Platform::Google,
                    query: "complete guide css box model".into(),
                },
            ],
        },
    }
}
