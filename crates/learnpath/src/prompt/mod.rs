//! Generation prompts.
//!
//! [`build_prompt`] renders the instruction text for one request: the
//! learner's goal and level, structural bounds, resource-quality rules and a
//! literal example of the JSON shape the selected [`SchemaVersion`] expects.
//! It is a pure function of its inputs.

pub mod builder;

pub use builder::PromptBuilder;

use crate::document::SchemaVersion;
use crate::document::example::example_document;
use crate::request::LearningPathRequest;

/// Level text used when the learner did not pick one.
pub const UNSPECIFIED_LEVEL: &str = "Not specified";

const PREAMBLE: &str = "You are an elite digital curriculum architect. Your only task is to \
build the most complete, detailed and useful learning path possible, in JSON format. The \
quality and reliability of the resources is the top priority.";

const RESOURCE_PRIORITY: &str = "Resource priority: 1st official documentation (e.g. \
python.org, developer.mozilla.org), 2nd tutorials from reputable sites (e.g. freeCodeCamp, \
Real Python, CSS-Tricks), 3rd one specific, complete video from a well-known educational \
YouTube channel.";

const RESOURCE_RESTRICTIONS: &str = "Never link to a paid course page (Udemy, Coursera), a \
forum (Stack Overflow), or anything that requires registration. Every link must be free and \
immediately accessible.";

const OUTPUT_ONLY_JSON: &str = "Your only output must be the JSON code. Nothing before, \
nothing after.";

/// Render the generation prompt for `request` against `version`.
pub fn build_prompt(request: &LearningPathRequest, version: SchemaVersion) -> String {
    let goal = request.goal();
    let level = request.level().map_or(UNSPECIFIED_LEVEL, |l| l.as_str());

    PromptBuilder::new(PREAMBLE)
        .section(
            "Learner",
            format!("Learning goal: '{goal}'\nKnowledge level: '{level}'"),
        )
        .numbered("Generation rules (mandatory)", &rules(version))
        .section(
            "Exact JSON format (do not deviate by a single character)",
            format!("```json\n{}\n```", example_json(version, goal, level)),
        )
        .raw(OUTPUT_ONLY_JSON)
        .build()
}

fn rules(version: SchemaVersion) -> Vec<String> {
    let bounds = version.bounds();
    let (p_min, p_max) = (bounds.phases.start(), bounds.phases.end());
    let (s_min, s_max) = (bounds.steps.start(), bounds.steps.end());

    let depth = match version {
        SchemaVersion::V1 | SchemaVersion::V2 => format!(
            "Depth: generate between {p_min} and {p_max} `phases`. Each phase must contain \
             between {s_min} and {s_max} `steps`. Every step description must explain what \
             the concept is and why it matters."
        ),
        SchemaVersion::V3 => format!(
            "Depth: put the fundamentals every learner needs in `coreTopic`, a phase with \
             between {s_min} and {s_max} `steps`. Then add between {p_min} and {p_max} \
             `specializations`, each a phase with between {s_min} and {s_max} `steps` that \
             goes deep on one branch of the subject. Every step description must explain \
             what the concept is and why it matters."
        ),
    };

    let mut rules = vec![depth];
    match version {
        SchemaVersion::V1 => {
            rules.push(
                "Resources: every step has a `resourceUrl`, the single best direct, working \
                 link on the web for that concept."
                    .to_string(),
            );
        }
        SchemaVersion::V2 | SchemaVersion::V3 => {
            rules.push(
                "Hybrid resources (the most important rule): every step has a `resources` \
                 object with ONE `primaryResource` and an `alternatives` array."
                    .to_string(),
            );
            rules.push(
                "`primaryResource` is the best direct, useful and working link on the web for \
                 that concept, as an object with `title` (the real title of the resource) and \
                 `url`."
                    .to_string(),
            );
            rules.push(
                "`alternatives` is the safety net in case the primary link fails: an array of \
                 exactly TWO objects, each with a `platform` (\"YouTube\" or \"Google\") and a \
                 `query` optimized to find similar content."
                    .to_string(),
            );
        }
    }
    rules.push(RESOURCE_PRIORITY.to_string());
    rules.push(RESOURCE_RESTRICTIONS.to_string());
    rules
}

fn example_json(version: SchemaVersion, goal: &str, level: &str) -> String {
    let title = format!("Learning path for: {goal} (Level: {level})");
    serde_json::to_string_pretty(&example_document(version, title)).unwrap_or_default()
}
