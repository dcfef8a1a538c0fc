//! Smart Community tools.
//!
//! `generate_recommendations_from_input` is the tool served over HTTP.

use crate::config::Prompts;
use crate::envelope::ToolResult;
use crate::model::Prompt;
use crate::tool::{default_language, east_africa_now, pretty_record, Tool};
use crate::validate::{self, Check};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

pub const AGENT_NAME: &str = "smart_community_agent";

pub const DESCRIPTION: &str = "Smart Community Assistant. Turns residents' descriptions of local \
    problems into prioritized recommendations, assesses community needs by focus area, and drafts \
    project proposals for county, NG-CDF, or donor funding. Supports English and Swahili.";

/// Reply the model must give for out-of-domain requests.
pub const REFUSAL: &str = "Sorry, I'm specialized in **community development, public services, and local infrastructure** in Kenya and East Africa. Please ask about your community's needs, projects, or services.";

pub const FOCUS_AREAS: &[&str] = &[
    "Water",
    "Sanitation",
    "Health",
    "Education",
    "Security",
    "Environment",
    "Livelihoods",
    "Infrastructure",
];

pub const PROPOSAL_FIELDS: &[&str] = &["title", "location", "beneficiaries", "problem"];

const MIN_INPUT_CHARS: usize = 50;

// === generate_recommendations_from_input ===

pub struct Recommendations;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsArgs {
    #[serde(default)]
    pub user_input: Option<String>,
}

impl RecommendationsArgs {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: Some(user_input.into()),
        }
    }
}

impl Tool for Recommendations {
    type Args = RecommendationsArgs;

    fn name(&self) -> &'static str {
        "generate_recommendations_from_input"
    }

    fn description(&self) -> &'static str {
        "Generates prioritized, practical recommendations from a resident's free-text description \
        of their community's situation (at least 50 characters)."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_input": {
                    "type": "string",
                    "description": "Description of the community and its problems"
                }
            },
            "required": ["user_input"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Recommendation generation failed"
    }

    fn validate(&self, args: &RecommendationsArgs) -> Check {
        validate::min_text(
            args.user_input.as_deref(),
            MIN_INPUT_CHARS,
            "Please describe your community's situation in more detail (at least 50 characters).",
        )
    }

    fn render(&self, args: &RecommendationsArgs, prompts: &Prompts) -> Prompt {
        let mut vars = HashMap::new();
        vars.insert(
            "user_input".to_string(),
            args.user_input.as_deref().unwrap_or_default().trim().to_string(),
        );
        Prompt::new(prompts.render_with_custom(&prompts.community.recommendations, &vars))
    }

    fn shape(&self, _args: &RecommendationsArgs, content: Value) -> ToolResult {
        ToolResult::success("recommendations", content)
    }
}

// === assess_community_needs ===

pub struct NeedsAssessment;

#[derive(Debug, Clone, Deserialize)]
pub struct NeedsAssessmentArgs {
    #[serde(default)]
    pub community: Option<String>,
    #[serde(default)]
    pub focus_area: String,
}

impl Tool for NeedsAssessment {
    type Args = NeedsAssessmentArgs;

    fn name(&self) -> &'static str {
        "assess_community_needs"
    }

    fn description(&self) -> &'static str {
        "Assesses a community's needs in one focus area and returns gaps, stakeholders, \
        quick wins, and progress indicators."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "community": {
                    "type": "string",
                    "description": "Community, ward, or location name, e.g. 'Kibera'"
                },
                "focus_area": {
                    "type": "string",
                    "enum": FOCUS_AREAS
                }
            },
            "required": ["community", "focus_area"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Needs assessment failed"
    }

    fn validate(&self, args: &NeedsAssessmentArgs) -> Check {
        validate::min_text(
            args.community.as_deref(),
            3,
            "Please provide a valid community or location name (e.g., 'Kibera', 'Kisumu Central').",
        )?;
        validate::one_of(&args.focus_area, FOCUS_AREAS, "focus area")
    }

    fn render(&self, args: &NeedsAssessmentArgs, prompts: &Prompts) -> Prompt {
        let mut vars = HashMap::new();
        vars.insert(
            "community".to_string(),
            args.community.clone().unwrap_or_default(),
        );
        vars.insert("focus_area".to_string(), args.focus_area.clone());
        Prompt::new(prompts.render_with_custom(&prompts.community.needs_assessment, &vars))
    }

    fn shape(&self, args: &NeedsAssessmentArgs, content: Value) -> ToolResult {
        ToolResult::success(
            "assessment",
            json!({
                "community": args.community,
                "focus_area": args.focus_area,
                "report": content,
            }),
        )
    }
}

// === draft_project_proposal ===

pub struct ProjectProposal;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectProposalArgs {
    #[serde(default)]
    pub project_data: Map<String, Value>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Tool for ProjectProposal {
    type Args = ProjectProposalArgs;

    fn name(&self) -> &'static str {
        "draft_project_proposal"
    }

    fn description(&self) -> &'static str {
        "Drafts a community project proposal ready for county, NG-CDF, or donor submission \
        from structured project data."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "project_data": {
                    "type": "object",
                    "description": "Must include title, location, beneficiaries, problem; may add budget, timeline"
                },
                "language": {
                    "type": "string",
                    "description": "'en' or 'sw'",
                    "default": "en"
                }
            },
            "required": ["project_data"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Proposal drafting failed"
    }

    fn validate(&self, args: &ProjectProposalArgs) -> Check {
        validate::min_entries(
            &args.project_data,
            3,
            "Provide project_data as JSON with at least: title, location, beneficiaries, problem.",
        )?;
        validate::required_keys(&args.project_data, PROPOSAL_FIELDS)
    }

    fn render(&self, args: &ProjectProposalArgs, prompts: &Prompts) -> Prompt {
        let mut vars = HashMap::new();
        vars.insert("project_data".to_string(), pretty_record(&args.project_data));
        vars.insert("language".to_string(), args.language.clone());
        Prompt::new(prompts.render_with_custom(&prompts.community.project_proposal, &vars))
    }

    fn shape(&self, args: &ProjectProposalArgs, content: Value) -> ToolResult {
        ToolResult::success(
            "proposal",
            json!({
                "language": args.language,
                "generated_at": east_africa_now(),
                "content": content,
            }),
        )
    }
}
