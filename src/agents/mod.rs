//! Agent descriptors and their tool registries.
//!
//! Each agent is a fixed list of tools plus an instruction block. The topic
//! guardrail lives only in that instruction text; nothing here filters requests
//! by topic.

pub mod community;
pub mod logistics;

use crate::config::Prompts;
use crate::envelope::ToolResult;
use crate::error::{Result, UshauriError};
use crate::tool::{ToolContext, ToolHandler};
use async_openai::types::ChatCompletionTool;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// The two deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Logistics,
    Community,
}

impl std::str::FromStr for AgentKind {
    type Err = UshauriError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistics" | "legal" | "logistics_legal_agent" => Ok(AgentKind::Logistics),
            "community" | "smart_community_agent" => Ok(AgentKind::Community),
            _ => Err(UshauriError::UnknownAgent(s.to_string())),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Logistics => write!(f, "logistics"),
            AgentKind::Community => write!(f, "community"),
        }
    }
}

/// Static declaration of one agent: identity, instructions, and tools.
pub struct AgentDescriptor {
    pub kind: AgentKind,
    pub name: &'static str,
    pub model: String,
    pub description: &'static str,
    pub instruction: String,
    pub refusal: &'static str,
    pub tools: Vec<Arc<dyn ToolHandler>>,
}

impl AgentDescriptor {
    /// Build the descriptor for `kind`, rendering its instruction from `prompts`.
    pub fn new(kind: AgentKind, model: &str, prompts: &Prompts) -> Self {
        let (name, description, refusal, template) = match kind {
            AgentKind::Logistics => (
                logistics::AGENT_NAME,
                logistics::DESCRIPTION,
                logistics::REFUSAL,
                &prompts.logistics.instruction,
            ),
            AgentKind::Community => (
                community::AGENT_NAME,
                community::DESCRIPTION,
                community::REFUSAL,
                &prompts.community.instruction,
            ),
        };

        let tools: Vec<Arc<dyn ToolHandler>> = match kind {
            AgentKind::Logistics => vec![
                Arc::new(logistics::ExplainLaw),
                Arc::new(logistics::GenerateDocument),
                Arc::new(logistics::CheckCompliance),
                Arc::new(logistics::StakeholderGuidance),
            ],
            AgentKind::Community => vec![
                Arc::new(community::Recommendations),
                Arc::new(community::NeedsAssessment),
                Arc::new(community::ProjectProposal),
            ],
        };

        let mut vars = HashMap::new();
        vars.insert("refusal".to_string(), refusal.to_string());

        Self {
            kind,
            name,
            model: model.to_string(),
            description,
            instruction: prompts.render_with_custom(template, &vars),
            refusal,
            tools,
        }
    }

    /// Look up a tool by name.
    pub fn tool(&self, name: &str) -> Result<&Arc<dyn ToolHandler>> {
        self.tools
            .iter()
            .find(|t| t.tool_name() == name)
            .ok_or_else(|| UshauriError::UnknownTool(name.to_string()))
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.tool_name()).collect()
    }

    /// Function definitions for a chat completions `tools` list.
    pub fn tool_definitions(&self) -> Vec<ChatCompletionTool> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Dispatch by name. An unknown name yields an error envelope.
    pub async fn call(&self, name: &str, args: Value, ctx: &ToolContext) -> ToolResult {
        match self.tool(name) {
            Ok(tool) => tool.call_json(args, ctx).await,
            Err(e) => {
                warn!("{} has no tool named {}", self.name, name);
                ToolResult::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock::MockGenerator;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_agent_kind_parsing() {
        assert_eq!("Logistics".parse::<AgentKind>().unwrap(), AgentKind::Logistics);
        assert_eq!("community".parse::<AgentKind>().unwrap(), AgentKind::Community);
        assert!("marketing".parse::<AgentKind>().is_err());
        assert_eq!(AgentKind::Community.to_string(), "community");
    }

    #[test]
    fn test_registries_are_fixed() {
        let prompts = Prompts::default();
        let logistics = AgentDescriptor::new(AgentKind::Logistics, "gemini-2.0-flash", &prompts);
        assert_eq!(
            logistics.tool_names(),
            vec![
                "explain_law_or_regulation",
                "generate_legal_document",
                "check_compliance",
                "stakeholder_guidance"
            ]
        );

        let community = AgentDescriptor::new(AgentKind::Community, "gemini-2.0-flash", &prompts);
        assert_eq!(
            community.tool_names(),
            vec![
                "generate_recommendations_from_input",
                "assess_community_needs",
                "draft_project_proposal"
            ]
        );
        assert_eq!(community.tool_definitions().len(), 3);
    }

    #[test]
    fn test_instruction_embeds_refusal_verbatim() {
        let descriptor =
            AgentDescriptor::new(AgentKind::Logistics, "gemini-2.0-flash", &Prompts::default());
        assert!(descriptor.instruction.contains(logistics::REFUSAL));
        assert!(!descriptor.instruction.contains("{{refusal}}"));
        assert!(descriptor.instruction.contains("### YOU MUST ONLY RESPOND TO:"));
    }

    #[test]
    fn test_unknown_tool_lookup() {
        let descriptor =
            AgentDescriptor::new(AgentKind::Community, "gemini-2.0-flash", &Prompts::default());
        match descriptor.tool("explain_law_or_regulation") {
            Err(UshauriError::UnknownTool(name)) => assert_eq!(name, "explain_law_or_regulation"),
            _ => panic!("Expected UnknownTool"),
        }
    }

    #[tokio::test]
    async fn test_call_by_name_routes_json_args() {
        let generator = Arc::new(MockGenerator::replying(r#"{"role": "Driver"}"#));
        let ctx = ToolContext::new(generator.clone(), Prompts::default(), Duration::from_secs(5));
        let descriptor = AgentDescriptor::new(AgentKind::Logistics, "m", &Prompts::default());

        let result = descriptor
            .call(
                "stakeholder_guidance",
                json!({"stakeholder": "Driver", "query": "Do I need a PSV badge?"}),
                &ctx,
            )
            .await;
        assert_eq!(result, ToolResult::success("guidance", json!({"role": "Driver"})));

        let result = descriptor.call("book_flight", json!({}), &ctx).await;
        assert_eq!(result.message(), Some("Unknown tool: book_flight"));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_compliance_via_json_names_missing_key() {
        let generator = Arc::new(MockGenerator::replying("{}"));
        let ctx = ToolContext::new(generator.clone(), Prompts::default(), Duration::from_secs(5));
        let descriptor = AgentDescriptor::new(AgentKind::Logistics, "m", &Prompts::default());

        let result = descriptor
            .call(
                "check_compliance",
                json!({
                    "shipment_data": {
                        "shipper": "Acme", "consignee": "Kampala Traders", "goods": "TVs",
                        "origin": "Mombasa", "destination": "Kampala"
                    },
                    "route": "Northern Corridor",
                    "cargo_type": "electronics"
                }),
                &ctx,
            )
            .await;
        assert!(result.message().unwrap().contains("transport_mode"));
        assert_eq!(generator.calls(), 0);
    }

    struct Case {
        tool: &'static str,
        valid: Value,
        invalid: Value,
        rejection: &'static str,
        payload_key: &'static str,
        content_path: &'static [&'static str],
        fallback_key: &'static str,
    }

    fn cases() -> Vec<(AgentKind, Case)> {
        let shipment = json!({
            "shipper": "Acme Ltd", "consignee": "Kampala Traders", "goods": "LED TVs",
            "origin": "Mombasa", "destination": "Kampala", "transport_mode": "road"
        });
        vec![
            (AgentKind::Logistics, Case {
                tool: "explain_law_or_regulation",
                valid: json!({"law_name": "EACCMA", "stakeholder": "Customs Broker"}),
                invalid: json!({"law_name": "  "}),
                rejection: "Please provide a valid law or regulation name (e.g., 'EACCMA', 'Traffic Act', 'INCOTERMS').",
                payload_key: "explanation",
                content_path: &[],
                fallback_key: "raw_response",
            }),
            (AgentKind::Logistics, Case {
                tool: "generate_legal_document",
                valid: json!({"doc_type": "Packing List", "shipment_data": shipment}),
                invalid: json!({"doc_type": "Packing List", "shipment_data": {"shipper": "Acme Ltd"}}),
                rejection: "Provide shipment_data as JSON with at least: shipper, consignee, goods, origin, destination.",
                payload_key: "document",
                content_path: &["content"],
                fallback_key: "raw_response",
            }),
            (AgentKind::Logistics, Case {
                tool: "check_compliance",
                valid: json!({"shipment_data": shipment, "route": "Northern Corridor", "cargo_type": "electronics"}),
                invalid: json!({"shipment_data": {"shipper": "Acme Ltd"}, "route": "Northern Corridor", "cargo_type": "electronics"}),
                rejection: "Missing required fields: consignee, goods, origin, destination, transport_mode",
                payload_key: "compliance_report",
                content_path: &[],
                fallback_key: "raw_response",
            }),
            (AgentKind::Logistics, Case {
                tool: "stakeholder_guidance",
                valid: json!({"stakeholder": "Insurer", "query": "Is transit cover mandatory?"}),
                invalid: json!({"stakeholder": "Insurer", "query": "?"}),
                rejection: "Please provide a question for the stakeholder (at least 3 characters).",
                payload_key: "guidance",
                content_path: &[],
                fallback_key: "answer",
            }),
            (AgentKind::Community, Case {
                tool: "generate_recommendations_from_input",
                valid: json!({"user_input": "Our estate in Kayole has had no piped water for three weeks and the nearest kiosk is 2km away."}),
                invalid: json!({"user_input": "No water."}),
                rejection: "Please describe your community's situation in more detail (at least 50 characters).",
                payload_key: "recommendations",
                content_path: &[],
                fallback_key: "raw_response",
            }),
            (AgentKind::Community, Case {
                tool: "assess_community_needs",
                valid: json!({"community": "Kibera", "focus_area": "Sanitation"}),
                invalid: json!({"community": "Kibera", "focus_area": "Roads"}),
                rejection: "Invalid focus area. Choose from: Water, Sanitation, Health, Education, Security, Environment, Livelihoods, Infrastructure",
                payload_key: "assessment",
                content_path: &["report"],
                fallback_key: "raw_response",
            }),
            (AgentKind::Community, Case {
                tool: "draft_project_proposal",
                valid: json!({"project_data": {
                    "title": "Borehole", "location": "Kitui", "beneficiaries": 3000, "problem": "Dry river"
                }}),
                invalid: json!({"project_data": {"title": "Borehole", "location": "Kitui"}}),
                rejection: "Provide project_data as JSON with at least: title, location, beneficiaries, problem.",
                payload_key: "proposal",
                content_path: &["content"],
                fallback_key: "raw_response",
            }),
        ]
    }

    fn content<'a>(result: &'a ToolResult, case: &Case) -> &'a Value {
        let mut value = &result.payload().unwrap()[case.payload_key];
        for key in case.content_path {
            value = &value[*key];
        }
        value
    }

    #[tokio::test]
    async fn test_every_tool_honors_the_envelope_contract() {
        let prompts = Prompts::default();
        let timeout = Duration::from_secs(5);
        let all = cases();
        assert_eq!(all.len(), 7);

        for (kind, case) in &all {
            let descriptor = AgentDescriptor::new(*kind, "m", &prompts);
            assert_eq!(descriptor.kind, *kind);
            assert!(descriptor.instruction.contains(descriptor.refusal));

            let generator = Arc::new(MockGenerator::replying("{}"));
            let ctx = ToolContext::new(generator.clone(), prompts.clone(), timeout);
            let result = descriptor.call(case.tool, case.invalid.clone(), &ctx).await;
            assert_eq!(result.message(), Some(case.rejection), "{}", case.tool);
            assert_eq!(generator.calls(), 0, "{}", case.tool);

            let generator = Arc::new(MockGenerator::failing("quota exceeded"));
            let ctx = ToolContext::new(generator.clone(), prompts.clone(), timeout);
            let result = descriptor.call(case.tool, case.valid.clone(), &ctx).await;
            let message = result.message().unwrap();
            assert!(message.ends_with(": quota exceeded"), "{}: {}", case.tool, message);
            assert_eq!(generator.calls(), 1, "{}", case.tool);

            let generator = Arc::new(MockGenerator::replying("not json {"));
            let ctx = ToolContext::new(generator.clone(), prompts.clone(), timeout);
            let result = descriptor.call(case.tool, case.valid.clone(), &ctx).await;
            let mut fallback = serde_json::Map::new();
            fallback.insert(case.fallback_key.to_string(), json!("not json {"));
            assert_eq!(content(&result, case), &Value::Object(fallback), "{}", case.tool);

            let body = json!({"summary": "ok", "items": [1, 2]});
            let generator = Arc::new(MockGenerator::replying(&body.to_string()));
            let ctx = ToolContext::new(generator.clone(), prompts.clone(), timeout);
            let result = descriptor.call(case.tool, case.valid.clone(), &ctx).await;
            assert!(result.is_success(), "{}", case.tool);
            assert_eq!(content(&result, case), &body, "{}", case.tool);
        }
    }
}
