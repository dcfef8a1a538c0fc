//! Logistics Legal & Compliance tools for Kenya and the EAC.

use crate::config::Prompts;
use crate::envelope::ToolResult;
use crate::model::Prompt;
use crate::tool::{default_language, east_africa_now, pretty_record, Tool};
use crate::validate::{self, Check};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

pub const AGENT_NAME: &str = "logistics_legal_agent";

pub const DESCRIPTION: &str = "Logistics Legal & Compliance Intelligence Assistant. \
    The AI-powered legal co-pilot for the logistics ecosystem in Kenya and East Africa. \
    Explains laws, generates documents (BOL, Customs Declaration), checks compliance, and \
    advises shippers, carriers, forwarders, brokers, and regulators. Supports English and Swahili.";

/// Reply the model must give for out-of-domain requests.
pub const REFUSAL: &str = "Sorry, I'm specialized in **logistics law, compliance, and document automation** in Kenya and East Africa. Please ask about laws, documents, or compliance.";

pub const DOCUMENT_TYPES: &[&str] = &[
    "Bill of Lading",
    "Airway Bill",
    "Commercial Invoice",
    "Packing List",
    "Certificate of Origin",
    "Customs Declaration",
    "Insurance Certificate",
    "Road Consignment Note",
    "Proof of Delivery",
];

pub const STAKEHOLDERS: &[&str] = &[
    "Shipper",
    "Consignee",
    "Carrier",
    "Driver",
    "Freight Forwarder",
    "Customs Broker",
    "Warehouse Operator",
    "Insurer",
    "Regulator",
];

pub const COMPLIANCE_FIELDS: &[&str] = &[
    "shipper",
    "consignee",
    "goods",
    "origin",
    "destination",
    "transport_mode",
];

const MIN_SHIPMENT_ENTRIES: usize = 3;

fn vars<const N: usize>(pairs: [(&str, String); N]) -> HashMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// === explain_law_or_regulation ===

pub struct ExplainLaw;

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainLawArgs {
    #[serde(default)]
    pub law_name: Option<String>,
    #[serde(default)]
    pub stakeholder: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Tool for ExplainLaw {
    type Args = ExplainLawArgs;

    fn name(&self) -> &'static str {
        "explain_law_or_regulation"
    }

    fn description(&self) -> &'static str {
        "Explains any Kenyan or international logistics law in plain language (English or Swahili). \
        References official sources: Kenya Law, KRA, NTSA, IMO, INCOTERMS. Returns a structured \
        explanation with Summary, Applies To, Key Obligations, Penalties and Source."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "law_name": {
                    "type": "string",
                    "description": "Law or regulation name, e.g. 'EACCMA', 'Traffic Act', 'INCOTERMS'"
                },
                "stakeholder": {
                    "type": "string",
                    "description": "Optional stakeholder perspective, e.g. 'carrier'"
                },
                "language": {
                    "type": "string",
                    "description": "'en' or 'sw'",
                    "default": "en"
                }
            },
            "required": ["law_name"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Failed to explain law"
    }

    fn validate(&self, args: &ExplainLawArgs) -> Check {
        validate::min_text(
            args.law_name.as_deref(),
            3,
            "Please provide a valid law or regulation name (e.g., 'EACCMA', 'Traffic Act', 'INCOTERMS').",
        )
    }

    fn render(&self, args: &ExplainLawArgs, prompts: &Prompts) -> Prompt {
        let stakeholder = args
            .stakeholder
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("General");
        let vars = vars([
            ("law_name", args.law_name.clone().unwrap_or_default()),
            ("stakeholder", stakeholder.to_string()),
            ("language", args.language.clone()),
        ]);
        Prompt::new(prompts.render_with_custom(&prompts.logistics.explain_law, &vars))
    }

    fn shape(&self, _args: &ExplainLawArgs, content: Value) -> ToolResult {
        ToolResult::success("explanation", content)
    }
}

// === generate_legal_document ===

pub struct GenerateDocument;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDocumentArgs {
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub shipment_data: Map<String, Value>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Tool for GenerateDocument {
    type Args = GenerateDocumentArgs;

    fn name(&self) -> &'static str {
        "generate_legal_document"
    }

    fn description(&self) -> &'static str {
        "Generates editable legal logistics documents (Bill of Lading, Customs Declaration, etc.) \
        from structured shipment data. Returns a JSON structure ready for PDF rendering."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "doc_type": {
                    "type": "string",
                    "enum": DOCUMENT_TYPES,
                    "description": "Document to generate"
                },
                "shipment_data": {
                    "type": "object",
                    "description": "Shipment fields, e.g. shipper, consignee, goods, origin, destination"
                },
                "language": {
                    "type": "string",
                    "description": "'en' or 'sw'",
                    "default": "en"
                }
            },
            "required": ["doc_type", "shipment_data"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Document generation failed"
    }

    fn validate(&self, args: &GenerateDocumentArgs) -> Check {
        validate::one_of(&args.doc_type, DOCUMENT_TYPES, "document type")?;
        validate::min_entries(
            &args.shipment_data,
            MIN_SHIPMENT_ENTRIES,
            "Provide shipment_data as JSON with at least: shipper, consignee, goods, origin, destination.",
        )
    }

    fn render(&self, args: &GenerateDocumentArgs, prompts: &Prompts) -> Prompt {
        let vars = vars([
            ("doc_type", args.doc_type.clone()),
            ("shipment_data", pretty_record(&args.shipment_data)),
            ("language", args.language.clone()),
        ]);
        Prompt::new(prompts.render_with_custom(&prompts.logistics.generate_document, &vars))
    }

    fn shape(&self, args: &GenerateDocumentArgs, content: Value) -> ToolResult {
        ToolResult::success(
            "document",
            json!({
                "type": args.doc_type,
                "language": args.language,
                "generated_at": east_africa_now(),
                "content": content,
            }),
        )
    }
}

// === check_compliance ===

pub struct CheckCompliance;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckComplianceArgs {
    #[serde(default)]
    pub shipment_data: Map<String, Value>,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub cargo_type: String,
}

impl Tool for CheckCompliance {
    type Args = CheckComplianceArgs;

    fn name(&self) -> &'static str {
        "check_compliance"
    }

    fn description(&self) -> &'static str {
        "Runs a compliance check on a shipment against its route and cargo type. \
        Flags missing documents, licenses, or violations. References KRA, KEBS, NTSA, NEMA, EACCMA."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "shipment_data": {
                    "type": "object",
                    "description": "Must include shipper, consignee, goods, origin, destination, transport_mode"
                },
                "route": {
                    "type": "string",
                    "description": "e.g. 'Mombasa - Kampala via Malaba'"
                },
                "cargo_type": {
                    "type": "string",
                    "description": "e.g. 'electronics', 'perishables', 'hazardous chemicals'"
                }
            },
            "required": ["shipment_data", "route", "cargo_type"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Compliance check failed"
    }

    fn validate(&self, args: &CheckComplianceArgs) -> Check {
        validate::required_keys(&args.shipment_data, COMPLIANCE_FIELDS)?;
        validate::min_text(
            Some(args.route.as_str()),
            3,
            "Please provide the shipment route (e.g., 'Mombasa - Kampala via Malaba').",
        )?;
        validate::min_text(
            Some(args.cargo_type.as_str()),
            3,
            "Please provide the cargo type (e.g., 'electronics', 'perishables').",
        )
    }

    fn render(&self, args: &CheckComplianceArgs, prompts: &Prompts) -> Prompt {
        let vars = vars([
            ("route", args.route.clone()),
            ("cargo_type", args.cargo_type.clone()),
            ("shipment_data", pretty_record(&args.shipment_data)),
        ]);
        Prompt::new(prompts.render_with_custom(&prompts.logistics.check_compliance, &vars))
    }

    fn shape(&self, _args: &CheckComplianceArgs, content: Value) -> ToolResult {
        ToolResult::success("compliance_report", content)
    }
}

// === stakeholder_guidance ===

pub struct StakeholderGuidance;

#[derive(Debug, Clone, Deserialize)]
pub struct StakeholderGuidanceArgs {
    #[serde(default)]
    pub stakeholder: String,
    #[serde(default)]
    pub query: Option<String>,
}

impl Tool for StakeholderGuidance {
    type Args = StakeholderGuidanceArgs;

    fn name(&self) -> &'static str {
        "stakeholder_guidance"
    }

    fn description(&self) -> &'static str {
        "Provides role-specific legal guidance for any logistics stakeholder, e.g. \
        'What are a freight forwarder's liabilities under Kenyan law?'"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "stakeholder": {
                    "type": "string",
                    "enum": STAKEHOLDERS
                },
                "query": {
                    "type": "string",
                    "description": "The stakeholder's question"
                }
            },
            "required": ["stakeholder", "query"]
        })
    }

    fn failure_prefix(&self) -> &'static str {
        "Guidance failed"
    }

    fn fallback_key(&self) -> &'static str {
        "answer"
    }

    fn validate(&self, args: &StakeholderGuidanceArgs) -> Check {
        validate::one_of(&args.stakeholder, STAKEHOLDERS, "stakeholder")?;
        validate::min_text(
            args.query.as_deref(),
            3,
            "Please provide a question for the stakeholder (at least 3 characters).",
        )
    }

    fn render(&self, args: &StakeholderGuidanceArgs, prompts: &Prompts) -> Prompt {
        let vars = vars([
            ("stakeholder", args.stakeholder.clone()),
            ("query", args.query.clone().unwrap_or_default()),
        ]);
        Prompt::new(prompts.render_with_custom(&prompts.logistics.stakeholder_guidance, &vars))
    }

    fn shape(&self, _args: &StakeholderGuidanceArgs, content: Value) -> ToolResult {
        ToolResult::success("guidance", content)
    }
}
