use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

pub const UNKNOWN_CONTRACT_TYPE: &str = "Unknown";
pub const NONE_FOUND: &str = "None found";

/// Structured verdict returned by the model. Every field has a safe default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub contract_type: String,
    pub ambiguous_terms: Vec<String>,
    pub risk_clauses: Vec<String>,
    pub simplified_summary: String,
    pub recommendations: String,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            contract_type: UNKNOWN_CONTRACT_TYPE.to_string(),
            ambiguous_terms: Vec::new(),
            risk_clauses: Vec::new(),
            simplified_summary: String::new(),
            recommendations: String::new(),
        }
    }
}

impl AnalysisResult {
    /// Parse the model output. Text that is not a JSON object becomes an "Unknown"
    /// result with the raw text as its summary. Inside an object each field is read
    /// on its own; a missing, null or mistyped field keeps its default. Never fails.
    pub fn parse_or_fallback(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields),
            Ok(other) => {
                debug!(target: "contract_analyzer", kind = json_kind(&other), "Model output is not a JSON object; using fallback");
                Self::fallback(raw)
            }
            Err(e) => {
                debug!(target: "contract_analyzer", error = %e, "Model output is not JSON; using fallback");
                Self::fallback(raw)
            }
        }
    }

    pub fn fallback(raw: &str) -> Self {
        Self {
            simplified_summary: raw.to_string(),
            ..Self::default()
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            contract_type: string_field(fields, "contract_type")
                .unwrap_or(defaults.contract_type),
            ambiguous_terms: list_field(fields, "ambiguous_terms").unwrap_or_default(),
            risk_clauses: list_field(fields, "risk_clauses").unwrap_or_default(),
            simplified_summary: string_field(fields, "simplified_summary").unwrap_or_default(),
            // Models often answer with a bullet list here
            recommendations: match fields.get("recommendations") {
                Some(Value::Array(_)) => list_field(fields, "recommendations")
                    .map(|items| items.join("\n"))
                    .unwrap_or_default(),
                _ => string_field(fields, "recommendations").unwrap_or_default(),
            },
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!(target: "contract_analyzer", field = key, kind = json_kind(other), "Ignoring mistyped field");
            None
        }
    }
}

// Non-string items are dropped; anything but an array is ignored
fn list_field(fields: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = fields.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE_FOUND.to_string()
    } else {
        items.join(", ")
    }
}

/// Human-readable report shown to the user as the agent's reply
pub fn render_report(analysis: &AnalysisResult) -> String {
    format!(
        "**Contract Type:** {}\n\n**Simplified Summary:**\n{}\n\n**Ambiguous Terms:** {}\n\n**Risk Clauses:** {}\n\n**Recommendations:**\n{}",
        analysis.contract_type,
        analysis.simplified_summary,
        join_or_none(&analysis.ambiguous_terms),
        join_or_none(&analysis.risk_clauses),
        analysis.recommendations,
    )
}
