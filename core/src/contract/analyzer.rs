use std::sync::Arc;
use tracing::{debug, info};

use super::analysis::{render_report, AnalysisResult};
use crate::llm::{CompletionBackend, CompletionRequest};
use crate::protocol::{Artifact, Message, TaskResult, TaskState, TaskStatus};
use crate::{ClarityError, Result};

pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert legal contract analyst.";
pub const NO_CONTRACT_TEXT: &str = "No contract text provided";
pub const CLASSIFICATION_ARTIFACT: &str = "classification";
pub const ANALYSIS_ARTIFACT: &str = "analysis";

/// Turns contract text into a structured, human-readable analysis task
#[derive(Clone)]
pub struct ContractAnalyzer {
    backend: Arc<dyn CompletionBackend>,
    model: Option<String>,
}

impl ContractAnalyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            model: None,
        }
    }

    /// Pin a model instead of the backend's configured analysis model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Analyze the contract carried by the last message of `messages`.
    ///
    /// Fails with `ClarityError::Input` before any provider call when that message has
    /// no non-empty text part. Malformed model JSON is not an error.
    pub async fn analyze(
        &self,
        messages: Vec<Message>,
        context_id: Option<String>,
        task_id: Option<String>,
    ) -> Result<TaskResult> {
        self.analyze_with_model(messages, context_id, task_id, None).await
    }

    /// Same as `analyze`; `model` wins over the analyzer's pinned model for this call only
    pub async fn analyze_with_model(
        &self,
        messages: Vec<Message>,
        context_id: Option<String>,
        task_id: Option<String>,
        model: Option<String>,
    ) -> Result<TaskResult> {
        let context_id = context_id.unwrap_or_else(crate::protocol::new_id);
        let task_id = task_id.unwrap_or_else(crate::protocol::new_id);
        let model = model.or_else(|| self.model.clone());

        let contract_text = messages
            .last()
            .and_then(Message::first_text)
            .ok_or_else(|| ClarityError::Input(NO_CONTRACT_TEXT.to_string()))?;

        info!(
            target: "contract_analyzer",
            %task_id,
            %context_id,
            model = ?model,
            chars = contract_text.chars().count(),
            "Analyzing contract"
        );

        let request = CompletionRequest::new(analysis_prompt(contract_text))
            .with_system(ANALYST_SYSTEM_PROMPT)
            .with_model(model);
        let raw = self.backend.complete(request).await?.trim().to_string();

        let analysis = AnalysisResult::parse_or_fallback(&raw);
        debug!(
            target: "contract_analyzer",
            contract_type = %analysis.contract_type,
            ambiguous = analysis.ambiguous_terms.len(),
            risks = analysis.risk_clauses.len(),
            "Analysis parsed"
        );

        let response = Message::agent(render_report(&analysis), task_id.clone());
        let artifacts = vec![
            Artifact::text(CLASSIFICATION_ARTIFACT, analysis.contract_type.clone()),
            Artifact::text(ANALYSIS_ARTIFACT, raw),
        ];

        let mut history = messages;
        history.push(response.clone());

        Ok(TaskResult::new(
            task_id,
            context_id,
            TaskStatus::new(TaskState::Completed, Some(response)),
            artifacts,
            history,
        ))
    }
}

fn analysis_prompt(contract_text: &str) -> String {
    format!(
        r#"
You are the Contract Clarity Agent.

Analyze the following contract text and return your analysis as a valid JSON object.

Contract Text:
{contract_text}

Return JSON with these exact keys:
- "contract_type": a short label for the contract (e.g. "NDA", "Service Agreement", "Employment Contract", "Lease", "Sales Contract", or "Unknown")
- "ambiguous_terms": list of terms or phrases that may cause confusion or lack definition
- "risk_clauses": list of clauses that heavily favor one side or create potential legal risk
- "simplified_summary": a clear, plain-English summary of the key parts of the contract
- "recommendations": a few practical suggestions to make the contract more balanced or understandable

Format the response as strict JSON only, without explanations or markdown.
"#
    )
}
