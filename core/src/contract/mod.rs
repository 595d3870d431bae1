//! Contract analysis pipeline
//!
//! - `AnalysisResult` parses the model's JSON verdict, degrading to an "Unknown" result
//! - `ContractAnalyzer` drives prompt -> completion -> report -> `TaskResult`

mod analysis;
mod analyzer;

pub use analysis::{render_report, AnalysisResult, NONE_FOUND, UNKNOWN_CONTRACT_TYPE};
pub use analyzer::{
    ContractAnalyzer, ANALYSIS_ARTIFACT, ANALYST_SYSTEM_PROMPT, CLASSIFICATION_ARTIFACT,
    NO_CONTRACT_TEXT,
};
