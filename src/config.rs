//! Front-end options

use serde::{Deserialize, Serialize};

/// Options shared by the tokenizer and the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Emit a `trace` record for every token produced
    pub trace_tokens: bool,
    /// Stop parsing once this many diagnostics were reported
    pub max_diagnostics: Option<usize>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            trace_tokens: true,
            max_diagnostics: None,
        }
    }
}

impl FrontendConfig {
    /// Default options with a diagnostic limit
    pub fn with_max_diagnostics(limit: usize) -> Self {
        FrontendConfig {
            max_diagnostics: Some(limit),
            ..Self::default()
        }
    }
}
