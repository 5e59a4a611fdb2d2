use thiserror::Error;

use super::ScanResult;
use crate::graph::FetchError;

#[derive(Debug, Error)]
pub enum ScanError {
    /// Rejected before any request was made.
    #[error("missing required input: {field}")]
    MissingInput { field: &'static str },
    /// A page fetch failed; whatever was counted before it is kept.
    #[error("scan stopped before completion: {source}")]
    Aborted {
        #[source]
        source: FetchError,
        partial: ScanResult,
    },
}

impl ScanError {
    /// Totals accumulated before the failure, if any request was made.
    #[must_use]
    pub fn partial(&self) -> Option<&ScanResult> {
        match self {
            Self::MissingInput { .. } => None,
            Self::Aborted { partial, .. } => Some(partial),
        }
    }
}
