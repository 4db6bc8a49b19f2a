use serde::Serialize;

use crate::extract::DocumentFormat;

/// Supported document formats.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedResult {
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatInfo {
    pub extension: &'static str,
    /// Meaning of a match position for this format.
    pub position: &'static str,
}

#[must_use]
pub fn list_supported() -> SupportedResult {
    SupportedResult {
        formats: DocumentFormat::ALL
            .iter()
            .map(|f| FormatInfo {
                extension: f.as_str(),
                position: f.position_kind(),
            })
            .collect(),
    }
}
