//! Content gate between extraction and enrichment.

use crate::error::ValidationError;
use crate::types::config::ValidationConfig;

/// Reject absent or too-short text; truncate over-long text.
///
/// Lengths are counted in characters. Text longer than `max_chars` keeps its
/// first `max_chars` characters followed by the truncation marker.
pub fn validate_content(
    text: Option<&str>,
    config: &ValidationConfig,
) -> Result<String, ValidationError> {
    let text = text.ok_or(ValidationError::ContentEmpty)?;

    let len = text.chars().count();
    if len < config.min_chars {
        return Err(ValidationError::ContentEmpty);
    }

    if len > config.max_chars {
        let mut truncated: String = text.chars().take(config.max_chars).collect();
        truncated.push_str(&config.truncation_marker);
        return Ok(truncated);
    }

    Ok(text.to_string())
}
