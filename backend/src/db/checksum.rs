//! Checksum calculation for analysis deduplication.

use sha2::{Digest, Sha256};

use crate::models::AnalysisPayload;

/// Hex-encoded SHA-256 of `content`.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checksum of a payload's JSON encoding.
///
/// Key order is preserved on decode, so the same upload always yields the
/// same checksum.
pub fn payload_checksum(payload: &AnalysisPayload) -> Result<String, serde_json::Error> {
    Ok(calculate_checksum(&serde_json::to_string(payload)?))
}
