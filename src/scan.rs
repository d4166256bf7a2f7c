//! QR scan support: scanner lifecycle state, single-frame decoding, and
//! hydration of form values from a decoded payload.
//!
//! Frame decoding is delegated to `rqrr`; everything here is plain data flow
//! and runs unchanged on the host, which is where the tests live.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Milliseconds between decode attempts while scanning (10 per second).
pub const DECODE_INTERVAL_MS: u32 = 100;

/// Side length of the central detection region, in pixels.
pub const DETECTION_REGION_PX: u32 = 250;

/// Errors surfaced by the scan flow. Both are non-fatal: the form keeps its
/// state and the user can correct or re-scan.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The decoded text was not a flat JSON object.
    #[error("Invalid QR code format")]
    MalformedPayload,
    /// The decoder recognized a code in the frame but failed to read it.
    #[error("{0}")]
    Decode(String),
}

// ============================================================================
// Scanner lifecycle
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScannerStatus {
    #[default]
    Idle,
    Scanning,
}

/// Idle/scanning state machine driven by the scanner component. The camera
/// is held only while `Scanning`, so every path back to `Idle` releases it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScannerState {
    status: ScannerStatus,
}

impl ScannerState {
    pub fn is_scanning(&self) -> bool {
        self.status == ScannerStatus::Scanning
    }

    /// Idle → Scanning. Returns false when already scanning.
    pub fn start(&mut self) -> bool {
        if self.status == ScannerStatus::Scanning {
            return false;
        }
        self.status = ScannerStatus::Scanning;
        true
    }

    /// Back to Idle unconditionally. Safe to call when already idle.
    pub fn stop(&mut self) {
        self.status = ScannerStatus::Idle;
    }
}

// ============================================================================
// Frame decoding
// ============================================================================

/// Collapse RGBA canvas pixels to greyscale for the decoder.
pub fn luma_from_rgba(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
        .collect()
}

/// Run the decoder over one greyscale frame.
///
/// `None` means no code was found in the frame, the expected majority case
/// while the user lines the code up. `Some(Err(_))` means a code was found
/// but could not be read; the caller keeps scanning.
pub fn decode_frame(width: usize, height: usize, luma: &[u8]) -> Option<Result<String, ScanError>> {
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);
    let grids = prepared.detect_grids();
    let grid = grids.first()?;
    Some(
        grid.decode()
            .map(|(_meta, content)| content)
            .map_err(|e| ScanError::Decode(e.to_string())),
    )
}

// ============================================================================
// Payload hydration
// ============================================================================

/// Parse a scan result as a flat JSON object, stringifying scalar values.
///
/// Null and nested values have no input-field representation and are
/// dropped; anything that is not a JSON object is a malformed payload.
pub fn parse_payload(raw: &str) -> Result<HashMap<String, String>, ScanError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|_| ScanError::MalformedPayload)?;
    let object = parsed.as_object().ok_or(ScanError::MalformedPayload)?;

    let mut payload = HashMap::new();
    for (key, value) in object {
        match value {
            Value::String(s) => {
                payload.insert(key.clone(), s.clone());
            }
            Value::Number(n) => {
                payload.insert(key.clone(), n.to_string());
            }
            Value::Bool(b) => {
                payload.insert(key.clone(), b.to_string());
            }
            _ => {}
        }
    }
    Ok(payload)
}

/// Overwrite known fields from a parsed payload. Unknown keys are ignored
/// and existing values are silently replaced (last scan wins). Returns the
/// number of fields written.
pub fn apply_payload(
    values: &mut HashMap<String, String>,
    known_fields: &[&str],
    payload: &HashMap<String, String>,
) -> usize {
    let mut applied = 0;
    for (key, value) in payload {
        if known_fields.contains(&key.as_str()) {
            values.insert(key.clone(), value.clone());
            applied += 1;
        }
    }
    applied
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::REGISTRATION_FIELDS;

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = ScannerState::default();
        state.start();
        state.stop();
        assert!(!state.is_scanning());
        state.stop();
        assert!(!state.is_scanning());
    }

    #[test]
    fn test_start_transitions_once() {
        let mut state = ScannerState::default();
        assert!(!state.is_scanning());
        assert!(state.start());
        assert!(state.is_scanning());
        assert!(!state.start());
        assert!(state.is_scanning());
    }

    #[test]
    fn test_payload_hydrates_known_fields_only() {
        let mut values: HashMap<String, String> = HashMap::new();
        values.insert("lastName".to_string(), "Souza".to_string());

        let payload = parse_payload(r#"{"firstName":"Ana","age":30,"badge":"X1"}"#).unwrap();
        let applied = apply_payload(&mut values, &REGISTRATION_FIELDS, &payload);

        assert_eq!(applied, 2);
        assert_eq!(values.get("firstName").map(String::as_str), Some("Ana"));
        assert_eq!(values.get("age").map(String::as_str), Some("30"));
        // Unknown key ignored, untouched field unchanged.
        assert!(!values.contains_key("badge"));
        assert_eq!(values.get("lastName").map(String::as_str), Some("Souza"));
    }

    #[test]
    fn test_payload_overwrites_existing_values() {
        let mut values: HashMap<String, String> = HashMap::new();
        values.insert("firstName".to_string(), "Bea".to_string());

        let payload = parse_payload(r#"{"firstName":"Ana"}"#).unwrap();
        apply_payload(&mut values, &REGISTRATION_FIELDS, &payload);

        assert_eq!(values.get("firstName").map(String::as_str), Some("Ana"));
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let err = parse_payload("not json").unwrap_err();
        assert_eq!(err, ScanError::MalformedPayload);
        assert_eq!(err.to_string(), "Invalid QR code format");
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert_eq!(parse_payload(r#""just text""#), Err(ScanError::MalformedPayload));
        assert_eq!(parse_payload("[1,2,3]"), Err(ScanError::MalformedPayload));
    }

    #[test]
    fn test_null_and_nested_values_are_dropped() {
        let payload = parse_payload(r#"{"firstName":null,"email":{"a":1},"age":30}"#).unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("age").map(String::as_str), Some("30"));
    }

    #[test]
    fn test_blank_frame_decodes_nothing() {
        let luma = vec![128u8; 64 * 64];
        assert!(decode_frame(64, 64, &luma).is_none());
    }

    #[test]
    fn test_luma_from_rgba_averages_channels() {
        let rgba = [0u8, 0, 0, 255, 255, 255, 255, 255, 30, 60, 90, 255];
        assert_eq!(luma_from_rgba(&rgba), vec![0, 255, 60]);
    }
}
