//! Untrusted payload parsing.
//!
//! The payload is whatever an external generator produced: a JSON object,
//! possibly wrapped in prose or a fenced code block, with loosely typed
//! fields. Everything here is lenient about types and strict about shape:
//! a missing or non-array piece list is a format error, a single bad piece
//! (wrong type, missing axis, coordinates outside the world) is skipped.

use crate::error::SanitizeError;
use brickmind_core::color::DEFAULT_COLOR_CODE;
use brickmind_core::constants::WORLD_EXTENT;
use glam::DVec3;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Optional per-layer text supplied alongside the pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayerGuidance {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPayload {
    #[serde(alias = "pieces", deserialize_with = "lenient_pieces")]
    pub parts: Vec<RawPiece>,
    #[serde(default)]
    pub layers: Vec<LayerGuidance>,
}

/// One piece exactly as declared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPiece {
    #[serde(alias = "partId", alias = "part_id")]
    pub part: Option<Value>,
    pub color: Option<Value>,
    /// `{x, y, z}` or `[x, y, z]`, numbers or numeric strings.
    pub position: Option<Value>,
    pub rotation: Option<Value>,
    pub step: Option<Value>,
}

/// The list must be an array; an element that is not an object becomes an
/// empty piece, which [`RawPiece::declare`] rejects.
fn lenient_pieces<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<RawPiece>, D::Error> {
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| match v {
            Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
            _ => RawPiece::default(),
        })
        .collect())
}

fn position_from_value(v: &Value) -> Option<DVec3> {
    let (x, y, z) = match v {
        Value::Object(map) => (map.get("x")?, map.get("y")?, map.get("z")?),
        Value::Array(items) => match items.as_slice() {
            [x, y, z] => (x, y, z),
            _ => return None,
        },
        _ => return None,
    };
    Some(DVec3::new(value_to_f64(x)?, value_to_f64(y)?, value_to_f64(z)?))
}

/// A raw piece with defaults applied and types settled.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredPiece {
    pub part: String,
    pub color_code: i64,
    pub position: DVec3,
    pub rotation: f64,
    pub step: i64,
}

impl RawPiece {
    /// Settle types, applying defaults: color code 4, rotation 0,
    /// step `index + 1`. `None` when the piece has no part identifier, or
    /// no finite position within [`WORLD_EXTENT`] on every axis.
    pub fn declare(&self, index: usize) -> Option<DeclaredPiece> {
        let part = self.part.as_ref().and_then(value_to_string)?;
        if part.trim().is_empty() {
            return None;
        }
        let position = self.position.as_ref().and_then(position_from_value)?;
        if !position.is_finite() || position.abs().max_element() > WORLD_EXTENT as f64 {
            return None;
        }
        Some(DeclaredPiece {
            part,
            color_code: self
                .color
                .as_ref()
                .and_then(value_to_i64)
                .unwrap_or(DEFAULT_COLOR_CODE),
            position,
            rotation: self
                .rotation
                .as_ref()
                .and_then(value_to_f64)
                .filter(|r| r.is_finite())
                .unwrap_or(0.0),
            step: self
                .step
                .as_ref()
                .and_then(value_to_i64)
                .unwrap_or(index as i64 + 1),
        })
    }
}

fn value_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_i64(v: &Value) -> Option<i64> {
    value_to_f64(v).filter(|f| f.is_finite()).map(|f| f.round() as i64)
}

/// Slice from the first `{` to the last `}`; the outermost object when
/// the text wraps it in prose or a code fence.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse generator output into a payload.
pub fn parse_payload(text: &str) -> Result<RawPayload, SanitizeError> {
    let json = extract_json_object(text)
        .ok_or_else(|| SanitizeError::PayloadFormat("no JSON object found".into()))?;
    serde_json::from_str(json).map_err(|e| SanitizeError::PayloadFormat(e.to_string()))
}

/// Declared pieces in payload order, unusable entries skipped, capped at
/// `limit`. Also returns how many entries were skipped.
pub fn declare_pieces(raw: &[RawPiece], limit: usize) -> (Vec<DeclaredPiece>, usize) {
    let mut skipped = 0;
    let mut declared = Vec::new();
    for (i, piece) in raw.iter().enumerate() {
        match piece.declare(i) {
            Some(d) => declared.push(d),
            None => {
                log::warn!("Skipping unusable piece #{i}: {piece:?}");
                skipped += 1;
            }
        }
    }
    declared.truncate(limit);
    (declared, skipped)
}
