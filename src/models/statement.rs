//! Area statement document model.
//!
//! An area statement is an uploaded JSON document describing a construction
//! project: site areas, floor-wise areas, setbacks, parking and amenity
//! requirements. The flattening and editing services treat it as an opaque
//! nested tree of scalars; the analytics and schedule services read a set of
//! well-known field paths from it. Both views are served by keeping the
//! document as a `serde_json` object map rather than a rigid struct, which
//! also lets an edit widen a numeric field to text without breaking the
//! model.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Top-level keys every valid area statement must carry.
pub const REQUIRED_KEYS: [&str; 6] = [
    "site_details",
    "building_floors",
    "residential_block_area_statement",
    "residential_setbacks_building_height_parking",
    "mall_multiplex_area_statement",
    "amenities_area",
];

/// An area statement document.
///
/// Immutable between edits: [`crate::services::flatten::apply_edit`] produces
/// a new statement per field edit, the previous version is discarded by the
/// session store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AreaStatement(Map<String, Value>);

impl AreaStatement {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The underlying top-level key/value map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Walk a path of keys through nested objects to the addressed node.
    ///
    /// Returns `None` if any segment is absent or a non-object is reached
    /// before the final segment. Absent fields are a tolerated condition,
    /// never an error.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.0.get(*first)?;
        for key in rest {
            node = node.as_object()?.get(*key)?;
        }
        Some(node)
    }

    /// Numeric value at a path, if present and numeric.
    pub fn number_at(&self, path: &[&str]) -> Option<f64> {
        self.lookup(path)?.as_f64()
    }

    /// Sum of the numeric values of the object at a path.
    ///
    /// Non-numeric entries are skipped. Returns `None` when the path does not
    /// resolve to an object, so callers can distinguish "no basements listed"
    /// from "basements sum to zero".
    pub fn sum_at(&self, path: &[&str]) -> Option<f64> {
        let obj = self.lookup(path)?.as_object()?;
        Some(obj.values().filter_map(Value::as_f64).sum())
    }

    /// SHA-256 checksum of the serialized document.
    ///
    /// Used as a version fingerprint: every accepted edit replaces the
    /// statement and yields a new checksum.
    pub fn checksum(&self) -> String {
        let serialized = serde_json::to_string(&self.0).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(serialized.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Parse an area statement from a JSON string.
///
/// Only syntactic parsing plus the top-level-object check happens here;
/// required-key validation lives in
/// [`crate::services::validation::validate_statement`] so the upload path can
/// report every missing key at once.
pub fn parse_statement_json_str(json: &str) -> Result<AreaStatement> {
    let value: Value = serde_json::from_str(json).context("Invalid area statement JSON")?;
    match value {
        Value::Object(map) => Ok(AreaStatement::new(map)),
        _ => anyhow::bail!("Area statement must be a JSON object"),
    }
}
