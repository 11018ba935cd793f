//! Flat field-table projection and immutable single-field edits.
//!
//! The review table shows an arbitrarily nested statement as an ordered list
//! of rows, one per leaf scalar, with section rows marking each nested
//! object. Edits address one leaf by its path and produce a whole new
//! document; the previous version is never mutated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Separator used when a path is rendered as a display label, and in the CSV
/// projection.
pub const PATH_LABEL_SEPARATOR: &str = " > ";

/// Ordered sequence of keys addressing one node in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// This path extended by one more key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// Human-readable label, e.g. `site_details > net_plot_area > sqm`.
    pub fn label(&self) -> String {
        self.0.join(PATH_LABEL_SEPARATOR)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One row of the flattened review table.
///
/// `Section` rows carry no value; they announce the nested object whose
/// children follow. `Leaf` rows pair a full path with its scalar value
/// (string, number, bool, or null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlatRow {
    Section { path: FieldPath },
    Leaf { path: FieldPath, value: Value },
}

impl FlatRow {
    pub fn path(&self) -> &FieldPath {
        match self {
            FlatRow::Section { path } | FlatRow::Leaf { path, .. } => path,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, FlatRow::Leaf { .. })
    }
}

/// Error type for [`apply_edit`].
///
/// The browser only ever submits paths it received from [`flatten`], but a
/// REST client can send a stale or fabricated one; that must surface rather
/// than silently drop the write.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("empty field path")]
    EmptyPath,
    #[error("no field at path '{0}'")]
    PathNotFound(String),
    #[error("field at path '{0}' is not an editable leaf")]
    NotALeaf(String),
}

/// Flatten a statement map into ordered review-table rows.
///
/// Keys are visited in document insertion order. Arrays are skipped entirely:
/// the review table neither renders nor edits sequence values. That is a
/// product decision inherited from the dashboard, not an oversight.
pub fn flatten(fields: &Map<String, Value>) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    flatten_into(fields, &FieldPath::root(), &mut rows);
    rows
}

fn flatten_into(node: &Map<String, Value>, prefix: &FieldPath, rows: &mut Vec<FlatRow>) {
    for (key, value) in node {
        let path = prefix.child(key);
        match value {
            Value::Object(inner) => {
                rows.push(FlatRow::Section { path: path.clone() });
                flatten_into(inner, &path, rows);
            }
            Value::Array(_) => {}
            scalar => rows.push(FlatRow::Leaf {
                path,
                value: scalar.clone(),
            }),
        }
    }
}

/// The result of coercing a raw edit string against the prior leaf value.
///
/// The rule is "preserve the field's prior scalar kind when the new text is
/// compatible, else widen to text". An incompatible edit is a fallback, not
/// an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Number(Number),
    Bool(bool),
    Text(String),
}

impl CoercedValue {
    pub fn into_value(self) -> Value {
        match self {
            CoercedValue::Number(n) => Value::Number(n),
            CoercedValue::Bool(b) => Value::Bool(b),
            CoercedValue::Text(s) => Value::String(s),
        }
    }
}

/// Coerce a raw edit string against the kind of the value it replaces.
///
/// Numeric priors keep integers as integers; empty text on a numeric field
/// widens to the empty string. Boolean priors accept exactly "true"/"false".
pub fn coerce(prev: &Value, raw: &str) -> CoercedValue {
    match prev {
        Value::Number(_) if !raw.is_empty() => {
            if let Ok(i) = raw.parse::<i64>() {
                CoercedValue::Number(Number::from(i))
            } else if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                CoercedValue::Number(n)
            } else {
                CoercedValue::Text(raw.to_string())
            }
        }
        Value::Bool(_) => match raw.parse::<bool>() {
            Ok(b) => CoercedValue::Bool(b),
            Err(_) => CoercedValue::Text(raw.to_string()),
        },
        _ => CoercedValue::Text(raw.to_string()),
    }
}

/// Apply one leaf edit, producing a new top-level map.
///
/// Objects along the path are rebuilt; the input map is never mutated. The
/// path must address an existing scalar leaf.
pub fn apply_edit(
    fields: &Map<String, Value>,
    path: &FieldPath,
    raw: &str,
) -> Result<Map<String, Value>, EditError> {
    edit_in(fields, path, path.segments(), raw)
}

fn edit_in(
    node: &Map<String, Value>,
    full: &FieldPath,
    segments: &[String],
    raw: &str,
) -> Result<Map<String, Value>, EditError> {
    let (key, rest) = segments.split_first().ok_or(EditError::EmptyPath)?;
    let current = node
        .get(key)
        .ok_or_else(|| EditError::PathNotFound(full.label()))?;

    let mut out = node.clone();
    if rest.is_empty() {
        match current {
            Value::Object(_) | Value::Array(_) => return Err(EditError::NotALeaf(full.label())),
            prev => {
                out.insert(key.clone(), coerce(prev, raw).into_value());
            }
        }
    } else {
        let inner = current
            .as_object()
            .ok_or_else(|| EditError::PathNotFound(full.label()))?;
        out.insert(
            key.clone(),
            Value::Object(edit_in(inner, full, rest, raw)?),
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Map<String, Value> {
        json!({
            "a": {"b": 1, "c": "x"},
            "d": true,
            "e": [1, 2, 3],
            "f": null
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn flatten_orders_sections_before_children() {
        let rows = flatten(&doc());
        let labels: Vec<String> = rows.iter().map(|r| r.path().label()).collect();
        // Array "e" is skipped entirely.
        assert_eq!(labels, vec!["a", "a > b", "a > c", "d", "f"]);
        assert!(!rows[0].is_leaf());
        assert!(rows[1].is_leaf());
    }

    #[test]
    fn coerce_preserves_numeric_kind() {
        assert_eq!(
            coerce(&json!(5), "42"),
            CoercedValue::Number(Number::from(42))
        );
        assert_eq!(coerce(&json!(5), "abc"), CoercedValue::Text("abc".into()));
        assert_eq!(coerce(&json!(5), ""), CoercedValue::Text(String::new()));
    }

    #[test]
    fn coerce_restores_booleans() {
        assert_eq!(coerce(&json!(true), "false"), CoercedValue::Bool(false));
        assert_eq!(
            coerce(&json!(false), "maybe"),
            CoercedValue::Text("maybe".into())
        );
    }

    #[test]
    fn apply_edit_leaves_input_untouched() {
        let original = doc();
        let edited = apply_edit(
            &original,
            &FieldPath::new(vec!["a".into(), "b".into()]),
            "7",
        )
        .unwrap();
        assert_eq!(original, doc());
        assert_eq!(edited["a"]["b"], json!(7));
        assert_eq!(edited["a"]["c"], json!("x"));
    }

    #[test]
    fn apply_edit_rejects_unknown_and_non_leaf_paths() {
        let original = doc();
        let missing = apply_edit(&original, &FieldPath::new(vec!["zzz".into()]), "1");
        assert!(matches!(missing, Err(EditError::PathNotFound(_))));

        let section = apply_edit(&original, &FieldPath::new(vec!["a".into()]), "1");
        assert!(matches!(section, Err(EditError::NotALeaf(_))));
    }
}
