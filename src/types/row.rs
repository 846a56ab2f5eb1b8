use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::num::FpCategory;

/// Stable row identifier (independent of logical position).
pub type RowId = u32;

/// Field name that resolves to the row's own identifier.
pub const ID_FIELD: &str = "id";

/// A single field value.
///
/// Variant order matters for untagged deserialization: JSON integers land in
/// `Integer`, other numbers in `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Convert a JSON scalar. Nulls, arrays and objects are treated as absent.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Number)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Number(n) => Some(*n),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Rank used when two values of different kinds are compared:
    /// booleans, then numbers, then text.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Integer(_) | Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total ordering used by the sort stage.
    ///
    /// Numbers compare numerically (integers and floats mix freely), text
    /// lexicographically, booleans `false < true`.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.kind_rank().cmp(&other.kind_rank()),
            },
        }
    }

    /// Text form used for filtering, matching how the value is displayed.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => f.write_str(&number_text(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Number formatting as a browser shows it (`Number.prototype.toString`):
/// plain decimals for magnitudes in `[1e-6, 1e21)`, shortest exponent form
/// with an explicit sign otherwise, and no negative zero.
pub fn number_text(n: f64) -> String {
    match n.classify() {
        FpCategory::Nan => return "NaN".to_string(),
        FpCategory::Infinite if n > 0.0 => return "Infinity".to_string(),
        FpCategory::Infinite => return "-Infinity".to_string(),
        FpCategory::Zero => return "0".to_string(),
        FpCategory::Subnormal | FpCategory::Normal => {}
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One record of the dataset.
///
/// Serialized flat: `{"id": 1, "name": "User 1", "amount": 420}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRow")]
pub struct Row {
    pub id: RowId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

/// Wire shape of a row before non-scalar fields are dropped.
#[derive(Deserialize)]
struct RawRow {
    id: RowId,
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl From<RawRow> for Row {
    fn from(raw: RawRow) -> Self {
        let fields = raw
            .fields
            .iter()
            .filter_map(|(name, value)| FieldValue::from_json(value).map(|v| (name.clone(), v)))
            .collect();
        Self { id: raw.id, fields }
    }
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Stored field by name (does not resolve `id`).
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field value by name, resolving `id` to the identifier.
    pub fn value(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        if name == ID_FIELD {
            return Some(Cow::Owned(FieldValue::Integer(i64::from(self.id))));
        }
        self.fields.get(name).map(Cow::Borrowed)
    }

    /// Case-insensitive substring match over the id and every field value.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        if self.id.to_string().contains(needle) {
            return true;
        }
        self.fields
            .values()
            .any(|value| value.to_text().to_lowercase().contains(needle))
    }

    /// Case-insensitive substring match on one field. An absent field never
    /// matches, even for an empty needle.
    ///
    /// `needle` must already be lower-cased.
    pub fn field_matches(&self, name: &str, needle: &str) -> bool {
        self.value(name)
            .is_some_and(|value| value.to_text().to_lowercase().contains(needle))
    }
}
