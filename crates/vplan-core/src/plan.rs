//! Schedule-change entries as returned by the plan endpoint.
//!
//! The service contract fixes a handful of keys (period, class, subject,
//! change type, day, teacher fields); everything else is data-driven and
//! varies per school (room, note, ...). The open remainder is kept in a
//! flattened map so detail rendering can show whatever the service sent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One substitution-plan entry. Transient; re-fetched on every refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanEntry {
    /// Period number. Some instances send it as a number, some as a string.
    #[serde(rename = "Stunde", default, skip_serializing_if = "Value::is_null")]
    pub period: Value,

    /// Class label, a composite like "10a" carrying grade and letter.
    #[serde(rename = "Klasse", default)]
    pub class: String,

    #[serde(rename = "Fach", default)]
    pub subject: String,

    /// Change type ("Entfall", "Vertretung", ...).
    #[serde(rename = "Art", default)]
    pub change_type: String,

    #[serde(rename = "Tag", default)]
    pub day: String,

    #[serde(rename = "Tag_en", default, skip_serializing_if = "String::is_empty")]
    pub day_en: String,

    #[serde(rename = "Lehrer", default)]
    pub teacher: String,

    #[serde(rename = "Vertreter", default)]
    pub substitute: String,

    #[serde(rename = "Lehrerkuerzel", default)]
    pub teacher_code: String,

    #[serde(rename = "Vertreterkuerzel", default)]
    pub substitute_code: String,

    #[serde(
        rename = "_hervorgehoben",
        default,
        skip_serializing_if = "Value::is_null"
    )]
    pub highlighted: Value,

    #[serde(rename = "_sprechend", default, skip_serializing_if = "Value::is_null")]
    pub spoken: Value,

    /// Open set of additional fields (room, note, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PlanEntry {
    /// Period as display text, empty if the service sent none.
    pub fn period_text(&self) -> String {
        value_text(&self.period).unwrap_or_default()
    }

    /// Label/value pairs for detail rendering.
    ///
    /// Structural keys (day, period, subject, change type, class and the
    /// highlight/spoken flags) are excluded; they appear in the card header
    /// and footer instead. Absent, empty-string and empty-sequence values
    /// are not visible-worthy and are skipped. Labels derive from the field
    /// name with underscores replaced by spaces.
    pub fn detail_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();

        let named = [
            ("Lehrer", &self.teacher),
            ("Vertreter", &self.substitute),
            ("Lehrerkuerzel", &self.teacher_code),
            ("Vertreterkuerzel", &self.substitute_code),
        ];
        for (key, value) in named {
            if !value.is_empty() {
                rows.push((row_label(key), value.clone()));
            }
        }

        for (key, value) in &self.extra {
            if let Some(text) = value_text(value) {
                rows.push((row_label(key), text));
            }
        }

        rows
    }
}

fn row_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Display text for a JSON value, `None` when it is not visible-worthy.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        other => Some(other.to_string()),
    }
}
