//! Serde helpers for form-shaped JSON bodies.
//!
//! The web client sends numeric inputs straight out of text fields, so age,
//! weight and calories may arrive as numbers, numeric strings, empty strings
//! or not at all. An empty or unparseable string counts as absent.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumOrString>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        NumOrString::Int(n) => Some(n as f64),
        NumOrString::Float(f) => Some(f),
        NumOrString::Str(s) => s.trim().parse::<f64>().ok(),
    }))
}

pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumOrString>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| match v {
        NumOrString::Int(n) => Some(n as i32),
        NumOrString::Float(f) => Some(f as i32),
        NumOrString::Str(s) => s.trim().parse::<f64>().ok().map(|f| f as i32),
    }))
}
