//! Field schema and the validation facility

use super::field::{FieldDef, FieldKind, FieldRule, FieldValue, DATE_FORMAT};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Raw field values as edited, keyed by field name
pub type RawValues = BTreeMap<&'static str, String>;

/// Declarative description of a console's input form
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = FieldDef>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Raw default values for every field in the schema
    pub fn defaults(&self) -> RawValues {
        self.fields
            .iter()
            .map(|f| (f.name, f.default.to_string()))
            .collect()
    }

    /// Validate raw values against the schema.
    ///
    /// Returns the typed values on success, or a field name → message map
    /// with the first failed rule per field. A field missing from `raw` is
    /// treated as empty.
    pub fn validate(&self, raw: &RawValues) -> Result<FieldValues, ValidationErrors> {
        let mut values = FieldValues::default();
        let mut errors = ValidationErrors::default();

        for def in &self.fields {
            let buffer = raw.get(def.name).map(String::as_str).unwrap_or("");
            match validate_field(def, buffer) {
                Ok(value) => values.insert(def.name, value),
                Err(message) => errors.insert(def.name, message),
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}

fn validate_field(def: &FieldDef, buffer: &str) -> Result<FieldValue, String> {
    let required = def.rules.contains(&FieldRule::Required);
    if required && buffer.is_empty() {
        return Err(format!("{} is required.", def.label));
    }

    match def.kind {
        FieldKind::Text { .. } => {
            for rule in &def.rules {
                if let FieldRule::MinLen(n) = rule {
                    if buffer.chars().count() < *n {
                        return Err(format!(
                            "{} must be at least {n} characters.",
                            def.label
                        ));
                    }
                }
            }
            Ok(FieldValue::Text(buffer.to_string()))
        }
        FieldKind::Number => {
            // An empty optional number coerces to zero, range rules still apply
            let value = if buffer.is_empty() {
                0.0
            } else {
                match buffer.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => v,
                    _ => return Err(format!("{} must be a number.", def.label)),
                }
            };
            for rule in &def.rules {
                if let FieldRule::Range { min, max } = rule {
                    if !(value >= *min && value <= *max) {
                        return Err(format!(
                            "{} must be between {} and {}.",
                            def.label,
                            super::field::format_number(*min),
                            super::field::format_number(*max)
                        ));
                    }
                }
            }
            Ok(FieldValue::Number(value))
        }
        FieldKind::Date => match NaiveDate::parse_from_str(buffer.trim(), DATE_FORMAT) {
            Ok(date) => Ok(FieldValue::Date(date)),
            Err(_) => Err(format!(
                "{} must be a valid date (YYYY-MM-DD).",
                def.label
            )),
        },
        FieldKind::Select { options } => {
            if options.iter().any(|o| *o == buffer) {
                Ok(FieldValue::Choice(buffer.to_string()))
            } else {
                Err(format!("{} must be one of the listed options.", def.label))
            }
        }
    }
}

/// Validated, typed field values keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues(BTreeMap<&'static str, FieldValue>);

impl FieldValues {
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field (empty string if absent or not text)
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(|v| v.as_text().to_string()).unwrap_or_default()
    }

    /// Numeric value of a field (0.0 if absent or not numeric)
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).map(FieldValue::as_number).unwrap_or(0.0)
    }

    /// Date value of a field (Unix epoch date if absent or not a date)
    pub fn date(&self, name: &str) -> NaiveDate {
        self.get(name)
            .and_then(FieldValue::as_date)
            .unwrap_or_default()
    }

    /// Kind-agnostic display form, as prompts interpolate it
    pub fn display(&self, name: &str) -> String {
        self.get(name).map(FieldValue::display).unwrap_or_default()
    }

}

/// Field name → validation message map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn insert(&mut self, name: &'static str, message: String) {
        self.0.insert(name, message);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
