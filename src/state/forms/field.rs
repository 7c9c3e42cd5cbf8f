//! Form field definitions and value objects

use chrono::NaiveDate;

/// Date format used by date fields in raw buffers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of a form field, driving both editing and validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text, optionally spanning multiple lines
    Text { multiline: bool },
    /// Floating point number, edited as a text buffer
    Number,
    /// Calendar date, edited as `YYYY-MM-DD`
    Date,
    /// One of a fixed set of options
    Select { options: &'static [&'static str] },
}

/// Validation rule attached to a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Value must not be empty
    Required,
    /// Text value must have at least this many characters
    MinLen(usize),
    /// Numeric value must fall inside the inclusive range
    Range { min: f64, max: f64 },
}

/// Declarative description of a single form field
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    /// Display unit appended to the label (e.g. "°C", "RPM")
    pub unit: Option<&'static str>,
    pub kind: FieldKind,
    pub rules: Vec<FieldRule>,
    /// Raw default value, in the same text form the edit buffer uses
    pub default: &'static str,
}

impl FieldDef {
    /// Create a single-line text field
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            unit: None,
            kind: FieldKind::Text { multiline: false },
            rules: Vec::new(),
            default: "",
        }
    }

    /// Create a multi-line text field
    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Text { multiline: true },
            ..Self::text(name, label)
        }
    }

    /// Create a numeric field
    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(name, label)
        }
    }

    /// Create a date field (`YYYY-MM-DD`)
    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Date,
            ..Self::text(name, label)
        }
    }

    /// Create a select field over a fixed option list
    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            kind: FieldKind::Select { options },
            ..Self::text(name, label)
        }
    }

    /// Attach a display unit
    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Require a non-empty value
    pub fn required(mut self) -> Self {
        self.rules.push(FieldRule::Required);
        self
    }

    /// Require at least `n` characters
    pub fn min_len(mut self, n: usize) -> Self {
        self.rules.push(FieldRule::MinLen(n));
        self
    }

    /// Constrain a numeric value to an inclusive range
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.rules.push(FieldRule::Range { min, max });
        self
    }

    /// Set the raw default value
    pub fn default_value(mut self, raw: &'static str) -> Self {
        self.default = raw;
        self
    }

    /// True for multi-line text fields
    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true })
    }

    /// Label with the unit suffix, for rendering and prompts
    pub fn display_label(&self) -> String {
        match self.unit {
            Some(unit) => format!("{} ({unit})", self.label),
            None => self.label.to_string(),
        }
    }
}

/// Type-safe validated field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Choice(String),
}

impl FieldValue {
    /// Get the text value (empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Choice(s) => s,
            _ => "",
        }
    }

    /// Get the numeric value (0.0 for non-numeric values)
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Get the date value, if this is a date
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Render the value the way prompts and result panes show it
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            FieldValue::Choice(s) => s.clone(),
        }
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
