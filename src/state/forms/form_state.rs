//! Form editing state driven by a console's field schema

use super::field::{FieldDef, FieldKind};
use super::schema::{FieldValues, RawValues, Schema, ValidationErrors};

/// Live editing state for a single schema field
#[derive(Debug, Clone)]
pub struct FieldState {
    pub def: FieldDef,
    buffer: String,
    choice: usize,
    error: Option<String>,
}

impl FieldState {
    fn new(def: &FieldDef, seed: String) -> Self {
        let choice = match def.kind {
            FieldKind::Select { options } => {
                options.iter().position(|o| *o == seed).unwrap_or(0)
            }
            _ => 0,
        };
        Self {
            def: def.clone(),
            buffer: seed,
            choice,
            error: None,
        }
    }

    /// The raw value as the validator will see it
    pub fn raw(&self) -> String {
        match self.def.kind {
            FieldKind::Select { options } => options
                .get(self.choice)
                .map(|o| o.to_string())
                .unwrap_or_default(),
            _ => self.buffer.clone(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn clear_error(&mut self) {
        self.error = None;
    }

    /// Append a typed character, filtered by field kind
    pub fn push_char(&mut self, c: char) {
        let accepted = match self.def.kind {
            FieldKind::Text { .. } => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Select { .. } => false,
        };
        if accepted {
            self.buffer.push(c);
            self.clear_error();
        }
    }

    /// Remove the last character
    pub fn pop_char(&mut self) {
        if self.buffer.pop().is_some() {
            self.clear_error();
        }
    }

    /// Insert a line break in a multiline text field
    pub fn push_newline(&mut self) {
        if self.def.is_multiline() {
            self.buffer.push('\n');
            self.clear_error();
        }
    }

    /// Advance a select field to its next option
    pub fn cycle_next(&mut self) {
        if let FieldKind::Select { options } = self.def.kind {
            if !options.is_empty() {
                self.choice = (self.choice + 1) % options.len();
                self.clear_error();
            }
        }
    }

    /// Move a select field to its previous option
    pub fn cycle_prev(&mut self) {
        if let FieldKind::Select { options } = self.def.kind {
            if !options.is_empty() {
                self.choice = if self.choice == 0 {
                    options.len() - 1
                } else {
                    self.choice - 1
                };
                self.clear_error();
            }
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self.def.kind, FieldKind::Select { .. })
    }
}

/// Editing state for a whole console form.
///
/// Fields are created from the schema, one state per definition, so the
/// rendered form can never reference a field the schema does not declare.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Schema,
    fields: Vec<FieldState>,
    active: usize,
}

impl FormState {
    pub fn new(schema: Schema) -> Self {
        let mut seeds = schema.defaults();
        let fields = schema
            .fields()
            .iter()
            .map(|def| FieldState::new(def, seeds.remove(def.name).unwrap_or_default()))
            .collect();
        Self {
            schema,
            fields,
            active: 0,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_field(&self) -> Option<&FieldState> {
        self.fields.get(self.active)
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FieldState> {
        self.fields.get_mut(self.active)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.active = (self.active + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.active == 0 {
            self.active = self.fields.len() - 1;
        } else {
            self.active -= 1;
        }
    }

    pub fn is_active_multiline(&self) -> bool {
        self.active_field().is_some_and(|f| f.def.is_multiline())
    }

    /// Snapshot of the raw values for every field
    pub fn raw_values(&self) -> RawValues {
        self.fields.iter().map(|f| (f.def.name, f.raw())).collect()
    }

    /// Validate the current buffers against the schema.
    ///
    /// On success all field errors are cleared and the typed values are
    /// returned. On failure the per-field messages are attached to their
    /// fields, the cursor jumps to the first offending field, and `None`
    /// is returned.
    pub fn validate(&mut self) -> Option<FieldValues> {
        match self.schema.validate(&self.raw_values()) {
            Ok(values) => {
                self.clear_errors();
                Some(values)
            }
            Err(errors) => {
                self.apply_errors(&errors);
                None
            }
        }
    }

    fn apply_errors(&mut self, errors: &ValidationErrors) {
        let mut first_error = None;
        for (index, field) in self.fields.iter_mut().enumerate() {
            match errors.get(field.def.name) {
                Some(message) => {
                    field.set_error(message.to_string());
                    if first_error.is_none() {
                        first_error = Some(index);
                    }
                }
                None => field.clear_error(),
            }
        }
        if let Some(index) = first_error {
            self.active = index;
        }
    }

    fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }
}
