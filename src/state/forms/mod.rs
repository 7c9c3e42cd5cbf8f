//! Form domain layer
//!
//! Schema definitions, validation, and the editing state that consoles
//! bind their input forms to.

mod field;
mod form_state;
mod schema;

pub use field::{format_number, FieldDef, DATE_FORMAT};
pub use form_state::{FieldState, FormState};
pub use schema::{FieldValues, Schema};
