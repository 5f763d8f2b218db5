#![warn(missing_docs)]

//! Per-column inference for crudgen
//!
//! Decides, from column metadata alone, which validation rules, fake values,
//! form fields and display accessors a generated CRUD screen uses. Nothing
//! here fails: a producer without an opinion returns `None` or an empty
//! value and the next producer in line gets its turn.

pub mod accessor;
pub mod fakes;
pub mod form;
pub mod php;
pub mod rules;

use crudgen_schema::Column;

// Re-export public API
pub use accessor::{accessor, accessors, belongs_to_method, Accessor};
pub use fakes::{fake_value, FakeValue};
pub use form::{form_field, form_fields, related_options, FieldKind, FormField, RelatedOptions};
pub use rules::{validation_rules, Rule, ValidationRules};

/// Whether the database manages the column itself
///
/// Auto-increment keys and the `created_at`/`updated_at` timestamps get no
/// validation rule, fake value or form field.
pub fn is_ignored(column: &Column) -> bool {
    column.is_autoincrement() || column.is_timestamp()
}
