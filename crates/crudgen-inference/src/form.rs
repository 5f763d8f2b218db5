//! HTML form fields for create and edit views
//!
//! The form partial is shared by both views; the controller always passes a
//! model instance (a fresh one when creating), so fields read their current
//! value straight from it.

use crudgen_schema::naming;
use crudgen_schema::{Column, ColumnType, DatabaseInformation, SemanticType, Table};

use crate::accessor;
use crate::is_ignored;
use crate::php;

/// Variable the option loop binds in foreign-key selects
pub const OPTION_VARIABLE: &str = "option";

/// Rows of another table offered in a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedOptions {
    /// Referenced table
    pub table: String,
    /// Model class of the referenced table
    pub model: String,
    /// View variable holding the rows
    pub variable: String,
    /// Referenced column
    pub key_column: String,
    /// PHP expression for the option text, reading `$option`
    pub option_label: String,
}

/// Kind of input rendered for a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Select populated from another table
    RelatedSelect(RelatedOptions),
    /// Select of fixed values
    ValueSelect(Vec<String>),
    /// Checkbox backed by a hidden `0`
    Checkbox,
    /// Multi-line text
    Textarea,
    /// Single `<input>`
    Input {
        /// HTML input type
        input_type: &'static str,
        /// `step` attribute
        step: Option<String>,
        /// `maxlength` attribute
        max_length: Option<u32>,
        /// PHP date format the current value is shown in
        format: Option<&'static str>,
    },
}

/// One form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Column the field edits
    pub column: String,
    /// Label text
    pub label: String,
    /// Whether the browser should require a value
    pub required: bool,
    /// Input kind
    pub kind: FieldKind,
}

impl FormField {
    fn input(input_type: &'static str) -> FieldKind {
        FieldKind::Input {
            input_type,
            step: None,
            max_length: None,
            format: None,
        }
    }

    /// Blade markup for the field, one element per line
    pub fn to_blade(&self, model_variable: &str) -> Vec<String> {
        let name = &self.column;
        let current = php::property(&php::variable(model_variable), name);
        let old = |value: &str| php::call("old", &[php::quote(name), value.to_string()]);
        let required = if self.required { " required" } else { "" };

        let mut lines = vec![
            "<div>".to_string(),
            format!("    <label for=\"{}\">{}</label>", name, php::html_escape(&self.label)),
        ];

        match &self.kind {
            FieldKind::RelatedSelect(options) => {
                let option = php::variable(OPTION_VARIABLE);
                let key = php::property(&option, &options.key_column);
                lines.push(format!("    <select name=\"{name}\" id=\"{name}\"{required}>"));
                if !self.required {
                    lines.push("        <option value=\"\"></option>".to_string());
                }
                lines.push(format!(
                    "        @foreach ({} as {})",
                    php::variable(&options.variable),
                    option
                ));
                lines.push(format!(
                    "            <option value=\"{}\" @selected({} == {})>{}</option>",
                    php::echo(&key),
                    old(&current),
                    key,
                    php::echo(&options.option_label),
                ));
                lines.push("        @endforeach".to_string());
                lines.push("    </select>".to_string());
            }
            FieldKind::ValueSelect(values) => {
                lines.push(format!("    <select name=\"{name}\" id=\"{name}\"{required}>"));
                if !self.required {
                    lines.push("        <option value=\"\"></option>".to_string());
                }
                for value in values {
                    lines.push(format!(
                        "        <option value=\"{}\" @selected({} == {})>{}</option>",
                        php::html_escape(value),
                        old(&current),
                        php::quote(value),
                        php::html_escape(value),
                    ));
                }
                lines.push("    </select>".to_string());
            }
            FieldKind::Checkbox => {
                lines.push(format!("    <input type=\"hidden\" name=\"{name}\" value=\"0\">"));
                lines.push(format!(
                    "    <input type=\"checkbox\" name=\"{name}\" id=\"{name}\" value=\"1\" @checked({})>",
                    old(&current)
                ));
            }
            FieldKind::Textarea => {
                lines.push(format!(
                    "    <textarea name=\"{name}\" id=\"{name}\"{required}>{}</textarea>",
                    php::echo(&old(&current))
                ));
            }
            FieldKind::Input {
                input_type,
                step,
                max_length,
                format,
            } => {
                let value = match format {
                    Some(format) => {
                        php::nullsafe_method(&current, "format", &[php::quote(format)])
                    }
                    None => current.clone(),
                };
                let mut attributes = String::new();
                if let Some(step) = step {
                    attributes.push_str(&format!(" step=\"{}\"", step));
                }
                if let Some(max_length) = max_length {
                    attributes.push_str(&format!(" maxlength=\"{}\"", max_length));
                }
                lines.push(format!(
                    "    <input type=\"{input_type}\" name=\"{name}\" id=\"{name}\" value=\"{}\"{attributes}{required}>",
                    php::echo(&old(&value))
                ));
            }
        }

        lines.push(format!(
            "    @error({})<p class=\"error\">{}</p>@enderror",
            php::quote(name),
            php::echo(&php::variable("message"))
        ));
        lines.push("</div>".to_string());
        lines
    }
}

/// Form field for a column, `None` for server-managed columns
pub fn form_field(table: &Table, column: &Column, db: &DatabaseInformation) -> Option<FormField> {
    if is_ignored(column) {
        return None;
    }

    let kind = if let Some(foreign_key) = table.foreign_key_for(column.name()) {
        let option = php::variable(OPTION_VARIABLE);
        let option_label = match db.label_column(&foreign_key.foreign_table) {
            Some(label_column) => accessor::value_expression(label_column, &option),
            None => php::concat(&[
                php::quote(&format!(
                    "[{}: ",
                    naming::title(&naming::singular(&foreign_key.foreign_table))
                )),
                php::property(&option, &foreign_key.foreign_column),
                php::quote("]"),
            ]),
        };
        FieldKind::RelatedSelect(RelatedOptions {
            table: foreign_key.foreign_table.clone(),
            model: naming::model_name(&foreign_key.foreign_table),
            variable: naming::plural_variable_name(&foreign_key.foreign_table),
            key_column: foreign_key.foreign_column.clone(),
            option_label,
        })
    } else if let Some(values) = column.enum_values() {
        FieldKind::ValueSelect(values.to_vec())
    } else {
        scalar_kind(column)
    };

    Some(FormField {
        column: column.name().to_string(),
        label: accessor::label(table, column),
        required: !column.is_nullable() && !column.has_default() && kind != FieldKind::Checkbox,
        kind,
    })
}

fn scalar_kind(column: &Column) -> FieldKind {
    let column_type = column.column_type();
    match column_type.family() {
        SemanticType::Boolean => return FieldKind::Checkbox,
        SemanticType::Text => return FieldKind::Textarea,
        _ => {}
    }

    match column.name() {
        "email" => return FormField::input("email"),
        "password" => return FormField::input("password"),
        "url" | "website" => return FormField::input("url"),
        _ => {}
    }

    let numeric = |step: String| FieldKind::Input {
        input_type: "number",
        step: Some(step),
        max_length: None,
        format: None,
    };
    let dated = |input_type: &'static str, format: &'static str| FieldKind::Input {
        input_type,
        step: None,
        max_length: None,
        format: Some(format),
    };

    match column_type {
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::MediumInteger
        | ColumnType::Integer
        | ColumnType::BigInteger => numeric("1".to_string()),
        ColumnType::Decimal { scale, .. } => numeric(decimal_step(*scale)),
        ColumnType::Float => numeric("any".to_string()),
        ColumnType::Date => dated("date", "Y-m-d"),
        ColumnType::DateTime | ColumnType::DateTimeTz => dated("datetime-local", r"Y-m-d\TH:i"),
        ColumnType::Time => FormField::input("time"),
        ColumnType::String { length } => FieldKind::Input {
            input_type: "text",
            step: None,
            max_length: *length,
            format: None,
        },
        _ => FormField::input("text"),
    }
}

/// `0.01` for a scale of 2
fn decimal_step(scale: u32) -> String {
    match scale {
        0 => "1".to_string(),
        _ => format!("0.{}1", "0".repeat(scale as usize - 1)),
    }
}

/// Form fields for every editable column
pub fn form_fields(table: &Table, db: &DatabaseInformation) -> Vec<FormField> {
    table
        .columns()
        .filter_map(|column| form_field(table, column, db))
        .collect()
}

/// Distinct related tables the form needs rows from
pub fn related_options(fields: &[FormField]) -> Vec<&RelatedOptions> {
    let mut related: Vec<&RelatedOptions> = Vec::new();
    for field in fields {
        if let FieldKind::RelatedSelect(options) = &field.kind {
            if !related.iter().any(|r| r.table == options.table) {
                related.push(options);
            }
        }
    }
    related
}
