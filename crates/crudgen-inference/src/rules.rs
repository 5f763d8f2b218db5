//! Validation rule inference
//!
//! Producers run in a fixed order and accumulate: nullability, column name,
//! column type, decimal pattern, enum values, foreign key, uniqueness. The
//! result is a pipe-joined string unless some rule cannot live inside one,
//! in which case the whole set is emitted as a PHP array.

use crudgen_schema::{Column, ColumnType, SemanticType, Table};
use tracing::debug;

use crate::is_ignored;
use crate::php;

/// Signed decimal with optional fraction and at least one digit
pub const DECIMAL_PATTERN: &str = r"/^[+-]?(?=\.?\d)\d*(\.\d*)?$/";

/// A single validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Rule in Laravel's string syntax, e.g. `exists:users,id`
    Text(String),
    /// PHP expression, e.g. `Rule::unique('users')->ignore($user)`
    Expression(String),
}

impl Rule {
    fn text(rule: impl Into<String>) -> Self {
        Rule::Text(rule.into())
    }

    fn to_php(&self) -> String {
        match self {
            Rule::Text(rule) => php::quote(rule),
            Rule::Expression(expression) => expression.clone(),
        }
    }
}

/// Rules inferred for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    rules: Vec<Rule>,
    composable: bool,
    needs_model: bool,
}

impl ValidationRules {
    fn new() -> Self {
        Self {
            rules: Vec::new(),
            composable: true,
            needs_model: false,
        }
    }

    fn push(&mut self, rule: Rule) {
        if let Rule::Text(text) = &rule {
            if text.contains('|') {
                self.composable = false;
            }
        }
        if let Rule::Expression(_) = &rule {
            self.composable = false;
        }
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Rules in producer order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether no rule applies (ignored columns)
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the rules can be pipe-joined into one string
    pub fn is_composable(&self) -> bool {
        self.composable
    }

    /// Whether a rule refers to the route-bound model instance
    pub fn needs_model_binding(&self) -> bool {
        self.needs_model
    }

    /// Whether any rule is a PHP expression needing `Illuminate\Validation\Rule`
    pub fn uses_rule_class(&self) -> bool {
        self.rules.iter().any(|rule| matches!(rule, Rule::Expression(_)))
    }

    /// PHP value for the request's `rules()` array
    pub fn to_php(&self) -> String {
        if self.composable {
            let joined: Vec<&str> = self
                .rules
                .iter()
                .filter_map(|rule| match rule {
                    Rule::Text(text) => Some(text.as_str()),
                    Rule::Expression(_) => None,
                })
                .collect();
            php::quote(&joined.join("|"))
        } else {
            let items: Vec<String> = self.rules.iter().map(Rule::to_php).collect();
            php::array(&items)
        }
    }
}

/// Infer the validation rules for a column
pub fn validation_rules(table: &Table, column: &Column) -> ValidationRules {
    let mut rules = ValidationRules::new();
    if is_ignored(column) {
        return rules;
    }

    if column.is_nullable() || column.has_default() {
        rules.push(Rule::text("nullable"));
    } else {
        rules.push(Rule::text("required"));
    }

    match column.name() {
        "email" => rules.push(Rule::text("email")),
        "uuid" => rules.push(Rule::text("uuid")),
        _ => {}
    }

    if let Some(rule) = type_rule(column.column_type()) {
        rules.push(Rule::text(rule));
    }

    if column.column_type().family() == SemanticType::Decimal {
        rules.push(Rule::text(format!("regex:{}", DECIMAL_PATTERN)));
        rules.composable = false;
    }

    if let Some(values) = column.enum_values() {
        if values.iter().any(|v| v.contains('|') || v.contains(',')) {
            rules.push(Rule::Expression(php::static_call(
                "Rule",
                "in",
                &[php::string_array(values)],
            )));
        } else {
            rules.push(Rule::text(format!("in:{}", values.join(","))));
        }
    }

    if let Some(foreign_key) = table.foreign_key_for(column.name()) {
        if foreign_key.foreign_column == column.name() {
            rules.push(Rule::text(format!("exists:{}", foreign_key.foreign_table)));
        } else {
            rules.push(Rule::text(format!(
                "exists:{},{}",
                foreign_key.foreign_table, foreign_key.foreign_column
            )));
        }
    }

    if column.is_unique() {
        rules.push(unique_rule(table, column));
        rules.needs_model = table.single_primary_key().is_ok();
    }

    rules
}

fn type_rule(column_type: &ColumnType) -> Option<&'static str> {
    match column_type.family() {
        SemanticType::Integer => Some("integer"),
        SemanticType::Boolean => Some("boolean"),
        SemanticType::DateTime => Some("date"),
        SemanticType::Date => Some("date_format:Y-m-d"),
        SemanticType::Time => Some("date_format:H:i:s"),
        SemanticType::Float => Some("numeric"),
        SemanticType::Guid => Some("uuid"),
        SemanticType::Decimal
        | SemanticType::String
        | SemanticType::Text
        | SemanticType::Binary
        | SemanticType::Enum
        | SemanticType::Unknown => None,
    }
}

/// Uniqueness that ignores the record being updated
fn unique_rule(table: &Table, column: &Column) -> Rule {
    let unique = php::static_call("Rule", "unique", &[php::quote(table.name())]);
    match table.single_primary_key() {
        Ok(_) => Rule::Expression(php::method(
            &unique,
            "ignore",
            &[php::variable(&table.variable_name())],
        )),
        Err(_) => {
            debug!("{}.{} unique without ignore: no single key", table.name(), column.name());
            Rule::Expression(unique)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudgen_schema::EnumType;

    fn products(extra: Column) -> Table {
        Table::builder("products")
            .column(Column::new("id", ColumnType::BigInteger).autoincrement())
            .column(extra)
            .primary_key(["id"])
            .build()
            .unwrap()
    }

    fn rules_for(table: &Table, column: &str) -> ValidationRules {
        validation_rules(table, table.column(column).unwrap())
    }

    #[test]
    fn test_ignored_columns_have_no_rules() {
        let table = products(Column::new("created_at", ColumnType::DateTime));
        assert!(rules_for(&table, "id").is_empty());
        assert!(rules_for(&table, "created_at").is_empty());
    }

    #[test]
    fn test_pipe_joined_when_composable() {
        let table = products(Column::new("email", ColumnType::String { length: Some(255) }));
        let rules = rules_for(&table, "email");
        assert!(rules.is_composable());
        assert_eq!(rules.to_php(), "'required|email'");
    }

    #[test]
    fn test_default_value_makes_nullable() {
        let table = products(Column::new("stock", ColumnType::Integer).with_default("0"));
        assert_eq!(rules_for(&table, "stock").to_php(), "'nullable|integer'");
    }

    #[test]
    fn test_guid_named_uuid_is_not_duplicated() {
        let table = products(Column::new("uuid", ColumnType::Guid));
        assert_eq!(rules_for(&table, "uuid").to_php(), "'required|uuid'");
    }

    #[test]
    fn test_decimal_is_array_form() {
        let table = products(Column::new(
            "price",
            ColumnType::Decimal { precision: 8, scale: 2 },
        ));
        let rules = rules_for(&table, "price");
        assert!(!rules.is_composable());
        assert_eq!(
            rules.to_php(),
            r"['required', 'regex:/^[+-]?(?=\\.?\\d)\\d*(\\.\\d*)?$/']"
        );
    }

    #[test]
    fn test_enum_with_separator_uses_rule_class() {
        let plain = EnumType::new("products_size", vec!["s".into(), "m".into()]);
        let table = products(Column::new("size", ColumnType::Enum(plain)));
        assert_eq!(rules_for(&table, "size").to_php(), "'required|in:s,m'");

        let piped = EnumType::new("products_kind", vec!["a|b".into(), "c".into()]);
        let table = products(Column::new("kind", ColumnType::Enum(piped)));
        let rules = rules_for(&table, "kind");
        assert!(rules.uses_rule_class());
        assert_eq!(rules.to_php(), "['required', Rule::in(['a|b', 'c'])]");
    }

    #[test]
    fn test_unique_requires_model_binding() {
        let table = products(Column::new("sku", ColumnType::String { length: Some(32) }).unique());
        let rules = rules_for(&table, "sku");
        assert!(rules.needs_model_binding());
        assert_eq!(
            rules.to_php(),
            "['required', Rule::unique('products')->ignore($product)]"
        );
    }

    #[test]
    fn test_foreign_key_exists_rule() {
        let table = Table::builder("sales")
            .column(Column::new("id", ColumnType::BigInteger).autoincrement())
            .column(Column::new("product_id", ColumnType::BigInteger))
            .column(Column::new("buyer_id", ColumnType::BigInteger).nullable())
            .primary_key(["id"])
            .foreign_key("product_id", "products", "product_id")
            .foreign_key("buyer_id", "users", "id")
            .build()
            .unwrap();
        assert_eq!(
            rules_for(&table, "product_id").to_php(),
            "'required|integer|exists:products'"
        );
        assert_eq!(
            rules_for(&table, "buyer_id").to_php(),
            "'nullable|integer|exists:users,id'"
        );
    }
}
