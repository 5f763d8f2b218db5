//! Column inference across a realistic schema

use crudgen_inference::{fake_value, validation_rules, FakeValue};
use crudgen_schema::{Column, ColumnType, EnumType, Table};
use pretty_assertions::assert_eq;

fn invoices() -> Table {
    Table::builder("invoices")
        .column(Column::new("id", ColumnType::BigInteger).autoincrement())
        .column(Column::new("customer_id", ColumnType::BigInteger))
        .column(Column::new("number", ColumnType::String { length: Some(20) }))
        .column(Column::new("email", ColumnType::String { length: Some(255) }).nullable())
        .column(
            Column::new("discount", ColumnType::Decimal { precision: 5, scale: 2 })
                .nullable(),
        )
        .column(Column::new(
            "status",
            ColumnType::Enum(EnumType::new(
                "invoices_status",
                vec!["draft".into(), "sent, paid".into()],
            )),
        ))
        .column(Column::new("created_at", ColumnType::DateTime).nullable())
        .column(Column::new("updated_at", ColumnType::DateTime).nullable())
        .primary_key(["id"])
        .foreign_key("customer_id", "customers", "id")
        .unique_index(["number"])
        .unique_index(["discount"])
        .build()
        .unwrap()
}

#[test]
fn test_decimal_rules_stay_an_array_when_alone() {
    let table = Table::builder("rates")
        .column(Column::new("id", ColumnType::Integer).autoincrement())
        .column(Column::new("rate", ColumnType::Decimal { precision: 6, scale: 3 }).with_default("0"))
        .primary_key(["id"])
        .build()
        .unwrap();

    let rules = validation_rules(&table, table.column("rate").unwrap());
    assert!(!rules.is_composable());
    assert!(rules.to_php().starts_with("['nullable', 'regex:"));
}

#[test]
fn test_nullable_unique_decimal_wraps_fake_and_keeps_array_rules() {
    let table = invoices();
    let discount = table.column("discount").unwrap();

    assert_eq!(
        fake_value(&table, discount).wrapped(discount),
        "fake()->boolean(90) ? fake()->unique()->numerify('###.##') : null"
    );

    let rules = validation_rules(&table, discount);
    assert!(!rules.is_composable());
    assert!(rules.needs_model_binding());
    assert_eq!(
        rules.to_php(),
        r"['nullable', 'regex:/^[+-]?(?=\\.?\\d)\\d*(\\.\\d*)?$/', Rule::unique('invoices')->ignore($invoice)]"
    );
}

#[test]
fn test_enum_value_with_comma_uses_rule_class() {
    let table = invoices();
    let rules = validation_rules(&table, table.column("status").unwrap());
    assert_eq!(rules.to_php(), "['required', Rule::in(['draft', 'sent, paid'])]");
}

#[test]
fn test_foreign_key_beats_name_heuristics() {
    let table = Table::builder("messages")
        .column(Column::new("id", ColumnType::Integer).autoincrement())
        .column(Column::new("email_id", ColumnType::Integer).nullable())
        .primary_key(["id"])
        .foreign_key("email_id", "emails", "id")
        .build()
        .unwrap();
    let column = table.column("email_id").unwrap();

    assert_eq!(
        fake_value(&table, column),
        FakeValue::Closure("fn () => Email::factory()->create()->id".into())
    );
    assert_eq!(
        validation_rules(&table, column).to_php(),
        "'nullable|integer|exists:emails,id'"
    );
}

#[test]
fn test_managed_columns_are_skipped_everywhere() {
    let table = invoices();
    for name in ["id", "created_at", "updated_at"] {
        let column = table.column(name).unwrap();
        assert!(validation_rules(&table, column).is_empty());
        assert_eq!(fake_value(&table, column), FakeValue::Omit);
    }
}
