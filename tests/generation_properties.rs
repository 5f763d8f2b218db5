//! Property-based tests for stub rendering and schema-driven generation
//!
//! Covers literal passthrough, elision of empty placeholder lines, seeding
//! order across foreign-key chains, and placeholder-free PHP output for
//! arbitrary column sets.

use crudgen_generation::{stub_loader, ArtifactKind, GenerationManager};
use crudgen_schema::{Column, ColumnType, DatabaseInformation, Table};
use crudgen_stub::{render, StubValues};
use proptest::prelude::*;

/// Stub text without any placeholder opener
fn literal_strategy() -> impl Strategy<Value = String> {
    "[a-z ;(){}\n]{0,80}".prop_filter("no placeholder opener", |s| !s.contains("{{"))
}

fn column_pool() -> Vec<(&'static str, ColumnType)> {
    vec![
        ("name", ColumnType::String { length: Some(100) }),
        ("email", ColumnType::String { length: Some(255) }),
        ("bio", ColumnType::Text),
        ("age", ColumnType::Integer),
        ("score", ColumnType::Decimal { precision: 8, scale: 2 }),
        ("active", ColumnType::Boolean),
        ("born_on", ColumnType::Date),
        ("seen_at", ColumnType::DateTime),
        ("rating", ColumnType::Float),
        ("notes", ColumnType::Json),
    ]
}

/// A `widgets` table with a random subset of the pool
fn widget_strategy() -> impl Strategy<Value = Table> {
    (
        prop::sample::subsequence(column_pool(), 1..=10),
        prop::collection::vec(any::<bool>(), 10),
        any::<bool>(),
    )
        .prop_map(|(columns, nullable, timestamps)| {
            let mut builder = Table::builder("widgets")
                .column(Column::new("id", ColumnType::BigInteger).autoincrement())
                .primary_key(["id"]);
            for ((name, column_type), nullable) in columns.into_iter().zip(nullable) {
                let column = Column::new(name, column_type);
                builder = builder.column(if nullable { column.nullable() } else { column });
            }
            if timestamps {
                builder = builder
                    .column(Column::new("created_at", ColumnType::DateTime).nullable())
                    .column(Column::new("updated_at", ColumnType::DateTime).nullable());
            }
            builder.build().expect("widget table is valid")
        })
}

/// `t0 <- t1 <- ... <- tn`, each table referencing the previous one
fn chain(length: usize) -> DatabaseInformation {
    let tables = (0..length).map(|i| {
        let mut builder = Table::builder(format!("t{}s", i))
            .column(Column::new("id", ColumnType::BigInteger).autoincrement())
            .primary_key(["id"]);
        if i > 0 {
            builder = builder
                .column(Column::new("parent_id", ColumnType::BigInteger))
                .foreign_key("parent_id", format!("t{}s", i - 1), "id");
        }
        builder.build().expect("chain table is valid")
    });
    DatabaseInformation::from_tables(tables)
}

proptest! {
    #[test]
    fn prop_literal_text_renders_unchanged(text in literal_strategy()) {
        let rendered = render(&text, &StubValues::new()).expect("literal stub parses");
        prop_assert_eq!(rendered, text);
    }

    #[test]
    fn prop_empty_placeholder_lines_vanish(
        before in "[a-z;]{1,20}",
        after in "[a-z;]{1,20}",
        indent in "[ \t]{0,8}",
    ) {
        let template = format!("{}\n{}{{{{ body }}}}\n{}", before, indent, after);
        let rendered = render(&template, &StubValues::new()).expect("stub parses");
        prop_assert_eq!(rendered, format!("{}\n{}", before, after));
    }

    #[test]
    fn prop_continuation_lines_take_placeholder_indent(
        lines in prop::collection::vec("[a-z]{1,10}", 1..6),
        indent in " {0,8}",
    ) {
        let template = format!("{}{{{{ body }}}}", indent);
        let values = StubValues::new().with("body", lines.clone());
        let rendered = render(&template, &values).expect("stub parses");
        let expected: Vec<String> = lines.iter().map(|line| format!("{}{}", indent, line)).collect();
        prop_assert_eq!(rendered, expected.join("\n"));
    }

    #[test]
    fn prop_seeding_order_puts_referenced_tables_first(
        order in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let db = chain(6);
        let names: Vec<String> = order.iter().map(|i| format!("t{}s", i)).collect();
        let seeded = db.seeding_order(&names);
        let expected: Vec<String> = (0..6).map(|i| format!("t{}s", i)).collect();
        prop_assert_eq!(seeded, expected);
    }

    #[test]
    fn prop_php_artifacts_have_no_unresolved_placeholders(table in widget_strategy()) {
        let db = DatabaseInformation::from_tables([table.clone()]);
        let manager = GenerationManager::new(&db, stub_loader(None));
        let kinds = [
            ArtifactKind::Model,
            ArtifactKind::Request,
            ArtifactKind::Factory,
            ArtifactKind::Seeder,
        ];
        let artifacts = manager.generate_table("widgets", &kinds).expect("widgets generate");
        prop_assert_eq!(artifacts.len(), 4);

        for artifact in &artifacts {
            prop_assert!(
                !artifact.content.contains("{{") && !artifact.content.contains("}}"),
                "{} has leftover braces",
                artifact.path.display()
            );
        }

        let model = &artifacts[0].content;
        for column in table.columns().filter(|c| c.name() != "id" && !c.is_timestamp()) {
            let quoted = format!("'{}',", column.name());
            prop_assert!(model.contains(&quoted), "{} missing from fillable", column.name());
        }
        prop_assert_eq!(
            model.contains("public $timestamps = false;"),
            !table.has_timestamps()
        );
    }
}
