//! Property-based tests for pivot classification

use crudgen_schema::{Column, ColumnType, Table};
use proptest::prelude::*;

fn pivot_builder(with_id: bool, with_timestamps: bool) -> crudgen_schema::TableBuilder {
    let mut builder = Table::builder("post_tag");
    if with_id {
        builder = builder
            .column(Column::new("id", ColumnType::BigInteger).autoincrement())
            .primary_key(["id"]);
    }
    builder = builder
        .column(Column::new("post_id", ColumnType::BigInteger))
        .column(Column::new("tag_id", ColumnType::BigInteger));
    if with_timestamps {
        builder = builder
            .column(Column::new("created_at", ColumnType::DateTime).nullable())
            .column(Column::new("updated_at", ColumnType::DateTime).nullable());
    }
    builder
}

fn business_column_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,10}(_[a-z]{1,6})?".prop_filter("not a managed column", |name| {
        !matches!(
            name.as_str(),
            "id" | "post_id" | "tag_id" | "created_at" | "updated_at"
        )
    })
}

proptest! {
    /// Two keys plus only id and timestamps is a pivot
    #[test]
    fn prop_two_keys_and_managed_columns_is_pivot(with_id: bool, with_timestamps: bool) {
        let table = pivot_builder(with_id, with_timestamps)
            .foreign_key("post_id", "posts", "id")
            .foreign_key("tag_id", "tags", "id")
            .build()
            .unwrap();
        prop_assert!(table.is_pivot());
    }

    /// Any business column disqualifies a pivot
    #[test]
    fn prop_business_column_breaks_pivot(
        with_id: bool,
        with_timestamps: bool,
        extra in business_column_strategy(),
    ) {
        let table = pivot_builder(with_id, with_timestamps)
            .column(Column::new(extra, ColumnType::String { length: Some(50) }).nullable())
            .foreign_key("post_id", "posts", "id")
            .foreign_key("tag_id", "tags", "id")
            .build()
            .unwrap();
        prop_assert!(!table.is_pivot());
    }

    /// A single foreign key is never a pivot
    #[test]
    fn prop_one_key_is_not_pivot(with_id: bool, with_timestamps: bool) {
        let table = pivot_builder(with_id, with_timestamps)
            .foreign_key("post_id", "posts", "id")
            .build()
            .unwrap();
        prop_assert!(!table.is_pivot());
    }
}
