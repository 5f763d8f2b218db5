//! Relationship inference over whole schemas

use crudgen_schema::{
    Column, ColumnType, DatabaseInformation, DirectRelationship, Relationship, Table,
};
use pretty_assertions::assert_eq;

fn id() -> Column {
    Column::new("id", ColumnType::BigInteger).autoincrement()
}

fn products_and_sales() -> DatabaseInformation {
    let users = Table::builder("users")
        .column(id())
        .column(Column::new("name", ColumnType::String { length: Some(255) }))
        .primary_key(["id"])
        .build()
        .unwrap();
    let products = Table::builder("products")
        .column(Column::new("product_id", ColumnType::BigInteger).autoincrement())
        .column(Column::new("owner_id", ColumnType::BigInteger))
        .column(Column::new("title", ColumnType::String { length: Some(255) }))
        .primary_key(["product_id"])
        .foreign_key("owner_id", "users", "id")
        .build()
        .unwrap();
    let sales = Table::builder("sales")
        .column(id())
        .column(Column::new("product_id", ColumnType::BigInteger))
        .column(Column::new("amount", ColumnType::Decimal { precision: 8, scale: 2 }))
        .primary_key(["id"])
        .foreign_key("product_id", "products", "product_id")
        .build()
        .unwrap();

    DatabaseInformation::from_tables([users, products, sales])
}

#[test]
fn test_products_and_sales_are_one_to_many() {
    let info = products_and_sales();

    assert_eq!(
        info.relationships(),
        &[
            Relationship::OneToMany(DirectRelationship {
                table: "products".into(),
                column: "owner_id".into(),
                foreign_table: "users".into(),
                foreign_column: "id".into(),
            }),
            Relationship::OneToMany(DirectRelationship {
                table: "sales".into(),
                column: "product_id".into(),
                foreign_table: "products".into(),
                foreign_column: "product_id".into(),
            }),
        ]
    );
}

#[test]
fn test_relationships_are_visible_from_both_sides() {
    let info = products_and_sales();

    for relationship in info.relationships() {
        let Relationship::OneToMany(direct) = relationship else {
            panic!("unexpected relationship {relationship:?}");
        };
        for table in [&direct.table, &direct.foreign_table] {
            let found = info
                .relationships_for(table)
                .into_iter()
                .any(|r| std::ptr::eq(r, relationship));
            assert!(found, "{table} does not see {relationship:?}");
        }
    }

    assert_eq!(info.relationships_for("products").len(), 2);
    assert_eq!(info.relationships_for("users").len(), 1);
}

#[test]
fn test_pivot_links_both_tables() {
    let posts = Table::builder("posts")
        .column(id())
        .column(Column::new("title", ColumnType::String { length: None }))
        .primary_key(["id"])
        .build()
        .unwrap();
    let tags = Table::builder("tags")
        .column(id())
        .column(Column::new("name", ColumnType::String { length: None }))
        .primary_key(["id"])
        .build()
        .unwrap();
    let post_tag = Table::builder("post_tag")
        .column(Column::new("post_id", ColumnType::BigInteger))
        .column(Column::new("tag_id", ColumnType::BigInteger))
        .primary_key(["post_id", "tag_id"])
        .foreign_key("post_id", "posts", "id")
        .foreign_key("tag_id", "tags", "id")
        .build()
        .unwrap();

    let info = DatabaseInformation::from_tables([posts, tags, post_tag]);

    assert_eq!(info.relationships().len(), 1);
    assert!(matches!(info.relationships()[0], Relationship::ManyToMany(_)));
    assert_eq!(info.relationships_for("posts").len(), 1);
    assert_eq!(info.relationships_for("tags").len(), 1);
    assert_eq!(
        info.seeding_order(&["post_tag", "tags", "posts"]),
        vec!["tags", "posts", "post_tag"]
    );
}
