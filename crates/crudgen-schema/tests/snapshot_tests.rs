//! Loading schemas from snapshot files

use std::fs;

use crudgen_schema::{
    ColumnType, DatabaseInformation, SchemaError, SchemaSnapshot, SnapshotIntrospector,
};
use tempfile::TempDir;

const MYSQL_SNAPSHOT: &str = r#"
driver: mysql
tables:
  - name: users
    primary_key: [id]
    columns:
      - { name: id, type: bigint unsigned, autoincrement: true }
      - { name: name, type: varchar(255) }
      - { name: email, type: varchar(255) }
      - { name: role, type: "enum('admin','it''s me')", default: admin }
      - { name: created_at, type: timestamp, nullable: true }
      - { name: updated_at, type: timestamp, nullable: true }
    indexes:
      - { columns: [email], unique: true }
  - name: orders
    primary_key: [id]
    columns:
      - { name: id, type: bigint unsigned, autoincrement: true }
      - { name: user_id, type: bigint unsigned }
      - { name: total, type: "decimal(8,2)" }
    foreign_keys:
      - { columns: [user_id], foreign_table: users, foreign_columns: [id] }
  - name: lines
    primary_key: [order_id, position]
    columns:
      - { name: order_id, type: bigint unsigned }
      - { name: position, type: int }
      - { name: product_id, type: bigint unsigned }
      - { name: product_sku, type: varchar(20) }
    foreign_keys:
      - { columns: [product_id, product_sku], foreign_table: products, foreign_columns: [id, sku] }
"#;

fn write_snapshot(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_yaml_snapshot_loads_with_rejections() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "schema.yaml", MYSQL_SNAPSHOT);

    let introspector = SnapshotIntrospector::from_path(&path).unwrap();
    let info = DatabaseInformation::load(&introspector).unwrap();

    let users = info.table("users").unwrap();
    assert!(users.column("email").unwrap().is_unique());
    assert!(users.column("id").unwrap().is_unique());
    assert!(users.has_timestamps());
    assert_eq!(users.label_column().unwrap().name(), "name");

    let role = users.column("role").unwrap();
    let enum_type = role.column_type().as_enum().unwrap();
    assert_eq!(enum_type.logical_name(), "users_role");
    assert_eq!(enum_type.valid_values(), ["admin", "it's me"]);

    let orders = info.table("orders").unwrap();
    assert_eq!(
        *orders.column("total").unwrap().column_type(),
        ColumnType::Decimal { precision: 8, scale: 2 }
    );
    assert!(orders.label_column().is_none());

    assert!(matches!(
        info.table("lines"),
        Err(SchemaError::CompositeForeignKey { .. })
    ));
    assert_eq!(info.rejected().count(), 1);
    assert_eq!(info.relationships_for("users").len(), 1);
}

#[test]
fn test_sqlite_check_constraint_becomes_enum() {
    let json = r#"{
        "driver": "sqlite",
        "tables": [{
            "name": "tickets",
            "primary_key": ["id"],
            "columns": [
                {"name": "id", "type": "integer", "autoincrement": true},
                {"name": "status", "type": "varchar"}
            ],
            "create_statement": "CREATE TABLE \"tickets\" (\"id\" integer primary key autoincrement not null, \"status\" varchar check (\"status\" in ('open', 'closed')) not null)"
        }]
    }"#;
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "schema.json", json);

    let info = DatabaseInformation::load(&SnapshotIntrospector::from_path(&path).unwrap()).unwrap();
    let status = info.table("tickets").unwrap().column("status").unwrap();
    assert_eq!(status.enum_values().unwrap(), ["open", "closed"]);
}

#[test]
fn test_postgres_snapshot_has_no_enum_information() {
    let snapshot = SchemaSnapshot::from_yaml_str(
        "driver: pgsql\ntables:\n  - name: t\n    primary_key: [id]\n    columns:\n      - { name: id, type: integer }\n      - { name: kind, type: varchar(10) }\n",
    )
    .unwrap();
    let info = DatabaseInformation::load(&SnapshotIntrospector::new(snapshot)).unwrap();
    let kind = info.table("t").unwrap().column("kind").unwrap();
    assert!(kind.enum_values().is_none());
    assert!(kind.column_type().is_string());
}

#[test]
fn test_missing_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let result = SnapshotIntrospector::from_path(dir.path().join("absent.json"));
    assert!(matches!(result, Err(SchemaError::Snapshot(_))));
}
