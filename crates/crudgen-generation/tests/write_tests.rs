//! Writing generated artifacts into a project directory

use std::fs;

use crudgen_generation::{
    inject_seeder_calls, stub_loader, ArtifactKind, GenerationManager, OutputWriter,
    OutputWriterConfig, WriteAction, DATABASE_SEEDER,
};
use crudgen_schema::{Column, ColumnType, DatabaseInformation, Table};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn blog() -> DatabaseInformation {
    let users = Table::builder("users")
        .column(Column::new("id", ColumnType::BigInteger).autoincrement())
        .column(Column::new("email", ColumnType::String { length: Some(255) }))
        .primary_key(["id"])
        .unique_index(["email"])
        .build()
        .unwrap();
    let posts = Table::builder("posts")
        .column(Column::new("id", ColumnType::BigInteger).autoincrement())
        .column(Column::new("user_id", ColumnType::BigInteger))
        .column(Column::new("body", ColumnType::Text).nullable())
        .primary_key(["id"])
        .foreign_key("user_id", "users", "id")
        .build()
        .unwrap();
    DatabaseInformation::from_tables([posts, users])
}

#[test]
fn test_generate_write_and_register_seeders() {
    let project = TempDir::new().unwrap();
    let db = blog();
    let manager = GenerationManager::new(&db, stub_loader(None));
    let outcome = manager.generate_all(&["posts", "users"], &ArtifactKind::ALL);
    assert!(outcome.is_success());

    let report = OutputWriter::new()
        .write(&outcome.artifacts(), project.path())
        .unwrap();
    assert_eq!(report.files_skipped(), 0);

    let model = fs::read_to_string(project.path().join("app/Models/Post.php")).unwrap();
    assert!(model.contains("public function user(): BelongsTo"));
    assert!(model.lines().all(|line| line == line.trim_end()));

    let routes = fs::read_to_string(project.path().join("routes/web.php")).unwrap();
    assert_eq!(
        routes,
        "<?php\n\nRoute::resource('posts', \\App\\Http\\Controllers\\PostController::class);\n\
         Route::resource('users', \\App\\Http\\Controllers\\UserController::class);\n"
    );

    let seeders = manager.seeders_in_order(&outcome.succeeded());
    assert_eq!(seeders, vec!["UserSeeder", "PostSeeder"]);
    let seeder_path = project.path().join(DATABASE_SEEDER);
    let added = inject_seeder_calls(&seeder_path, &seeders, false).unwrap();
    assert_eq!(added.len(), 2);

    let seeder = fs::read_to_string(&seeder_path).unwrap();
    let user = seeder.find("$this->call(UserSeeder::class);").unwrap();
    let post = seeder.find("$this->call(PostSeeder::class);").unwrap();
    assert!(user < post);

    // Second run changes nothing
    let again = OutputWriter::new()
        .write(&outcome.artifacts(), project.path())
        .unwrap();
    assert_eq!(again.files_written(), 0);
    assert!(again
        .files
        .iter()
        .all(|f| matches!(f.action, WriteAction::Skipped | WriteAction::Unchanged)));
    assert!(inject_seeder_calls(&seeder_path, &seeders, false).unwrap().is_empty());
    assert_eq!(fs::read_to_string(&seeder_path).unwrap(), seeder);
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = TempDir::new().unwrap();
    let db = blog();
    let manager = GenerationManager::new(&db, stub_loader(None));
    let artifacts = manager.generate_table("users", &ArtifactKind::ALL).unwrap();

    let writer = OutputWriter::with_config(OutputWriterConfig {
        dry_run: true,
        ..Default::default()
    });
    let report = writer.write(&artifacts, project.path()).unwrap();
    assert!(report.dry_run);
    assert!(report.files.iter().all(|f| f.action == WriteAction::Created
        || f.action == WriteAction::Appended));

    let seeder_path = project.path().join(DATABASE_SEEDER);
    let added = inject_seeder_calls(&seeder_path, &["UserSeeder".to_string()], true).unwrap();
    assert_eq!(added, vec!["UserSeeder"]);
    assert_eq!(fs::read_dir(project.path()).unwrap().count(), 0);
}

#[test]
fn test_override_stub_directory() {
    let stubs = TempDir::new().unwrap();
    fs::write(stubs.path().join("route.stub"), "Route::apiResource('{{ route }}', {{ controller }}::class);\n").unwrap();

    let db = blog();
    let manager = GenerationManager::new(&db, stub_loader(Some(stubs.path().to_path_buf())));
    let route = manager.generate_table("users", &[ArtifactKind::Route]).unwrap();
    assert_eq!(route[0].content, "Route::apiResource('users', UserController::class);");
}
