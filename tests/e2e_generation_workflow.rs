//! End-to-end generation from a schema snapshot into a Laravel project tree
//!
//! Covers a blog schema with a pivot table, a self-referencing key, a MySQL
//! enum, a unique column, a table without a single-column key and a table
//! rejected at load time.

use std::fs;
use std::path::Path;

use crudgen_config::CrudgenConfig;
use crudgen_generation::{
    inject_seeder_calls, stub_loader, ArtifactKind, GenerationManager, GenerationOptions,
    OutputWriter, OutputWriterConfig, WriteAction,
};
use crudgen_schema::{DatabaseInformation, SchemaError, SchemaSnapshot, SnapshotIntrospector};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "driver": "mysql",
  "tables": [
    {
      "name": "users",
      "primary_key": ["id"],
      "columns": [
        { "name": "id", "type": "bigint unsigned", "autoincrement": true },
        { "name": "name", "type": "varchar(255)" },
        { "name": "email", "type": "varchar(255)" },
        { "name": "created_at", "type": "timestamp", "nullable": true },
        { "name": "updated_at", "type": "timestamp", "nullable": true }
      ],
      "indexes": [{ "columns": ["email"], "unique": true }]
    },
    {
      "name": "categories",
      "primary_key": ["id"],
      "columns": [
        { "name": "id", "type": "bigint unsigned", "autoincrement": true },
        { "name": "title", "type": "varchar(100)" },
        { "name": "parent_id", "type": "bigint unsigned", "nullable": true }
      ],
      "foreign_keys": [
        { "columns": ["parent_id"], "foreign_table": "categories", "foreign_columns": ["id"] }
      ]
    },
    {
      "name": "posts",
      "primary_key": ["id"],
      "columns": [
        { "name": "id", "type": "bigint unsigned", "autoincrement": true },
        { "name": "user_id", "type": "bigint unsigned" },
        { "name": "category_id", "type": "bigint unsigned", "nullable": true },
        { "name": "title", "type": "varchar(200)" },
        { "name": "status", "type": "enum('draft','published')", "default": "draft" },
        { "name": "body", "type": "text" },
        { "name": "created_at", "type": "timestamp", "nullable": true },
        { "name": "updated_at", "type": "timestamp", "nullable": true }
      ],
      "foreign_keys": [
        { "columns": ["user_id"], "foreign_table": "users", "foreign_columns": ["id"] },
        { "columns": ["category_id"], "foreign_table": "categories", "foreign_columns": ["id"] }
      ]
    },
    {
      "name": "tags",
      "primary_key": ["id"],
      "columns": [
        { "name": "id", "type": "bigint unsigned", "autoincrement": true },
        { "name": "name", "type": "varchar(50)" }
      ]
    },
    {
      "name": "post_tag",
      "primary_key": ["post_id", "tag_id"],
      "columns": [
        { "name": "post_id", "type": "bigint unsigned" },
        { "name": "tag_id", "type": "bigint unsigned" }
      ],
      "foreign_keys": [
        { "columns": ["post_id"], "foreign_table": "posts", "foreign_columns": ["id"] },
        { "columns": ["tag_id"], "foreign_table": "tags", "foreign_columns": ["id"] }
      ]
    },
    {
      "name": "post_views",
      "primary_key": ["post_id", "day"],
      "columns": [
        { "name": "post_id", "type": "bigint unsigned" },
        { "name": "day", "type": "date" },
        { "name": "views", "type": "int" }
      ],
      "foreign_keys": [
        { "columns": ["post_id"], "foreign_table": "posts", "foreign_columns": ["id"] }
      ]
    },
    {
      "name": "flags",
      "primary_key": ["id"],
      "columns": [
        { "name": "id", "type": "int", "autoincrement": true },
        { "name": "enabled", "type": "tinyint(1)" }
      ],
      "indexes": [{ "columns": ["enabled"], "unique": true }]
    }
  ]
}"#;

fn load() -> DatabaseInformation {
    let snapshot = SchemaSnapshot::from_json_str(SNAPSHOT).expect("snapshot parses");
    DatabaseInformation::load(&SnapshotIntrospector::new(snapshot)).expect("schema loads")
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

#[test]
fn test_schema_loads_with_rejections() {
    let db = load();
    assert_eq!(
        db.table_names(),
        vec!["users", "categories", "posts", "tags", "post_tag", "post_views", "flags"]
    );
    assert_eq!(db.tables().count(), 6);
    assert!(matches!(db.table("flags"), Err(SchemaError::UniqueBoolean { .. })));
    assert!(db.table("post_tag").unwrap().is_pivot());
    assert!(!db.table("post_views").unwrap().is_pivot());
}

#[test]
fn test_full_project_generation() {
    let project = TempDir::new().expect("Failed to create temp directory");
    let root = project.path();
    let config = CrudgenConfig::default();
    let db = load();
    let options = GenerationOptions {
        model_namespace: config.model_namespace.clone(),
        layout: config.layout.clone(),
        seed_count: config.seed_count,
        ..Default::default()
    };
    let manager = GenerationManager::with_options(&db, stub_loader(None), options);

    let names = [
        "post_tag", "posts", "tags", "users", "categories", "post_views", "flags",
    ];
    let outcome = manager.generate_all(&names, &ArtifactKind::ALL);

    // Rejected table fails alone
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "flags");
    assert_eq!(
        outcome.succeeded(),
        vec!["post_tag", "posts", "tags", "users", "categories", "post_views"]
    );

    let report = OutputWriter::new()
        .write(&outcome.artifacts(), root)
        .expect("artifacts written");
    assert!(report
        .files
        .iter()
        .all(|f| matches!(f.action, WriteAction::Created | WriteAction::Appended)));

    // Pivot gets a seeder and nothing else
    assert!(!root.join("app/Models/PostTag.php").exists());
    let pivot_seeder = read(root, "database/seeders/PostTagSeeder.php");
    assert!(pivot_seeder.contains("$tags = Tag::all();"));
    assert!(pivot_seeder.contains("$post->tags()->attach("));

    // Both sides of the pivot see each other
    let post_model = read(root, "app/Models/Post.php");
    assert!(post_model.contains("public function tags(): BelongsToMany"));
    assert!(post_model.contains("return $this->belongsToMany(Tag::class, 'post_tag', 'post_id', 'tag_id');"));
    assert!(post_model.contains("public function user(): BelongsTo"));
    assert!(post_model.contains("public function category(): BelongsTo"));
    assert!(read(root, "app/Models/Tag.php").contains("public function posts(): BelongsToMany"));
    assert!(read(root, "app/Models/User.php").contains("public function posts(): HasMany"));

    // Self reference: no recursive factory, nullable rule
    let category_factory = read(root, "database/factories/CategoryFactory.php");
    assert!(category_factory.contains("'parent_id' => null,"));
    assert!(read(root, "app/Http/Requests/CategoryRequest.php")
        .contains("'parent_id' => 'nullable|integer|exists:categories,id',"));

    // Enum with default and unique email
    let post_request = read(root, "app/Http/Requests/PostRequest.php");
    assert!(post_request.contains("'status' => 'nullable|in:draft,published',"));
    let user_request = read(root, "app/Http/Requests/UserRequest.php");
    assert!(user_request.contains("$user = $this->route('user');"));
    assert!(user_request.contains("'email' => ['required', 'email', Rule::unique('users')->ignore($user)],"));
    assert!(read(root, "database/factories/UserFactory.php")
        .contains("'email' => fake()->unique()->email(),"));

    // Composite key without pivot shape: model and factory only
    assert!(root.join("app/Models/PostView.php").exists());
    assert!(root.join("database/factories/PostViewFactory.php").exists());
    assert!(!root.join("app/Http/Controllers/PostViewController.php").exists());
    assert!(!root.join("resources/views/post-views").exists());
    assert!(!read(root, "app/Models/PostView.php").contains("public function post("));
    assert!(read(root, "app/Models/Post.php").contains("public function postViews(): HasMany"));

    // Views link foreign keys through the label column
    let post_index = read(root, "resources/views/posts/index.blade.php");
    assert!(post_index.contains("{{ route('users.show', $post->user_id) }}"));
    assert!(post_index.contains("@if ($post->category_id !== null)"));

    let routes = read(root, "routes/web.php");
    assert!(routes.starts_with("<?php\n\n"));
    assert_eq!(routes.matches("Route::resource(").count(), 4);
    assert!(!routes.contains("post-views"));

    // Seeders registered referenced tables first
    let seeders = manager.seeders_in_order(&outcome.succeeded());
    let seeder_path = root.join(&config.seeder_path);
    inject_seeder_calls(&seeder_path, &seeders, false).expect("seeders registered");
    let database_seeder = fs::read_to_string(&seeder_path).expect("seeder written");
    let position = |seeder: &str| {
        database_seeder
            .find(&format!("$this->call({}::class);", seeder))
            .unwrap_or_else(|| panic!("{} not registered", seeder))
    };
    assert!(position("UserSeeder") < position("PostSeeder"));
    assert!(position("CategorySeeder") < position("PostSeeder"));
    assert!(position("PostSeeder") < position("PostTagSeeder"));
    assert!(position("TagSeeder") < position("PostTagSeeder"));
    assert!(position("PostSeeder") < position("PostViewSeeder"));
}

#[test]
fn test_regeneration_respects_existing_files() {
    let project = TempDir::new().expect("Failed to create temp directory");
    let root = project.path();
    let db = load();
    let manager = GenerationManager::new(&db, stub_loader(None));
    let artifacts = manager
        .generate_table("tags", &[ArtifactKind::Model, ArtifactKind::Route])
        .unwrap();

    OutputWriter::new().write(&artifacts, root).unwrap();
    fs::write(root.join("app/Models/Tag.php"), "<?php // edited").unwrap();

    let second = OutputWriter::new().write(&artifacts, root).unwrap();
    assert_eq!(second.files_written(), 0);
    assert_eq!(read(root, "app/Models/Tag.php"), "<?php // edited");

    let forced = OutputWriter::with_config(OutputWriterConfig {
        force: true,
        ..Default::default()
    })
    .write(&artifacts, root)
    .unwrap();
    assert_eq!(forced.files[0].action, WriteAction::Overwritten);
    assert_eq!(forced.files[1].action, WriteAction::Unchanged);
    assert!(read(root, "app/Models/Tag.php").contains("class Tag extends Model"));
}
