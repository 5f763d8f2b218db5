//! Rendered artifacts for a small shop schema

use crudgen_generation::{stub_loader, Artifact, ArtifactKind, GenerationManager};
use crudgen_schema::{Column, ColumnType, DatabaseInformation, Table};
use pretty_assertions::assert_eq;

fn id() -> Column {
    Column::new("id", ColumnType::BigInteger).autoincrement()
}

fn shop() -> DatabaseInformation {
    let categories = Table::builder("categories")
        .column(id())
        .column(Column::new("name", ColumnType::String { length: Some(50) }))
        .primary_key(["id"])
        .build()
        .unwrap();
    let products = Table::builder("products")
        .column(id())
        .column(Column::new("name", ColumnType::String { length: Some(100) }))
        .column(Column::new("sku", ColumnType::String { length: Some(20) }))
        .column(Column::new("price", ColumnType::Decimal { precision: 8, scale: 2 }))
        .column(Column::new("active", ColumnType::Boolean).with_default("1"))
        .column(Column::new("category_id", ColumnType::BigInteger))
        .column(Column::new("created_at", ColumnType::DateTime).nullable())
        .column(Column::new("updated_at", ColumnType::DateTime).nullable())
        .primary_key(["id"])
        .foreign_key("category_id", "categories", "id")
        .unique_index(["sku"])
        .build()
        .unwrap();
    DatabaseInformation::from_tables([categories, products])
}

fn generate(db: &DatabaseInformation, table: &str, kind: ArtifactKind) -> Vec<Artifact> {
    GenerationManager::new(db, stub_loader(None))
        .generate_table(table, &[kind])
        .unwrap()
}

/// Rendered text as written to disk: no trailing whitespace on any line
fn tidy(content: &str) -> String {
    let mut tidied: Vec<&str> = content.lines().map(str::trim_end).collect();
    if content.ends_with('\n') {
        tidied.push("");
    }
    tidied.join("\n")
}

#[test]
fn test_model_with_casts_and_belongs_to() {
    let db = shop();
    let artifacts = generate(&db, "products", ArtifactKind::Model);
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].path.to_string_lossy(), "app/Models/Product.php");
    assert_eq!(
        tidy(&artifacts[0].content),
        r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;
use Illuminate\Database\Eloquent\Relations\BelongsTo;

class Product extends Model
{
    use HasFactory;

    protected $fillable = [
        'name',
        'sku',
        'price',
        'active',
        'category_id',
    ];

    protected $casts = [
        'price' => 'decimal:2',
        'active' => 'boolean',
    ];

    public function category(): BelongsTo
    {
        return $this->belongsTo(Category::class);
    }
}
"#
    );
}

#[test]
fn test_model_without_timestamps_has_many() {
    let db = shop();
    let artifacts = generate(&db, "categories", ArtifactKind::Model);
    assert_eq!(
        tidy(&artifacts[0].content),
        r#"<?php

namespace App\Models;

use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;
use Illuminate\Database\Eloquent\Relations\HasMany;

class Category extends Model
{
    use HasFactory;

    public $timestamps = false;
    protected $fillable = [
        'name',
    ];

    public function products(): HasMany
    {
        return $this->hasMany(Product::class);
    }
}
"#
    );
}

#[test]
fn test_request_rules_with_model_binding() {
    let db = shop();
    let artifacts = generate(&db, "products", ArtifactKind::Request);
    assert_eq!(
        artifacts[0].path.to_string_lossy(),
        "app/Http/Requests/ProductRequest.php"
    );
    assert_eq!(
        tidy(&artifacts[0].content),
        r#"<?php

namespace App\Http\Requests;

use Illuminate\Foundation\Http\FormRequest;
use Illuminate\Validation\Rule;

class ProductRequest extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    public function rules(): array
    {
        $product = $this->route('product');

        return [
            'name' => 'required',
            'sku' => ['required', Rule::unique('products')->ignore($product)],
            'price' => ['required', 'regex:/^[+-]?(?=\\.?\\d)\\d*(\\.\\d*)?$/'],
            'active' => 'nullable|boolean',
            'category_id' => 'required|integer|exists:categories,id',
        ];
    }
}
"#
    );
}

#[test]
fn test_request_without_unique_has_no_prelude() {
    let db = shop();
    let content = &generate(&db, "categories", ArtifactKind::Request)[0].content;
    assert!(!content.contains("$this->route("));
    assert!(!content.contains(r"use Illuminate\Validation\Rule;"));
    assert!(content.contains("    {\n        return [\n            'name' => 'required',\n        ];\n    }"));
}

#[test]
fn test_factory_definition() {
    let db = shop();
    let artifacts = generate(&db, "products", ArtifactKind::Factory);
    assert_eq!(
        artifacts[0].path.to_string_lossy(),
        "database/factories/ProductFactory.php"
    );
    assert_eq!(
        tidy(&artifacts[0].content),
        r#"<?php

namespace Database\Factories;

use Illuminate\Database\Eloquent\Factories\Factory;
use App\Models\Category;
use App\Models\Product;

/**
 * @extends Factory<Product>
 */
class ProductFactory extends Factory
{
    protected $model = Product::class;

    public function definition(): array
    {
        return [
            'name' => fake()->name(),
            'sku' => fake()->unique()->sentence(),
            'price' => fake()->numerify('######.##'),
            'active' => fake()->boolean(),
            'category_id' => fn () => Category::factory()->create()->id,
        ];
    }
}
"#
    );
}

#[test]
fn test_controller_loads_related_options() {
    let db = shop();
    let content = &tidy(&generate(&db, "products", ArtifactKind::Controller)[0].content);
    assert!(content.contains("use App\\Models\\Category;"));
    assert!(content.contains("class ProductController extends Controller"));
    assert!(content.contains("        $categories = Category::all();\n\n        $product = new Product();\n"));
    assert!(content.contains("return view('products.create', compact('product', 'categories'));"));
    assert!(content.contains("return view('products.edit', compact('product', 'categories'));"));
    assert!(content.contains("public function store(ProductRequest $request)"));
}

#[test]
fn test_views_and_route() {
    let db = shop();
    let views = generate(&db, "products", ArtifactKind::Views);
    let paths: Vec<String> = views
        .iter()
        .map(|a| a.path.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        paths,
        vec![
            "resources/views/products/index.blade.php",
            "resources/views/products/show.blade.php",
            "resources/views/products/create.blade.php",
            "resources/views/products/edit.blade.php",
            "resources/views/products/form.blade.php",
        ]
    );

    let create = &views[2].content;
    assert!(create.starts_with("@extends('layouts.app')\n"));
    assert!(create.contains(r#"<form method="POST" action="{{ route('products.store') }}">"#));
    assert!(create.contains("@include('products.form')"));

    let index = &views[0].content;
    assert!(index.contains(r#"<a href="{{ route('categories.show', $product->category_id) }}">"#));
    assert!(index.contains("{{ $products->links() }}"));

    let form = &views[4].content;
    assert!(form.contains("@foreach ($categories as $option)"));
    assert!(form.contains(r#"<input type="hidden" name="active" value="0">"#));

    let route = generate(&db, "products", ArtifactKind::Route);
    assert_eq!(
        route[0].content,
        r"Route::resource('products', \App\Http\Controllers\ProductController::class);"
    );
}

#[test]
fn test_seeder() {
    let db = shop();
    let content = &generate(&db, "categories", ArtifactKind::Seeder)[0].content;
    assert!(content.contains("use App\\Models\\Category;"));
    assert!(content.contains("        Category::factory()->count(10)->create();"));
}
