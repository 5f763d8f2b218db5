//! Built-in stubs, embedded at compile time

use std::path::PathBuf;

use crudgen_stub::StubLoader;

/// Eloquent model
pub const MODEL: &str = "model";
/// Resource controller
pub const CONTROLLER: &str = "controller";
/// Form request
pub const REQUEST: &str = "request";
/// Model factory
pub const FACTORY: &str = "factory";
/// Seeder for a regular table
pub const SEEDER: &str = "seeder";
/// Seeder attaching random pairs through a pivot
pub const PIVOT_SEEDER: &str = "pivot_seeder";
/// Resource route line
pub const ROUTE: &str = "route";
/// Index view
pub const VIEW_INDEX: &str = "views/index";
/// Show view
pub const VIEW_SHOW: &str = "views/show";
/// Create view
pub const VIEW_CREATE: &str = "views/create";
/// Edit view
pub const VIEW_EDIT: &str = "views/edit";
/// Form partial shared by create and edit
pub const VIEW_FORM: &str = "views/form";

/// Name and source of every built-in stub
pub const BUILTIN_STUBS: &[(&str, &str)] = &[
    (MODEL, include_str!("../stubs/model.stub")),
    (CONTROLLER, include_str!("../stubs/controller.stub")),
    (REQUEST, include_str!("../stubs/request.stub")),
    (FACTORY, include_str!("../stubs/factory.stub")),
    (SEEDER, include_str!("../stubs/seeder.stub")),
    (PIVOT_SEEDER, include_str!("../stubs/pivot_seeder.stub")),
    (ROUTE, include_str!("../stubs/route.stub")),
    (VIEW_INDEX, include_str!("../stubs/views/index.stub")),
    (VIEW_SHOW, include_str!("../stubs/views/show.stub")),
    (VIEW_CREATE, include_str!("../stubs/views/create.stub")),
    (VIEW_EDIT, include_str!("../stubs/views/edit.stub")),
    (VIEW_FORM, include_str!("../stubs/views/form.stub")),
];

/// Loader over the built-in stubs, preferring files in `override_dir`
pub fn stub_loader(override_dir: Option<PathBuf>) -> StubLoader {
    let loader = StubLoader::new(BUILTIN_STUBS);
    match override_dir {
        Some(dir) => loader.with_override_dir(dir),
        None => loader,
    }
}
