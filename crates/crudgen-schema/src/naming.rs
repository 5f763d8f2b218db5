//! Name inflection helpers

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToTitleCase};

/// Singular form of a snake_case name, inflecting only the last word
///
/// `order_items` becomes `order_item`.
pub fn singular(name: &str) -> String {
    inflect_last_word(name, 1)
}

/// Plural form of a snake_case name, inflecting only the last word
pub fn plural(name: &str) -> String {
    inflect_last_word(name, 2)
}

fn inflect_last_word(name: &str, count: isize) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => {
            format!("{}_{}", head, pluralizer::pluralize(last, count, false))
        }
        _ => pluralizer::pluralize(name, count, false),
    }
}

/// `order_items` to `OrderItem`
pub fn model_name(table: &str) -> String {
    singular(table).to_pascal_case()
}

/// `order_items` to `orderItem`
pub fn variable_name(table: &str) -> String {
    singular(table).to_lower_camel_case()
}

/// `order_items` to `orderItems`
pub fn plural_variable_name(table: &str) -> String {
    table.to_lower_camel_case()
}

/// `order_items` to `order-items`
pub fn route_name(table: &str) -> String {
    table.to_kebab_case()
}

/// `order_items` to `Order Items`
pub fn title(name: &str) -> String {
    name.to_title_case()
}

/// Strip a trailing `_id`, if any
pub fn strip_id_suffix(column: &str) -> Option<&str> {
    column.strip_suffix("_id").filter(|stem| !stem.is_empty())
}
