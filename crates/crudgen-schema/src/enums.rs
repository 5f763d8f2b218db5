//! Enum value extraction
//!
//! MySQL and MariaDB expose enums in the column type (`enum('a','b')` or
//! `set(...)`). SQLite has no enum type; Laravel emits a
//! `CHECK ("col" IN (...))` constraint that survives in the table DDL.
//! Other backends give no enum information.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::introspection::RawColumn;
use crate::types::DatabaseDriver;

lazy_static! {
    static ref MYSQL_ENUM: Regex =
        Regex::new(r"(?is)^\s*(?:enum|set)\s*\((.*)\)\s*$").expect("enum pattern is valid");
}

/// Valid values of an enum-like column, or `None` when the backend does not
/// say or the column is not an enum
pub fn enum_values(
    driver: DatabaseDriver,
    column: &RawColumn,
    create_statement: Option<&str>,
) -> Option<Vec<String>> {
    match driver {
        DatabaseDriver::MySql | DatabaseDriver::MariaDb => {
            let captures = MYSQL_ENUM.captures(&column.type_name)?;
            parse_quoted_list(captures.get(1)?.as_str())
        }
        DatabaseDriver::Sqlite => sqlite_check_values(create_statement?, &column.name),
        DatabaseDriver::Postgres | DatabaseDriver::SqlServer | DatabaseDriver::Unknown => {
            debug!(
                "No enum extraction for {} driver, column {} treated as plain string",
                driver, column.name
            );
            None
        }
    }
}

fn sqlite_check_values(create_statement: &str, column: &str) -> Option<Vec<String>> {
    let pattern = format!(
        r#"(?i)check\s*\(\s*["`\[]?{}["`\]]?\s+in\s*\("#,
        regex::escape(column)
    );
    let regex = Regex::new(&pattern).ok()?;
    let found = regex.find(create_statement)?;
    parse_quoted_list(&create_statement[found.end()..])
}

/// Parse `'a', 'b''c', "d")` into values, stopping at the closing parenthesis
///
/// Doubled quotes and backslash escapes are unescaped. Returns `None` on
/// anything that is not a quoted literal.
pub fn parse_quoted_list(input: &str) -> Option<Vec<String>> {
    let mut values = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = match chars.next() {
            Some(c @ ('\'' | '"')) => c,
            Some(')') | None if values.is_empty() => return Some(values),
            _ => return None,
        };

        let mut value = String::new();
        loop {
            match chars.next()? {
                '\\' => value.push(chars.next()?),
                c if c == quote => {
                    if chars.next_if_eq(&quote).is_some() {
                        value.push(quote);
                    } else {
                        break;
                    }
                }
                c => value.push(c),
            }
        }
        values.push(value);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            Some(',') => continue,
            Some(')') | None => return Some(values),
            Some(_) => return None,
        }
    }
}
