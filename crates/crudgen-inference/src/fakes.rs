//! Fake value inference for model factories
//!
//! First match wins: ignored columns, foreign keys, Faker formatters named
//! like the column, then a table keyed by column type. The chosen value is
//! then wrapped for nullability and uniqueness.

use std::collections::HashSet;

use crudgen_schema::{Column, ColumnType, Table};
use heck::{ToLowerCamelCase, ToPascalCase};
use lazy_static::lazy_static;
use tracing::debug;

use crate::is_ignored;
use crate::php;

/// Chance, in percent, that a nullable column gets a value
pub const NON_NULL_PERCENT: u8 = 90;

lazy_static! {
    /// Formatters shipped with Faker's default providers
    static ref FAKER_FORMATTERS: HashSet<&'static str> = [
        // Person
        "name", "firstName", "firstNameMale", "firstNameFemale", "lastName", "title",
        "titleMale", "titleFemale", "suffix",
        // Address
        "address", "streetName", "streetAddress", "buildingNumber", "secondaryAddress",
        "city", "citySuffix", "state", "stateAbbr", "postcode", "country", "countryCode",
        "latitude", "longitude",
        // Phone and company
        "phoneNumber", "e164PhoneNumber", "company", "companySuffix", "jobTitle",
        // Internet
        "email", "safeEmail", "freeEmail", "companyEmail", "userName", "password",
        "domainName", "domainWord", "tld", "url", "slug", "ipv4", "ipv6", "localIpv4",
        "macAddress", "userAgent",
        // Text
        "word", "words", "sentence", "sentences", "paragraph", "paragraphs", "text",
        "realText",
        // Numbers and strings
        "randomDigit", "randomDigitNotNull", "randomNumber", "randomFloat", "randomLetter",
        "randomAscii", "numerify", "lexify", "bothify", "asciify", "regexify",
        // Dates
        "unixTime", "dateTime", "iso8601", "date", "time", "dayOfMonth", "dayOfWeek",
        "month", "monthName", "year", "century", "timezone",
        // Payment
        "creditCardType", "creditCardNumber", "creditCardExpirationDateString", "iban",
        "swiftBicNumber", "currencyCode",
        // Color
        "hexColor", "rgbColor", "rgbCssColor", "safeColorName", "colorName",
        // Misc
        "uuid", "md5", "sha1", "sha256", "locale", "languageCode", "emoji", "boolean",
        "isbn10", "isbn13", "ean8", "ean13", "fileExtension", "mimeType", "imageUrl",
    ]
    .into_iter()
    .collect();
}

/// Fake value chosen for a column, before wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeValue {
    /// Server-managed column, left out of the factory
    Omit,
    /// Lazy value, e.g. a related factory; never wrapped
    Closure(String),
    /// Faker formatter call such as `email()`
    Faker(String),
    /// Faker formatter call passed through a PHP function, e.g.
    /// `json_encode(fake()->words())`
    Encoded {
        /// PHP function applied to the generated value
        function: &'static str,
        /// Faker formatter call
        call: String,
    },
    /// Plain PHP expression
    Expression(String),
}

impl FakeValue {
    /// Final PHP expression with nullability and uniqueness applied
    ///
    /// Empty for [`FakeValue::Omit`].
    pub fn wrapped(&self, column: &Column) -> String {
        let nullable = column.is_nullable();
        let unique = column.is_unique();
        match self {
            FakeValue::Omit => String::new(),
            FakeValue::Closure(closure) => closure.clone(),
            FakeValue::Faker(call) => {
                let value = faker_call(call, unique);
                if nullable {
                    php::sometimes_null(&value, NON_NULL_PERCENT)
                } else {
                    value
                }
            }
            FakeValue::Encoded { function, call } => {
                let value = php::call(function, &[faker_call(call, unique)]);
                if nullable {
                    php::sometimes_null(&value, NON_NULL_PERCENT)
                } else {
                    value
                }
            }
            FakeValue::Expression(expression) if nullable && expression != "null" => {
                php::sometimes_null(expression, NON_NULL_PERCENT)
            }
            FakeValue::Expression(expression) => expression.clone(),
        }
    }
}

fn faker_call(call: &str, unique: bool) -> String {
    if unique {
        php::unique_faker(call)
    } else {
        php::faker(call)
    }
}

/// Choose the fake value for a column
pub fn fake_value(table: &Table, column: &Column) -> FakeValue {
    if is_ignored(column) {
        return FakeValue::Omit;
    }

    if let Some(foreign_key) = table.foreign_key_for(column.name()) {
        if foreign_key.foreign_table == table.name() {
            // A self-referencing factory call would never terminate
            return FakeValue::Expression("null".to_string());
        }
        let model = crudgen_schema::naming::model_name(&foreign_key.foreign_table);
        let created = php::property(
            &php::method(&php::static_call(&model, "factory", &[]), "create", &[]),
            &foreign_key.foreign_column,
        );
        return FakeValue::Closure(php::arrow_fn(&created));
    }

    if let Some(formatter) = faker_formatter(column.name()) {
        debug!("{}.{} faked by name as {}", table.name(), column.name(), formatter);
        return FakeValue::Faker(format!("{}()", formatter));
    }

    type_fake(column.column_type())
}

/// Faker formatter named like the column: as-is, camel-cased, or with a
/// `random` prefix
fn faker_formatter(column: &str) -> Option<String> {
    [
        column.to_string(),
        column.to_lower_camel_case(),
        format!("random{}", column.to_pascal_case()),
    ]
    .into_iter()
    .find(|candidate| FAKER_FORMATTERS.contains(candidate.as_str()))
}

fn type_fake(column_type: &ColumnType) -> FakeValue {
    let faker = |call: &str| FakeValue::Faker(call.to_string());
    match column_type {
        ColumnType::TinyInteger => faker("numberBetween(0, 127)"),
        ColumnType::SmallInteger => faker("numberBetween(0, 32767)"),
        ColumnType::MediumInteger => faker("numberBetween(0, 8388607)"),
        ColumnType::Integer => faker("numberBetween(0, 2147483647)"),
        ColumnType::BigInteger => faker("numberBetween(0, 9223372036854775807)"),
        ColumnType::Boolean => faker("boolean()"),
        ColumnType::DateTime | ColumnType::DateTimeTz => {
            faker("dateTimeBetween('-1 year', '+1 year')")
        }
        ColumnType::Date => faker("dateTimeBetween('-1 year', '+1 year')->format('Y-m-d')"),
        ColumnType::Time => faker("dateTimeBetween('-1 year', '+1 year')->format('H:i:s')"),
        ColumnType::Decimal { precision, scale } => {
            FakeValue::Faker(format!("numerify({})", php::quote(&decimal_mask(*precision, *scale))))
        }
        ColumnType::Float => faker("randomFloat(2, 0, 1000)"),
        ColumnType::Guid => faker("uuid()"),
        ColumnType::String { .. } => faker("sentence()"),
        ColumnType::Text => faker("paragraph()"),
        ColumnType::Json => FakeValue::Encoded {
            function: "json_encode",
            call: "words()".to_string(),
        },
        // 16 raw bytes from a hex digest
        ColumnType::Binary => FakeValue::Encoded {
            function: "hex2bin",
            call: "md5()".to_string(),
        },
        ColumnType::Enum(enum_type) => FakeValue::Faker(php::call(
            "randomElement",
            &[php::string_array(enum_type.valid_values())],
        )),
        ColumnType::Unknown(raw) => {
            debug!("No fake for unknown type {}", raw);
            FakeValue::Expression("null".to_string())
        }
    }
}

/// `###.##` for `decimal(5, 2)`
fn decimal_mask(precision: u32, scale: u32) -> String {
    let integer_digits = precision.saturating_sub(scale).max(1) as usize;
    let mut mask = "#".repeat(integer_digits);
    if scale > 0 {
        mask.push('.');
        mask.push_str(&"#".repeat(scale as usize));
    }
    mask
}
