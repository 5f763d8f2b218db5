//! Column types and database drivers

use std::fmt;
use std::str::FromStr;

/// Database backend a schema was introspected from
///
/// Only used where behaviour is backend-specific, such as enum extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatabaseDriver {
    /// MySQL
    MySql,
    /// MariaDB
    MariaDb,
    /// SQLite
    Sqlite,
    /// PostgreSQL
    Postgres,
    /// Microsoft SQL Server
    SqlServer,
    /// Anything else
    #[default]
    Unknown,
}

impl FromStr for DatabaseDriver {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "mysql" | "mysql8" => DatabaseDriver::MySql,
            "mariadb" => DatabaseDriver::MariaDb,
            "sqlite" | "sqlite3" => DatabaseDriver::Sqlite,
            "postgres" | "pgsql" | "postgresql" => DatabaseDriver::Postgres,
            "sqlserver" | "sqlsrv" | "mssql" => DatabaseDriver::SqlServer,
            _ => DatabaseDriver::Unknown,
        })
    }
}

impl DatabaseDriver {
    /// Whether enum values can be recovered from this backend's schema
    pub fn supports_enum_extraction(self) -> bool {
        matches!(self, DatabaseDriver::MySql | DatabaseDriver::MariaDb | DatabaseDriver::Sqlite)
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseDriver::MySql => "mysql",
            DatabaseDriver::MariaDb => "mariadb",
            DatabaseDriver::Sqlite => "sqlite",
            DatabaseDriver::Postgres => "postgres",
            DatabaseDriver::SqlServer => "sqlserver",
            DatabaseDriver::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a [`ColumnType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// Any integer width
    Integer,
    /// Boolean
    Boolean,
    /// Date and time, with or without zone
    DateTime,
    /// Date only
    Date,
    /// Time only
    Time,
    /// Fixed-point decimal
    Decimal,
    /// Floating point
    Float,
    /// UUID/GUID
    Guid,
    /// Short string
    String,
    /// Long text, including JSON
    Text,
    /// Binary data
    Binary,
    /// String restricted to a fixed set of values
    Enum,
    /// Unrecognized storage type
    Unknown,
}

/// A string column restricted to a set of values
///
/// Identified by its logical name (`<table>_<column>`); two enum types are
/// equal when name and values match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    logical_name: String,
    valid_values: Vec<String>,
}

impl EnumType {
    /// Create an enum type
    pub fn new(logical_name: impl Into<String>, valid_values: Vec<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            valid_values,
        }
    }

    /// Logical name
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// Allowed values in declaration order
    pub fn valid_values(&self) -> &[String] {
        &self.valid_values
    }
}

/// Storage type of a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// 8 bit integer
    TinyInteger,
    /// 16 bit integer
    SmallInteger,
    /// 24 bit integer
    MediumInteger,
    /// 32 bit integer
    Integer,
    /// 64 bit integer
    BigInteger,
    /// Boolean
    Boolean,
    /// Date and time without zone
    DateTime,
    /// Date and time with zone
    DateTimeTz,
    /// Date only
    Date,
    /// Time only
    Time,
    /// Fixed-point decimal
    Decimal {
        /// Total digits
        precision: u32,
        /// Digits after the decimal point
        scale: u32,
    },
    /// Floating point
    Float,
    /// UUID/GUID
    Guid,
    /// Short string
    String {
        /// Declared maximum length
        length: Option<u32>,
    },
    /// Long text
    Text,
    /// JSON document
    Json,
    /// Binary data
    Binary,
    /// Enumerated string
    Enum(EnumType),
    /// Anything else, with the raw declaration
    Unknown(String),
}

impl ColumnType {
    /// Map a raw type declaration such as `varchar(255)` or
    /// `decimal(8,2) unsigned` to a column type
    ///
    /// Enum and set declarations map to a plain string; the enum values are
    /// attached separately because their source is backend-specific.
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        let (name, args) = split_arguments(&lower);
        let name = name
            .split_whitespace()
            .filter(|word| !matches!(*word, "unsigned" | "signed" | "zerofill"))
            .collect::<Vec<_>>()
            .join(" ");

        match name.as_str() {
            "tinyint" if args.first() == Some(&1) => ColumnType::Boolean,
            "bool" | "boolean" | "bit" => ColumnType::Boolean,
            "tinyint" => ColumnType::TinyInteger,
            "smallint" | "int2" | "smallserial" => ColumnType::SmallInteger,
            "mediumint" => ColumnType::MediumInteger,
            "int" | "integer" | "int4" | "serial" => ColumnType::Integer,
            "bigint" | "int8" | "bigserial" => ColumnType::BigInteger,
            "decimal" | "numeric" | "money" => ColumnType::Decimal {
                precision: args.first().copied().unwrap_or(10),
                scale: args.get(1).copied().unwrap_or(0),
            },
            "float" | "double" | "double precision" | "real" | "float4" | "float8" => {
                ColumnType::Float
            }
            "uuid" | "uniqueidentifier" => ColumnType::Guid,
            "char" | "character" if args.first() == Some(&36) => ColumnType::Guid,
            "varchar" | "char" | "character" | "character varying" | "nvarchar" | "nchar"
            | "string" | "enum" | "set" => ColumnType::String {
                length: if matches!(name.as_str(), "enum" | "set") {
                    None
                } else {
                    args.first().copied()
                },
            },
            "text" | "tinytext" | "mediumtext" | "longtext" | "clob" | "ntext" => ColumnType::Text,
            "json" | "jsonb" => ColumnType::Json,
            "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" | "bytea" => {
                ColumnType::Binary
            }
            "datetime" | "timestamp" | "timestamp without time zone" | "datetime2"
            | "smalldatetime" => ColumnType::DateTime,
            "timestamptz" | "timestamp with time zone" | "datetimeoffset" => ColumnType::DateTimeTz,
            "date" => ColumnType::Date,
            "time" | "time without time zone" => ColumnType::Time,
            _ => ColumnType::Unknown(raw.trim().to_string()),
        }
    }

    /// Coarse classification
    pub fn family(&self) -> SemanticType {
        match self {
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::MediumInteger
            | ColumnType::Integer
            | ColumnType::BigInteger => SemanticType::Integer,
            ColumnType::Boolean => SemanticType::Boolean,
            ColumnType::DateTime | ColumnType::DateTimeTz => SemanticType::DateTime,
            ColumnType::Date => SemanticType::Date,
            ColumnType::Time => SemanticType::Time,
            ColumnType::Decimal { .. } => SemanticType::Decimal,
            ColumnType::Float => SemanticType::Float,
            ColumnType::Guid => SemanticType::Guid,
            ColumnType::String { .. } => SemanticType::String,
            ColumnType::Text | ColumnType::Json => SemanticType::Text,
            ColumnType::Binary => SemanticType::Binary,
            ColumnType::Enum(_) => SemanticType::Enum,
            ColumnType::Unknown(_) => SemanticType::Unknown,
        }
    }

    /// Whether values are stored as strings
    ///
    /// Enums are string-like in storage but excluded here.
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String { .. })
    }

    /// Enum definition, if this is an enum
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            ColumnType::Enum(enum_type) => Some(enum_type),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::TinyInteger => f.write_str("tinyint"),
            ColumnType::SmallInteger => f.write_str("smallint"),
            ColumnType::MediumInteger => f.write_str("mediumint"),
            ColumnType::Integer => f.write_str("integer"),
            ColumnType::BigInteger => f.write_str("bigint"),
            ColumnType::Boolean => f.write_str("boolean"),
            ColumnType::DateTime => f.write_str("datetime"),
            ColumnType::DateTimeTz => f.write_str("datetimetz"),
            ColumnType::Date => f.write_str("date"),
            ColumnType::Time => f.write_str("time"),
            ColumnType::Decimal { precision, scale } => write!(f, "decimal({}, {})", precision, scale),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Guid => f.write_str("guid"),
            ColumnType::String { length: Some(length) } => write!(f, "string({})", length),
            ColumnType::String { length: None } => f.write_str("string"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Json => f.write_str("json"),
            ColumnType::Binary => f.write_str("binary"),
            ColumnType::Enum(enum_type) => write!(f, "enum({})", enum_type.valid_values.join(", ")),
            ColumnType::Unknown(raw) => write!(f, "unknown({})", raw),
        }
    }
}

/// Split `name(args) suffix` into `name suffix` and the numeric arguments
fn split_arguments(raw: &str) -> (String, Vec<u32>) {
    let Some(open) = raw.find('(') else {
        return (raw.to_string(), Vec::new());
    };
    let close = closing_paren(raw, open).unwrap_or(raw.len());

    let args = raw[open + 1..close]
        .split(',')
        .filter_map(|arg| arg.trim().parse().ok())
        .collect();
    let rest = raw.get(close + 1..).unwrap_or("");

    (format!("{} {}", &raw[..open], rest), args)
}

/// Offset of the `)` closing the `(` at `open`, ignoring quoted text
///
/// Enum declarations such as `enum('Small (S)','Large (L)')` carry
/// parentheses inside their quoted values.
fn closing_paren(raw: &str, open: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (offset, c) in raw[open + 1..].char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            // A doubled quote reopens immediately, so toggling is enough
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ')' => return Some(open + 1 + offset),
            None => {}
        }
    }
    None
}
