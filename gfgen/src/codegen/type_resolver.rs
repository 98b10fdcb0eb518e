//! SQL to Go type mapping

/// Represents a Go type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoType {
    Bytes,
    Int,
    Uint,
    Int64,
    Uint64,
    Float32,
    Float64,
    Bool,
    String,
    /// `*gtime.Time`
    GTime,
    /// `time.Time`
    StdTime,
    /// `*gjson.Json`
    GJson,
    /// `interface{}`, used by the model-for-dao structs
    Interface,
}

impl GoType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> &'static str {
        match self {
            GoType::Bytes => "[]byte",
            GoType::Int => "int",
            GoType::Uint => "uint",
            GoType::Int64 => "int64",
            GoType::Uint64 => "uint64",
            GoType::Float32 => "float32",
            GoType::Float64 => "float64",
            GoType::Bool => "bool",
            GoType::String => "string",
            GoType::GTime => "*gtime.Time",
            GoType::StdTime => "time.Time",
            GoType::GJson => "*gjson.Json",
            GoType::Interface => "interface{}",
        }
    }

    /// Go package this type needs imported, if any
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            GoType::GTime => Some("github.com/gogf/gf/v2/os/gtime"),
            GoType::StdTime => Some("time"),
            GoType::GJson => Some("github.com/gogf/gf/v2/encoding/gjson"),
            _ => None,
        }
    }
}

/// Switches that change how temporal and JSON columns map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Use `time.Time` instead of `*gtime.Time`
    pub std_time: bool,
    /// Use `*gjson.Json` for JSON columns instead of `string`
    pub g_json_support: bool,
}

/// Resolve SQL column types to Go types
pub struct TypeResolver;

impl TypeResolver {
    /// Get the Go type for a SQL type such as `int(10) unsigned` or `VARCHAR(45)`.
    ///
    /// Never fails: unrecognized types map to `string`.
    pub fn resolve(sql_type: &str, options: &TypeOptions) -> GoType {
        let lower = sql_type.to_ascii_lowercase();
        let unsigned = lower.contains("unsigned");
        let base = Self::base_name(&lower);

        match base {
            "binary" | "varbinary" | "blob" | "tinyblob" | "mediumblob" | "longblob" => {
                GoType::Bytes
            }
            "bit" | "int" | "int2" | "tinyint" | "small_int" | "smallint" | "medium_int"
            | "mediumint" | "serial" => {
                if unsigned {
                    GoType::Uint
                } else {
                    GoType::Int
                }
            }
            "int4" | "int8" | "big_int" | "bigint" | "bigserial" => {
                if unsigned {
                    GoType::Uint64
                } else {
                    GoType::Int64
                }
            }
            "real" => GoType::Float32,
            "float" | "double" | "decimal" | "smallmoney" | "numeric" => GoType::Float64,
            "bool" | "boolean" => GoType::Bool,
            "datetime" | "timestamp" | "date" | "time" => Self::temporal(options),
            "json" => Self::json(options),
            _ => Self::fallback(base, options),
        }
    }

    /// Type name without length/precision and modifiers: `int(10) unsigned` -> `int`
    fn base_name(lower: &str) -> &str {
        let head = match lower.find('(') {
            Some(pos) => &lower[..pos],
            None => lower,
        };
        head.split_whitespace().next().unwrap_or("")
    }

    fn fallback(base: &str, options: &TypeOptions) -> GoType {
        if base.contains("int") {
            GoType::Int
        } else if base.contains("text") || base.contains("char") {
            GoType::String
        } else if base.contains("float") || base.contains("double") {
            GoType::Float64
        } else if base.contains("bool") {
            GoType::Bool
        } else if base.contains("binary") || base.contains("blob") {
            GoType::Bytes
        } else if base.contains("date") || base.contains("time") {
            Self::temporal(options)
        } else {
            GoType::String
        }
    }

    fn temporal(options: &TypeOptions) -> GoType {
        if options.std_time {
            GoType::StdTime
        } else {
            GoType::GTime
        }
    }

    fn json(options: &TypeOptions) -> GoType {
        if options.g_json_support {
            GoType::GJson
        } else {
            GoType::String
        }
    }
}
