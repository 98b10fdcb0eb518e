//! Default configuration values - single source of truth

/// Default output directory for generated files
pub const PATH: &str = "internal";

/// Default database configuration group
pub const GROUP: &str = "default";

/// Default naming case of json tags
pub const JSON_CASE: &str = "CamelLower";

/// Default name of the aggregated model file
pub const MODEL_FILE: &str = "model.go";

/// Configuration node holding the dao job(s)
pub const DAO_CONFIG_KEY: &str = "gfcli.gen.dao";

/// Configuration node holding the database groups
pub const DATABASE_CONFIG_KEY: &str = "database";

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "GFGEN";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";
