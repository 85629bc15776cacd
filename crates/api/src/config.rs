use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use apprep_core::field_map::{EntryField, FieldMap};
use chrono::NaiveDate;

/// Layout of date-valued environment variables.
const ENV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL (read by `main`) have defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Timeout for the entry screens in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Connection pool size (default: `10`).
    pub database_max_connections: u32,
    pub import: ImportConfig,
    pub provision: ProvisionConfig,
    /// JSON document shown on the print view (default: none).
    pub print_extra_data_path: Option<PathBuf>,
}

/// Spreadsheet import settings.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Spreadsheet to import (default: `import.xlsx`).
    pub path: PathBuf,
    /// Import time limit in seconds, `0` for none (default: `0`).
    pub time_limit_secs: u64,
    /// Column letters of each field.
    pub fields: FieldMap,
}

impl ImportConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_secs > 0).then(|| Duration::from_secs(self.time_limit_secs))
    }
}

/// Default provisioning window; either end may be overridden per request.
#[derive(Debug, Clone, Default)]
pub struct ProvisionConfig {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                    |
    /// | `IMPORT_PATH`              | `import.xlsx`           |
    /// | `IMPORT_TIME_LIMIT_SECS`   | `0`                     |
    /// | `IMPORT_MAP_DATETIME_FROM` | `D`                     |
    /// | `IMPORT_MAP_DATETIME_TO`   | `D`                     |
    /// | `IMPORT_MAP_CONTENT`       | `W`                     |
    /// | `IMPORT_MAP_HINT`          | `T`                     |
    /// | `IMPORT_MAP_ISSUE`         | `A`                     |
    /// | `IMPORT_MAP_ID`            | unset (no id column)    |
    /// | `PROVISION_FROM`           | unset                   |
    /// | `PROVISION_TO`             | unset                   |
    /// | `PRINT_EXTRA_DATA_PATH`    | unset                   |
    ///
    /// Panics on malformed values; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", "3000");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", "30");
        let database_max_connections: u32 = parse_var("DATABASE_MAX_CONNECTIONS", "10");

        let import = ImportConfig {
            path: std::env::var("IMPORT_PATH")
                .unwrap_or_else(|_| "import.xlsx".into())
                .into(),
            time_limit_secs: parse_var("IMPORT_TIME_LIMIT_SECS", "0"),
            fields: import_fields_from_env(),
        };

        let provision = ProvisionConfig {
            from: date_var("PROVISION_FROM"),
            to: date_var("PROVISION_TO"),
        };

        let print_extra_data_path = std::env::var("PRINT_EXTRA_DATA_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_max_connections,
            import,
            provision,
            print_extra_data_path,
        }
    }
}

/// Start from the default column layout and apply `IMPORT_MAP_*` overrides.
/// An empty value unmaps the field.
fn import_fields_from_env() -> FieldMap {
    let mut fields = FieldMap::spreadsheet_default();
    for (var, field) in [
        ("IMPORT_MAP_ID", EntryField::Id),
        ("IMPORT_MAP_DATETIME_FROM", EntryField::DatetimeFrom),
        ("IMPORT_MAP_DATETIME_TO", EntryField::DatetimeTo),
        ("IMPORT_MAP_CONTENT", EntryField::Content),
        ("IMPORT_MAP_HINT", EntryField::ContentHint),
        ("IMPORT_MAP_ISSUE", EntryField::Issue),
    ] {
        match std::env::var(var) {
            Ok(column) if column.trim().is_empty() => fields.remove(field),
            Ok(column) => fields.set(field, column.trim().to_ascii_uppercase()),
            Err(_) => {}
        }
    }
    fields
}

fn parse_var<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.into());
    raw.parse()
        .unwrap_or_else(|e| panic!("{key} must be valid, got '{raw}': {e}"))
}

fn date_var(key: &str) -> Option<NaiveDate> {
    let raw = std::env::var(key).ok().filter(|s| !s.is_empty())?;
    Some(
        NaiveDate::parse_from_str(&raw, ENV_DATE_FORMAT)
            .unwrap_or_else(|e| panic!("{key} must be a YYYY-MM-DD date, got '{raw}': {e}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(time_limit_secs: u64) -> ImportConfig {
        ImportConfig {
            path: PathBuf::from("import.xlsx"),
            time_limit_secs,
            fields: FieldMap::spreadsheet_default(),
        }
    }

    #[test]
    fn zero_time_limit_is_unlimited() {
        assert_eq!(import(0).time_limit(), None);
        assert_eq!(import(90).time_limit(), Some(Duration::from_secs(90)));
    }
}
