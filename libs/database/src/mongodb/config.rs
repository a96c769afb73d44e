#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// MongoDB connection settings.
///
/// Construct manually or, with the `config` feature, load from environment
/// variables via [`FromEnv`].
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection URL: mongodb://[username:password@]host[:port][/?options]
    pub url: String,

    /// Database name to use
    pub database: String,

    /// Application name reported in server logs
    pub app_name: Option<String>,

    /// Maximum number of pooled connections
    pub max_pool_size: u32,

    /// Minimum number of pooled connections
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` with a named database and default pool settings.
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    /// Set the application name reported in server logs.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Environment variables:
/// - `MONGODB_URL` (required) - connection string
/// - `MONGODB_DATABASE` (required) - database name
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (optional, default 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = core_config::env_required("MONGODB_URL")?;
        let database = core_config::env_required("MONGODB_DATABASE")?;
        let app_name = std::env::var("MONGODB_APP_NAME").ok();

        let max_pool_size = parse_or_default("MONGODB_MAX_POOL_SIZE", "100")?;
        let min_pool_size = parse_or_default("MONGODB_MIN_POOL_SIZE", "5")?;
        let connect_timeout_secs = parse_or_default("MONGODB_CONNECT_TIMEOUT_SECS", "10")?;
        let server_selection_timeout_secs =
            parse_or_default("MONGODB_SERVER_SELECTION_TIMEOUT_SECS", "30")?;

        Ok(Self {
            url,
            database,
            app_name,
            max_pool_size,
            min_pool_size,
            connect_timeout_secs,
            server_selection_timeout_secs,
        })
    }
}

#[cfg(feature = "config")]
fn parse_or_default<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    core_config::env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_database_sets_url_and_name() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "accounts");
        assert_eq!(config.url(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "accounts");
        assert_eq!(config.max_pool_size, 100);
    }

    #[test]
    fn with_app_name_is_recorded() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "accounts")
            .with_app_name("accounts-api");
        assert_eq!(config.app_name.as_deref(), Some("accounts-api"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_reads_required_vars() {
        use core_config::FromEnv;

        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url, "mongodb://localhost:27017");
                assert_eq!(config.database, "testdb");
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_requires_url() {
        use core_config::FromEnv;

        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn from_env_rejects_bad_pool_size() {
        use core_config::FromEnv;

        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
                ("MONGODB_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }
}
