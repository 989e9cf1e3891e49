//! Backing engine access
//!
//! This module owns the single handle to the backing relational engine.
//! The handle is created once at process start and lives for the process
//! lifetime; it is shared by every session, which is safe only because the
//! server runs sessions strictly one at a time.

use std::env;

use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Value};

use crate::error::{Error, Result};

/// Backing engine host
pub const BACKEND_HOST: &str = "localhost";
/// Backing engine user
pub const BACKEND_USER: &str = "unph";
/// Backing engine database
pub const BACKEND_DATABASE: &str = "ctf_db";
/// Backing engine character set
pub const BACKEND_CHARSET: &str = "utf8mb4";
/// Environment variable holding the backing engine password
pub const PASSWORD_ENV: &str = "MYSQL_PASSWORD";

/// One engine row, every scalar already rendered to text.
///
/// The service treats row values as opaque: they are forwarded to the
/// client, never interpreted.
pub type Row = Vec<String>;

/// A handle to an engine that executes arbitrary query text.
///
/// This is the seam between the service and the backing engine: the server
/// is generic over it, and tests substitute an in-process double. The
/// `&mut self` receiver encodes the invariant that at most one session
/// uses the handle at a time.
pub trait Backend {
    /// Execute `query` verbatim and return the full row set.
    fn run_query(&mut self, query: &str) -> Result<Vec<Row>>;
}

/// Connection settings for the backing engine
///
/// Host, user, database and charset are fixed; only the password comes
/// from the environment.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Host address of the engine
    pub host: String,
    /// User to authenticate as
    pub user: String,
    /// Password for the user
    pub password: String,
    /// Database to select on connect
    pub database: String,
    /// Character set applied on connect
    pub charset: String,
}

impl BackendConfig {
    /// Build the config from the environment
    pub fn from_env() -> Result<Self> {
        let password = env::var(PASSWORD_ENV).map_err(|_| Error::MissingEnv(PASSWORD_ENV))?;

        Ok(Self {
            host: BACKEND_HOST.to_string(),
            user: BACKEND_USER.to_string(),
            password,
            database: BACKEND_DATABASE.to_string(),
            charset: BACKEND_CHARSET.to_string(),
        })
    }
}

/// The production backend: a single MySQL connection
pub struct MysqlBackend {
    conn: Conn,
}

impl MysqlBackend {
    /// Connect to the engine
    pub fn connect(config: &BackendConfig) -> Result<Self> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.as_str()))
            .user(Some(config.user.as_str()))
            .pass(Some(config.password.as_str()))
            .db_name(Some(config.database.as_str()));

        let mut conn = Conn::new(opts)?;
        conn.query_drop(format!("SET NAMES {}", config.charset))?;

        Ok(Self { conn })
    }
}

impl Backend for MysqlBackend {
    fn run_query(&mut self, query: &str) -> Result<Vec<Row>> {
        let rows: Vec<mysql::Row> = self.conn.query(query)?;

        Ok(rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| row.as_ref(i).map_or_else(String::new, render_value))
                    .collect()
            })
            .collect())
    }
}

/// Render one engine scalar as text
fn render_value(value: &Value) -> String {
    match value {
        Value::NULL => "NULL".to_string(),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Value::Int(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        other => other.as_sql(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::NULL), "NULL");
        assert_eq!(render_value(&Value::Bytes(b"7".to_vec())), "7");
        assert_eq!(render_value(&Value::Int(-42)), "-42");
        assert_eq!(render_value(&Value::UInt(42)), "42");
        assert_eq!(render_value(&Value::Double(1.5)), "1.5");
    }

    #[test]
    fn test_config_from_env() {
        // Set and unset in one test: the variable is process-global.
        env::set_var(PASSWORD_ENV, "s3cret");
        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.host, BACKEND_HOST);
        assert_eq!(config.user, BACKEND_USER);
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.database, BACKEND_DATABASE);
        assert_eq!(config.charset, BACKEND_CHARSET);

        env::remove_var(PASSWORD_ENV);
        assert!(matches!(
            BackendConfig::from_env(),
            Err(Error::MissingEnv(PASSWORD_ENV))
        ));
    }
}
