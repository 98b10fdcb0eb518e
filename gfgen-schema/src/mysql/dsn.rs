//! GoFrame style MySQL connection strings
//!
//! `user:pass@tcp(host:port)/dbname?param=value` is turned into driver options.
//! `mysql://` URLs are handed to the driver's own URL parser.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SchemaError};

static DSN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<user>[^:@/]*)(?::(?P<pass>.*))?@)?(?:(?P<proto>[a-z]+)\((?P<addr>[^)]*)\))?/(?P<db>[^?]*)(?:\?(?P<params>.*))?$",
    )
    .expect("dsn regex should be valid")
});

/// Transport named in a DSN
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Tcp { host: String, port: u16 },
    Socket(String),
}

/// Parsed pieces of a DSN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub user: Option<String>,
    pub pass: Option<String>,
    pub transport: Transport,
    pub database: Option<String>,
    pub params: Vec<(String, String)>,
}

impl Dsn {
    pub fn parse(link: &str) -> Result<Self> {
        let invalid = |reason: &str| SchemaError::InvalidLink {
            link: link.to_string(),
            reason: reason.to_string(),
        };
        let caps = DSN
            .captures(link.trim())
            .ok_or_else(|| invalid("expected user:pass@tcp(host:port)/dbname"))?;

        let non_empty = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty())
        };

        let addr = non_empty("addr").unwrap_or_else(|| "127.0.0.1:3306".to_string());
        let transport = match caps.name("proto").map(|m| m.as_str()).unwrap_or("tcp") {
            "tcp" => {
                let (host, port) = match addr.rsplit_once(':') {
                    Some((host, port)) => {
                        let port = port
                            .parse::<u16>()
                            .map_err(|_| invalid("port is not a number"))?;
                        (host.to_string(), port)
                    }
                    None => (addr, 3306),
                };
                Transport::Tcp { host, port }
            }
            "unix" => Transport::Socket(addr),
            _ => return Err(invalid("unsupported protocol")),
        };

        let params = non_empty("params")
            .map(|raw| {
                raw.split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| match pair.split_once('=') {
                        Some((k, v)) => (k.to_string(), v.to_string()),
                        None => (pair.to_string(), String::new()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            user: non_empty("user"),
            pass: caps.name("pass").map(|m| m.as_str().to_string()),
            transport,
            database: non_empty("db"),
            params,
        })
    }

    /// Build driver options from the parsed DSN
    pub fn to_opts(&self) -> mysql_async::Opts {
        let mut builder = mysql_async::OptsBuilder::default()
            .user(self.user.clone())
            .pass(self.pass.clone())
            .db_name(self.database.clone());
        builder = match &self.transport {
            Transport::Tcp { host, port } => builder.ip_or_hostname(host.clone()).tcp_port(*port),
            Transport::Socket(path) => builder.socket(Some(path.clone())),
        };
        for (key, value) in &self.params {
            tracing::debug!("ignoring DSN parameter {}={}", key, value);
        }
        builder.into()
    }
}

/// Resolve a link into driver options
pub fn opts_from_link(link: &str) -> Result<mysql_async::Opts> {
    if link.trim_start().starts_with("mysql://") {
        return mysql_async::Opts::from_url(link.trim()).map_err(|e| SchemaError::InvalidLink {
            link: link.to_string(),
            reason: e.to_string(),
        });
    }
    Ok(Dsn::parse(link)?.to_opts())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_dsn() {
        let dsn = Dsn::parse("root:12345678@tcp(127.0.0.1:3306)/test?charset=utf8mb4").unwrap();
        assert_eq!(dsn.user.as_deref(), Some("root"));
        assert_eq!(dsn.pass.as_deref(), Some("12345678"));
        assert_eq!(
            dsn.transport,
            Transport::Tcp {
                host: "127.0.0.1".into(),
                port: 3306
            }
        );
        assert_eq!(dsn.database.as_deref(), Some("test"));
        assert_eq!(dsn.params, vec![("charset".into(), "utf8mb4".into())]);
    }

    #[test]
    fn test_parse_password_with_colon() {
        let dsn = Dsn::parse("app:p:ss@tcp(db:3307)/shop").unwrap();
        assert_eq!(dsn.pass.as_deref(), Some("p:ss"));
        assert_eq!(
            dsn.transport,
            Transport::Tcp {
                host: "db".into(),
                port: 3307
            }
        );
    }

    #[test]
    fn test_parse_defaults_address() {
        let dsn = Dsn::parse("root@/test").unwrap();
        assert_eq!(dsn.pass, None);
        assert_eq!(
            dsn.transport,
            Transport::Tcp {
                host: "127.0.0.1".into(),
                port: 3306
            }
        );
    }

    #[test]
    fn test_parse_unix_socket() {
        let dsn = Dsn::parse("root@unix(/var/run/mysqld.sock)/test").unwrap();
        assert_eq!(
            dsn.transport,
            Transport::Socket("/var/run/mysqld.sock".into())
        );
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(matches!(
            Dsn::parse("root@tcp(localhost:abc)/test"),
            Err(SchemaError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Dsn::parse("not a dsn").is_err());
    }

    #[test]
    fn test_opts_from_dsn() {
        let opts = opts_from_link("app:secret@tcp(db.local:3307)/shop").unwrap();
        assert_eq!(opts.ip_or_hostname(), "db.local");
        assert_eq!(opts.tcp_port(), 3307);
        assert_eq!(opts.user(), Some("app"));
        assert_eq!(opts.db_name(), Some("shop"));
    }

    #[test]
    fn test_opts_from_url() {
        let opts = opts_from_link("mysql://root:pw@localhost:3306/test").unwrap();
        assert_eq!(opts.db_name(), Some("test"));
    }
}
