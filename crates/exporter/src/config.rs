//! Command-line and environment configuration.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use common::DEFAULT_NAMESPACE;
use thiserror::Error;

/// How `/metrics` is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Flatten every field of the remote documents.
    #[default]
    Flatten,
    /// Export a fixed set of typed gauges.
    Typed,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Raw command-line arguments.
///
/// Every flag can also be given through the listed environment variable.
/// Log filtering follows `RUST_LOG` (default: `info`).
#[derive(Debug, Parser)]
#[command(
    name = "springxd-exporter",
    version,
    about = "Republishes SpringXD management metrics in Prometheus text format"
)]
pub struct Cli {
    /// Base URL of the SpringXD admin server (mandatory unless --test-mode).
    #[arg(long, env = "SPRINGXD_URL", required_unless_present = "test_mode")]
    pub springxd_url: Option<String>,

    /// Address to listen on: `9175`, `:9175`, or `host:port`.
    #[arg(
        long,
        visible_alias = "listen-port",
        env = "LISTEN_ADDRESS",
        default_value = ":9175"
    )]
    pub listen_address: String,

    /// Prefix for every exported metric.
    #[arg(long, env = "SPRINGXD_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Export mode.
    #[arg(long, value_enum, env = "EXPORTER_MODE", default_value_t = Mode::Flatten)]
    pub mode: Mode,

    /// Serve fixture documents and scrape them from this process.
    #[arg(long)]
    pub test_mode: bool,

    /// Serve fixture documents without switching the scrape target.
    #[arg(long)]
    pub serve_fixtures: bool,

    /// Directory holding the fixture documents.
    #[arg(long, env = "FIXTURES_DIR", default_value = "fixtures")]
    pub fixtures_dir: PathBuf,

    /// Per-request timeout for remote fetches, in seconds. Unset means none.
    #[arg(long, env = "FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: Option<u64>,

    /// Log output format.
    #[arg(long, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Configuration errors. All of them stop the process before it serves.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--springxd-url is mandatory")]
    MissingUrl,

    #[error("invalid listen address '{0}'")]
    InvalidListenAddress(String),

    #[error("invalid namespace '{0}': use [a-zA-Z_:][a-zA-Z0-9_:]*")]
    InvalidNamespace(String),

    #[error("fetch timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validated exporter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub springxd_url: String,
    pub namespace: String,
    pub mode: Mode,
    pub test_mode: bool,
    /// Set when fixture endpoints are served.
    pub fixtures_dir: Option<PathBuf>,
    pub fetch_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Config {
    /// Validates parsed arguments.
    ///
    /// In test mode without an explicit URL the exporter scrapes its own
    /// listen address, or loopback when listening on every interface.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let listen = parse_listen_address(&cli.listen_address)?;

        let springxd_url = match cli.springxd_url {
            Some(url) => url,
            None if cli.test_mode => format!("http://{}", self_scrape_target(listen)),
            None => return Err(ConfigError::MissingUrl),
        };

        if !is_valid_namespace(&cli.namespace) {
            return Err(ConfigError::InvalidNamespace(cli.namespace));
        }

        let fetch_timeout = match cli.fetch_timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            secs => secs.map(Duration::from_secs),
        };

        let fixtures_dir = (cli.test_mode || cli.serve_fixtures).then_some(cli.fixtures_dir);

        Ok(Self {
            listen,
            springxd_url,
            namespace: cli.namespace,
            mode: cli.mode,
            test_mode: cli.test_mode,
            fixtures_dir,
            fetch_timeout,
            log_format: cli.log_format,
        })
    }

    /// Returns the bind address.
    pub fn addr(&self) -> SocketAddr {
        self.listen
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 9175)),
            springxd_url: "http://localhost:9393".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            mode: Mode::Flatten,
            test_mode: false,
            fixtures_dir: None,
            fetch_timeout: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Parses `9175`, `:9175`, or `host:port` into a socket address.
///
/// A bare port or a leading colon binds every interface.
pub fn parse_listen_address(raw: &str) -> Result<SocketAddr, ConfigError> {
    let raw = raw.trim();
    let candidate = if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("0.0.0.0:{raw}")
    } else if let Some(port) = raw.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else {
        raw.to_string()
    };

    candidate
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| ConfigError::InvalidListenAddress(raw.to_string()))
}

fn self_scrape_target(listen: SocketAddr) -> SocketAddr {
    let ip = match listen.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, listen.port())
}

fn is_valid_namespace(ns: &str) -> bool {
    let mut chars = ns.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
