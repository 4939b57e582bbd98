use clap::{Parser, ValueEnum};
use jiff::SignedDuration;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIPSHARE_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "SNIPSHARE_GATEWAY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "SNIPSHARE_GATEWAY_MYSQL_DSN";
pub const SWEEP_INTERVAL_ENV: &str = "SNIPSHARE_GATEWAY_SWEEP_INTERVAL";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_SWEEP_INTERVAL: &str = "1h";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snipshare-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// How often the background sweep reclaims expired snippets.
    /// Independent of the 24-hour record lifetime.
    #[arg(long, env = SWEEP_INTERVAL_ENV, default_value = DEFAULT_SWEEP_INTERVAL)]
    pub sweep_interval: SignedDuration,
}
