//! Command-line and environment configuration

use bloomwatch_core::demo::DEFAULT_SEED;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// BloomWatch RD dashboard backend
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "bloomwatch-server")]
#[command(about = "HTTP backend for the BloomWatch RD dashboard", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "BLOOMWATCH_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Seed for the synthetic weather generator
    #[arg(long, env = "BLOOMWATCH_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
