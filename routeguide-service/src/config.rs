//! Command-line and environment configuration for the service binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Route guide service
#[derive(Debug, Clone, Parser)]
#[command(name = "routeguide-service")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "ROUTEGUIDE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "ROUTEGUIDE_PORT", default_value_t = 10101)]
    pub port: u16,

    /// JSON snapshot of the feature catalog
    #[arg(
        short,
        long = "file-path",
        env = "ROUTEGUIDE_FILE_PATH",
        default_value = "./testdata/route_guide_db.json"
    )]
    pub file_path: PathBuf,
}

impl Config {
    /// Socket address the server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
