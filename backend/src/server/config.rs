//! Runtime configuration assembled from CLI flags and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Command-line interface for the records service.
///
/// Every flag has an environment fallback so containerised deployments can
/// configure the process without argument plumbing.
#[derive(Debug, Parser)]
#[command(name = "records-backend", about = "Criminal record management service")]
pub struct Cli {
    /// Socket address for the HTTP listener.
    #[arg(long, env = "RECORDS_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Path of the JSON snapshot holding the record collection.
    #[arg(long, env = "RECORDS_DATA_FILE", default_value = "criminals.json")]
    pub data_file: PathBuf,

    /// Directory receiving uploaded photographs.
    #[arg(long, env = "RECORDS_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_local_run() {
        let cli = Cli::parse_from(["records-backend"]);
        assert_eq!(cli.bind.port(), 5000);
        assert_eq!(cli.data_file, PathBuf::from("criminals.json"));
        assert_eq!(cli.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "records-backend",
            "--bind",
            "127.0.0.1:8080",
            "--data-file",
            "/var/lib/records/criminals.json",
        ]);
        assert_eq!(cli.bind.port(), 8080);
        assert_eq!(
            cli.data_file,
            PathBuf::from("/var/lib/records/criminals.json")
        );
    }
}
