//! Service entry-point: configuration, store loading, account seeding, and
//! server bootstrap.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::credentials::SubmittedCredentials;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{CredentialStore, PhotoStore, SnapshotRecordStore};
use backend::server::{create_server, Cli};

/// Accounts present on every fresh process, matching the documented
/// default logins.
const SEED_ACCOUNTS: [(&str, &str, Option<&str>); 2] = [
    ("admin", "admin2024", Some("CIS-ADMIN-2024")),
    ("investigator1", "secure123", None),
];

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    let records = SnapshotRecordStore::open(&cli.data_file)
        .map_err(|err| std::io::Error::other(format!("failed to open record store: {err}")))?;
    info!(count = records.len(), data_file = %cli.data_file.display(), "loaded criminal records");

    let photos = PhotoStore::open(&cli.upload_dir)?;
    let credentials = CredentialStore::new();
    seed_default_accounts(&credentials);

    let state = HttpState::new(
        Arc::new(records),
        Arc::new(credentials),
        Arc::new(photos),
    );

    info!(addr = %cli.bind, "starting criminal records service");
    create_server(cli.bind, state)?.await
}

fn seed_default_accounts(credentials: &CredentialStore) {
    for (username, password, special_code) in SEED_ACCOUNTS {
        match SubmittedCredentials::try_from_parts(username, password, special_code) {
            Ok(submission) => {
                if let Err(err) = credentials.register(submission) {
                    warn!(username, error = %err, "failed to seed default account");
                }
            }
            Err(err) => warn!(username, error = %err, "invalid seed account"),
        }
    }
    info!(count = credentials.len(), "seeded default accounts");
}
