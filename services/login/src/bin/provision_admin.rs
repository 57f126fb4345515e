//! Bootstrap-time provisioning of the first admin account.
//!
//! Wraps the default-admin enrollment path, which performs no authority
//! check. Run it only during trusted initialization, before the service
//! faces traffic.
//!
//! # Usage
//!
//! ```bash
//! PROVISION_ADMIN_PASSWORD='...' cargo run -p faregate-login --bin provision-admin -- \
//!     --username root --enrolling-capability 1
//! ```

use anyhow::{Context as _, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use faregate_login::config::LoginConfig;
use faregate_login::state::AppState;
use faregate_login::usecase::admin::{EnrollDefaultAdminInput, EnrollDefaultAdminUseCase};

#[derive(Parser)]
#[command(about = "Provision the bootstrap admin account")]
struct Args {
    /// Username of the admin to create
    #[arg(long)]
    username: String,

    /// Enrolling capability granted to the new admin (nonzero = may enroll
    /// further admins and disable accounts)
    #[arg(long, default_value_t = 1)]
    enrolling_capability: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    faregate_core::tracing::init_tracing();

    let args = Args::parse();
    // The password rides an env var so it never lands in shell history or
    // the process list.
    let password = std::env::var("PROVISION_ADMIN_PASSWORD")
        .context("PROVISION_ADMIN_PASSWORD must be set")?;

    let config = LoginConfig::from_env();
    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    let state = AppState {
        db,
        jwt_secret_b64: config.jwt_secret_b64,
        jwt_ttl_ms: config.jwt_ttl_ms,
    };

    let usecase = EnrollDefaultAdminUseCase {
        accounts: state.account_repo(),
    };
    let admin = usecase
        .execute(EnrollDefaultAdminInput {
            username: args.username,
            password,
            enrolling_capability: args.enrolling_capability,
        })
        .await?;

    info!(
        id = admin.id,
        username = %admin.username,
        enrolling_capability = admin.enrolling_capability,
        "admin account provisioned"
    );
    Ok(())
}
