//! Liftlog CLI - edit workout drafts and save them to a local store
//!
//! Binary name: `liftlog`

use anyhow::Result;
use liftlog::cli::{build_cli, handlers::dispatch, setup::init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"))?;
    dispatch(&matches).await
}
