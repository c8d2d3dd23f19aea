use alum_mock::MockServer;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;

/// Handle `alum serve`: run the mock document server until interrupted.
pub async fn handle(args: &ServeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let server = match &args.data {
        Some(path) => MockServer::from_file(path, &args.addr, args.write_back)
            .with_context(|| format!("failed to serve {}", path.display()))?,
        None => MockServer::demo(&args.addr).context("failed to serve the demo document")?,
    };

    if !flags.quiet {
        eprintln!("mock backend listening on {}", server.base_url());
        if args.write_back {
            eprintln!("writes are persisted to the data file");
        }
    }
    tracing::info!(addr = %server.addr(), write_back = args.write_back, "mock server started");

    tokio::task::spawn_blocking(move || server.wait())
        .await
        .context("mock server thread panicked")
}
