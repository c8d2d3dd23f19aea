use alum_services::ServiceContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &ServiceContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => commands::list::handle(&args, ctx, flags).await,
        Commands::Get(args) => commands::get::handle(&args, ctx, flags).await,
        Commands::Delete(args) => commands::delete::handle(&args, ctx, flags).await,
        Commands::Action(args) => commands::action::handle(&args, ctx, flags).await,
        Commands::Bulk(args) => commands::bulk::handle(&args, ctx, flags).await,
        Commands::Stats(args) => commands::stats::handle(&args, ctx, flags).await,
        Commands::Mode { action } => commands::mode::handle(&action, ctx, flags),
        Commands::Settings { action } => commands::settings::handle(&action, ctx, flags),
        Commands::Health(args) => commands::health::handle(&args, ctx, flags).await,
        Commands::Token { action } => commands::token::handle(&action, ctx, flags),
        Commands::Cache { action } => commands::cache::handle(&action, ctx, flags).await,
        Commands::Serve(_) | Commands::Schema(_) => {
            unreachable!("serve/schema are pre-dispatched in main")
        }
    }
}
