use alum_services::ServiceContext;
use alum_storage::token;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TokenCommands;
use crate::output::output;

/// Handle `alum token`. The stored value is never echoed back.
pub fn handle(action: &TokenCommands, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.store.as_ref();
    match action {
        TokenCommands::Set { token: value } => {
            let value = value.trim();
            anyhow::ensure!(!value.is_empty(), "token must not be empty");
            token::store(store, value);
            tracing::info!("bearer token stored");
        }
        TokenCommands::Clear => token::clear(store),
        TokenCommands::Show => {}
    }
    output(&json!({ "stored": token::load(store).is_some() }), flags.format)
}
