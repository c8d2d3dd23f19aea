use alum_config::{ApiMode, ModeDecision, ModeSource};
use alum_services::ServiceContext;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ModeCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModeReport<'a> {
    mode: ApiMode,
    source: ModeSource,
    api_base_url: &'a str,
    mock_base_url: &'a str,
}

impl<'a> ModeReport<'a> {
    fn new(decision: ModeDecision, ctx: &'a ServiceContext) -> Self {
        Self {
            mode: decision.mode,
            source: decision.source,
            api_base_url: ctx.backend.client().base_url(),
            mock_base_url: ctx.backend.mocks().loader.base_url(),
        }
    }
}

/// Handle `alum mode`. Overrides persist in the local store and win over
/// every environment signal until cleared.
pub fn handle(action: &ModeCommands, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ModeCommands::Show => {}
        ModeCommands::Mock => ctx.set_mode(Some(ApiMode::Mock)),
        ModeCommands::Real => ctx.set_mode(Some(ApiMode::Real)),
        ModeCommands::Clear => ctx.set_mode(None),
    }
    let decision = ctx.backend.resolver().decision();
    output(&ModeReport::new(decision, ctx), flags.format)
}
