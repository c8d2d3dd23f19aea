use alum_services::ServiceContext;

use crate::cli::root_commands::StatsArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::output::output_response;

/// Handle `alum stats`.
pub async fn handle(args: &StatsArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = flags.format;
    match args.entity {
        Entity::Events => output_response(&ctx.events.stats().await, format),
        Entity::Sponsors => output_response(&ctx.sponsors.stats().await, format),
        Entity::Partners => output_response(&ctx.partners.stats().await, format),
        Entity::Chapters => output_response(&ctx.chapters.stats().await, format),
        Entity::Mentorships => output_response(&ctx.mentorship.stats().await, format),
        Entity::Questions => output_response(&ctx.qa.stats().await, format),
        Entity::Opportunities => output_response(&ctx.opportunities.stats().await, format),
        Entity::Spotlights => output_response(&ctx.spotlights.stats().await, format),
        Entity::Users | Entity::Profiles => anyhow::bail!("no statistics are kept for users"),
    }
}
