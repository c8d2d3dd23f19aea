use alum_services::ServiceContext;

use crate::cli::root_commands::RecordArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::output::output_response;

/// Handle `alum get`.
pub async fn handle(args: &RecordArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = args.id.as_str();
    let format = flags.format;
    match args.entity {
        Entity::Events => output_response(&ctx.events.get(id).await, format),
        Entity::Sponsors => output_response(&ctx.sponsors.get(id).await, format),
        Entity::Partners => output_response(&ctx.partners.get(id).await, format),
        Entity::Chapters => output_response(&ctx.chapters.get(id).await, format),
        Entity::Mentorships => output_response(&ctx.mentorship.get(id).await, format),
        Entity::Questions => output_response(&ctx.qa.get(id).await, format),
        Entity::Opportunities => output_response(&ctx.opportunities.get(id).await, format),
        Entity::Spotlights => output_response(&ctx.spotlights.get(id).await, format),
        Entity::Users => output_response(&ctx.users.get(id).await, format),
        Entity::Profiles => output_response(&ctx.users.get_profile(id).await, format),
    }
}
