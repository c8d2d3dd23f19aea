use alum_services::ServiceContext;

use crate::cli::root_commands::RecordArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::output::output_response;

/// Handle `alum delete`. Questions take their answers with them.
pub async fn handle(args: &RecordArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = args.id.as_str();
    let response = match args.entity {
        Entity::Events => ctx.events.delete(id).await,
        Entity::Sponsors => ctx.sponsors.delete(id).await,
        Entity::Partners => ctx.partners.delete(id).await,
        Entity::Chapters => ctx.chapters.delete(id).await,
        Entity::Mentorships => ctx.mentorship.delete(id).await,
        Entity::Questions => ctx.qa.delete_question(id).await,
        Entity::Opportunities => ctx.opportunities.delete(id).await,
        Entity::Spotlights => ctx.spotlights.delete(id).await,
        Entity::Users | Entity::Profiles => ctx.users.delete(id).await,
    };
    output_response(&response, flags.format)
}
