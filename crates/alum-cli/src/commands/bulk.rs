use alum_core::actions::{EventBulkAction, PartnerBulkAction, SponsorBulkAction};
use alum_core::responses::BulkOperationResult;
use alum_services::ServiceContext;

use crate::cli::root_commands::BulkArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::output::output;

/// Handle `alum bulk`. Per-id failures are reported in the summary and do
/// not fail the command; an all-failed run does.
pub async fn handle(args: &BulkArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ids = args.ids.as_slice();
    let action = args.action.as_str();

    let summary = match args.entity {
        Entity::Events => ctx.events.bulk_operation(ids, action.parse::<EventBulkAction>()?).await,
        Entity::Sponsors => {
            ctx.sponsors
                .bulk_operation(ids, action.parse::<SponsorBulkAction>()?)
                .await
        }
        Entity::Partners => {
            ctx.partners
                .bulk_operation(ids, action.parse::<PartnerBulkAction>()?)
                .await
        }
        entity => {
            if !action.eq_ignore_ascii_case("delete") {
                anyhow::bail!("{entity:?} only support the bulk action 'delete'");
            }
            delete_many(entity, ids, ctx).await
        }
    };

    tracing::debug!(
        succeeded = summary.success_count,
        failed = summary.failure_count,
        "bulk {action} finished"
    );
    output(&summary, flags.format)?;
    if summary.success_count == 0 && summary.failure_count > 0 {
        anyhow::bail!("bulk {action} failed for every id");
    }
    Ok(())
}

async fn delete_many(entity: Entity, ids: &[String], ctx: &ServiceContext) -> BulkOperationResult {
    match entity {
        Entity::Events => ctx.events.delete_many(ids).await,
        Entity::Sponsors => ctx.sponsors.delete_many(ids).await,
        Entity::Partners => ctx.partners.delete_many(ids).await,
        Entity::Chapters => ctx.chapters.delete_many(ids).await,
        Entity::Mentorships => ctx.mentorship.delete_many(ids).await,
        Entity::Questions => ctx.qa.delete_many(ids).await,
        Entity::Opportunities => ctx.opportunities.delete_many(ids).await,
        Entity::Spotlights => ctx.spotlights.delete_many(ids).await,
        Entity::Users | Entity::Profiles => ctx.users.delete_many(ids).await,
    }
}
