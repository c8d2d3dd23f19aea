use alum_core::actions::VoteDirection;
use alum_core::enums::UserStatus;
use alum_services::ServiceContext;

use crate::cli::root_commands::ActionArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::output::output_response;

/// Actions accepted by `alum action` for each entity.
#[must_use]
pub const fn supported(entity: Entity) -> &'static [&'static str] {
    match entity {
        Entity::Events => &["publish", "cancel", "complete", "register", "unregister", "analytics"],
        Entity::Sponsors => &["activate", "deactivate"],
        Entity::Partners => &["approve", "activate", "deactivate"],
        Entity::Chapters => &["activate", "deactivate", "add-member", "remove-member"],
        Entity::Mentorships => &["approve", "complete", "cancel", "sessions"],
        Entity::Questions => &["close", "upvote", "downvote", "answers"],
        Entity::Opportunities => &["publish", "close", "apply"],
        Entity::Spotlights => &["publish", "archive", "feature", "unfeature"],
        Entity::Users | Entity::Profiles => &["verify", "activate", "deactivate", "suspend"],
    }
}

/// Handle `alum action`.
pub async fn handle(args: &ActionArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = args.id.as_str();
    let action = args.action.to_ascii_lowercase();
    let format = flags.format;
    let user = || {
        args.user
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--user is required for '{action}'"))
    };

    match (args.entity, action.as_str()) {
        (Entity::Events, "publish") => output_response(&ctx.events.publish(id).await, format),
        (Entity::Events, "cancel") => output_response(&ctx.events.cancel(id).await, format),
        (Entity::Events, "complete") => output_response(&ctx.events.complete(id).await, format),
        (Entity::Events, "register") => {
            output_response(&ctx.events.register_attendee(id, user()?).await, format)
        }
        (Entity::Events, "unregister") => {
            output_response(&ctx.events.unregister_attendee(id, user()?).await, format)
        }
        (Entity::Events, "analytics") => output_response(&ctx.events.analytics(id).await, format),

        (Entity::Sponsors, "activate") => output_response(&ctx.sponsors.activate(id).await, format),
        (Entity::Sponsors, "deactivate") => {
            output_response(&ctx.sponsors.deactivate(id).await, format)
        }

        (Entity::Partners, "approve") => output_response(&ctx.partners.approve(id).await, format),
        (Entity::Partners, "activate") => output_response(&ctx.partners.activate(id).await, format),
        (Entity::Partners, "deactivate") => {
            output_response(&ctx.partners.deactivate(id).await, format)
        }

        (Entity::Chapters, "activate") => output_response(&ctx.chapters.activate(id).await, format),
        (Entity::Chapters, "deactivate") => {
            output_response(&ctx.chapters.deactivate(id).await, format)
        }
        (Entity::Chapters, "add-member") => {
            output_response(&ctx.chapters.add_member(id, user()?).await, format)
        }
        (Entity::Chapters, "remove-member") => {
            output_response(&ctx.chapters.remove_member(id, user()?).await, format)
        }

        (Entity::Mentorships, "approve") => {
            output_response(&ctx.mentorship.approve(id).await, format)
        }
        (Entity::Mentorships, "complete") => {
            output_response(&ctx.mentorship.complete(id).await, format)
        }
        (Entity::Mentorships, "cancel") => output_response(&ctx.mentorship.cancel(id).await, format),
        (Entity::Mentorships, "sessions") => {
            output_response(&ctx.mentorship.sessions(id).await, format)
        }

        (Entity::Questions, "close") => output_response(&ctx.qa.close(id).await, format),
        (Entity::Questions, "upvote") => {
            output_response(&ctx.qa.vote(id, VoteDirection::Up).await, format)
        }
        (Entity::Questions, "downvote") => {
            output_response(&ctx.qa.vote(id, VoteDirection::Down).await, format)
        }
        (Entity::Questions, "answers") => output_response(&ctx.qa.answers(id).await, format),

        (Entity::Opportunities, "publish") => {
            output_response(&ctx.opportunities.publish(id).await, format)
        }
        (Entity::Opportunities, "close") => {
            output_response(&ctx.opportunities.close(id).await, format)
        }
        (Entity::Opportunities, "apply") => {
            output_response(&ctx.opportunities.apply(id, user()?).await, format)
        }

        (Entity::Spotlights, "publish") => output_response(&ctx.spotlights.publish(id).await, format),
        (Entity::Spotlights, "archive") => output_response(&ctx.spotlights.archive(id).await, format),
        (Entity::Spotlights, "feature") => {
            output_response(&ctx.spotlights.set_featured(id, true).await, format)
        }
        (Entity::Spotlights, "unfeature") => {
            output_response(&ctx.spotlights.set_featured(id, false).await, format)
        }

        (Entity::Users | Entity::Profiles, "verify") => {
            output_response(&ctx.users.verify(id).await, format)
        }
        (Entity::Users | Entity::Profiles, "activate") => {
            output_response(&ctx.users.update_status(id, UserStatus::Active).await, format)
        }
        (Entity::Users | Entity::Profiles, "deactivate") => {
            output_response(&ctx.users.update_status(id, UserStatus::Inactive).await, format)
        }
        (Entity::Users | Entity::Profiles, "suspend") => {
            output_response(&ctx.users.update_status(id, UserStatus::Suspended).await, format)
        }

        (entity, other) => anyhow::bail!(
            "unknown action '{other}' for {entity:?}; expected one of: {}",
            supported(entity).join(", ")
        ),
    }
}
