use alum_http::ListQuery;
use alum_services::ServiceContext;

use crate::cli::root_commands::ListArgs;
use crate::cli::{Entity, GlobalFlags};
use crate::commands::shared::limit::effective_limit;
use crate::output::output_page;

/// Handle `alum list`.
pub async fn handle(args: &ListArgs, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = build_query(args, effective_limit(flags.limit, ctx.config.general.default_limit));
    tracing::debug!(entity = ?args.entity, query = %query.to_query_string(), "listing records");

    let format = flags.format;
    match args.entity {
        Entity::Events => output_page(&ctx.events.list(&query).await, format),
        Entity::Sponsors => output_page(&ctx.sponsors.list(&query).await, format),
        Entity::Partners => output_page(&ctx.partners.list(&query).await, format),
        Entity::Chapters => output_page(&ctx.chapters.list(&query).await, format),
        Entity::Mentorships => output_page(&ctx.mentorship.list(&query).await, format),
        Entity::Questions => output_page(&ctx.qa.list(&query).await, format),
        Entity::Opportunities => output_page(&ctx.opportunities.list(&query).await, format),
        Entity::Spotlights => output_page(&ctx.spotlights.list(&query).await, format),
        Entity::Users => output_page(&ctx.users.list(&query).await, format),
        Entity::Profiles => output_page(&ctx.users.list_profiles(&query).await, format),
    }
}

fn build_query(args: &ListArgs, limit: usize) -> ListQuery {
    let query = ListQuery::new(args.page, limit).with_filters(args.filters.iter().cloned());
    match &args.sort {
        Some(field) => query.with_sort(field.clone(), args.order),
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use alum_http::SortDirection;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::build_query;
    use crate::cli::{Cli, Commands};

    fn list_args(argv: &[&str]) -> crate::cli::root_commands::ListArgs {
        let cli = Cli::try_parse_from(argv).expect("cli should parse");
        match cli.command {
            Commands::List(args) => args,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn query_carries_page_filters_and_sort() {
        let args = list_args(&[
            "alum", "list", "sponsors", "--page", "2", "--filter", "tier=gold", "--sort",
            "contributionAmount", "--order", "desc",
        ]);
        let query = build_query(&args, 5);

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
        assert_eq!(query.filters.get("tier").map(String::as_str), Some("gold"));
        let sort = query.sort.expect("sort should be set");
        assert_eq!(sort.field, "contributionAmount");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn empty_filter_values_are_not_sent() {
        let args = list_args(&["alum", "list", "events", "--filter", "status="]);
        let query = build_query(&args, 20);
        assert_eq!(query.to_query_string(), "_page=1&_limit=20");
    }
}
