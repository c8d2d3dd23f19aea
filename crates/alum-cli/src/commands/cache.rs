use alum_services::{COLLECTIONS, ServiceContext};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CacheCommands;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Invalidated<'a> {
    invalidated: &'a str,
}

/// Handle `alum cache`.
///
/// The cache lives in process memory, so `stats` after `warm` is only
/// meaningful within one invocation; `warm` reports both.
pub async fn handle(action: &CacheCommands, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let cache = ctx.cache();
    match action {
        CacheCommands::Stats => output(&cache.stats(), flags.format),
        CacheCommands::Clear => {
            cache.clear();
            output(&cache.stats(), flags.format)
        }
        CacheCommands::Invalidate { collection } => {
            if !COLLECTIONS.contains(&collection.as_str()) {
                anyhow::bail!(
                    "unknown collection '{collection}'; expected one of: {}",
                    COLLECTIONS.join(", ")
                );
            }
            cache.invalidate(collection);
            output(&Invalidated { invalidated: collection }, flags.format)
        }
        CacheCommands::Warm { collections } => {
            if !ctx.backend.use_mock() {
                tracing::warn!("real mode is active; the mock cache stays cold");
            }
            let names: Vec<&str> = collections.iter().map(String::as_str).collect();
            let warmed = cache.warm(&names).await;
            output(&warmed, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::handle;
    use crate::cli::subcommands::CacheCommands;
    use crate::commands::test_support::{flags, mock_context};

    #[tokio::test]
    async fn warm_then_clear() {
        let (_server, ctx) = mock_context();

        handle(&CacheCommands::Warm { collections: Vec::new() }, &ctx, &flags())
            .await
            .expect("warm should succeed");
        assert_eq!(ctx.cache().stats().entries, alum_services::COLLECTIONS.len());

        handle(&CacheCommands::Clear, &ctx, &flags())
            .await
            .expect("clear should succeed");
        assert_eq!(ctx.cache().stats().entries, 0);
    }

    #[tokio::test]
    async fn invalidate_rejects_unknown_collections() {
        let (_server, ctx) = mock_context();
        let error = handle(
            &CacheCommands::Invalidate {
                collection: "alumni".to_string(),
            },
            &ctx,
            &flags(),
        )
        .await
        .expect_err("should fail");
        assert!(error.to_string().starts_with("unknown collection 'alumni'"));
    }
}
