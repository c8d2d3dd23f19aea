use alum_services::ServiceContext;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SettingsCommands;
use crate::commands::shared::parse::parse_json_object;
use crate::output::output;

/// Handle `alum settings`. Patches merge one level deep into nested sections.
pub fn handle(action: &SettingsCommands, ctx: &ServiceContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let prefs = &ctx.preferences;
    match action {
        SettingsCommands::Get { user } => output(&prefs.settings(user), flags.format),
        SettingsCommands::Set { user, patch } => {
            let patch = parse_json_object(patch, "patch")?;
            let updated = prefs.update_settings(user, &patch)?;
            output(&updated, flags.format)
        }
        SettingsCommands::Reset { user } => output(&prefs.reset_settings(user), flags.format),
        SettingsCommands::Prefs { user, set } => {
            let current = match set {
                Some(patch) => {
                    let patch = parse_json_object(patch, "patch")?;
                    prefs.update_profile_preferences(user, &patch)?
                }
                None => prefs.profile_preferences(user),
            };
            output(&current, flags.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::handle;
    use crate::cli::subcommands::SettingsCommands;
    use crate::commands::test_support::{flags, mock_context};

    #[test]
    fn set_merges_and_reset_restores_defaults() {
        let (_server, ctx) = mock_context();
        let user = "usr-0001a1a1".to_string();

        handle(
            &SettingsCommands::Set {
                user: user.clone(),
                patch: r#"{"notifications":{"emailEvents":false},"language":"sw"}"#.to_string(),
            },
            &ctx,
            &flags(),
        )
        .expect("set should succeed");

        let stored = ctx.preferences.settings(&user);
        assert_eq!(stored.language, "sw");
        assert!(!stored.notifications.email_events);
        // Siblings of the patched key keep their defaults.
        assert!(stored.notifications.email_mentorship);

        handle(&SettingsCommands::Reset { user: user.clone() }, &ctx, &flags())
            .expect("reset should succeed");
        assert_eq!(ctx.preferences.settings(&user), alum_storage::UserSettings::default());
    }

    #[test]
    fn invalid_patch_leaves_settings_untouched() {
        let (_server, ctx) = mock_context();
        let user = "usr-0002b2b2".to_string();
        let before = ctx.preferences.settings(&user);

        let result = handle(
            &SettingsCommands::Set {
                user: user.clone(),
                patch: r#"{"visibility":"everyone-ever"}"#.to_string(),
            },
            &ctx,
            &flags(),
        );
        assert!(result.is_err());
        assert_eq!(ctx.preferences.settings(&user), before);
    }

    #[test]
    fn prefs_update_is_persisted() {
        let (_server, ctx) = mock_context();
        handle(
            &SettingsCommands::Prefs {
                user: "usr-0003c3c3".to_string(),
                set: Some(r#"{"theme":"dark"}"#.to_string()),
            },
            &ctx,
            &flags(),
        )
        .expect("prefs update should succeed");
        assert_eq!(ctx.preferences.profile_preferences("usr-0003c3c3").theme, "dark");
    }
}
