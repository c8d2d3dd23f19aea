use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, Entity};

/// Top-level CLI parser for the `alum` binary.
#[derive(Debug, Parser)]
#[command(name = "alum", version, about = "Alumni network admin data tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Page size for list commands
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use alum_http::SortDirection;
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::root_commands::{SchemaType, parse_key_value};
    use super::subcommands::{CacheCommands, ModeCommands, SettingsCommands, TokenCommands};
    use super::{Cli, Commands, Entity, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "alum", "--format", "table", "--limit", "10", "--verbose", "health",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["alum", "health", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["alum", "--format", "xml", "health"]).is_err());
    }

    #[test]
    fn list_collects_filters_and_sort() {
        let cli = Cli::try_parse_from([
            "alum",
            "list",
            "events",
            "--page",
            "2",
            "--filter",
            "status=published",
            "--filter",
            "location=Main Hall",
            "--sort",
            "startDate",
            "--order",
            "desc",
        ])
        .expect("cli should parse");

        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.entity, Entity::Events);
        assert_eq!(args.page, 2);
        assert_eq!(
            args.filters,
            vec![
                ("status".to_string(), "published".to_string()),
                ("location".to_string(), "Main Hall".to_string()),
            ]
        );
        assert_eq!(args.sort.as_deref(), Some("startDate"));
        assert_eq!(args.order, SortDirection::Desc);
    }

    #[test]
    fn order_without_sort_is_rejected() {
        assert!(Cli::try_parse_from(["alum", "list", "events", "--order", "desc"]).is_err());
    }

    #[test]
    fn bulk_requires_ids() {
        assert!(Cli::try_parse_from(["alum", "bulk", "events", "publish"]).is_err());
        let cli = Cli::try_parse_from(["alum", "bulk", "events", "publish", "a", "b"])
            .expect("cli should parse");
        let Commands::Bulk(args) = cli.command else {
            panic!("expected bulk");
        };
        assert_eq!(args.ids, vec!["a", "b"]);
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from(["alum", "mode", "mock"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Mode { action: ModeCommands::Mock }));

        let cli = Cli::try_parse_from(["alum", "cache", "warm", "events", "users"])
            .expect("cli should parse");
        let Commands::Cache {
            action: CacheCommands::Warm { collections },
        } = cli.command
        else {
            panic!("expected cache warm");
        };
        assert_eq!(collections, vec!["events", "users"]);

        let cli = Cli::try_parse_from(["alum", "settings", "prefs", "usr-1", "--set", "{}"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Settings {
                action: SettingsCommands::Prefs { set: Some(_), .. }
            }
        ));
    }

    #[test]
    fn health_retry_flags() {
        let cli = Cli::try_parse_from(["alum", "health", "--retries", "3", "--interval-ms", "50"])
            .expect("cli should parse");
        let Commands::Health(args) = cli.command else {
            panic!("expected health");
        };
        assert_eq!(args.retries, 3);
        assert_eq!(args.interval_ms, 50);

        assert!(Cli::try_parse_from(["alum", "health", "--interval-ms", "50"]).is_err());
    }

    #[test]
    fn token_subcommands_parse() {
        let cli = Cli::try_parse_from(["alum", "token", "set", "jwt-abc"]).expect("cli should parse");
        let Commands::Token {
            action: TokenCommands::Set { token },
        } = cli.command
        else {
            panic!("expected token set");
        };
        assert_eq!(token, "jwt-abc");
        assert!(Cli::try_parse_from(["alum", "token", "set"]).is_err());
    }

    #[test]
    fn write_back_needs_a_data_file() {
        assert!(Cli::try_parse_from(["alum", "serve", "--write-back"]).is_err());
        assert!(Cli::try_parse_from(["alum", "serve", "--data", "db.json", "--write-back"]).is_ok());
    }

    #[test]
    fn schema_type_parses() {
        let cli = Cli::try_parse_from(["alum", "schema", "profile"]).expect("cli should parse");
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema");
        };
        assert_eq!(args.type_name, SchemaType::Profile);
    }

    #[test]
    fn key_value_parsing() {
        assert_eq!(
            parse_key_value("url=a=b").expect("should parse"),
            ("url".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_value("status=").expect("should parse"),
            ("status".to_string(), String::new())
        );
        assert!(parse_key_value("status").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
