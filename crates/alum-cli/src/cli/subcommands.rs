use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ModeCommands {
    /// Show the resolved mode and which rule decided it.
    Show,
    /// Persist an override that routes every call to the mock backend.
    Mock,
    /// Persist an override that routes every call to the real backend.
    Real,
    /// Remove the override and fall back to the environment.
    Clear,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show a user's settings (defaults are stored on first read).
    Get { user: String },
    /// Merge a JSON object into a user's settings.
    Set {
        user: String,
        /// JSON patch, e.g. '{"notifications":{"email":false}}'
        patch: String,
    },
    /// Restore a user's default settings.
    Reset { user: String },
    /// Show or update a user's profile preferences.
    Prefs {
        user: String,
        /// JSON patch to merge before printing
        #[arg(long)]
        set: Option<String>,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// Show cached collection keys.
    Stats,
    /// Drop every cached collection.
    Clear,
    /// Drop one cached collection.
    Invalidate { collection: String },
    /// Load collections into the cache (all when none are named).
    Warm { collections: Vec<String> },
}

#[derive(Clone, Debug, Subcommand)]
pub enum TokenCommands {
    /// Store a bearer token.
    Set { token: String },
    /// Print whether a token is stored (the value stays hidden).
    Show,
    /// Forget the stored token.
    Clear,
}
