//! Bulk actions and vote directions accepted by the domain services.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

macro_rules! action_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "unknown {} '{s}'",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

action_enum!(
    /// Bulk action over events.
    EventBulkAction { Publish => "publish", Cancel => "cancel", Delete => "delete" }
);

action_enum!(
    /// Bulk action over sponsors.
    SponsorBulkAction { Activate => "activate", Deactivate => "deactivate", Delete => "delete" }
);

action_enum!(
    /// Bulk action over partners.
    PartnerBulkAction {
        Approve => "approve",
        Activate => "activate",
        Deactivate => "deactivate",
        Delete => "delete",
    }
);

action_enum!(
    VoteDirection { Up => "up", Down => "down" }
);

impl VoteDirection {
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Publish".parse::<EventBulkAction>().unwrap(), EventBulkAction::Publish);
        assert_eq!(" deactivate ".parse::<SponsorBulkAction>().unwrap(), SponsorBulkAction::Deactivate);
    }

    #[test]
    fn unknown_action_is_validation_error() {
        let err = "archive".parse::<PartnerBulkAction>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn vote_delta() {
        assert_eq!(VoteDirection::Up.delta(), 1);
        assert_eq!(VoteDirection::Down.delta(), -1);
    }
}
