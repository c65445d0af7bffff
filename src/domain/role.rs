use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which view the operator is using. Owned by the application root and
/// passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses jobs and applies to new ones.
    #[default]
    User,
    /// Creates, edits, moves and deletes jobs.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}
