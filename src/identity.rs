//! The fixed set of collaborator identities.
//!
//! Bottega coordinates exactly four named working copies. The set is closed
//! at build time so an invalid name can never reach the git layer.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four fixed collaborator names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    Leonardo,
    Raphael,
    Michelangelo,
    Donatello,
}

impl Identity {
    /// All identities, in stable display order.
    pub const ALL: [Identity; 4] = [
        Identity::Leonardo,
        Identity::Raphael,
        Identity::Michelangelo,
        Identity::Donatello,
    ];

    /// The lower-case name used in paths, branches, and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Identity::Leonardo => "leonardo",
            Identity::Raphael => "raphael",
            Identity::Michelangelo => "michelangelo",
            Identity::Donatello => "donatello",
        }
    }

    /// The stable branch this identity's working copy is anchored to
    /// between assignments.
    pub fn base_branch(&self) -> String {
        format!("agent/{}-base", self.as_str())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "leonardo" => Ok(Identity::Leonardo),
            "raphael" => Ok(Identity::Raphael),
            "michelangelo" => Ok(Identity::Michelangelo),
            "donatello" => Ok(Identity::Donatello),
            _ => Err(Error::UnknownIdentity(s.to_string())),
        }
    }
}
