//! The four signtool subcommands

use serde::{Deserialize, Serialize};

use crate::error::{AuthsignError, Result};
use crate::flags::{FlagRow, FlagTable};
use crate::options::{CatdbOptions, SignOptions, TimestampOptions, VerifyOptions};

/// A signtool subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Digitally sign files
    Sign,
    /// Verify the signature of files
    Verify,
    /// Time stamp previously signed files
    Timestamp,
    /// Add or remove catalog files in a catalog database
    Catdb,
}

impl Operation {
    /// All operations, in documentation order
    pub const ALL: [Operation; 4] = [
        Operation::Sign,
        Operation::Verify,
        Operation::Timestamp,
        Operation::Catdb,
    ];

    /// The literal first token of the argument list
    pub fn token(&self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Timestamp => "timestamp",
            Self::Catdb => "catdb",
        }
    }

    /// Flattened flag table for this operation
    pub fn flag_rows(&self) -> Vec<FlagRow> {
        match self {
            Self::Sign => SignOptions::rows(),
            Self::Verify => VerifyOptions::rows(),
            Self::Timestamp => TimestampOptions::rows(),
            Self::Catdb => CatdbOptions::rows(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for Operation {
    type Err = AuthsignError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sign" => Ok(Self::Sign),
            "verify" => Ok(Self::Verify),
            "timestamp" => Ok(Self::Timestamp),
            "catdb" | "catalog" | "catalog-edit" => Ok(Self::Catdb),
            _ => Err(AuthsignError::UnknownOperation(s.to_string())),
        }
    }
}
