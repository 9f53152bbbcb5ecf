//! Exit codes for the CLI

use authsign_core::AuthsignError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error, also used when signtool gave no exit code
pub const ERROR: i32 = 1;

/// Configuration error (bad config file, unsupported architecture)
pub const CONFIG_ERROR: i32 = 2;

/// signtool or the compatibility layer could not be started
pub const SPAWN_ERROR: i32 = 127;

/// Map a command failure to a process exit code.
///
/// A failed signtool run exits with signtool's own code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AuthsignError>() {
        Some(AuthsignError::Execution(exec)) => exec.code.unwrap_or(ERROR),
        Some(AuthsignError::Config(_)) | Some(AuthsignError::UnsupportedArchitecture { .. }) => {
            CONFIG_ERROR
        }
        Some(AuthsignError::Spawn(_)) => SPAWN_ERROR,
        Some(AuthsignError::UnknownOperation(_)) | None => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authsign_core::{ConfigError, ExecutionError};
    use std::path::PathBuf;

    #[test]
    fn test_execution_error_keeps_tool_code() {
        let exec = ExecutionError::new(
            "sign",
            PathBuf::from("signtool.exe"),
            vec![],
            Some(2),
            String::new(),
            "bad cert".to_string(),
        );
        let err = anyhow::Error::from(AuthsignError::from(exec));
        assert_eq!(for_error(&err), 2);
    }

    #[test]
    fn test_config_and_spawn_codes() {
        let config = anyhow::Error::from(AuthsignError::from(ConfigError::NotFound(
            PathBuf::from("/tmp"),
        )));
        assert_eq!(for_error(&config), CONFIG_ERROR);

        let arch = anyhow::Error::from(AuthsignError::UnsupportedArchitecture {
            arch: "arm".to_string(),
        });
        assert_eq!(for_error(&arch), CONFIG_ERROR);

        let spawn = anyhow::Error::from(AuthsignError::Spawn(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        )));
        assert_eq!(for_error(&spawn), SPAWN_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("other")), ERROR);
    }
}
