//! Identity provider service-account credentials.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Service-account credential file contents.
///
/// Loaded exactly once at startup; a missing or malformed file is a
/// fatal startup error.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    /// Identity project the credential belongs to.
    pub project_id: String,

    /// Shared signing secret used to validate bearer tokens.
    pub secret: String,
}

impl ServiceAccount {
    /// Load and validate the credential file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading credential file {}", path.display()))?;

        let account: ServiceAccount = serde_json::from_str(&contents)
            .with_context(|| format!("parsing credential file {}", path.display()))?;

        account.validate()?;
        Ok(account)
    }

    fn validate(&self) -> Result<()> {
        if self.project_id.is_empty() {
            bail!("credential file is missing a project_id");
        }
        if self.secret.is_empty() {
            bail!("credential file is missing a signing secret");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_credential_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"project_id": "aerotest", "secret": "a-signing-secret-for-tests"}}"#
        )
        .unwrap();

        let account = ServiceAccount::load(file.path()).unwrap();
        assert_eq!(account.project_id, "aerotest");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ServiceAccount::load(Path::new("/nonexistent/credentials.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        assert!(ServiceAccount::load(file.path()).is_err());
    }

    #[test]
    fn test_load_empty_secret_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"project_id": "aerotest", "secret": ""}}"#).unwrap();
        assert!(ServiceAccount::load(file.path()).is_err());
    }
}
