use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Form field name the CSRF token is submitted under.
pub const CSRF_FIELD: &str = "module_cleaner_token";

const TOKEN_FILE: &str = ".cleaner_csrf";

/// Name/value pair embedded as a hidden field in the rendered form.
/// Opaque to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("no CSRF token has been issued for this session")]
    CsrfMissing,

    #[error("CSRF token mismatch")]
    CsrfInvalid,

    #[error("permission denied: {permission} is required")]
    PermissionDenied { permission: String },

    #[error("session state I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host-side request/session capabilities the cleaner depends on.
/// The scanner, renderer and deleter never see the mechanism behind it.
pub trait SecurityContext {
    /// Returns the token to embed in the next rendered form, issuing a
    /// fresh one if none is outstanding.
    fn csrf_token(&self) -> Result<CsrfToken, SecurityError>;

    /// Checks a submitted name/value pair against the outstanding token
    /// and consumes it on success.
    fn validate_csrf(&self, name: &str, value: &str) -> Result<(), SecurityError>;

    fn require_permission(&self, permission: &str) -> Result<(), SecurityError>;
}

/// File-backed session context for the command-line host: the outstanding
/// token lives in a dot-file next to the module folders, and permission
/// grants come from config or flags.
pub struct SessionSecurity {
    state_dir: PathBuf,
    granted: Vec<String>,
}

impl SessionSecurity {
    #[must_use]
    pub fn new(state_dir: PathBuf, granted: Vec<String>) -> Self {
        SessionSecurity { state_dir, granted }
    }

    fn token_path(&self) -> PathBuf {
        self.state_dir.join(TOKEN_FILE)
    }

    fn stored_token(&self) -> Result<Option<String>, SecurityError> {
        match fs::read_to_string(self.token_path()) {
            Ok(value) => Ok(Some(value.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SecurityError::Io {
                path: self.token_path(),
                source: e,
            }),
        }
    }
}

impl SecurityContext for SessionSecurity {
    fn csrf_token(&self) -> Result<CsrfToken, SecurityError> {
        let value = match self.stored_token()? {
            Some(value) if !value.is_empty() => value,
            _ => {
                let value = Uuid::new_v4().simple().to_string();
                fs::write(self.token_path(), &value).map_err(|e| SecurityError::Io {
                    path: self.token_path(),
                    source: e,
                })?;
                value
            }
        };

        Ok(CsrfToken {
            name: CSRF_FIELD.to_string(),
            value,
        })
    }

    fn validate_csrf(&self, name: &str, value: &str) -> Result<(), SecurityError> {
        let stored = self.stored_token()?.ok_or(SecurityError::CsrfMissing)?;

        if name != CSRF_FIELD || value.is_empty() || value != stored {
            return Err(SecurityError::CsrfInvalid);
        }

        // Single use: a replayed form must fail
        fs::remove_file(self.token_path()).map_err(|e| SecurityError::Io {
            path: self.token_path(),
            source: e,
        })?;
        Ok(())
    }

    fn require_permission(&self, permission: &str) -> Result<(), SecurityError> {
        if self.granted.iter().any(|g| g == permission) {
            Ok(())
        } else {
            Err(SecurityError::PermissionDenied {
                permission: permission.to_string(),
            })
        }
    }
}
