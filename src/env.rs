//! SettingsEnv trait for testable I/O.
//!
//! Settings loading is the only place this crate touches the file system or
//! the process environment. Both go through [`SettingsEnv`] so tests can
//! inject a [`MockEnv`].

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Environment trait for settings I/O.
///
/// # Example
///
/// ```
/// use olokun_site::env::MockEnv;
/// use olokun_site::SiteSettings;
///
/// let env = MockEnv::new()
///     .with_file("site.toml", "recipient = \"contato@example.com\"")
///     .with_env("OLOKUN_SUBMIT_DELAY_MS", "800");
///
/// let settings = SiteSettings::load_with_env(Some("site.toml".as_ref()), &env).unwrap();
/// assert_eq!(settings.recipient, "contato@example.com");
/// assert_eq!(settings.submit_delay_ms, 800);
/// ```
pub trait SettingsEnv: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Get an environment variable by name.
    fn get_env(&self, name: &str) -> Option<String>;

    /// Get all environment variables matching a prefix, as `(full_name, value)`.
    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)>;
}

/// Production environment using standard library I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealEnv;

impl RealEnv {
    pub fn new() -> Self {
        Self
    }
}

impl SettingsEnv for RealEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn get_env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        std::env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect()
    }
}

#[derive(Debug, Clone)]
enum MockFile {
    Content(String),
    PermissionDenied,
}

/// Mock environment for testing settings loading.
#[derive(Debug, Default)]
pub struct MockEnv {
    files: RwLock<HashMap<PathBuf, MockFile>>,
    env_vars: RwLock<HashMap<String, String>>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), MockFile::Content(content.into()));
        }
        self
    }

    /// Add a file that exists but cannot be read.
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), MockFile::PermissionDenied);
        }
        self
    }

    /// Set an environment variable.
    pub fn with_env(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_env(name, value);
        self
    }

    /// Update an environment variable after creation.
    pub fn set_env(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut vars) = self.env_vars.write() {
            vars.insert(name.into(), value.into());
        }
    }

    pub fn remove_env(&self, name: &str) {
        if let Ok(mut vars) = self.env_vars.write() {
            vars.remove(name);
        }
    }
}

impl SettingsEnv for MockEnv {
    fn read_file(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .read()
            .map_err(|_| io::Error::other("mock file table poisoned"))?;

        match files.get(path) {
            Some(MockFile::Content(content)) => Ok(content.clone()),
            Some(MockFile::PermissionDenied) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("mock permission denied: {}", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("mock file not found: {}", path.display()),
            )),
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn get_env(&self, name: &str) -> Option<String> {
        self.env_vars.read().ok()?.get(name).cloned()
    }

    fn env_vars_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.env_vars
            .read()
            .map(|vars| {
                vars.iter()
                    .filter(|(k, _)| k.starts_with(prefix))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_env_file_exists() {
        let env = RealEnv::new();
        assert!(env.file_exists(Path::new("Cargo.toml")));
        assert!(!env.file_exists(Path::new("nonexistent.toml")));
    }

    #[test]
    fn test_mock_env_files() {
        let env = MockEnv::new().with_file("site.toml", "recipient = \"a@b.co\"");

        assert!(env.file_exists(Path::new("site.toml")));
        assert!(!env.file_exists(Path::new("other.toml")));
        assert_eq!(
            env.read_file(Path::new("site.toml")).unwrap(),
            "recipient = \"a@b.co\""
        );
        assert_eq!(
            env.read_file(Path::new("other.toml")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn test_mock_env_permission_denied() {
        let env = MockEnv::new().with_unreadable_file("secret.toml");

        assert!(env.file_exists(Path::new("secret.toml")));
        let result = env.read_file(Path::new("secret.toml"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_mock_env_vars() {
        let env = MockEnv::new()
            .with_env("OLOKUN_RECIPIENT", "a@b.co")
            .with_env("OLOKUN_SUBMIT_DELAY_MS", "10")
            .with_env("HOME", "/root");

        assert_eq!(env.get_env("OLOKUN_RECIPIENT"), Some("a@b.co".to_string()));
        assert_eq!(env.env_vars_with_prefix("OLOKUN_").len(), 2);

        env.set_env("OLOKUN_RECIPIENT", "c@d.co");
        assert_eq!(env.get_env("OLOKUN_RECIPIENT"), Some("c@d.co".to_string()));

        env.remove_env("OLOKUN_RECIPIENT");
        assert_eq!(env.get_env("OLOKUN_RECIPIENT"), None);
    }
}
