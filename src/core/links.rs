//! Link loading
//!
//! Thin feed entries point at alerts published elsewhere. A
//! [`LinkResolver`] turns such a link into the alert's text, or declines
//! to follow it.

use std::path::{Path, PathBuf};

pub trait LinkResolver: Send + Sync {
    /// Load the document at `href`. `Ok(None)` means the link is not one
    /// this resolver follows; `Err` explains why a followed link failed.
    fn resolve(&self, href: &str) -> Result<Option<String>, String>;
}

/// Loads `file://` links and relative paths from the local filesystem.
/// Network links are not followed.
#[derive(Debug, Clone, Default)]
pub struct FileLinkResolver {
    base: Option<PathBuf>,
}

impl FileLinkResolver {
    /// Relative links are resolved against `base`, usually the directory of
    /// the feed being validated.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn locate(&self, href: &str) -> Option<PathBuf> {
        if let Some(path) = href.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if href.contains("://") {
            return None;
        }
        let path = Path::new(href);
        Some(match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl LinkResolver for FileLinkResolver {
    fn resolve(&self, href: &str) -> Result<Option<String>, String> {
        let Some(path) = self.locate(href) else {
            return Ok(None);
        };
        log::debug!("loading linked alert from {}", path.display());
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| format!("{}: {e}", path.display()))
    }
}
