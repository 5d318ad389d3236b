//! Profile Registry
//!
//! Simple in-memory registry, keyed by profile code.

use std::collections::HashMap;
use std::sync::Arc;

use super::{CanadianProfile, IpawsProfile, Profile};
use crate::error::CapError;

#[derive(Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<&'static str, Arc<dyn Profile>>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProfileRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRegistry")
            .field("profiles", &self.codes())
            .finish()
    }
}

impl ProfileRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Registry holding every profile that ships with the crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(IpawsProfile));
        registry.register(Arc::new(CanadianProfile));
        registry
    }

    /// Add a profile, replacing any registered under the same code.
    pub fn register(&mut self, profile: Arc<dyn Profile>) {
        if self.profiles.insert(profile.code(), profile).is_some() {
            log::warn!("replacing a registered profile");
        }
    }

    pub fn get(&self, code: &str) -> Option<&Arc<dyn Profile>> {
        self.profiles.get(code)
    }

    /// Registered codes, sorted.
    pub fn codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = self.profiles.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Look up every code, in the order given. Repeated codes are selected
    /// once.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<Arc<dyn Profile>>, CapError> {
        let mut selected: Vec<Arc<dyn Profile>> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            let profile = self.get(code).ok_or_else(|| CapError::UnknownProfile {
                code: code.to_string(),
            })?;
            if !selected.iter().any(|p| p.code() == code) {
                selected.push(Arc::clone(profile));
            }
        }
        Ok(selected)
    }
}
