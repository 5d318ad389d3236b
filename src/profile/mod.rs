//! Profiles
//!
//! A profile is a jurisdiction's rule catalog layered on top of CAP. Each
//! one is a pure function of a parsed alert; profiles report paths
//! relative to the alert (`/alert[1]/...`) and never see the document
//! around it.

pub mod canada;
pub mod checks;
pub mod ipaws;
pub mod registry;

pub use canada::CanadianProfile;
pub use ipaws::IpawsProfile;
pub use registry::ProfileRegistry;

use crate::cap::Alert;
use crate::reason::Reasons;

pub trait Profile: Send + Sync {
    /// Unique code, including a version, e.g. `IPAWSv1.0`.
    fn code(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    fn documentation_url(&self) -> &'static str;

    fn validate(&self, alert: &Alert) -> Reasons;
}

/// Run every profile against `alert` and concatenate the results in
/// profile order. Each reason is tagged with the code of the profile that
/// raised it.
pub fn run_profiles<P>(profiles: &[P], alert: &Alert) -> Reasons
where
    P: AsRef<dyn Profile>,
{
    let mut reasons = Reasons::new();
    for profile in profiles {
        let profile = profile.as_ref();
        let found = profile.validate(alert);
        log::debug!("profile {} reported {} reason(s)", profile.code(), found.len());
        reasons.extend(found.into_iter().map(|r| r.with_source(profile.code())));
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::CAP12_XMLNS;
    use std::sync::Arc;

    #[test]
    fn test_profiles_are_concatenated_in_order() {
        let alert = Alert::new(CAP12_XMLNS);
        let ipaws: Arc<dyn Profile> = Arc::new(IpawsProfile);
        let canada: Arc<dyn Profile> = Arc::new(CanadianProfile);

        let alone = run_profiles(&[ipaws.clone()], &alert);
        let both = run_profiles(&[ipaws, canada], &alert);

        assert!(both.len() > alone.len());
        assert_eq!(&both.into_vec()[..alone.len()], &alone.into_vec()[..]);
    }

    #[test]
    fn test_no_profiles() {
        let none: [Arc<dyn Profile>; 0] = [];
        assert!(run_profiles(&none, &Alert::new(CAP12_XMLNS)).is_empty());
    }
}
