//! XML signatures
//!
//! Signature verification is delegated to a [`SignatureValidator`]; a
//! failure becomes a `SIGNATURE_INVALID` reason on the alert.

use crate::cap::Alert;
use crate::reason::{cap, Reason};

/// Outcome of checking an alert's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    Valid,
    Unsigned,
    Invalid(String),
}

pub trait SignatureValidator: Send + Sync {
    /// `source` is the alert's own XML text.
    fn validate(&self, alert: &Alert, source: &str) -> SignatureCheck;
}

/// Reason for a failed check, relative to the alert.
pub fn signature_reason(check: &SignatureCheck) -> Option<Reason> {
    match check {
        SignatureCheck::Invalid(detail) => Some(
            Reason::new("/alert[1]/Signature[1]", &cap::SIGNATURE_INVALID).with_args([detail.clone()]),
        ),
        SignatureCheck::Valid | SignatureCheck::Unsigned => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_signatures_are_reported() {
        assert!(signature_reason(&SignatureCheck::Valid).is_none());
        assert!(signature_reason(&SignatureCheck::Unsigned).is_none());
        let reason = signature_reason(&SignatureCheck::Invalid("digest mismatch".into())).unwrap();
        assert_eq!(reason.path(), "/alert[1]/Signature[1]");
        assert_eq!(reason.message(), "Invalid <Signature>: digest mismatch");
    }
}
