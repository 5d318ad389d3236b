//! Validation result
//!
//! Findings keyed by the line they were resolved to. Line 0 holds findings
//! whose path could not be located in the input.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::cap::Alert;
use crate::document::DocumentKind;
use crate::reason::{Level, Reason, Reasons};

/// One reason, resolved to a source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub line: usize,
    #[serde(flatten)]
    pub reason: Reason,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    #[serde(skip)]
    input: String,
    kind: DocumentKind,
    valid_alerts: Vec<Alert>,
    findings: BTreeMap<usize, Vec<Reason>>,
}

impl ValidationResult {
    pub fn new(input: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            input: input.into(),
            kind,
            valid_alerts: Vec::new(),
            findings: BTreeMap::new(),
        }
    }

    pub fn add_valid_alert(&mut self, alert: Alert) {
        self.valid_alerts.push(alert);
    }

    pub fn add(&mut self, line: usize, reason: Reason) {
        self.findings.entry(line).or_default().push(reason);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Alerts that were parsed, whether or not they raised findings.
    pub fn valid_alerts(&self) -> &[Alert] {
        &self.valid_alerts
    }

    pub fn findings_at(&self, line: usize) -> &[Reason] {
        self.findings.get(&line).map_or(&[], Vec::as_slice)
    }

    /// Every finding, ordered by line and then by the order it was found.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        self.findings.iter().flat_map(|(&line, reasons)| {
            reasons.iter().map(move |reason| Finding {
                line,
                reason: reason.clone(),
            })
        })
    }

    /// Every reason, in line order.
    pub fn reasons(&self) -> Reasons {
        self.findings.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn contains_level_or_higher(&self, level: Level) -> bool {
        self.findings
            .values()
            .flatten()
            .any(|r| r.level().is_at_least(level))
    }

    /// No finding is an error.
    pub fn is_valid(&self) -> bool {
        !self.contains_level_or_higher(Level::Error)
    }
}
