use std::path::PathBuf;

/// What happened to a single image during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    /// A file with the expected digest was already present; nothing was fetched.
    AlreadySatisfied,
    /// Downloaded and the digest matched.
    Verified,
    /// Downloaded but the digest differs. The file is left in place and will
    /// be replaced on the next run.
    DigestMismatch { expected: String, actual: String },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct ImageReport {
    pub url: String,
    pub destination: PathBuf,
    pub outcome: ImageOutcome,
}

/// Per-image results of a run in traversal order.
#[derive(Debug, Clone, Default)]
pub struct FetchSummary {
    pub reports: Vec<ImageReport>,
}

impl FetchSummary {
    pub fn push(&mut self, report: ImageReport) {
        self.reports.push(report);
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn already_satisfied(&self) -> usize {
        self.count(|outcome| matches!(outcome, ImageOutcome::AlreadySatisfied))
    }

    pub fn verified(&self) -> usize {
        self.count(|outcome| matches!(outcome, ImageOutcome::Verified))
    }

    pub fn digest_mismatches(&self) -> usize {
        self.count(|outcome| matches!(outcome, ImageOutcome::DigestMismatch { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ImageOutcome::Failed { .. }))
    }

    /// True when every image ended up on disk with a matching digest.
    pub fn is_complete(&self) -> bool {
        self.already_satisfied() + self.verified() == self.total()
    }

    fn count(&self, predicate: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}
