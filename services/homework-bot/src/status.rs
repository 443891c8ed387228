//! Catalog of review statuses and their human-readable verdicts

use std::fmt;

/// Review outcome of a submitted homework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Approved,
        ReviewStatus::Reviewing,
        ReviewStatus::Rejected,
    ];

    /// Status code as it appears in the API payload
    pub fn code(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "approved",
            ReviewStatus::Reviewing => "reviewing",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Text shown to the user for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            ReviewStatus::Reviewing => "The work has been taken for review by the reviewer.",
            ReviewStatus::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }

    /// Look up a status code; `None` for codes outside the catalog
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
