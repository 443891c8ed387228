//! Poll loop state: the watermark and the last reported error

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Lower bound (seconds since epoch) for the next homework status fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(i64);

impl Watermark {
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    /// A zero watermark means "start from now"
    pub fn or_now(self) -> Self {
        if self.0 == 0 {
            Self::now()
        } else {
            self
        }
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consecutive failed cycles after which the outage is logged as a warning
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// State owned by the poll loop across cycles
#[derive(Debug, Clone)]
pub struct PollState {
    pub watermark: Watermark,
    pub last_error: Option<String>,
    pub cycles: u64,
    pub consecutive_failures: u32,
    pub notifications_sent: u64,
}

impl PollState {
    pub fn new(watermark: Watermark) -> Self {
        Self {
            watermark,
            last_error: None,
            cycles: 0,
            consecutive_failures: 0,
            notifications_sent: 0,
        }
    }

    /// Record a successful cycle. The watermark only moves forward; returns
    /// false if `current_date` was older than the stored watermark.
    pub fn record_success(&mut self, current_date: Watermark) -> bool {
        self.cycles += 1;
        self.consecutive_failures = 0;
        self.last_error = None;
        if current_date >= self.watermark {
            self.watermark = current_date;
            true
        } else {
            false
        }
    }

    /// Record a failed cycle. The watermark is left untouched.
    ///
    /// Returns true only on the failure that reaches
    /// [`FAILURE_WARN_THRESHOLD`].
    pub fn record_failure(&mut self) -> bool {
        self.cycles += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures == FAILURE_WARN_THRESHOLD
    }

    /// Whether `text` differs from the last error that reached the chat
    pub fn is_new_error(&self, text: &str) -> bool {
        self.last_error.as_deref() != Some(text)
    }

    pub fn remember_error(&mut self, text: String) {
        self.last_error = Some(text);
    }
}
