use std::time::Duration;

/// Controls how long `wait_until_analyzed` keeps asking the scanner
///
/// The default waits forever: a fixed 500 ms pause between attempts, no
/// attempt cap and no deadline. A stuck analysis therefore blocks the run
/// until either limit is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: Option<u32>,
    timeout: Option<Duration>,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    /// Caps the number of registration calls
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Caps the total time spent polling one image
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.timeout.is_none()
    }

    /// Whether another attempt is allowed after `attempts` calls and `elapsed` time
    pub fn allows_another_attempt(&self, attempts: u32, elapsed: Duration) -> bool {
        let under_cap = self.max_attempts.is_none_or(|max| attempts < max);
        let before_deadline = self
            .timeout
            .is_none_or(|timeout| elapsed + self.interval <= timeout);
        under_cap && before_deadline
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
