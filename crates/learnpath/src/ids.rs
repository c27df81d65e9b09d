//! Correlation ids for the log lines of one generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifies one pass through the pipeline in logs: `req-<millis>-<seq>`,
/// both in hex. The sequence number is process-wide, so ids stay distinct
/// within a millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    pub fn next() -> Self {
        let millis = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("req-{millis:x}-{seq:04x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
