//! Run version stamps
//!
//! Every catalog write performed during one run shares a single version
//! stamp derived from the run's start time. The stamp is computed once by
//! the orchestrator and threaded through the reconciler; recomputing it per
//! record would scatter one run's artifacts across versions and break the
//! idempotency checks.

use chrono::{DateTime, Datelike, Local, Timelike};

/// Derive a version stamp of the form `YYYY-MMDD-HHMMSS` from a timestamp.
///
/// The year is unpadded; every other component is zero-padded to two
/// digits. Passing `None` uses the current local time.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use hookcat::version::run_version;
///
/// let ts = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 2).unwrap();
/// assert_eq!(run_version(Some(ts)), "2024-0305-090702");
/// ```
pub fn run_version(at: Option<DateTime<Local>>) -> String {
    let at = at.unwrap_or_else(Local::now);
    format!(
        "{}-{:02}{:02}-{:02}{:02}{:02}",
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}
