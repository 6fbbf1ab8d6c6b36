use chrono::{DateTime, SubsecRound as _, Utc};

/// Current time truncated to microseconds, the finest resolution every
/// backend can store, so a record reads back exactly as it was returned.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
