use chrono::{DateTime, Utc};

/// Wall-clock time in UTC. Used as the `created_at` fallback, so it is read
/// once per construction and never cached.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
