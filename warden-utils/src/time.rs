use std::time::{SystemTime, UNIX_EPOCH};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Unix timestamp `seconds` from now, saturating on overflow.
pub fn unix_secs_after(seconds: u64) -> u64 {
    now_unix_secs().saturating_add(seconds)
}
