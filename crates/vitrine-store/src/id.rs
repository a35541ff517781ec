//! Identifier generation
//!
//! Ids are clock readings in milliseconds, bumped so that every id issued by
//! this process is strictly greater than the previous one and than any id
//! already present in the document.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use vitrine_types::{Error, Result};

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Next id, strictly greater than `floor` and every id issued before.
///
/// Fails once `floor` or the last issued id is `u64::MAX`.
pub fn next_id(floor: u64) -> Result<u64> {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let above_floor = floor.checked_add(1).ok_or_else(exhausted)?;
    let mut prev = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now
            .max(prev.checked_add(1).ok_or_else(exhausted)?)
            .max(above_floor);
        match LAST_ISSUED.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
        {
            Ok(_) => return Ok(candidate),
            Err(actual) => prev = actual,
        }
    }
}

fn exhausted() -> Error {
    Error::InvalidInput("id space exhausted".to_string())
}
