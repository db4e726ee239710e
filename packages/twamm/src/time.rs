// Valid time grid
//
// Boundaries close to now are spaced 256 seconds apart. Further out the
// spacing grows with the distance, one power of 16 at a time, which caps the
// number of distinct future boundaries at MAX_VALID_TIMES.

use riptide_math::{MAX_ORDER_DURATION, MIN_STEP_HORIZON, MIN_TIME_STEP};

/// Spacing of valid times around `time`, seen from `now`
pub fn compute_step_size(now: u64, time: u64) -> u64 {
    if time <= now {
        return MIN_TIME_STEP;
    }

    let diff = time - now;
    if diff < MIN_STEP_HORIZON {
        return MIN_TIME_STEP;
    }

    // 16^floor(log16(diff))
    let log2 = 63 - diff.leading_zeros();
    1u64 << ((log2 / 4) * 4)
}

pub fn is_time_valid(now: u64, time: u64) -> bool {
    let step = compute_step_size(now, time);
    time % step == 0 && time <= now.saturating_add(MAX_ORDER_DURATION)
}

/// Smallest valid time strictly after `after`, or None past the horizon
pub fn next_valid_time(now: u64, after: u64) -> Option<u64> {
    let mut step = compute_step_size(now, after);
    loop {
        let candidate = (after / step).checked_add(1)?.checked_mul(step)?;
        let candidate_step = compute_step_size(now, candidate);
        if candidate_step <= step {
            if candidate > now.saturating_add(MAX_ORDER_DURATION) {
                return None;
            }
            return Some(candidate);
        }
        step = candidate_step;
    }
}
