use riptide_math::{MAX_ABS_SALE_RATE_DELTA, MAX_SALE_RATE};
use riptide_types::RiptideError;

/// Apply a signed change to a running sale rate
///
/// Used both for immediate order changes and for boundary crossings. A single
/// change is capped at MAX_ABS_SALE_RATE_DELTA and the result must stay in
/// [0, MAX_SALE_RATE].
pub fn add_sale_rate_delta(rate: u128, delta: i128) -> Result<u128, RiptideError> {
    if delta.unsigned_abs() > MAX_ABS_SALE_RATE_DELTA {
        return Err(RiptideError::MaxRatePerBoundaryExceeded);
    }

    let updated = if delta >= 0 {
        rate.checked_add(delta as u128)
    } else {
        rate.checked_sub(delta.unsigned_abs())
    };

    match updated {
        Some(value) if value <= MAX_SALE_RATE => Ok(value),
        _ => Err(RiptideError::RateDeltaOverflow),
    }
}

/// Accumulate a change into a time bucket; the net change stored at one
/// boundary is capped like a single change
pub fn add_bucket_delta(current: i128, delta: i128) -> Result<i128, RiptideError> {
    let updated = current.checked_add(delta).ok_or(RiptideError::RateDeltaOverflow)?;
    if updated.unsigned_abs() > MAX_ABS_SALE_RATE_DELTA {
        return Err(RiptideError::MaxRatePerBoundaryExceeded);
    }
    Ok(updated)
}
