// src/services/rating.rs
//! Incremental driver-rating average. The rating applies to the ride that
//! was just rated, which is already counted in `completed_rides`.

use crate::services::geo::round2;

/// `((old_avg * (n - 1)) + new_rating) / n`, rounded to two decimals.
/// The first rating simply becomes the average.
pub fn updated_average(current_avg: f64, completed_rides: u32, new_rating: f64) -> f64 {
    if completed_rides <= 1 {
        return new_rating;
    }

    let n = completed_rides as f64;
    round2((current_avg * (n - 1.0) + new_rating) / n)
}
