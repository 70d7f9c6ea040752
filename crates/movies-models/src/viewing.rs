use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::ValidationError;

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 10;

/// Personal viewing data attached to a movie
///
/// Everything here belongs to the user, not to the upstream metadata. A movie
/// that is not watched carries no viewing data besides an optional comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewing {
    pub rating: Option<i32>, // user's own rating, 0-10
    pub watched: bool,
    pub watched_date: Option<NaiveDate>,
    pub cinema: bool, // seen at the theater
    pub comment: String,
}

impl Viewing {
    /// Build viewing data where any viewing detail implies `watched`
    ///
    /// A watch date, a theatrical viewing or a rating only make sense for a
    /// watched movie, so supplying one of them marks the movie as watched even
    /// when `watched` is false.
    pub fn watched_with(
        watched: bool,
        watched_date: Option<NaiveDate>,
        cinema: bool,
        rating: Option<i32>,
        comment: String,
    ) -> Self {
        Self {
            rating,
            watched: watched || cinema || watched_date.is_some() || rating.is_some(),
            watched_date,
            cinema,
            comment,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.watched {
            if self.watched_date.is_some() {
                return Err(ValidationError::UnwatchedWithViewingData { field: "watched_date" });
            }
            if self.cinema {
                return Err(ValidationError::UnwatchedWithViewingData { field: "cinema" });
            }
            if self.rating.is_some() {
                return Err(ValidationError::UnwatchedWithViewingData { field: "rating" });
            }
        }
        if let Some(rating) = self.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }
}
