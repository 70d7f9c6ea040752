use thiserror::Error;

/// Violation of a [`Movie`](crate::Movie) invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rating {0} is out of range, expected a value between 0 and 10")]
    RatingOutOfRange(i32),

    /// Viewing data (watched date, cinema flag, rating) on a movie that is not marked watched
    #[error("`{field}` cannot be set on a movie that is not marked as watched")]
    UnwatchedWithViewingData { field: &'static str },

    #[error("required field `{0}` is empty")]
    MissingField(&'static str),

    #[error("invalid IMDb identifier '{0}', expected 'tt' followed by digits")]
    InvalidImdbId(String),
}
