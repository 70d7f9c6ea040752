pub mod duration;
pub mod error;
pub mod movie;
pub mod viewing;

pub use duration::{format_duration, parse_duration};
pub use error::ValidationError;
pub use movie::{validate_imdb_id, Movie, MovieMetadata, FIELD_COUNT, MOVIE_FIELDS};
pub use viewing::{Viewing, MAX_RATING, MIN_RATING};
