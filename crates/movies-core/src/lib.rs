pub mod diff;
pub mod transfer;

pub use diff::{filter_missing_by_imdb_id, find_duplicate_ids, remove_duplicates_by_imdb_id};
pub use transfer::{transfer, TransferOptions, TransferReport};
