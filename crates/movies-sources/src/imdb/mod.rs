pub mod client;
pub mod parser;

pub use client::ImdbClient;
pub use parser::parse_title_page;
