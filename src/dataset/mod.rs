mod corpus;
mod fetch;

pub use corpus::Corpus;
pub use fetch::{FetchReport, fetch_dataset};
