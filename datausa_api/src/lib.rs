mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, ClientConfig, DEFAULT_DATA_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use self::query::{Query, SearchQuery, WageQuery};
