mod common;
pub use self::common::Query;

mod search;
pub use self::search::SearchQuery;

mod wage;
pub use self::wage::WageQuery;
