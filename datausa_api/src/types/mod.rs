mod response;
pub use self::response::{DataResponse, SearchResponse};

mod occupation;
pub use self::occupation::{OccupationID, SearchResult};

mod wage;
pub use self::wage::WageRecord;

mod lenient;
