mod common;
pub use self::common::{Query, SortOrder};

mod aggregates;
pub use self::aggregates::{AggregatesQuery, Timespan};

mod dividends;
pub use self::dividends::DividendsQuery;
