mod aggregate;
pub use self::aggregate::{AggregateBar, AggregateResult, BarTimestamp};

mod dividend;
pub use self::dividend::{DividendEvent, DividendsResponse};

mod market;
pub use self::market::MarketStatus;
