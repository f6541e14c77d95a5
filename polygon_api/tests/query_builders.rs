use chrono::NaiveDate;
use polygon_api::{AggregatesQuery, DividendsQuery, Query, SortOrder, Timespan};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn aggregates_query_defaults() {
    let query = AggregatesQuery::new("AAPL", date(2023, 1, 9), date(2023, 1, 9));
    assert_eq!(query.path(), "/v2/aggs/ticker/AAPL/range/1/minute/2023-01-09/2023-01-09");

    let url = query.add_to_url(&base_url());
    let params = url.query().unwrap();
    assert!(params.contains("adjusted=true"));
    assert!(params.contains("sort=asc"));
    assert!(params.contains("limit=5000"));
}

#[test]
fn aggregates_query_all_options() {
    let query = AggregatesQuery::new("AAPL", date(2022, 1, 1), date(2022, 12, 31))
        .with_multiplier(2)
        .with_timespan(Timespan::Week)
        .with_adjusted(false)
        .with_sort(SortOrder::Desc)
        .with_limit(50);
    assert_eq!(query.path(), "/v2/aggs/ticker/AAPL/range/2/week/2022-01-01/2022-12-31");

    let url = query.add_to_url(&base_url());
    let params = url.query().unwrap();
    assert!(params.contains("adjusted=false"));
    assert!(params.contains("sort=desc"));
    assert!(params.contains("limit=50"));
}

#[test]
fn sort_order_parse() {
    assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
    assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
    assert!("sideways".parse::<SortOrder>().is_err());
}

#[test]
fn dividends_query_has_no_params() {
    let query = DividendsQuery::new("KO");
    assert_eq!(query.path(), "/v2/reference/dividends/KO");
    assert_eq!(query.add_to_url(&base_url()).query(), None);
}
