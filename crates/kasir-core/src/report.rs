//! # Sales Report Aggregator
//!
//! Computes revenue, transaction count and best seller over an inclusive
//! instant range. Reports are never stored.
//!
//! ## Day Normalization
//! Callers speak in calendar days (`YYYY-MM-DD`). A day range covers
//! `start 00:00:00` through `end 23:59:59` UTC. When either date is missing
//! the report covers today, and "today" is always supplied by the caller so
//! this crate never reads the clock.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kasir_core::report::day_range;
//!
//! let day = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
//! let range = day_range(day, day);
//! assert_eq!(range.start.to_rfc3339(), "2026-01-31T00:00:00+00:00");
//! assert_eq!(range.end.to_rfc3339(), "2026-01-31T23:59:59+00:00");
//! ```

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::CoreResult;
use crate::store::SalesStore;
use crate::types::{BestSeller, ReportRange, SalesReport};
use crate::validation::{parse_report_date, ValidationResult};

/// Seconds from a day's first second to its last.
const LAST_SECOND_OF_DAY: i64 = 86_399;

/// Builds the report for `range`.
///
/// A range whose start is after its end matches nothing and yields
/// [`SalesReport::empty`].
pub async fn get_sales_report<S: SalesStore>(store: &S, range: ReportRange) -> CoreResult<SalesReport> {
    let totals = store.query_report(range).await?;
    let revenue = totals.revenue;
    let count = totals.transaction_count;
    let best_seller = totals.top_product.unwrap_or_else(BestSeller::none);

    debug!(
        start = %range.start,
        end = %range.end,
        revenue = %revenue,
        count,
        best_seller = %best_seller.name,
        "Sales report computed"
    );

    Ok(SalesReport {
        total_revenue: revenue.units(),
        total_transaction_count: count,
        best_seller,
    })
}

/// Normalizes a pair of calendar days to an inclusive UTC instant range.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> ReportRange {
    let start = start.and_time(NaiveTime::MIN).and_utc();
    let end = end.and_time(NaiveTime::MIN).and_utc() + Duration::seconds(LAST_SECOND_OF_DAY);
    ReportRange::new(start, end)
}

/// Resolves optional `start_date` / `end_date` query values.
///
/// Both present: each is parsed as `YYYY-MM-DD`. Either missing or blank:
/// the range is `today`.
pub fn range_from_query(
    start_date: Option<&str>,
    end_date: Option<&str>,
    today: NaiveDate,
) -> ValidationResult<ReportRange> {
    let start_date = start_date.filter(|s| !s.trim().is_empty());
    let end_date = end_date.filter(|s| !s.trim().is_empty());

    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            let start = parse_report_date("start_date", start)?;
            let end = parse_report_date("end_date", end)?;
            Ok(day_range(start, end))
        }
        _ => Ok(day_range(today, today)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::checkout;
    use crate::testing::MemoryStore;
    use crate::types::CartLine;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_product(1, "Kopi Susu", 5000, 100).await;
        store.add_product(2, "Teh Manis", 5000, 100).await;
        store.add_product(3, "Keripik", 2500, 100).await;
        store
    }

    #[test]
    fn test_day_range_covers_whole_days() {
        let range = day_range(date(2026, 1, 1), date(2026, 1, 31));
        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_range_from_query_defaults_to_today() {
        let today = date(2026, 3, 15);
        let expected = day_range(today, today);

        assert_eq!(range_from_query(None, None, today).unwrap(), expected);
        assert_eq!(range_from_query(Some("2026-01-01"), None, today).unwrap(), expected);
        assert_eq!(range_from_query(None, Some("2026-01-31"), today).unwrap(), expected);
        assert_eq!(range_from_query(Some(""), Some("2026-01-31"), today).unwrap(), expected);
    }

    #[test]
    fn test_range_from_query_parses_both_dates() {
        let range = range_from_query(Some("2026-01-01"), Some("2026-01-31"), date(2026, 3, 15)).unwrap();
        assert_eq!(range, day_range(date(2026, 1, 1), date(2026, 1, 31)));

        assert!(range_from_query(Some("2026-13-01"), Some("2026-01-31"), date(2026, 3, 15)).is_err());
    }

    #[tokio::test]
    async fn test_report_sums_revenue_and_counts() {
        let store = seeded_store().await;
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()).await;

        checkout(&store, &[CartLine::new(1, 2)]).await.unwrap();
        checkout(&store, &[CartLine::new(2, 3), CartLine::new(3, 4)]).await.unwrap();

        let report = get_sales_report(&store, day_range(date(2026, 1, 1), date(2026, 1, 31)))
            .await
            .unwrap();

        assert_eq!(report.total_revenue, 35000);
        assert_eq!(report.total_transaction_count, 2);
        assert_eq!(report.best_seller.name, "Keripik");
        assert_eq!(report.best_seller.quantity_sold, 4);
    }

    #[tokio::test]
    async fn test_report_empty_range() {
        let store = seeded_store().await;
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()).await;
        checkout(&store, &[CartLine::new(1, 2)]).await.unwrap();

        let report = get_sales_report(&store, day_range(date(2026, 2, 1), date(2026, 2, 28)))
            .await
            .unwrap();

        assert_eq!(report, SalesReport::empty());
    }

    #[tokio::test]
    async fn test_report_start_after_end_is_empty() {
        let store = seeded_store().await;
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()).await;
        checkout(&store, &[CartLine::new(1, 2)]).await.unwrap();

        let report = get_sales_report(&store, day_range(date(2026, 1, 31), date(2026, 1, 1)))
            .await
            .unwrap();

        assert_eq!(report, SalesReport::empty());
    }

    #[tokio::test]
    async fn test_report_boundaries_are_inclusive() {
        let store = seeded_store().await;

        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap()).await;
        checkout(&store, &[CartLine::new(1, 1)]).await.unwrap();
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap()).await;
        checkout(&store, &[CartLine::new(1, 1)]).await.unwrap();
        store.set_clock(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()).await;
        checkout(&store, &[CartLine::new(1, 1)]).await.unwrap();

        let day = date(2026, 1, 31);
        let report = get_sales_report(&store, day_range(day, day)).await.unwrap();

        assert_eq!(report.total_transaction_count, 2);
        assert_eq!(report.total_revenue, 10000);
    }

    #[tokio::test]
    async fn test_best_seller_tie_goes_to_lower_product_id() {
        let store = seeded_store().await;
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()).await;

        checkout(&store, &[CartLine::new(2, 3)]).await.unwrap();
        checkout(&store, &[CartLine::new(1, 3)]).await.unwrap();

        let report = get_sales_report(&store, day_range(date(2026, 1, 10), date(2026, 1, 10)))
            .await
            .unwrap();

        assert_eq!(report.best_seller.name, "Kopi Susu");
        assert_eq!(report.best_seller.quantity_sold, 3);
    }

    #[tokio::test]
    async fn test_best_seller_uses_current_name_then_snapshot() {
        let store = seeded_store().await;
        store.set_clock(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()).await;
        checkout(&store, &[CartLine::new(3, 5)]).await.unwrap();
        let range = day_range(date(2026, 1, 10), date(2026, 1, 10));

        store.rename_product(3, "Keripik Pedas").await;
        let renamed = get_sales_report(&store, range).await.unwrap();
        assert_eq!(renamed.best_seller.name, "Keripik Pedas");

        store.remove_product(3).await;
        let removed = get_sales_report(&store, range).await.unwrap();
        assert_eq!(removed.best_seller.name, "Keripik");
        assert_eq!(removed.best_seller.quantity_sold, 5);
    }
}
