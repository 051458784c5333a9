mod common;

use chrono::{NaiveDate, Utc};
use common::{add_product, at, insert_sale, memory_db};
use kasir_core::report::{day_range, range_from_query};
use kasir_core::{checkout, get_sales_report, CartLine, SalesReport};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_report_two_sales_in_one_day() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 100).await;
    let teh = add_product(&db, "Teh Manis", 5000, 100).await;

    insert_sale(&db, at(2026, 1, 31, 9, 0, 0), &[(kopi.id, "Kopi Susu", 2, 10000)]).await;
    insert_sale(&db, at(2026, 1, 31, 17, 30, 0), &[(teh.id, "Teh Manis", 5, 25000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 31), day(2026, 1, 31)))
        .await
        .unwrap();

    assert_eq!(report.total_revenue, 35000);
    assert_eq!(report.total_transaction_count, 2);
    assert_eq!(report.best_seller.name, "Teh Manis");
    assert_eq!(report.best_seller.quantity_sold, 5);
}

#[tokio::test]
async fn test_report_empty_range() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 100).await;
    insert_sale(&db, at(2026, 1, 31, 9, 0, 0), &[(kopi.id, "Kopi Susu", 2, 10000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2025, 12, 1), day(2025, 12, 31)))
        .await
        .unwrap();

    assert_eq!(report, SalesReport::empty());
    assert_eq!(report.best_seller.name, "-");
}

#[tokio::test]
async fn test_report_reversed_range_is_empty() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 100).await;
    insert_sale(&db, at(2026, 1, 15, 9, 0, 0), &[(kopi.id, "Kopi Susu", 2, 10000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 31), day(2026, 1, 1)))
        .await
        .unwrap();

    assert_eq!(report, SalesReport::empty());
}

#[tokio::test]
async fn test_report_day_boundaries_inclusive() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 100).await;

    insert_sale(&db, at(2026, 1, 30, 23, 59, 59), &[(kopi.id, "Kopi Susu", 1, 5000)]).await;
    insert_sale(&db, at(2026, 1, 31, 0, 0, 0), &[(kopi.id, "Kopi Susu", 1, 5000)]).await;
    insert_sale(&db, at(2026, 1, 31, 23, 59, 59), &[(kopi.id, "Kopi Susu", 1, 5000)]).await;
    insert_sale(&db, at(2026, 2, 1, 0, 0, 0), &[(kopi.id, "Kopi Susu", 1, 5000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 31), day(2026, 1, 31)))
        .await
        .unwrap();

    assert_eq!(report.total_transaction_count, 2);
    assert_eq!(report.total_revenue, 10000);
    assert_eq!(report.best_seller.quantity_sold, 2);
}

#[tokio::test]
async fn test_best_seller_tie_breaks_on_lower_product_id() {
    let db = memory_db().await;
    let first = add_product(&db, "Roti Tawar", 15000, 100).await;
    let second = add_product(&db, "Aqua 600ml", 4000, 100).await;

    insert_sale(&db, at(2026, 1, 10, 9, 0, 0), &[(second.id, "Aqua 600ml", 3, 12000)]).await;
    insert_sale(&db, at(2026, 1, 10, 10, 0, 0), &[(first.id, "Roti Tawar", 3, 45000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 10), day(2026, 1, 10)))
        .await
        .unwrap();

    assert!(first.id < second.id);
    assert_eq!(report.best_seller.name, "Roti Tawar");
    assert_eq!(report.best_seller.quantity_sold, 3);
}

#[tokio::test]
async fn test_best_seller_sums_across_transactions() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 100).await;
    let teh = add_product(&db, "Teh Manis", 5000, 100).await;

    insert_sale(&db, at(2026, 1, 10, 9, 0, 0), &[(teh.id, "Teh Manis", 4, 20000)]).await;
    insert_sale(
        &db,
        at(2026, 1, 10, 10, 0, 0),
        &[(kopi.id, "Kopi Susu", 3, 15000), (teh.id, "Teh Manis", 1, 5000)],
    )
    .await;
    insert_sale(&db, at(2026, 1, 10, 11, 0, 0), &[(kopi.id, "Kopi Susu", 3, 15000)]).await;

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 10), day(2026, 1, 10)))
        .await
        .unwrap();

    assert_eq!(report.best_seller.name, "Kopi Susu");
    assert_eq!(report.best_seller.quantity_sold, 6);
    assert_eq!(report.total_revenue, 55000);
}

#[tokio::test]
async fn test_best_seller_falls_back_to_snapshot_for_deleted_product() {
    let db = memory_db().await;
    let keripik = add_product(&db, "Keripik Singkong", 10000, 100).await;
    insert_sale(&db, at(2026, 1, 10, 9, 0, 0), &[(keripik.id, "Keripik Singkong", 7, 70000)]).await;

    db.products().delete(keripik.id).await.unwrap();

    let report = get_sales_report(&db.store(), day_range(day(2026, 1, 10), day(2026, 1, 10)))
        .await
        .unwrap();

    assert_eq!(report.best_seller.name, "Keripik Singkong");
    assert_eq!(report.best_seller.quantity_sold, 7);
}

#[tokio::test]
async fn test_today_report_includes_fresh_checkout() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 15).await;

    checkout(&db.store(), &[CartLine::new(kopi.id, 2)]).await.unwrap();

    let today = Utc::now().date_naive();
    let range = range_from_query(None, None, today).unwrap();
    let report = get_sales_report(&db.store(), range).await.unwrap();

    assert_eq!(report.total_revenue, 10000);
    assert_eq!(report.total_transaction_count, 1);
    assert_eq!(report.best_seller.name, "Kopi Susu");
}
