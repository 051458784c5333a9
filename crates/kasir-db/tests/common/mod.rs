#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use kasir_core::{NewProduct, Product};
use kasir_db::{Database, DbConfig};

pub async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub async fn add_product(db: &Database, name: &str, unit_price: i64, stock: i64) -> Product {
    db.products()
        .insert(&NewProduct {
            name: name.to_string(),
            unit_price,
            stock_quantity: stock,
        })
        .await
        .unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Writes a transaction with a chosen timestamp, bypassing checkout.
/// `lines` are `(product_id, product_name, quantity, subtotal)`.
pub async fn insert_sale(
    db: &Database,
    created_at: DateTime<Utc>,
    lines: &[(i64, &str, i64, i64)],
) -> i64 {
    let total: i64 = lines.iter().map(|l| l.3).sum();

    let id = sqlx::query("INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)")
        .bind(total)
        .bind(created_at)
        .execute(db.pool())
        .await
        .unwrap()
        .last_insert_rowid();

    for (product_id, name, quantity, subtotal) in lines {
        sqlx::query(
            "INSERT INTO transaction_details (transaction_id, product_id, product_name, quantity, subtotal) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(id)
        .bind(product_id)
        .bind(*name)
        .bind(quantity)
        .bind(subtotal)
        .execute(db.pool())
        .await
        .unwrap();
    }

    id
}

pub async fn stock_of(db: &Database, id: i64) -> i64 {
    db.products().get_by_id(id).await.unwrap().unwrap().stock_quantity
}
