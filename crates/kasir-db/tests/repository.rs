mod common;

use common::{add_product, at, insert_sale, memory_db};
use kasir_core::{NewCategory, NewProduct};
use kasir_db::DbError;

#[tokio::test]
async fn test_product_crud() {
    let db = memory_db().await;
    let repo = db.products();

    let created = add_product(&db, "Indomie Goreng", 3500, 120).await;
    assert!(created.id > 0);

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let updated = repo
        .update(
            created.id,
            &NewProduct {
                name: "Indomie Goreng Jumbo".to_string(),
                unit_price: 4500,
                stock_quantity: 60,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.unit_price, 4500);
    assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap(), updated);

    repo.delete(created.id).await.unwrap();
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_product_missing_id_is_not_found() {
    let db = memory_db().await;
    let repo = db.products();

    let update = repo
        .update(
            42,
            &NewProduct {
                name: "Ghost".to_string(),
                unit_price: 1,
                stock_quantity: 1,
            },
        )
        .await;
    assert!(matches!(update, Err(DbError::NotFound { .. })));

    assert!(repo.delete(42).await.unwrap_err().is_not_found());
    assert!(repo.get_by_id(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_product_name_filter_ignores_case() {
    let db = memory_db().await;
    add_product(&db, "Kopi Susu", 5000, 10).await;
    add_product(&db, "Teh Manis", 5000, 10).await;
    add_product(&db, "KOPI Hitam", 4000, 10).await;

    let repo = db.products();

    let kopi: Vec<_> = repo
        .list(Some("kopi"))
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(kopi, vec!["Kopi Susu", "KOPI Hitam"]);

    assert_eq!(repo.list(None).await.unwrap().len(), 3);
    assert_eq!(repo.list(Some("  ")).await.unwrap().len(), 3);
    assert!(repo.list(Some("%")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_negative_price_rejected_by_schema() {
    let db = memory_db().await;

    let err = db
        .products()
        .insert(&NewProduct {
            name: "Broken".to_string(),
            unit_price: -1,
            stock_quantity: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ConstraintViolation { .. }));
}

#[tokio::test]
async fn test_not_null_failure_is_constraint_violation() {
    let db = memory_db().await;

    let err = sqlx::query("INSERT INTO products (name, unit_price, stock_quantity) VALUES (NULL, 100, 1)")
        .execute(db.pool())
        .await
        .map_err(DbError::from)
        .unwrap_err();

    assert!(matches!(err, DbError::ConstraintViolation { ref message } if message.contains("NOT NULL")));
}

#[tokio::test]
async fn test_category_crud() {
    let db = memory_db().await;
    let repo = db.categories();

    let created = repo
        .insert(&NewCategory {
            name: "Minuman".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            &NewCategory {
                name: "Minuman Dingin".to_string(),
                description: Some("Minuman kemasan dingin".to_string()),
            },
        )
        .await
        .unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed, vec![updated.clone()]);
    assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(updated));

    repo.delete(created.id).await.unwrap();
    assert!(repo.list().await.unwrap().is_empty());
    assert!(repo.delete(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_transaction_delete_removes_lines() {
    let db = memory_db().await;
    let kopi = add_product(&db, "Kopi Susu", 5000, 10).await;

    let keep = insert_sale(&db, at(2026, 1, 10, 9, 0, 0), &[(kopi.id, "Kopi Susu", 1, 5000)]).await;
    let gone = insert_sale(
        &db,
        at(2026, 1, 10, 10, 0, 0),
        &[(kopi.id, "Kopi Susu", 2, 10000), (kopi.id, "Kopi Susu", 1, 5000)],
    )
    .await;

    db.transactions().delete(gone).await.unwrap();

    assert!(db.transactions().get_by_id(gone).await.unwrap().is_none());
    assert!(db.transactions().get_lines(gone).await.unwrap().is_empty());
    assert_eq!(db.transactions().get_lines(keep).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_transaction_delete_missing_rolls_back() {
    let db = memory_db().await;

    let err = db.transactions().delete(77).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.transactions().count().await.unwrap(), 0);
}
