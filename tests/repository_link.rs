//! `PgLinkRepository` against PostgreSQL via `#[sqlx::test]`.
//!
//! Ignored by default so `cargo test` passes without a database. Run with
//! `DATABASE_URL` set and `cargo test -- --ignored`; each test gets a fresh
//! database with `migrations/` applied.

use link_redirector::domain::repositories::LinkRepository;
use link_redirector::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

async fn insert_link(
    pool: &PgPool,
    slug: &str,
    url: &str,
    password_hash: Option<&str>,
    is_active: bool,
) {
    sqlx::query(
        "INSERT INTO links (slug, original_url, original_url_hash, password_hash, is_active)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(slug)
    .bind(url)
    .bind(format!("hash-{slug}"))
    .bind(password_hash)
    .bind(is_active)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_find_by_slug(pool: PgPool) {
    insert_link(&pool, "abc123", "https://example.com", None, true).await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.find_by_slug("abc123").await.unwrap().unwrap();

    assert_eq!(link.slug, "abc123");
    assert_eq!(link.original_url, "https://example.com");
    assert!(link.is_active);
    assert!(!link.is_protected());
    assert_eq!(link.click_count, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_find_by_slug_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_slug("notfound").await;

    assert!(result.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_find_inactive_protected_link(pool: PgPool) {
    insert_link(
        &pool,
        "locked",
        "https://locked.com",
        Some("$2b$04$hash"),
        false,
    )
    .await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.find_by_slug("locked").await.unwrap().unwrap();

    assert!(!link.is_active);
    assert_eq!(link.password_hash.as_deref(), Some("$2b$04$hash"));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_slug_lookup_is_case_sensitive(pool: PgPool) {
    insert_link(&pool, "AbC", "https://example.com", None, true).await;

    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_slug("abc").await.unwrap().is_none());
    assert!(repo.find_by_slug("AbC").await.unwrap().is_some());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}
