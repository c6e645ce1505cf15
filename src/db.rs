//! SQLite persistence for FAQ records.
//!
//! The store is the source of truth for all content. Timestamps are RFC 3339
//! strings; `is_active` is stored as an integer flag. Listing order is
//! `display_order ASC, created_at DESC` everywhere.

use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use crate::errors::AppError;
use crate::model::{Faq, FaqPatch, NewFaq};

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Create tables if they don't exist.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS faqs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            question_hi TEXT,
            answer_hi TEXT,
            question_bn TEXT,
            answer_bn TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            display_order INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_faqs_active ON faqs(is_active);
        CREATE INDEX IF NOT EXISTS idx_faqs_order ON faqs(display_order, created_at);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

const FAQ_COLUMNS: &str = "id, question, answer, question_hi, answer_hi, question_bn, answer_bn, \
                           created_at, updated_at, is_active, display_order";

fn faq_from_row(row: &SqliteRow) -> Faq {
    Faq {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        question_hi: row.get("question_hi"),
        answer_hi: row.get("answer_hi"),
        question_bn: row.get("question_bn"),
        answer_bn: row.get("answer_bn"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        is_active: row.get::<i64, _>("is_active") != 0,
        display_order: row.get("display_order"),
    }
}

/// Repository for FAQ records.
#[derive(Clone)]
pub struct FaqStore {
    pool: SqlitePool,
}

impl FaqStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record; both timestamps are set to now.
    pub async fn create(&self, new_faq: &NewFaq) -> Result<Faq, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO faqs (question, answer, question_hi, answer_hi, question_bn, answer_bn, \
             created_at, updated_at, is_active, display_order) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_faq.question)
        .bind(&new_faq.answer)
        .bind(&new_faq.question_hi)
        .bind(&new_faq.answer_hi)
        .bind(&new_faq.question_bn)
        .bind(&new_faq.answer_bn)
        .bind(&now)
        .bind(&now)
        .bind(new_faq.is_active as i32)
        .bind(new_faq.display_order)
        .execute(&self.pool)
        .await?;

        Ok(Faq {
            id: result.last_insert_rowid(),
            question: new_faq.question.clone(),
            answer: new_faq.answer.clone(),
            question_hi: new_faq.question_hi.clone(),
            answer_hi: new_faq.answer_hi.clone(),
            question_bn: new_faq.question_bn.clone(),
            answer_bn: new_faq.answer_bn.clone(),
            created_at: now.clone(),
            updated_at: now,
            is_active: new_faq.is_active,
            display_order: new_faq.display_order,
        })
    }

    /// Fetch a record by id.
    pub async fn get(&self, id: i64) -> Result<Option<Faq>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM faqs WHERE id = ?", FAQ_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(faq_from_row))
    }

    /// Apply a partial update; only supplied fields change and `updated_at`
    /// is refreshed. Returns `None` when the record does not exist.
    pub async fn update(&self, id: i64, patch: &FaqPatch) -> Result<Option<Faq>, AppError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let now = Utc::now().to_rfc3339();
        let question = patch.question.clone().unwrap_or(existing.question);
        let answer = patch.answer.clone().unwrap_or(existing.answer);
        let question_hi = patch.question_hi.clone().or(existing.question_hi);
        let answer_hi = patch.answer_hi.clone().or(existing.answer_hi);
        let question_bn = patch.question_bn.clone().or(existing.question_bn);
        let answer_bn = patch.answer_bn.clone().or(existing.answer_bn);
        let is_active = patch.is_active.unwrap_or(existing.is_active);
        let display_order = patch.display_order.unwrap_or(existing.display_order);

        sqlx::query(
            "UPDATE faqs SET question = ?, answer = ?, question_hi = ?, answer_hi = ?, \
             question_bn = ?, answer_bn = ?, updated_at = ?, is_active = ?, display_order = ? \
             WHERE id = ?",
        )
        .bind(&question)
        .bind(&answer)
        .bind(&question_hi)
        .bind(&answer_hi)
        .bind(&question_bn)
        .bind(&answer_bn)
        .bind(&now)
        .bind(is_active as i32)
        .bind(display_order)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Some(Faq {
            id,
            question,
            answer,
            question_hi,
            answer_hi,
            question_bn,
            answer_bn,
            created_at: existing.created_at,
            updated_at: now,
            is_active,
            display_order,
        }))
    }

    /// Overwrite all translation variants of a record, refreshing
    /// `updated_at`. Used by the explicit re-translation path.
    pub async fn replace_translations(&self, faq: &Faq) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE faqs SET question_hi = ?, answer_hi = ?, question_bn = ?, answer_bn = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&faq.question_hi)
        .bind(&faq.answer_hi)
        .bind(&faq.question_bn)
        .bind(&faq.answer_bn)
        .bind(&now)
        .bind(faq.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Hard-delete a record. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List records ordered by `display_order ASC, created_at DESC`,
    /// optionally restricted to active ones.
    pub async fn list(&self, only_active: bool) -> Result<Vec<Faq>, AppError> {
        let sql = if only_active {
            format!(
                "SELECT {} FROM faqs WHERE is_active = 1 ORDER BY display_order ASC, created_at DESC",
                FAQ_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM faqs ORDER BY display_order ASC, created_at DESC",
                FAQ_COLUMNS
            )
        };

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(faq_from_row).collect())
    }

    /// Total number of records, active or not.
    pub async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM faqs")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== Helper Functions ====================

    async fn create_test_store() -> (FaqStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test_faqs.db");
        let pool = init_database(&db_path).await.expect("init database");
        (FaqStore::new(pool), temp_dir)
    }

    fn new_faq(question: &str, order: i64) -> NewFaq {
        NewFaq {
            question: question.to_string(),
            answer: format!("Answer to {}", question),
            question_hi: None,
            answer_hi: None,
            question_bn: None,
            answer_bn: None,
            is_active: true,
            display_order: order,
        }
    }

    // ==================== Creation Tests ====================

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (store, _tmp) = create_test_store().await;

        let faq = store.create(&new_faq("What is X?", 0)).await.expect("create");

        assert!(faq.id > 0);
        assert!(!faq.created_at.is_empty());
        assert_eq!(faq.created_at, faq.updated_at);
        assert!(faq.is_active);
    }

    #[tokio::test]
    async fn test_create_persists_variants() {
        let (store, _tmp) = create_test_store().await;

        let mut req = new_faq("What is X?", 0);
        req.question_hi = Some("X क्या है?".to_string());
        req.answer_bn = Some("উত্তর".to_string());

        let created = store.create(&req).await.expect("create");
        let fetched = store.get(created.id).await.expect("get").expect("exists");

        assert_eq!(fetched.question_hi.as_deref(), Some("X क्या है?"));
        assert_eq!(fetched.answer_bn.as_deref(), Some("উত্তর"));
        assert!(fetched.question_bn.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (store, _tmp) = create_test_store().await;

        let first = store.create(&new_faq("First?", 0)).await.expect("create");
        store.delete(first.id).await.expect("delete");

        let second = store.create(&new_faq("Second?", 0)).await.expect("create");
        assert!(second.id > first.id);
    }

    // ==================== Get Tests ====================

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (store, _tmp) = create_test_store().await;
        assert!(store.get(9999).await.expect("get").is_none());
    }

    // ==================== Update Tests ====================

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let (store, _tmp) = create_test_store().await;
        let created = store.create(&new_faq("What is X?", 0)).await.expect("create");

        let patch = FaqPatch {
            display_order: Some(5),
            ..Default::default()
        };
        let updated = store
            .update(created.id, &patch)
            .await
            .expect("update")
            .expect("exists");

        assert_eq!(updated.display_order, 5);
        assert_eq!(updated.question, "What is X?");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let (store, _tmp) = create_test_store().await;
        let created = store.create(&new_faq("What is X?", 0)).await.expect("create");

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let patch = FaqPatch {
            answer: Some("New answer.".to_string()),
            ..Default::default()
        };
        let updated = store
            .update(created.id, &patch)
            .await
            .expect("update")
            .expect("exists");

        assert_eq!(updated.answer, "New answer.");
        assert_ne!(updated.updated_at, created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let (store, _tmp) = create_test_store().await;
        let patch = FaqPatch::default();
        assert!(store.update(9999, &patch).await.expect("update").is_none());
    }

    #[tokio::test]
    async fn test_replace_translations() {
        let (store, _tmp) = create_test_store().await;
        let mut created = store.create(&new_faq("What is X?", 0)).await.expect("create");

        created.question_hi = Some("नया प्रश्न".to_string());
        created.answer_hi = Some("नया उत्तर".to_string());
        created.question_bn = Some("নতুন প্রশ্ন".to_string());
        created.answer_bn = Some("নতুন উত্তর".to_string());

        store.replace_translations(&created).await.expect("replace");

        let fetched = store.get(created.id).await.expect("get").expect("exists");
        assert_eq!(fetched.question_hi.as_deref(), Some("नया प्रश्न"));
        assert_eq!(fetched.answer_bn.as_deref(), Some("নতুন উত্তর"));
        // English source untouched
        assert_eq!(fetched.question, "What is X?");
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (store, _tmp) = create_test_store().await;
        let created = store.create(&new_faq("What is X?", 0)).await.expect("create");

        assert!(store.delete(created.id).await.expect("delete"));
        assert!(store.get(created.id).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_reports_false() {
        let (store, _tmp) = create_test_store().await;
        assert!(!store.delete(9999).await.expect("delete"));
    }

    // ==================== Listing Tests ====================

    #[tokio::test]
    async fn test_list_orders_by_display_order_then_created_desc() {
        let (store, _tmp) = create_test_store().await;

        let a = store.create(&new_faq("A?", 2)).await.expect("create");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let b = store.create(&new_faq("B?", 1)).await.expect("create");
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let c = store.create(&new_faq("C?", 1)).await.expect("create");

        let listed = store.list(true).await.expect("list");
        let ids: Vec<i64> = listed.iter().map(|f| f.id).collect();

        // Order 1 before order 2; within order 1, newest first
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_list_active_only_filters_inactive() {
        let (store, _tmp) = create_test_store().await;

        let active = store.create(&new_faq("Active?", 0)).await.expect("create");
        let mut inactive_req = new_faq("Inactive?", 0);
        inactive_req.is_active = false;
        store.create(&inactive_req).await.expect("create");

        let visible = store.list(true).await.expect("list");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, active.id);

        let all = store.list(false).await.expect("list");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_count() {
        let (store, _tmp) = create_test_store().await;
        assert_eq!(store.count().await.expect("count"), 0);

        store.create(&new_faq("A?", 0)).await.expect("create");
        store.create(&new_faq("B?", 0)).await.expect("create");
        assert_eq!(store.count().await.expect("count"), 2);
    }

    // ==================== Persistence Tests ====================

    #[tokio::test]
    async fn test_database_reopening_preserves_rows() {
        let temp_dir = TempDir::new().expect("temp dir");
        let db_path = temp_dir.path().join("persist.db");

        {
            let pool = init_database(&db_path).await.expect("init");
            let store = FaqStore::new(pool);
            store.create(&new_faq("Persist?", 0)).await.expect("create");
        }

        {
            let pool = init_database(&db_path).await.expect("reopen");
            let store = FaqStore::new(pool);
            assert_eq!(store.count().await.expect("count"), 1);
        }
    }
}
