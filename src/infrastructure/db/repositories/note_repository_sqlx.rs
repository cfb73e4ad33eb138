use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::{Note, NotePage};
use crate::domain::notes::sort::SortKey;
use crate::infrastructure::db::PgPool;

const NOTE_COLUMNS: &str = r#""_id", "title", "content", "createdAt", "editedAt", "completed", "completedAt", "_ownerId""#;

pub struct SqlxNoteRepository {
    pub pool: PgPool,
}

impl SqlxNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn note_from_row(r: &PgRow) -> Note {
    Note {
        id: r.get("_id"),
        title: r.get("title"),
        content: r.get("content"),
        created_at: r.get("createdAt"),
        edited_at: r.get("editedAt"),
        completed: r.get("completed"),
        completed_at: r.get("completedAt"),
        owner_id: r.get("_ownerId"),
    }
}

/// Count of the filtered set: when sorting by `edited`/`completed`, rows with
/// a NULL sort column are invisible to the listing and must not be counted.
fn count_sql(sort: SortKey) -> String {
    let mut sql = String::from(r#"SELECT COUNT(*) FROM notes WHERE "_ownerId" = $1"#);
    if sort.filters_nulls() {
        sql.push_str(&format!(" AND {} IS NOT NULL", sort.field.column()));
    }
    sql
}

/// Page query: same NULL filter as the count, primary sort on the key's
/// column, and for `edited`/`completed` a `createdAt` tie-break in the same
/// direction. `$2`/`$3` are LIMIT/OFFSET.
fn page_sql(sort: SortKey) -> String {
    let column = sort.field.column();
    let dir = sort.direction.as_sql();
    let mut sql = format!(r#"SELECT {NOTE_COLUMNS} FROM notes WHERE "_ownerId" = $1"#);
    if sort.filters_nulls() {
        sql.push_str(&format!(" AND {column} IS NOT NULL"));
    }
    sql.push_str(&format!(" ORDER BY {column} {dir}"));
    if sort.filters_nulls() {
        sql.push_str(&format!(r#", "createdAt" {dir}"#));
    }
    sql.push_str(" LIMIT $2 OFFSET $3");
    sql
}

/// `$1, $2, ..., $len` for an `IN (...)` clause. `len` must be positive;
/// `IN ()` is not valid SQL.
fn in_placeholders(len: usize) -> String {
    (1..=len)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create(&self, owner_id: Uuid, title: &str, content: &str) -> anyhow::Result<Note> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO notes ("_id", "title", "content", "createdAt", "editedAt", "completed", "completedAt", "_ownerId")
               VALUES ($1, $2, $3, $4, NULL, FALSE, NULL, $5)
               RETURNING {NOTE_COLUMNS}"#
        ))
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(note_from_row(&row))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(&format!(
            r#"SELECT {NOTE_COLUMNS} FROM notes WHERE "_id" = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: i64,
        page_size: i64,
        sort: SortKey,
    ) -> anyhow::Result<NotePage> {
        // Count and page run as two statements; a concurrent writer between
        // them can leave totalCount out of step with the returned rows.
        let total_count: i64 = sqlx::query_scalar(&count_sql(sort))
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&page_sql(sort))
            .bind(owner_id)
            .bind(page_size)
            .bind(page * page_size)
            .fetch_all(&self.pool)
            .await?;

        Ok(NotePage {
            total_count,
            notes: rows.iter().map(note_from_row).collect(),
        })
    }

    async fn update(&self, id: Uuid, title: &str, content: &str) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(&format!(
            r#"UPDATE notes SET "title" = $1, "content" = $2, "editedAt" = $3
               WHERE "_id" = $4
               RETURNING {NOTE_COLUMNS}"#
        ))
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn set_completed(&self, id: Uuid, completed: bool) -> anyhow::Result<Option<Note>> {
        let completed_at = completed.then(Utc::now);
        let row = sqlx::query(&format!(
            r#"UPDATE notes SET "completed" = $1, "completedAt" = $2
               WHERE "_id" = $3
               RETURNING {NOTE_COLUMNS}"#
        ))
        .bind(completed)
        .bind(completed_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(&format!(
            r#"DELETE FROM notes WHERE "_id" = $1 RETURNING {NOTE_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn mark_completed_for_owner(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> anyhow::Result<u64> {
        anyhow::ensure!(!ids.is_empty(), "ids must not be empty");
        let sql = format!(
            r#"UPDATE notes SET "completed" = TRUE, "completedAt" = NOW()
               WHERE "_id" IN ({}) AND "_ownerId" = ${}"#,
            in_placeholders(ids.len()),
            ids.len() + 1
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let result = query.bind(owner_id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_for_owner(&self, ids: &[Uuid], owner_id: Uuid) -> anyhow::Result<u64> {
        anyhow::ensure!(!ids.is_empty(), "ids must not be empty");
        let sql = format!(
            r#"DELETE FROM notes WHERE "_id" IN ({}) AND "_ownerId" = ${}"#,
            in_placeholders(ids.len()),
            ids.len() + 1
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }
        let result = query.bind(owner_id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sort_has_no_filter_and_no_tie_break() {
        let sql = page_sql(SortKey::parse("created_desc"));
        assert!(sql.contains(r#"WHERE "_ownerId" = $1 ORDER BY "createdAt" DESC LIMIT"#));
        assert!(!sql.contains("IS NOT NULL"));

        let count = count_sql(SortKey::parse("created_asc"));
        assert_eq!(count, r#"SELECT COUNT(*) FROM notes WHERE "_ownerId" = $1"#);
    }

    #[test]
    fn edited_sort_filters_nulls_and_breaks_ties_on_created_at() {
        let sql = page_sql(SortKey::parse("edited_asc"));
        assert!(sql.contains(r#"AND "editedAt" IS NOT NULL"#));
        assert!(sql.contains(r#"ORDER BY "editedAt" ASC, "createdAt" ASC"#));
    }

    #[test]
    fn completed_sort_keeps_the_tie_break_direction() {
        let sql = page_sql(SortKey::parse("completed_desc"));
        assert!(sql.contains(r#"AND "completedAt" IS NOT NULL"#));
        assert!(sql.contains(r#"ORDER BY "completedAt" DESC, "createdAt" DESC"#));
    }

    #[test]
    fn count_matches_the_page_filter() {
        let count = count_sql(SortKey::parse("completed_asc"));
        assert!(count.contains(r#"AND "completedAt" IS NOT NULL"#));
    }

    #[test]
    fn placeholder_list_is_sized_to_the_id_set() {
        assert_eq!(in_placeholders(1), "$1");
        assert_eq!(in_placeholders(3), "$1, $2, $3");
    }
}
