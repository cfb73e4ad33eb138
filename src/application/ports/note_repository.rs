use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notes::note::{Note, NotePage};
use crate::domain::notes::sort::SortKey;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, owner_id: Uuid, title: &str, content: &str) -> anyhow::Result<Note>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>>;

    /// Sorted, filtered page of an owner's notes. `page` is zero-based;
    /// `total_count` reflects the filtered set, not the whole table.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: i64,
        page_size: i64,
        sort: SortKey,
    ) -> anyhow::Result<NotePage>;

    /// Rewrites title/content and stamps `editedAt`. None if the note is gone.
    async fn update(&self, id: Uuid, title: &str, content: &str) -> anyhow::Result<Option<Note>>;

    /// Sets the completion flag, stamping `completedAt` when completing and
    /// clearing it when un-completing.
    async fn set_completed(&self, id: Uuid, completed: bool) -> anyhow::Result<Option<Note>>;

    /// Deletes a single note, returning the deleted row.
    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Note>>;

    /// Marks every listed note of `owner_id` completed. `ids` must be
    /// non-empty. Returns the number of rows touched.
    async fn mark_completed_for_owner(&self, ids: &[Uuid], owner_id: Uuid)
    -> anyhow::Result<u64>;

    /// Deletes every listed note of `owner_id`. `ids` must be non-empty.
    async fn delete_for_owner(&self, ids: &[Uuid], owner_id: Uuid) -> anyhow::Result<u64>;
}
