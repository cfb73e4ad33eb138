use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::NotePage;
use crate::domain::notes::sort::SortKey;

pub struct ListNotes<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> ListNotes<'a, R> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        page: i64,
        page_size: i64,
        sort: SortKey,
    ) -> anyhow::Result<NotePage> {
        anyhow::ensure!(page >= 0, "page must not be negative");
        anyhow::ensure!(page_size > 0, "pageSize must be positive");
        self.repo.list_by_owner(owner_id, page, page_size, sort).await
    }
}
