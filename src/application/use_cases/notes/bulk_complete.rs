use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::NotePage;
use crate::domain::notes::sort::SortKey;

pub struct BulkComplete<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> BulkComplete<'a, R> {
    /// Marks the owner's listed notes completed, then re-reads the caller's
    /// current page so the response reflects post-mutation state.
    pub async fn execute(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
        page: i64,
        page_size: i64,
        sort: SortKey,
    ) -> anyhow::Result<NotePage> {
        anyhow::ensure!(!ids.is_empty(), "at least one note id is required");
        self.repo.mark_completed_for_owner(ids, owner_id).await?;
        self.repo.list_by_owner(owner_id, page, page_size, sort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::notes::testing::RecordingNoteRepo;

    #[tokio::test]
    async fn scopes_the_mutation_to_the_owner_and_keeps_the_page() {
        let repo = RecordingNoteRepo::default();
        let owner = Uuid::new_v4();
        let ids = repo.seed(owner, 5);
        let uc = BulkComplete { repo: &repo };

        let page = uc
            .execute(&ids[..2], owner, 1, 3, SortKey::parse("created_desc"))
            .await
            .unwrap();

        let calls = repo.completed_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ids[..2].to_vec());
        assert_eq!(calls[0].1, owner);

        let list_calls = repo.list_calls.lock().unwrap();
        assert_eq!(list_calls.last(), Some(&(owner, 1, 3)));
        assert_eq!(page.total_count, 5);
    }

    #[tokio::test]
    async fn empty_id_set_is_rejected_before_any_query() {
        let repo = RecordingNoteRepo::default();
        let owner = Uuid::new_v4();
        let uc = BulkComplete { repo: &repo };

        let err = uc
            .execute(&[], owner, 0, 10, SortKey::parse("created_desc"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least one note id"));
        assert!(repo.completed_calls.lock().unwrap().is_empty());
        assert!(repo.list_calls.lock().unwrap().is_empty());
    }
}
