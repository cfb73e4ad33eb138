use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::NotePage;
use crate::domain::notes::sort::SortKey;

pub struct BulkDelete<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> BulkDelete<'a, R> {
    /// Deletes the owner's listed notes. A destructive bulk action always
    /// lands the caller back on the first page, whatever page they were on.
    pub async fn execute(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
        page_size: i64,
        sort: SortKey,
    ) -> anyhow::Result<NotePage> {
        anyhow::ensure!(!ids.is_empty(), "at least one note id is required");
        self.repo.delete_for_owner(ids, owner_id).await?;
        self.repo.list_by_owner(owner_id, 0, page_size, sort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::notes::testing::RecordingNoteRepo;

    #[tokio::test]
    async fn always_returns_the_first_page_after_deleting() {
        let repo = RecordingNoteRepo::default();
        let owner = Uuid::new_v4();
        let ids = repo.seed(owner, 5);
        let uc = BulkDelete { repo: &repo };

        // Caller was on page 1 of size 3; after deleting two notes the
        // response must report page 0 of the remaining three.
        let page = uc
            .execute(&ids[..2], owner, 3, SortKey::parse("created_desc"))
            .await
            .unwrap();

        assert_eq!(page.total_count, 3);
        assert_eq!(page.notes.len(), 3);
        let list_calls = repo.list_calls.lock().unwrap();
        assert_eq!(list_calls.last(), Some(&(owner, 0, 3)));
    }

    #[tokio::test]
    async fn another_owners_notes_survive() {
        let repo = RecordingNoteRepo::default();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let ids = repo.seed(owner, 2);
        let other_ids = repo.seed(other, 2);
        let uc = BulkDelete { repo: &repo };

        // Targeting the other tenant's ids must not touch their rows.
        let mut targets = ids.clone();
        targets.extend_from_slice(&other_ids);
        uc.execute(&targets, owner, 10, SortKey::parse("created_desc"))
            .await
            .unwrap();

        let notes = repo.notes.lock().unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.owner_id == other));
    }

    #[tokio::test]
    async fn empty_id_set_is_rejected() {
        let repo = RecordingNoteRepo::default();
        let uc = BulkDelete { repo: &repo };
        assert!(
            uc.execute(&[], Uuid::new_v4(), 10, SortKey::parse("created_desc"))
                .await
                .is_err()
        );
        assert!(repo.deleted_calls.lock().unwrap().is_empty());
    }
}
