use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;

pub struct ToggleCompleted<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> ToggleCompleted<'a, R> {
    /// Flips the completion state the caller reported: a note submitted as
    /// not-completed becomes completed (stamping `completedAt`) and vice
    /// versa (clearing it).
    pub async fn execute(&self, id: Uuid, currently_completed: bool) -> anyhow::Result<Option<Note>> {
        self.repo.set_completed(id, !currently_completed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::notes::testing::RecordingNoteRepo;

    #[tokio::test]
    async fn toggling_twice_round_trips() {
        let repo = RecordingNoteRepo::default();
        let owner = Uuid::new_v4();
        let note = repo.create(owner, "A", "x").await.unwrap();
        let uc = ToggleCompleted { repo: &repo };

        let done = uc.execute(note.id, note.completed).await.unwrap().unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let undone = uc.execute(note.id, done.completed).await.unwrap().unwrap();
        assert!(!undone.completed);
        assert!(undone.completed_at.is_none());
    }
}
