use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;

pub struct UpdateNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> UpdateNote<'a, R> {
    /// Rewrites the note and stamps `editedAt`. Callers must have already
    /// resolved a concrete title; a request without one fails validation at
    /// the boundary instead of reaching storage.
    pub async fn execute(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Note>> {
        self.repo.update(id, title, content).await
    }
}
