use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;

pub struct DeleteNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> DeleteNote<'a, R> {
    /// Physical delete; returns the removed row so the caller can echo it.
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        self.repo.delete(id).await
    }
}
