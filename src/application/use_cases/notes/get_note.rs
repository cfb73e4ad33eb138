use uuid::Uuid;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;

pub struct GetNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> GetNote<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
        self.repo.get_by_id(id).await
    }
}
