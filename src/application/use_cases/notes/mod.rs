pub mod bulk_complete;
pub mod bulk_delete;
pub mod create_note;
pub mod delete_note;
pub mod get_note;
pub mod list_notes;
pub mod toggle_completed;
pub mod update_note;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::application::ports::note_repository::NoteRepository;
    use crate::domain::notes::note::{Note, NotePage};
    use crate::domain::notes::sort::SortKey;

    /// In-memory note store that records bulk/list calls for assertions.
    #[derive(Default)]
    pub struct RecordingNoteRepo {
        pub notes: Mutex<Vec<Note>>,
        pub completed_calls: Mutex<Vec<(Vec<Uuid>, Uuid)>>,
        pub deleted_calls: Mutex<Vec<(Vec<Uuid>, Uuid)>>,
        pub list_calls: Mutex<Vec<(Uuid, i64, i64)>>,
    }

    impl RecordingNoteRepo {
        pub fn seed(&self, owner_id: Uuid, count: usize) -> Vec<Uuid> {
            let mut notes = self.notes.lock().unwrap();
            (0..count)
                .map(|i| {
                    let note = Note {
                        id: Uuid::new_v4(),
                        title: format!("note {i}"),
                        content: String::new(),
                        created_at: Utc::now(),
                        edited_at: None,
                        completed: false,
                        completed_at: None,
                        owner_id,
                    };
                    let id = note.id;
                    notes.push(note);
                    id
                })
                .collect()
        }
    }

    #[async_trait]
    impl NoteRepository for RecordingNoteRepo {
        async fn create(
            &self,
            owner_id: Uuid,
            title: &str,
            content: &str,
        ) -> anyhow::Result<Note> {
            let note = Note {
                id: Uuid::new_v4(),
                title: title.to_string(),
                content: content.to_string(),
                created_at: Utc::now(),
                edited_at: None,
                completed: false,
                completed_at: None,
                owner_id,
            };
            self.notes.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
            Ok(self.notes.lock().unwrap().iter().find(|n| n.id == id).cloned())
        }

        async fn list_by_owner(
            &self,
            owner_id: Uuid,
            page: i64,
            page_size: i64,
            _sort: SortKey,
        ) -> anyhow::Result<NotePage> {
            self.list_calls.lock().unwrap().push((owner_id, page, page_size));
            let notes: Vec<Note> = self
                .notes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.owner_id == owner_id)
                .cloned()
                .collect();
            let total_count = notes.len() as i64;
            let start = (page * page_size).max(0) as usize;
            let page_notes = notes
                .into_iter()
                .skip(start)
                .take(page_size.max(0) as usize)
                .collect();
            Ok(NotePage {
                total_count,
                notes: page_notes,
            })
        }

        async fn update(
            &self,
            id: Uuid,
            title: &str,
            content: &str,
        ) -> anyhow::Result<Option<Note>> {
            let mut notes = self.notes.lock().unwrap();
            Ok(notes.iter_mut().find(|n| n.id == id).map(|n| {
                n.title = title.to_string();
                n.content = content.to_string();
                n.edited_at = Some(Utc::now());
                n.clone()
            }))
        }

        async fn set_completed(&self, id: Uuid, completed: bool) -> anyhow::Result<Option<Note>> {
            let mut notes = self.notes.lock().unwrap();
            Ok(notes.iter_mut().find(|n| n.id == id).map(|n| {
                n.completed = completed;
                n.completed_at = completed.then(Utc::now);
                n.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Note>> {
            let mut notes = self.notes.lock().unwrap();
            let found = notes.iter().position(|n| n.id == id);
            Ok(found.map(|i| notes.remove(i)))
        }

        async fn mark_completed_for_owner(
            &self,
            ids: &[Uuid],
            owner_id: Uuid,
        ) -> anyhow::Result<u64> {
            self.completed_calls
                .lock()
                .unwrap()
                .push((ids.to_vec(), owner_id));
            let mut notes = self.notes.lock().unwrap();
            let mut touched = 0;
            for n in notes
                .iter_mut()
                .filter(|n| n.owner_id == owner_id && ids.contains(&n.id))
            {
                n.completed = true;
                n.completed_at = Some(Utc::now());
                touched += 1;
            }
            Ok(touched)
        }

        async fn delete_for_owner(&self, ids: &[Uuid], owner_id: Uuid) -> anyhow::Result<u64> {
            self.deleted_calls
                .lock()
                .unwrap()
                .push((ids.to_vec(), owner_id));
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| !(n.owner_id == owner_id && ids.contains(&n.id)));
            Ok((before - notes.len()) as u64)
        }
    }
}
