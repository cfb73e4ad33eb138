use std::sync::Arc;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    note_repo: Arc<dyn NoteRepository>,
}

impl AppServices {
    pub fn new(user_repo: Arc<dyn UserRepository>, note_repo: Arc<dyn NoteRepository>) -> Self {
        Self {
            user_repo,
            note_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn note_repo(&self) -> Arc<dyn NoteRepository> {
        self.services.note_repo.clone()
    }
}
