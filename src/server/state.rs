use std::sync::Arc;

use crate::db::Repository;

pub struct State {
    pub repository: Repository,
}

impl State {
    pub fn new(repository: Repository) -> Arc<Self> {
        Arc::new(Self { repository })
    }
}
