use crate::db::Db;

// Explicit store handle shared across handlers; initialized once in main,
// no process-wide globals.
pub struct AppState {
    db: Db,
}

impl AppState {
    pub fn new(db: Db) -> AppState {
        AppState { db }
    }

    pub fn get_db(&self) -> &Db {
        &self.db
    }
}
