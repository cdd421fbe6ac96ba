use crate::error::{Result, SessionError};
use crate::session::{GameSession, SessionSnapshot};
use cp_core::{Palette, Puzzle};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Live games keyed by id.
pub struct SessionManager {
    sessions: Mutex<HashMap<Uuid, GameSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()) }
    }

    /// Start a game of `puzzle` with a freshly shuffled board.
    pub fn create(&self, puzzle: Puzzle, palette: &Palette) -> Result<(Uuid, SessionSnapshot)> {
        let session = GameSession::with_palette(puzzle, palette.clone(), &mut rand::thread_rng())?;
        let snapshot = session.summary();
        let id = self.insert(session);
        Ok((id, snapshot))
    }

    pub fn insert(&self, session: GameSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.lock().insert(id, session);
        debug!(%id, "session registered");
        id
    }

    pub fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot> {
        self.with_session(id, |s| Ok(s.summary()))
    }

    /// Run `f` against the session while holding the lock.
    pub fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut GameSession) -> Result<T>) -> Result<T> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        f(session)
    }

    pub fn remove(&self, id: Uuid) -> Option<GameSession> {
        self.sessions.lock().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
