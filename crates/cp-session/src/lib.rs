//! Game sessions for Connections Plus: board state, guesses, hints and sharing.

pub mod error;
pub mod hints;
pub mod manager;
pub mod session;

pub use error::{Result, SessionError};
pub use hints::{HintAction, HintBoard, MAX_MARKS};
pub use manager::SessionManager;
pub use session::*;
