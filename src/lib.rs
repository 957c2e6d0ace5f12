// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod pair;
pub mod pair_set;
pub mod runtime;
pub mod session;
pub mod ui;

pub use error::{GameError, LoadError};
pub use pair::{PairId, Side, WordPair};
pub use session::{SessionController, SessionEvent, SessionReport, SessionState};
