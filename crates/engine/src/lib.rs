//! EventScout Engine library.
//!
//! Server-side building blocks for the EventScout backend: the favorites
//! store, the ticketing partner client, and the music partner client that
//! shares one cached access token.
//!
//! ## Structure
//!
//! - `use_cases/` - Favorites orchestration over ports
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use infrastructure::config::EngineConfig;
pub use infrastructure::error::{EngineError, ErrorKind};
