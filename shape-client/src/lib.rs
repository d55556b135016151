//! Shape of Us client: profile input loop, single-shot session and report screens.

pub mod config;
pub mod input;
pub mod logging;
pub mod menu;
pub mod report;
pub mod session;

pub use config::Config;
pub use input::{read_profile, InputError};
pub use session::{Session, SessionError};
