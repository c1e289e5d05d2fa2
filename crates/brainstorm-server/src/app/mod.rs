mod bootstrap;
mod logging;
mod state;

pub use bootstrap::{AppBootstrap, serve};
pub use logging::init_logging;
pub use state::AppState;
