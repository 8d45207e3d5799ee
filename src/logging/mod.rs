//! Logging infrastructure for console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::Log;
