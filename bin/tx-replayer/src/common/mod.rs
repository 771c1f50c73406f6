mod error;
mod logging;
mod output;

pub use error::*;
pub use logging::*;
pub use output::*;
