pub mod navigate;
pub mod output;
pub mod util;

pub use navigate::*;
pub use output::*;
pub use util::*;
