pub mod core;
pub mod error;
pub mod filesystem;
pub mod shortcuts;
pub mod structs;
mod utils;

pub use utils::time::filetime_to_display;
