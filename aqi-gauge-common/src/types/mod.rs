pub mod config;
pub mod display;
pub mod error;
pub mod reading;

pub use config::*;
pub use display::*;
pub use error::*;
pub use reading::*;
