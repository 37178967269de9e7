pub mod renderer;
pub mod transport;

pub use renderer::*;
pub use transport::*;
