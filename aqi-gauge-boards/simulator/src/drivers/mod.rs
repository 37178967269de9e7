mod display;
mod network;

pub use display::ConsoleGauge;
pub use network::{FixtureTransport, ReqwestTransport, SimulatorTransport};
