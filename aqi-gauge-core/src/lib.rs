#![cfg_attr(not(test), no_std)]

pub mod services;

pub use services::display_service::DisplayService;
pub use services::display_state::SharedDisplayState;
pub use services::poller_service::{PollerService, PollerState, PollerStats};
pub use services::response_buffer::ResponseBuffer;
pub use services::schedule::{NextTick, TickSchedule};
