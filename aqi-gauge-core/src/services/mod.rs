pub mod display_service;
pub mod display_state;
pub mod poller_service;
pub mod response_buffer;
pub mod schedule;

#[cfg(test)]
mod test_support;
