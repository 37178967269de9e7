pub mod api;
pub mod classifier;
pub mod decoder;

pub use api::{feed_endpoint, API_HOST_DEFAULT, STATION_DEFAULT};
pub use classifier::{classify, gauge_value, GAUGE_MAX};
pub use decoder::{decode, upstream_message};
