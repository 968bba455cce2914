// Crate root for the RoomSense monitor server modules.

pub mod app;
pub mod buffers;
pub mod constants;
pub mod http;
pub mod model;
pub mod notify;
pub mod sampling;
pub mod sensor;
pub mod utils;
pub mod ws;
