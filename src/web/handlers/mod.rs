//! HTML page handlers.

mod bridge;
mod home;
mod landing;
mod not_found;

pub use bridge::{BridgeForm, bridge_form_handler, bridge_submit_handler};
pub use home::home_handler;
pub use landing::{alternate_landing_handler, landing_handler};
pub use not_found::not_found_handler;
