//! User-drawn counting zones

pub mod draw;
pub mod store;
pub mod zone;

pub use draw::DrawGesture;
pub use store::{load_zones, ZoneStore};
pub use zone::{pick_color, Zone, ZONE_PALETTE};
