//! Zone definition and colour palette

use serde::{Deserialize, Serialize};

use crate::core::types::{Rect, Vec2, ZoneId};

/// Colours assigned to new zones in creation order
pub const ZONE_PALETTE: [&str; 7] = [
    "#ef4444", // Red
    "#10b981", // Emerald
    "#3b82f6", // Blue
    "#f59e0b", // Amber
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#14b8a6", // Teal
];

/// Palette colour for the zone created at position `index`
pub fn pick_color(index: usize) -> &'static str {
    ZONE_PALETTE[index % ZONE_PALETTE.len()]
}

/// A user-drawn counting region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    /// Display hint, a CSS hex colour
    pub color: String,
    pub rect: Rect,
}

impl Zone {
    /// Build the zone created after `existing_count` others
    pub fn create(rect: Rect, existing_count: usize) -> Self {
        Self {
            id: ZoneId::new(),
            name: format!("Zone {}", existing_count + 1),
            color: pick_color(existing_count).to_string(),
            rect: rect.normalized(),
        }
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        self.rect.contains(pos)
    }
}
