//! Picks which avatars appear on a card and where they want to sit.
//!
//! Catalog data (the artist image ids) is passed in by the caller; this module keeps no tables of
//! its own. Selection is keyed by the card index, so a card shows the same faces on every render.

use crate::model::BubbleSpec;
use crate::rng::Lcg64;
use serde::{Deserialize, Serialize};

/// A designed avatar position, e.g. "upper right, large".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarSlot {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub relative_size: f64,
}

impl AvatarSlot {
    pub const fn new(anchor_x: f64, anchor_y: f64, relative_size: f64) -> Self {
        Self {
            anchor_x,
            anchor_y,
            relative_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub slots: Vec<AvatarSlot>,
}

impl CardTemplate {
    /// Five avatars below the title: one large, two medium, two small.
    pub fn genre_card() -> Self {
        Self {
            slots: vec![
                AvatarSlot::new(0.72, 0.62, 0.38),
                AvatarSlot::new(0.26, 0.58, 0.26),
                AvatarSlot::new(0.40, 0.86, 0.22),
                AvatarSlot::new(0.12, 0.84, 0.14),
                AvatarSlot::new(0.90, 0.90, 0.12),
            ],
        }
    }
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self::genre_card()
    }
}

/// Shuffles `image_ids` deterministically for `index` and assigns them to the template's slots.
///
/// Yields `min(image_ids.len(), template.slots.len())` specs, in slot order.
pub fn compose_card(image_ids: &[String], template: &CardTemplate, index: u64) -> Vec<BubbleSpec> {
    let mut ids: Vec<&String> = image_ids.iter().collect();
    Lcg64::for_index(index).shuffle(&mut ids);

    template
        .slots
        .iter()
        .zip(ids)
        .map(|(slot, id)| BubbleSpec {
            image_id: id.clone(),
            anchor_x: slot.anchor_x,
            anchor_y: slot.anchor_y,
            relative_size: slot.relative_size,
        })
        .collect()
}
