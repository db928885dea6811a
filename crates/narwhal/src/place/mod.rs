//! Bubble layout engine: sorts specs largest-first and runs the placement search for each one
//! against the bubbles already placed and the reserved text rectangle.

pub mod search;

use crate::geom::{Rect, Size};
use crate::model::{BubbleSpec, LayoutResult, PlacedBubble};
use crate::rng::Lcg64;
use search::Search;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Height of the title/description area as a fraction of the container height.
    pub text_area_height_ratio: f64,
    /// Fixed padding added on top of the text area.
    pub text_top_padding: f64,
    /// Minimum clear gap between two circles, or a circle and the container/text area.
    pub margin: f64,
    /// Increment of the spiral parameter `t` in `[0, 1]`.
    pub spiral_step: f64,
    /// Angular speed of the spiral per unit of radius.
    pub spiral_angle_factor: f64,
    /// Maximum spiral radius as a fraction of the container's shorter side.
    pub spiral_reach: f64,
    pub spiral_attempts: usize,
    pub spiral_shrink: f64,
    pub grid_columns: usize,
    pub grid_rows: usize,
    pub grid_attempts: usize,
    pub grid_shrink: f64,
    pub corner_min_diameter: f64,
    /// Corner bubble diameter as a fraction of the container's shorter side.
    pub corner_ratio: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_area_height_ratio: 0.28,
            text_top_padding: 16.0,
            margin: 10.0,
            spiral_step: 0.03,
            spiral_angle_factor: 0.08,
            spiral_reach: 0.6,
            spiral_attempts: 4,
            spiral_shrink: 0.92,
            grid_columns: 8,
            grid_rows: 8,
            grid_attempts: 6,
            grid_shrink: 0.9,
            corner_min_diameter: 8.0,
            corner_ratio: 0.12,
        }
    }
}

impl LayoutOptions {
    pub fn with_text_area_height_ratio(mut self, ratio: f64) -> Self {
        self.text_area_height_ratio = ratio;
        self
    }
}

/// Area kept clear for the card's title and description, anchored at the top of the container.
pub fn reserved_rect(container: Size, options: &LayoutOptions) -> Rect {
    let height = container.height * options.text_area_height_ratio + options.text_top_padding;
    Rect::new(0.0, 0.0, container.width.max(0.0), height.max(0.0))
}

/// Places `specs` with the default options (text area ratio 0.28, margin 10).
///
/// `index` selects the card/context: the same index always yields the same arrangement.
pub fn place_bubbles(container: Size, specs: &[BubbleSpec], index: u64) -> Vec<PlacedBubble> {
    place_bubbles_with(container, specs, index, &LayoutOptions::default())
}

pub fn place_bubbles_with(
    container: Size,
    specs: &[BubbleSpec],
    index: u64,
    options: &LayoutOptions,
) -> Vec<PlacedBubble> {
    layout_bubbles(container, specs, index, options).placed
}

/// Like [`place_bubbles_with`], but also reports the reserved rectangle and any dropped ids.
///
/// A bubble is dropped only when the spiral, grid and corner tiers all fail, which takes extreme
/// crowding or a container too small for the margin. Degenerate containers drop every bubble.
pub fn layout_bubbles(
    container: Size,
    specs: &[BubbleSpec],
    index: u64,
    options: &LayoutOptions,
) -> LayoutResult {
    let _span = tracing::debug_span!("place_bubbles", index, specs = specs.len()).entered();

    let reserved = reserved_rect(container, options);
    let mut placed: Vec<PlacedBubble> = Vec::with_capacity(specs.len());
    let mut dropped: Vec<String> = Vec::new();

    if !container.is_usable() {
        tracing::debug!(
            width = container.width,
            height = container.height,
            "container has no usable area"
        );
        dropped.extend(specs.iter().map(|s| s.image_id.clone()));
        return LayoutResult {
            container,
            reserved,
            placed,
            dropped,
        };
    }

    // Stable sort: equal sizes keep their input order.
    let mut order: Vec<&BubbleSpec> = specs.iter().collect();
    order.sort_by(|a, b| b.relative_size.total_cmp(&a.relative_size));

    let mut rng = Lcg64::for_index(index);
    for spec in order {
        let phase = rng.next_angle();
        let diameter = spec.diameter_in(container);
        if !(diameter.is_finite() && diameter > 0.0) {
            tracing::debug!(image_id = %spec.image_id, diameter, "bubble has no usable size");
            dropped.push(spec.image_id.clone());
            continue;
        }

        let search = Search {
            container,
            reserved,
            placed: &placed,
            options,
        };
        match search.find(spec.anchor_in(container), diameter, phase) {
            Some(hit) => {
                tracing::trace!(
                    image_id = %spec.image_id,
                    x = hit.center.x,
                    y = hit.center.y,
                    diameter = hit.diameter,
                    tier = ?hit.tier,
                    "placed bubble"
                );
                placed.push(PlacedBubble {
                    image_id: spec.image_id.clone(),
                    center: hit.center,
                    diameter: hit.diameter,
                });
            }
            None => {
                tracing::debug!(image_id = %spec.image_id, "no placement tier fit; dropping bubble");
                dropped.push(spec.image_id.clone());
            }
        }
    }

    LayoutResult {
        container,
        reserved,
        placed,
        dropped,
    }
}
