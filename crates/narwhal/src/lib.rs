#![forbid(unsafe_code)]

//! Deterministic, non-overlapping placement of circular avatars ("bubbles") on a card.
//!
//! Each bubble wants to sit at a designed anchor. The engine processes bubbles largest-first and
//! walks an outward spiral from each anchor until the circle clears every earlier bubble and the
//! card's reserved text area, shrinking and falling back to a grid scan and finally a corner slot
//! when the card is crowded. A card index seeds the search, so a given card always renders the
//! same arrangement.
//!
//! Everything here is synchronous and side-effect free; the result is a plain value that is
//! recomputed whenever the container size changes.

pub mod card;
pub mod error;
pub mod geom;
pub mod model;
pub mod parallax;
pub mod place;
pub mod rng;
pub mod svg;

pub use card::{AvatarSlot, CardTemplate, compose_card};
pub use error::{Error, Result};
pub use geom::{Point, Rect, Size, circle_intersects_rect, circles_overlap, clamp};
pub use model::{BubbleSpec, LayoutRequest, LayoutResult, PlacedBubble};
pub use parallax::{
    ParallaxOptions, TiltSample, TiltSource, apply_parallax, clamp_to_bounds, parallax_offset,
};
pub use place::{LayoutOptions, layout_bubbles, place_bubbles, place_bubbles_with, reserved_rect};
pub use rng::Lcg64;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point for a decoded request.
pub fn layout(request: &LayoutRequest) -> Result<LayoutResult> {
    request.validate()?;
    Ok(layout_bubbles(
        request.container,
        &request.specs,
        request.index,
        &request.options,
    ))
}
