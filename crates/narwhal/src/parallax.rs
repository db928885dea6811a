//! Tilt-driven parallax for placed avatars.
//!
//! Pure and O(1) per bubble; suitable for calling on every frame. The motion sensor is a
//! collaborator behind [`TiltSource`], so nothing here touches device APIs.

use crate::geom::{Point, Size, clamp};
use crate::model::PlacedBubble;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxOptions {
    /// Displacement in points for a unit roll/pitch at full scale.
    pub strength: f64,
    /// Diameter at which the falloff reaches its floor.
    pub reference_diameter: f64,
    pub falloff_exponent: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Gap kept between a tilted circle and the container edge.
    pub edge_margin: f64,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            strength: 40.0,
            reference_diameter: 120.0,
            falloff_exponent: 1.8,
            min_scale: 0.4,
            max_scale: 1.0,
            edge_margin: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    pub roll: f64,
    pub pitch: f64,
}

impl TiltSample {
    pub fn new(roll: f64, pitch: f64) -> Self {
        Self { roll, pitch }
    }
}

/// Source of device tilt samples (a motion sensor, a replay file, a test script).
pub trait TiltSource {
    fn next_sample(&mut self) -> Option<TiltSample>;
}

impl<I> TiltSource for I
where
    I: Iterator<Item = TiltSample>,
{
    fn next_sample(&mut self) -> Option<TiltSample> {
        self.next()
    }
}

/// Offset for one avatar with the default tuning. Larger avatars move less, down to 0.4x.
pub fn parallax_offset(roll: f64, pitch: f64, diameter: f64, is_active: bool) -> Point {
    parallax_offset_with(roll, pitch, diameter, is_active, &ParallaxOptions::default())
}

pub fn parallax_offset_with(
    roll: f64,
    pitch: f64,
    diameter: f64,
    is_active: bool,
    options: &ParallaxOptions,
) -> Point {
    if !is_active {
        return Point::ZERO;
    }
    let scale = falloff_scale(diameter, options);
    Point::new(
        roll * options.strength * scale,
        pitch * options.strength * scale,
    )
}

fn falloff_scale(diameter: f64, options: &ParallaxOptions) -> f64 {
    let normalized = diameter / options.reference_diameter;
    // Past the reference diameter the base would go negative; `powf` of a negative base is NaN.
    let base = (1.0 - normalized).max(0.0);
    clamp(
        base.powf(options.falloff_exponent),
        options.min_scale,
        options.max_scale,
    )
}

/// Moves `original` by `offset` while keeping the whole circle (plus an 8pt edge margin) inside
/// the container. Each axis is clamped independently.
pub fn clamp_to_bounds(original: Point, offset: Point, diameter: f64, container: Size) -> Point {
    clamp_to_bounds_with(original, offset, diameter, container, &ParallaxOptions::default())
}

pub fn clamp_to_bounds_with(
    original: Point,
    offset: Point,
    diameter: f64,
    container: Size,
    options: &ParallaxOptions,
) -> Point {
    let inset = diameter / 2.0 + options.edge_margin;
    let moved = original.offset(offset);
    Point::new(
        clamp_axis(moved.x, inset, container.width),
        clamp_axis(moved.y, inset, container.height),
    )
}

fn clamp_axis(value: f64, inset: f64, extent: f64) -> f64 {
    let (min, max) = (inset, extent - inset);
    if min > max {
        // The circle cannot fit on this axis; keep it centered.
        return extent / 2.0;
    }
    clamp(value, min, max)
}

/// Tilted centers for a whole layout, in the same order as `placed`.
pub fn apply_parallax(
    placed: &[PlacedBubble],
    tilt: TiltSample,
    container: Size,
    is_active: bool,
    options: &ParallaxOptions,
) -> Vec<Point> {
    placed
        .iter()
        .map(|bubble| {
            let offset =
                parallax_offset_with(tilt.roll, tilt.pitch, bubble.diameter, is_active, options);
            clamp_to_bounds_with(bubble.center, offset, bubble.diameter, container, options)
        })
        .collect()
}

/// Drains `source`, producing one frame of tilted centers per sample.
pub fn replay_tilt(
    placed: &[PlacedBubble],
    source: &mut impl TiltSource,
    container: Size,
    options: &ParallaxOptions,
) -> Vec<Vec<Point>> {
    let mut frames = Vec::new();
    while let Some(sample) = source.next_sample() {
        frames.push(apply_parallax(placed, sample, container, true, options));
    }
    frames
}
