use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Size};
use crate::place::LayoutOptions;
use serde::{Deserialize, Serialize};

/// One avatar to scatter: a preferred anchor (fractions of the container) and a diameter given as
/// a fraction of the container's shorter side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleSpec {
    #[serde(alias = "imageId")]
    pub image_id: String,
    #[serde(alias = "anchorX")]
    pub anchor_x: f64,
    #[serde(alias = "anchorY")]
    pub anchor_y: f64,
    #[serde(alias = "relativeSize")]
    pub relative_size: f64,
}

impl BubbleSpec {
    pub fn new(
        image_id: impl Into<String>,
        anchor_x: f64,
        anchor_y: f64,
        relative_size: f64,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            anchor_x,
            anchor_y,
            relative_size,
        }
    }

    pub fn anchor_in(&self, container: Size) -> Point {
        Point::new(self.anchor_x * container.width, self.anchor_y * container.height)
    }

    pub fn diameter_in(&self, container: Size) -> f64 {
        self.relative_size * container.min_dim()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBubble {
    pub image_id: String,
    pub center: Point,
    pub diameter: f64,
}

impl PlacedBubble {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// A full layout job as read from JSON (CLI input, fixtures).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub container: Size,
    /// Card/context index; the same index always reproduces the same arrangement.
    #[serde(default)]
    pub index: u64,
    pub specs: Vec<BubbleSpec>,
    #[serde(default)]
    pub options: LayoutOptions,
}

impl LayoutRequest {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.container.width.is_finite() && self.container.height.is_finite()) {
            return Err(Error::InvalidContainer {
                width: self.container.width,
                height: self.container.height,
            });
        }

        let mut seen: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for spec in &self.specs {
            let invalid = |reason: &str| Error::InvalidSpec {
                image_id: spec.image_id.clone(),
                reason: reason.to_string(),
            };
            if !(spec.anchor_x.is_finite() && spec.anchor_y.is_finite()) {
                return Err(invalid("anchor must be finite"));
            }
            if !spec.relative_size.is_finite() {
                return Err(invalid("relative size must be finite"));
            }
            if !seen.insert(spec.image_id.as_str()) {
                return Err(Error::DuplicateImageId {
                    image_id: spec.image_id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub container: Size,
    pub reserved: Rect,
    pub placed: Vec<PlacedBubble>,
    /// Image ids no placement tier could fit. Rare; not an error.
    pub dropped: Vec<String>,
}
