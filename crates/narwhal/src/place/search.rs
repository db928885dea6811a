//! Three escalating strategies for finding a free center for one bubble:
//!
//! 1. an outward spiral from the bubble's anchor, shrinking the bubble between attempts;
//! 2. a row-major grid scan of the free interior, also shrinking between attempts;
//! 3. a small bubble pinned to the bottom-right interior corner.
//!
//! Every loop has a fixed upper bound, so a search always terminates.

use crate::geom::{Point, Rect, Size, circle_intersects_rect, circles_overlap, clamp};
use crate::model::PlacedBubble;
use crate::place::LayoutOptions;

/// Upper bound on samples along one spiral, regardless of `spiral_step`.
const MAX_SPIRAL_SAMPLES: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Spiral,
    Grid,
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub diameter: f64,
    pub tier: Tier,
}

pub struct Search<'a> {
    pub container: Size,
    pub reserved: Rect,
    pub placed: &'a [PlacedBubble],
    pub options: &'a LayoutOptions,
}

impl Search<'_> {
    /// Runs the tiers in order and returns the first hit.
    pub fn find(&self, anchor: Point, diameter: f64, phase: f64) -> Option<Placement> {
        if let Some(hit) = self.spiral(anchor, diameter, phase) {
            return Some(hit);
        }
        tracing::debug!(diameter, "spiral exhausted; falling back to grid scan");
        if let Some(hit) = self.grid(diameter) {
            return Some(hit);
        }
        tracing::debug!(diameter, "grid exhausted; falling back to corner placement");
        self.corner()
    }

    /// Free of the reserved rectangle and every placed bubble, with the margin added to `radius`.
    fn is_free(&self, center: Point, radius: f64) -> bool {
        let inflated = radius + self.options.margin;
        if circle_intersects_rect(center, inflated, &self.reserved) {
            return false;
        }
        !self
            .placed
            .iter()
            .any(|p| circles_overlap(center, inflated, p.center, p.radius()))
    }

    pub fn spiral(&self, anchor: Point, diameter: f64, phase: f64) -> Option<Placement> {
        let mut d = diameter;
        for _ in 0..self.options.spiral_attempts {
            if let Some(center) = self.spiral_attempt(anchor, d, phase) {
                return Some(Placement {
                    center,
                    diameter: d,
                    tier: Tier::Spiral,
                });
            }
            d *= self.options.spiral_shrink;
        }
        None
    }

    fn spiral_attempt(&self, anchor: Point, diameter: f64, phase: f64) -> Option<Point> {
        let opts = self.options;
        let r = diameter / 2.0;
        let m = opts.margin;

        let min_x = r + m;
        let max_x = self.container.width - r - m;
        let min_y = (r + m).max(self.reserved.bottom() + r + m);
        let max_y = self.container.height - r - m;
        if min_x > max_x || min_y > max_y {
            return None;
        }

        let max_radius = opts.spiral_reach * self.container.min_dim();
        for k in 0..=spiral_samples(opts.spiral_step) {
            let t = (k as f64 * opts.spiral_step).min(1.0);
            let radius = t * max_radius;
            let angle = phase + radius * opts.spiral_angle_factor;
            let candidate = Point::new(
                clamp(anchor.x + angle.cos() * radius, min_x, max_x),
                clamp(anchor.y + angle.sin() * radius, min_y, max_y),
            );
            if self.is_free(candidate, r) {
                return Some(candidate);
            }
        }
        None
    }

    pub fn grid(&self, diameter: f64) -> Option<Placement> {
        let (cols, rows) = (self.options.grid_columns, self.options.grid_rows);
        // A single row or column has no step between cells; the tier simply fails.
        if cols < 2 || rows < 2 {
            return None;
        }

        let mut d = diameter;
        for _ in 0..self.options.grid_attempts {
            if let Some(center) = self.grid_attempt(d, cols, rows) {
                return Some(Placement {
                    center,
                    diameter: d,
                    tier: Tier::Grid,
                });
            }
            d *= self.options.grid_shrink;
        }
        None
    }

    fn grid_attempt(&self, diameter: f64, cols: usize, rows: usize) -> Option<Point> {
        let r = diameter / 2.0;
        let m = self.options.margin;

        let min_x = r + m;
        let max_x = self.container.width - r - m;
        let min_y = r + m;
        let max_y = self.container.height - r - m;
        if min_x > max_x || min_y > max_y {
            return None;
        }

        let step_x = (max_x - min_x) / (cols - 1) as f64;
        let step_y = (max_y - min_y) / (rows - 1) as f64;
        let first_free_y = self.reserved.bottom() + r + m;

        for row in 0..rows {
            let y = min_y + row as f64 * step_y;
            if y < first_free_y {
                continue;
            }
            for col in 0..cols {
                let candidate = Point::new(min_x + col as f64 * step_x, y);
                if self.is_free(candidate, r) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Last resort: a small bubble in the bottom-right interior corner, below the text area.
    ///
    /// The bubble is pinned to the container's bottom edge, not to the text area's lower edge,
    /// which keeps it clear of bubbles that spiraled out from anchors just below the text.
    ///
    /// Rejected when the corner still touches the reserved rectangle, when the container is too
    /// narrow to hold it, or when an earlier bubble already sits there.
    pub fn corner(&self) -> Option<Placement> {
        let opts = self.options;
        let diameter = opts
            .corner_min_diameter
            .max(opts.corner_ratio * self.container.min_dim());
        let r = diameter / 2.0;
        let m = opts.margin;

        let center = Point::new(
            self.container.width - r - m,
            self.container.height - r - m,
        );
        if center.x < r + m || center.y < r + m {
            return None;
        }
        if !self.is_free(center, r) {
            return None;
        }
        Some(Placement {
            center,
            diameter,
            tier: Tier::Corner,
        })
    }
}

fn spiral_samples(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    ((1.0 / step).floor() as usize).min(MAX_SPIRAL_SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::{Search, Tier, spiral_samples};
    use crate::geom::{Point, Size};
    use crate::model::PlacedBubble;
    use crate::place::{LayoutOptions, reserved_rect};

    fn search<'a>(
        container: Size,
        placed: &'a [PlacedBubble],
        options: &'a LayoutOptions,
    ) -> Search<'a> {
        Search {
            container,
            reserved: reserved_rect(container, options),
            placed,
            options,
        }
    }

    #[test]
    fn default_step_samples_34_points() {
        // t = 0.00, 0.03, ..., 0.99
        assert_eq!(spiral_samples(0.03) + 1, 34);
        assert_eq!(spiral_samples(0.0), 0);
        assert_eq!(spiral_samples(f64::NAN), 0);
    }

    #[test]
    fn spiral_keeps_free_anchor() {
        let options = LayoutOptions::default();
        let container = Size::new(300.0, 400.0);
        let s = search(container, &[], &options);
        let hit = s.spiral(Point::new(150.0, 250.0), 90.0, 0.0).unwrap();
        assert_eq!(hit.tier, Tier::Spiral);
        assert_eq!(hit.center, Point::new(150.0, 250.0));
        assert_eq!(hit.diameter, 90.0);
    }

    #[test]
    fn spiral_pushes_anchor_below_reserved_area() {
        let options = LayoutOptions::default();
        let container = Size::new(300.0, 400.0);
        let s = search(container, &[], &options);
        let hit = s.spiral(Point::new(150.0, 20.0), 90.0, 1.0).unwrap();
        // reserved bottom 128 + radius 45 + margin 10
        assert!(hit.center.y >= 183.0 - 1e-9);
    }

    #[test]
    fn spiral_fails_when_container_too_small_for_any_attempt() {
        let options = LayoutOptions::default();
        let container = Size::new(30.0, 30.0);
        let s = search(container, &[], &options);
        assert!(s.spiral(Point::new(15.0, 15.0), 25.0, 0.0).is_none());
    }

    #[test]
    fn grid_skips_cells_taken_by_placed_bubbles() {
        let options = LayoutOptions::default();
        let container = Size::new(200.0, 200.0);
        let blocker = PlacedBubble {
            image_id: "blocker".to_string(),
            center: Point::new(40.0, 150.0),
            diameter: 40.0,
        };
        let placed = [blocker];
        let s = search(container, &placed, &options);
        let hit = s.grid(20.0).unwrap();
        assert_eq!(hit.tier, Tier::Grid);
        assert!((hit.center.x - 40.0).abs() > 1e-9 || (hit.center.y - 150.0).abs() > 1e-9);
        let gap = hit.center.distance_sq(Point::new(40.0, 150.0)).sqrt();
        assert!(gap >= 10.0 + 20.0 + 10.0 - 1e-9);
    }

    #[test]
    fn spiral_shrinks_by_eight_percent_per_attempt() {
        // Below the text area (bottom 72) there is 200 - 72 - 2 * 10 = 108 of vertical room.
        // 135 * 0.92^2 = 114.3 does not fit; 135 * 0.92^3 = 105.1 does.
        let options = LayoutOptions::default();
        let container = Size::new(300.0, 200.0);
        let s = search(container, &[], &options);
        let hit = s.spiral(Point::new(150.0, 150.0), 135.0, 0.0).unwrap();
        assert_eq!(hit.tier, Tier::Spiral);
        assert!((hit.diameter - 135.0 * 0.92_f64.powi(3)).abs() < 1e-9);

        let three_attempts = LayoutOptions {
            spiral_attempts: 3,
            ..Default::default()
        };
        let s = search(container, &[], &three_attempts);
        assert!(s.spiral(Point::new(150.0, 150.0), 135.0, 0.0).is_none());
    }

    #[test]
    fn grid_shrinks_by_ten_percent_per_attempt() {
        // 160 * 0.9^3 = 116.6 leaves no row below the text area; 160 * 0.9^4 = 105.0 does.
        let options = LayoutOptions::default();
        let container = Size::new(300.0, 200.0);
        let s = search(container, &[], &options);
        let hit = s.grid(160.0).unwrap();
        assert_eq!(hit.tier, Tier::Grid);
        let d = 160.0 * 0.9_f64.powi(4);
        assert!((hit.diameter - d).abs() < 1e-9);

        // Only the last row clears the text area; the scan takes its first column.
        let r = d / 2.0;
        assert!((hit.center.x - (r + 10.0)).abs() < 1e-9);
        assert!((hit.center.y - (200.0 - r - 10.0)).abs() < 1e-9);

        let four_attempts = LayoutOptions {
            grid_attempts: 4,
            ..Default::default()
        };
        let s = search(container, &[], &four_attempts);
        assert!(s.grid(160.0).is_none());
    }

    #[test]
    fn grid_scans_row_major() {
        // d = 20: cells step (280 - 20) / 7 across and (180 - 20) / 7 down. Rows above
        // 72 + 10 + 10 are skipped, so the first usable row is row 4.
        let options = LayoutOptions::default();
        let container = Size::new(300.0, 200.0);
        let step_x = 260.0 / 7.0;
        let row_y = 20.0 + 4.0 * (160.0 / 7.0);

        let s = search(container, &[], &options);
        let hit = s.grid(20.0).unwrap();
        assert!((hit.center.x - 20.0).abs() < 1e-9);
        assert!((hit.center.y - row_y).abs() < 1e-9);

        // Blocking the first cell moves the pick one column right, same row.
        let blocker = PlacedBubble {
            image_id: "blocker".to_string(),
            center: hit.center,
            diameter: 2.0,
        };
        let placed = [blocker];
        let s = search(container, &placed, &options);
        let hit = s.grid(20.0).unwrap();
        assert!((hit.center.x - (20.0 + step_x)).abs() < 1e-9);
        assert!((hit.center.y - row_y).abs() < 1e-9);
    }

    #[test]
    fn grid_with_single_column_fails() {
        let options = LayoutOptions {
            grid_columns: 1,
            ..Default::default()
        };
        let container = Size::new(200.0, 200.0);
        let s = search(container, &[], &options);
        assert!(s.grid(20.0).is_none());
    }

    #[test]
    fn corner_sits_in_bottom_right() {
        let options = LayoutOptions::default();
        let container = Size::new(100.0, 100.0);
        let s = search(container, &[], &options);
        let hit = s.corner().unwrap();
        assert_eq!(hit.tier, Tier::Corner);
        assert!((hit.diameter - 12.0).abs() < 1e-9);
        assert!((hit.center.x - 84.0).abs() < 1e-9);
        assert!((hit.center.y - 84.0).abs() < 1e-9);
    }

    #[test]
    fn corner_rejected_when_it_touches_reserved_area() {
        let options = LayoutOptions::default().with_text_area_height_ratio(0.9);
        let container = Size::new(100.0, 100.0);
        let s = search(container, &[], &options);
        assert!(s.corner().is_none());
    }
}
