use super::{ANGLE_STEP, BUTTON_SIZE, LEFT_BOUNDARY_RATIO, MENU_RADIUS, TOP_BOUNDARY_RATIO};
use crate::config::MenuConfig;
use crate::geometry::{Point, ScreenBounds};
use std::f64::consts::{FRAC_PI_2, PI};

/// Parameters of the arc the buttons are laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLayout {
    pub radius: f64,
    pub button_radius: f64,
    pub angle_step: f64,
    pub left_boundary_ratio: f64,
    pub top_boundary_ratio: f64,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self {
            radius: MENU_RADIUS,
            button_radius: BUTTON_SIZE / 2.0,
            angle_step: ANGLE_STEP,
            left_boundary_ratio: LEFT_BOUNDARY_RATIO,
            top_boundary_ratio: TOP_BOUNDARY_RATIO,
        }
    }
}

impl ArcLayout {
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            radius: config.menu_radius,
            button_radius: config.button_size / 2.0,
            angle_step: config.angle_step,
            left_boundary_ratio: config.left_boundary_ratio,
            top_boundary_ratio: config.top_boundary_ratio,
        }
    }

    /// Picks where the arc starts from the band the anchor falls in.
    ///
    /// The thresholds are fractions of the screen *center* coordinates. Any
    /// anchor below the top threshold gets an arc starting straight up; above
    /// it, anchors in the narrow left column start rightward and everything
    /// else starts leftward.
    pub fn start_angle(&self, anchor: Point, bounds: &ScreenBounds) -> f64 {
        let center = bounds.center();
        let left_boundary = center.x * self.left_boundary_ratio;
        let top_boundary = center.y * self.top_boundary_ratio;

        if anchor.y > top_boundary {
            -FRAC_PI_2
        } else if anchor.x < left_boundary {
            0.0
        } else {
            PI
        }
    }

    /// Raw angle of every button, before any clamping.
    pub fn angles(&self, anchor: Point, bounds: &ScreenBounds, count: usize) -> Vec<f64> {
        let start = self.start_angle(anchor, bounds);
        // sweep towards the larger open half of the screen
        let direction = if is_left_side(anchor, bounds) {
            1.0
        } else {
            -1.0
        };

        (0..count)
            .map(|i| start + direction * self.angle_step * i as f64)
            .collect()
    }

    pub fn positions(&self, anchor: Point, bounds: &ScreenBounds, count: usize) -> Vec<Point> {
        self.angles(anchor, bounds, count)
            .into_iter()
            .map(|angle| self.clamp(anchor.offset_polar(self.radius, angle), bounds))
            .collect()
    }

    /// Pushes a button center back inside the clamp area, one axis at a time.
    /// Neighbouring buttons may end up closer together near edges and corners.
    pub fn clamp(&self, position: Point, bounds: &ScreenBounds) -> Point {
        let area = bounds.clamp_area();
        Point::new(
            clamp_axis(position.x, area.min_x(), area.max_x(), self.button_radius),
            clamp_axis(position.y, area.min_y(), area.max_y(), self.button_radius),
        )
    }
}

fn clamp_axis(value: f64, min: f64, max: f64, radius: f64) -> f64 {
    if value - radius < min {
        min + radius
    } else if value + radius > max {
        max - radius
    } else {
        value
    }
}

pub fn is_left_side(anchor: Point, bounds: &ScreenBounds) -> bool {
    anchor.x < bounds.width() / 2.0
}

/// Arc positions with the default angle step and boundary ratios.
pub fn compute_arc_positions(
    anchor: Point,
    bounds: &ScreenBounds,
    count: usize,
    radius: f64,
    button_radius: f64,
) -> Vec<Point> {
    ArcLayout {
        radius,
        button_radius,
        ..ArcLayout::default()
    }
    .positions(anchor, bounds, count)
}

/// Which way a highlighted view leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    Left,
    Right,
}

impl Tilt {
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

pub fn contextual_tilt(view_center: Point, screen_center: Point) -> Tilt {
    if view_center.x < screen_center.x {
        Tilt::Left
    } else {
        Tilt::Right
    }
}
