use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point `distance` away in direction `angle` (radians, y axis pointing down).
    pub fn offset_polar(&self, distance: f64, angle: f64) -> Self {
        Self::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min_x()..=self.max_x()).contains(&point.x)
            && (self.min_y()..=self.max_y()).contains(&point.y)
    }

    /// Same center, both sides multiplied by `factor`.
    pub fn scaled_about_center(&self, factor: f64) -> Self {
        let center = self.center();
        let (width, height) = (self.size.width * factor, self.size.height * factor);
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }
}

/// Visible area of the presenting surface.
///
/// Side and band decisions use the full `size`; clamping keeps buttons inside
/// the area left after `insets` are removed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub size: Size,
    #[serde(default)]
    pub insets: Insets,
}

impl ScreenBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            insets: Insets::default(),
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    pub fn clamp_area(&self) -> Rect {
        Rect::new(
            self.insets.left,
            self.insets.top,
            self.size.width - self.insets.left - self.insets.right,
            self.size.height - self.insets.top - self.insets.bottom,
        )
    }
}
