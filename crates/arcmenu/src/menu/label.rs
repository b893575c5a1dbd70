use crate::geometry::{Point, Rect, ScreenBounds, Size};

/// Where the highlighted item's label is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    LeftTop,
    RightTop,
    LeftCenter,
    RightCenter,
    LeftBottom,
    RightBottom,
}

impl LabelPosition {
    /// The label goes on the opposite side from the initial touch, so the
    /// finger never covers it.
    pub fn for_anchor(initial_touch: Point, bounds: &ScreenBounds) -> Self {
        if initial_touch.x < bounds.center().x {
            Self::RightCenter
        } else {
            Self::LeftCenter
        }
    }

    /// Frame of a label of size `label` placed `margin` in from the screen
    /// edge. Top and bottom placements also stay clear of the insets.
    pub fn frame(self, label: Size, bounds: &ScreenBounds, margin: f64) -> Rect {
        let left = margin;
        let right = bounds.width() - label.width - margin;
        let top = margin + bounds.insets.top;
        let middle = bounds.center().y - label.height / 2.0;
        let bottom = bounds.height() - label.height - margin - bounds.insets.bottom;

        let (x, y) = match self {
            Self::LeftTop => (left, top),
            Self::RightTop => (right, top),
            Self::LeftCenter => (left, middle),
            Self::RightCenter => (right, middle),
            Self::LeftBottom => (left, bottom),
            Self::RightBottom => (right, bottom),
        };

        Rect::new(x, y, label.width, label.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Insets;

    #[test]
    fn test_label_opposite_initial_touch() {
        let bounds = ScreenBounds::new(390.0, 844.0);
        assert_eq!(
            LabelPosition::for_anchor(Point::new(40.0, 700.0), &bounds),
            LabelPosition::RightCenter
        );
        assert_eq!(
            LabelPosition::for_anchor(Point::new(195.0, 700.0), &bounds),
            LabelPosition::LeftCenter
        );
    }

    #[test]
    fn test_label_frames() {
        let bounds = ScreenBounds::new(400.0, 800.0).with_insets(Insets {
            top: 50.0,
            left: 0.0,
            bottom: 30.0,
            right: 0.0,
        });
        let label = Size::new(100.0, 20.0);

        let cases = [
            (LabelPosition::RightCenter, Rect::new(260.0, 390.0, 100.0, 20.0)),
            (LabelPosition::LeftCenter, Rect::new(40.0, 390.0, 100.0, 20.0)),
            (LabelPosition::LeftTop, Rect::new(40.0, 90.0, 100.0, 20.0)),
            (LabelPosition::RightBottom, Rect::new(260.0, 710.0, 100.0, 20.0)),
        ];

        for (position, expected) in cases {
            assert_eq!(position.frame(label, &bounds, 40.0), expected, "{position:?}");
        }
    }
}
