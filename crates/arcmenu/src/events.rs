use crate::geometry::Point;
use std::time::Duration;

/// Input from the gesture layer, in presenting-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began(Point),
    Changed(Point),
    Ended,
    Cancelled,
    Tapped(Point),
    /// A finished press whose hold time is known up front; classified
    /// against the registry's minimum press duration.
    Pressed { at: Point, held: Duration },
}
