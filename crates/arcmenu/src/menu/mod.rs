pub mod label;
pub mod layout;
pub mod model;

pub use label::LabelPosition;
pub use layout::{ArcLayout, Tilt, compute_arc_positions, contextual_tilt, is_left_side};
pub use model::{ButtonSlot, Ending, HighlightChange, MenuState, Mode, Resolution, Session};

pub const BUTTON_SIZE: f64 = 50.0; // button diameter, also the hit diameter
pub const MENU_RADIUS: f64 = 100.0; // anchor to button center
pub const ANGLE_STEP: f64 = 0.6; // radians between neighbouring buttons
pub const LEFT_BOUNDARY_RATIO: f64 = 0.3; // of half the width
pub const TOP_BOUNDARY_RATIO: f64 = 0.3; // of half the height
pub const LABEL_MARGIN: f64 = 40.0;
pub const MIN_PRESS_DURATION_MS: u64 = 500;
pub const ANIMATION_DURATION_MS: u64 = 300;
