use super::layout::ArcLayout;
use crate::binding::TargetId;
use crate::geometry::{Point, ScreenBounds};
use crate::highlight::HighlightConfig;
use crate::item::MenuItem;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

/// How a menu reacts to touches once it is open.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    StrumDisplay,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Drag to highlight, release to select.
    #[default]
    LongPress,
    /// No tracking; each button is tapped directly.
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonSlot {
    pub index: usize,
    pub center: Point,
    pub highlighted: bool,
}

impl ButtonSlot {
    pub fn contains(&self, point: Point, hit_radius: f64) -> bool {
        self.center.distance(point) <= hit_radius
    }
}

/// One highlight transition, old slot cleared and new slot set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HighlightChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Released,
    Cancelled,
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Selected { index: usize, item: MenuItem },
    Dismissed,
}

impl Resolution {
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            Self::Selected { index, .. } => Some(*index),
            Self::Dismissed => None,
        }
    }

    pub fn item(&self) -> Option<&MenuItem> {
        match self {
            Self::Selected { item, .. } => Some(item),
            Self::Dismissed => None,
        }
    }

    pub fn is_dismissed(&self) -> bool {
        matches!(self, Self::Dismissed)
    }

    /// Runs the selected item's action, if any.
    pub fn run_action(&self) -> bool {
        self.item().is_some_and(MenuItem::invoke)
    }
}

/// Everything that lives exactly as long as one open menu.
#[derive(Debug, Clone)]
pub struct Session {
    anchor: Point,
    bounds: ScreenBounds,
    mode: Mode,
    hit_radius: f64,
    target: Option<TargetId>,
    highlight: HighlightConfig,
    items: Vec<MenuItem>,
    slots: Vec<ButtonSlot>,
    highlighted: Option<usize>,
}

impl Session {
    pub fn open(
        anchor: Point,
        bounds: ScreenBounds,
        items: Vec<MenuItem>,
        mode: Mode,
        layout: &ArcLayout,
    ) -> Self {
        let slots = layout
            .positions(anchor, &bounds, items.len())
            .into_iter()
            .enumerate()
            .map(|(index, center)| ButtonSlot {
                index,
                center,
                highlighted: false,
            })
            .collect();

        Self {
            anchor,
            bounds,
            mode,
            hit_radius: layout.button_radius,
            target: None,
            highlight: HighlightConfig::default(),
            items,
            slots,
            highlighted: None,
        }
    }

    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn bounds(&self) -> &ScreenBounds {
        &self.bounds
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Radius of each button, which is also its hit radius.
    pub fn button_radius(&self) -> f64 {
        self.hit_radius
    }

    pub fn target(&self) -> Option<&TargetId> {
        self.target.as_ref()
    }

    pub fn highlight(&self) -> &HighlightConfig {
        &self.highlight
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn slots(&self) -> &[ButtonSlot] {
        &self.slots
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// First slot in item order whose button covers `point`.
    pub fn slot_at(&self, point: Point) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.contains(point, self.hit_radius))
            .map(|slot| slot.index)
    }

    /// Moves the highlight to whatever is under `point`.
    ///
    /// Returns the transition when the highlighted slot changed. Tap menus
    /// never track the touch.
    pub fn update_touch(&mut self, point: Point) -> Option<HighlightChange> {
        if self.mode == Mode::Tap {
            return None;
        }

        let next = self.slot_at(point);
        if next == self.highlighted {
            return None;
        }

        let change = HighlightChange {
            previous: self.highlighted,
            current: next,
        };

        if let Some(slot) = change.previous.and_then(|idx| self.slots.get_mut(idx)) {
            slot.highlighted = false;
        }
        if let Some(slot) = change.current.and_then(|idx| self.slots.get_mut(idx)) {
            slot.highlighted = true;
        }
        self.highlighted = next;

        Some(change)
    }

    /// Outcome of the gesture finishing. A cancelled gesture never selects,
    /// and tap menus only select through [`Session::resolve_tap`].
    pub fn resolve(&self, ending: Ending) -> Resolution {
        match (self.mode, ending) {
            (Mode::LongPress, Ending::Released) => self
                .highlighted
                .map_or(Resolution::Dismissed, |idx| self.selected(idx)),
            _ => Resolution::Dismissed,
        }
    }

    /// Outcome of a discrete tap. Taps outside every button dismiss.
    pub fn resolve_tap(&self, point: Point) -> Resolution {
        match self.mode {
            Mode::Tap => self
                .slot_at(point)
                .map_or(Resolution::Dismissed, |idx| self.selected(idx)),
            Mode::LongPress => Resolution::Dismissed,
        }
    }

    fn selected(&self, index: usize) -> Resolution {
        self.items
            .get(index)
            .map_or(Resolution::Dismissed, |item| Resolution::Selected {
                index,
                item: item.clone(),
            })
    }
}

/// Lifecycle of the menu owned by a controller.
#[derive(Debug, Clone, Default)]
pub enum MenuState {
    #[default]
    Idle,
    Open(Session),
    /// Resolved and waiting for the presenter to finish tearing down.
    Closed(Resolution),
}

impl MenuState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Open(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n).map(|i| MenuItem::new(format!("Item {i}"))).collect()
    }

    fn open(mode: Mode) -> Session {
        // left column above the top band: arc starts rightward
        Session::open(
            Point::new(50.0, 60.0),
            ScreenBounds::new(800.0, 600.0),
            items(3),
            mode,
            &ArcLayout::default(),
        )
    }

    fn highlighted_count(session: &Session) -> usize {
        session.slots().iter().filter(|s| s.highlighted).count()
    }

    #[test]
    fn test_open_builds_one_slot_per_item_in_order() {
        let session = open(Mode::LongPress);
        assert_eq!(session.slots().len(), 3);
        for (i, slot) in session.slots().iter().enumerate() {
            assert_eq!(slot.index, i);
            assert!(!slot.highlighted);
        }
        assert_eq!(session.highlighted(), None);
    }

    #[test]
    fn test_move_switches_highlight_in_one_step() {
        let mut session = open(Mode::LongPress);
        let first = session.slots()[0].center;
        let second = session.slots()[1].center;

        let change = session.update_touch(first);
        assert_eq!(
            change,
            Some(HighlightChange {
                previous: None,
                current: Some(0)
            })
        );

        let change = session.update_touch(second);
        assert_eq!(
            change,
            Some(HighlightChange {
                previous: Some(0),
                current: Some(1)
            })
        );
        assert_eq!(highlighted_count(&session), 1);
        assert!(session.slots()[1].highlighted);
    }

    #[test]
    fn test_move_within_same_button_reports_nothing() {
        let mut session = open(Mode::LongPress);
        let center = session.slots()[2].center;

        assert!(session.update_touch(center).is_some());
        let nudged = Point::new(center.x + 3.0, center.y - 2.0);
        assert_eq!(session.update_touch(nudged), None);
        assert_eq!(session.highlighted(), Some(2));
    }

    #[test]
    fn test_move_off_buttons_clears_highlight() {
        let mut session = open(Mode::LongPress);
        session.update_touch(session.slots()[0].center);

        let change = session.update_touch(Point::new(700.0, 500.0));
        assert_eq!(
            change,
            Some(HighlightChange {
                previous: Some(0),
                current: None
            })
        );
        assert_eq!(highlighted_count(&session), 0);
    }

    #[test]
    fn test_hit_test_edge_is_inclusive() {
        let session = open(Mode::LongPress);
        let center = session.slots()[0].center;
        assert_eq!(session.slot_at(Point::new(center.x, center.y + 25.0)), Some(0));
        assert_eq!(session.slot_at(Point::new(center.x, center.y + 25.5)), None);
    }

    #[test]
    fn test_overlapping_buttons_prefer_item_order() {
        // clamped into the top edge, so neighbours overlap
        let session = Session::open(
            Point::new(300.0, 10.0),
            ScreenBounds::new(800.0, 600.0),
            items(3),
            Mode::LongPress,
            &ArcLayout::default(),
        );
        let (a, b) = (session.slots()[1].center, session.slots()[2].center);
        let between = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        assert!(session.slots()[1].contains(between, 25.0));
        assert!(session.slots()[2].contains(between, 25.0));
        assert_eq!(session.slot_at(between), Some(1));
    }

    #[test]
    fn test_never_more_than_one_highlight() {
        let mut session = open(Mode::LongPress);
        let mut path: Vec<Point> = session.slots().iter().map(|s| s.center).collect();
        path.extend([Point::new(0.0, 0.0), Point::new(140.0, 80.0), Point::new(90.0, 140.0)]);
        path.extend(session.slots().iter().rev().map(|s| s.center));

        for point in path {
            session.update_touch(point);
            assert!(highlighted_count(&session) <= 1);
            if let Some(idx) = session.highlighted() {
                assert!(session.slots()[idx].highlighted);
            }
        }
    }

    #[test]
    fn test_release_selects_highlighted_item() {
        let mut session = open(Mode::LongPress);
        session.update_touch(session.slots()[1].center);

        let resolution = session.resolve(Ending::Released);
        assert_eq!(resolution.selected_index(), Some(1));
        assert_eq!(resolution.item().map(|i| i.label.as_str()), Some("Item 1"));
    }

    #[test]
    fn test_cancel_never_selects() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut items = items(2);
        items[0] = MenuItem::new("Delete").with_action(move || counter.set(counter.get() + 1));

        let mut session = Session::open(
            Point::new(50.0, 60.0),
            ScreenBounds::new(800.0, 600.0),
            items,
            Mode::LongPress,
            &ArcLayout::default(),
        );
        session.update_touch(session.slots()[0].center);

        let resolution = session.resolve(Ending::Cancelled);
        assert!(resolution.is_dismissed());
        assert!(!resolution.run_action());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_release_without_highlight_dismisses() {
        let session = open(Mode::LongPress);
        assert!(session.resolve(Ending::Released).is_dismissed());
    }

    #[test]
    fn test_tap_mode_ignores_moves_and_selects_on_tap() {
        let mut session = open(Mode::Tap);
        let target = session.slots()[2].center;

        assert_eq!(session.update_touch(target), None);
        assert_eq!(highlighted_count(&session), 0);
        assert!(session.resolve(Ending::Released).is_dismissed());

        assert_eq!(session.resolve_tap(target).selected_index(), Some(2));
        assert!(session.resolve_tap(Point::new(700.0, 500.0)).is_dismissed());
    }

    #[test]
    fn test_empty_menu_never_highlights() {
        let mut session = Session::open(
            Point::new(400.0, 300.0),
            ScreenBounds::new(800.0, 600.0),
            Vec::new(),
            Mode::LongPress,
            &ArcLayout::default(),
        );
        assert!(session.slots().is_empty());
        assert_eq!(session.update_touch(Point::new(400.0, 200.0)), None);
        assert!(session.resolve(Ending::Released).is_dismissed());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("long-press".parse::<Mode>().unwrap(), Mode::LongPress);
        assert_eq!("TAP".parse::<Mode>().unwrap(), Mode::Tap);
        assert_eq!(Mode::LongPress.to_string(), "long-press");
    }
}
