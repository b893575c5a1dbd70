//! Attaching menus to targets and routing their gestures to a controller.

use crate::controller::{BeginOutcome, MenuController};
use crate::events::GestureEvent;
use crate::geometry::ScreenBounds;
use crate::highlight::HighlightConfig;
use crate::item::MenuItem;
use crate::menu::{HighlightChange, MIN_PRESS_DURATION_MS, Mode, Resolution};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Identifies the element a menu is bound to.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TargetId(String);

crate::impl_string_newtype!(TargetId);

/// Items and behaviour of the menu opened from one target.
#[derive(Debug, Clone)]
pub struct MenuBinding {
    pub items: Vec<MenuItem>,
    pub mode: Mode,
    pub highlight: HighlightConfig,
}

impl MenuBinding {
    /// Highlights the source element with a contextual tilt unless
    /// overridden with [`MenuBinding::with_highlight`].
    pub fn long_press(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            mode: Mode::LongPress,
            highlight: HighlightConfig::with_contextual_rotation(),
        }
    }

    pub fn tap(items: Vec<MenuItem>) -> Self {
        Self {
            mode: Mode::Tap,
            ..Self::long_press(items)
        }
    }

    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Whether a press was held long enough to open a long-press menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    LongPress,
}

impl PressKind {
    pub fn classify(held: Duration, min_press: Duration) -> Self {
        if held >= min_press {
            Self::LongPress
        } else {
            Self::Tap
        }
    }
}

#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    Unbound,
    Begin(BeginOutcome),
    Highlight(Option<HighlightChange>),
    Resolved(Option<Resolution>),
}

#[derive(Debug)]
pub struct BindingRegistry {
    bindings: HashMap<TargetId, MenuBinding>,
    min_press: Duration,
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            min_press: Duration::from_millis(MIN_PRESS_DURATION_MS),
        }
    }
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_press(mut self, min_press: Duration) -> Self {
        self.min_press = min_press;
        self
    }

    pub fn min_press(&self) -> Duration {
        self.min_press
    }

    /// Replaces any binding already on `target`.
    pub fn bind(&mut self, target: TargetId, binding: MenuBinding) -> Option<MenuBinding> {
        self.bindings.insert(target, binding)
    }

    pub fn unbind(&mut self, target: &TargetId) -> Option<MenuBinding> {
        self.bindings.remove(target)
    }

    pub fn get(&self, target: &TargetId) -> Option<&MenuBinding> {
        self.bindings.get(target)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Feeds a gesture recognized on `target` into `controller`.
    ///
    /// Only `Began` and `Tapped` need the target to be bound: the first opens
    /// its menu, the second opens it too when no menu is up yet and the
    /// binding is a tap menu. `Pressed` becomes one of the two depending on
    /// how long it was held. Everything else goes to whichever menu is open.
    pub fn dispatch(
        &self,
        target: &TargetId,
        event: GestureEvent,
        bounds: &ScreenBounds,
        controller: &mut MenuController,
    ) -> DispatchOutcome {
        match event {
            GestureEvent::Began(anchor) => match self.get(target) {
                Some(binding) => DispatchOutcome::Begin(controller.begin_on(
                    target.clone(),
                    anchor,
                    *bounds,
                    binding,
                )),
                None => {
                    log::debug!("No menu bound to {}", target);
                    DispatchOutcome::Unbound
                }
            },
            GestureEvent::Changed(point) => DispatchOutcome::Highlight(controller.move_to(point)),
            GestureEvent::Ended => DispatchOutcome::Resolved(controller.end()),
            GestureEvent::Cancelled => DispatchOutcome::Resolved(controller.cancel()),
            GestureEvent::Tapped(point) if controller.is_active() => {
                DispatchOutcome::Resolved(controller.tap(point))
            }
            GestureEvent::Tapped(anchor) => match self.get(target) {
                Some(binding) if binding.mode == Mode::Tap => DispatchOutcome::Begin(
                    controller.begin_on(target.clone(), anchor, *bounds, binding),
                ),
                _ => DispatchOutcome::Unbound,
            },
            GestureEvent::Pressed { at, held } => {
                let event = match PressKind::classify(held, self.min_press) {
                    PressKind::LongPress => GestureEvent::Began(at),
                    PressKind::Tap => GestureEvent::Tapped(at),
                };
                self.dispatch(target, event, bounds, controller)
            }
        }
    }
}
