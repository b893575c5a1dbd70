use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Zero-argument callback run when an item is selected.
pub type Action = Rc<dyn Fn()>;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemLabel(String);

/// Icon reference handed through to the presenter untouched.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(ItemLabel, IconName);

#[derive(Clone)]
pub struct MenuItem {
    pub label: ItemLabel,
    pub icon: Option<IconName>,
    pub color: Srgba<f64>,
    action: Option<Action>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: ItemLabel::new(label),
            icon: None,
            color: Srgba::new(1.0, 1.0, 1.0, 1.0),
            action: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(IconName::new(icon));
        self
    }

    pub fn with_color(mut self, color: Srgba<f64>) -> Self {
        self.color = color;
        self
    }

    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Runs the action, returning whether there was one.
    pub fn invoke(&self) -> bool {
        self.action.as_ref().map(|action| action()).is_some()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("color", &self.color)
            .field("has_action", &self.has_action())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_invoke_runs_action_once() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let item = MenuItem::new("Copy").with_action(move || counter.set(counter.get() + 1));

        assert!(item.invoke());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_invoke_without_action() {
        let item = MenuItem::new("Share").with_icon("square.and.arrow.up");
        assert!(!item.invoke());
        assert_eq!(item.label.as_str(), "Share");
        assert_eq!(item.icon.as_ref().map(IconName::as_str), Some("square.and.arrow.up"));
    }

    #[test]
    fn test_names_from_str() {
        assert_eq!(ItemLabel::from("Reply"), ItemLabel::new(String::from("Reply")));
        assert_eq!(IconName::from("arrow.left").to_string(), "arrow.left");
    }
}
