use crate::binding::{MenuBinding, TargetId};
use crate::config::MenuConfig;
use crate::geometry::{Point, ScreenBounds};
use crate::menu::{ArcLayout, Ending, HighlightChange, MenuState, Resolution, Session};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Receives the controller's output signals and owns everything visual.
pub trait Presenter {
    fn session_opened(&mut self, session: &Session);

    fn highlight_changed(&mut self, change: HighlightChange);

    fn session_resolved(&mut self, resolution: &Resolution);

    /// Starts tearing the menu down. Returning [`Teardown::Deferred`] promises
    /// a later call to [`MenuController::teardown_complete`].
    fn dismiss(&mut self) -> Teardown {
        Teardown::Immediate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teardown {
    Immediate,
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionTiming {
    BeforeDismiss,
    AfterTeardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    Opened,
    /// Another menu is still open or tearing down.
    Ignored,
}

/// Owns the one menu that may be active at a time.
///
/// Signals go to a weakly held [`Presenter`]; when it is gone or busy the
/// signal is dropped and teardown completes immediately.
pub struct MenuController {
    state: MenuState,
    layout: ArcLayout,
    presenter: Option<Weak<RefCell<dyn Presenter>>>,
}

impl MenuController {
    pub fn new(layout: ArcLayout) -> Self {
        Self {
            state: MenuState::Idle,
            layout,
            presenter: None,
        }
    }

    pub fn from_config(config: &MenuConfig) -> Self {
        Self::new(config.layout())
    }

    /// Applies to menus opened after this call.
    pub fn set_layout(&mut self, layout: ArcLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &ArcLayout {
        &self.layout
    }

    pub fn attach_presenter<P: Presenter + 'static>(&mut self, presenter: &Rc<RefCell<P>>) {
        let presenter: Rc<RefCell<dyn Presenter>> = presenter.clone();
        self.presenter = Some(Rc::downgrade(&presenter));
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn begin(
        &mut self,
        anchor: Point,
        bounds: ScreenBounds,
        binding: &MenuBinding,
    ) -> BeginOutcome {
        self.open(anchor, bounds, binding, None)
    }

    pub fn begin_on(
        &mut self,
        target: TargetId,
        anchor: Point,
        bounds: ScreenBounds,
        binding: &MenuBinding,
    ) -> BeginOutcome {
        self.open(anchor, bounds, binding, Some(target))
    }

    fn open(
        &mut self,
        anchor: Point,
        bounds: ScreenBounds,
        binding: &MenuBinding,
        target: Option<TargetId>,
    ) -> BeginOutcome {
        if !self.state.is_idle() {
            log::warn!("Menu is already presented, ignoring new menu request");
            return BeginOutcome::Ignored;
        }

        let mut session = Session::open(
            anchor,
            bounds,
            binding.items.clone(),
            binding.mode,
            &self.layout,
        )
        .with_highlight(binding.highlight.clone());
        if let Some(target) = target {
            session = session.with_target(target);
        }

        log::debug!(
            "Opening {} menu at ({:.1}, {:.1}) with {} items",
            session.mode(),
            anchor.x,
            anchor.y,
            session.slots().len()
        );
        self.notify(|p| p.session_opened(&session));
        self.state = MenuState::Open(session);
        BeginOutcome::Opened
    }

    pub fn move_to(&mut self, point: Point) -> Option<HighlightChange> {
        let MenuState::Open(session) = &mut self.state else {
            return None;
        };
        let change = session.update_touch(point)?;

        log::debug!("Highlight {:?} -> {:?}", change.previous, change.current);
        self.notify(|p| p.highlight_changed(change));
        Some(change)
    }

    pub fn end(&mut self) -> Option<Resolution> {
        self.close(Ending::Released)
    }

    /// Dismisses even when a button is highlighted.
    pub fn cancel(&mut self) -> Option<Resolution> {
        self.close(Ending::Cancelled)
    }

    /// Discrete tap on an open menu; selects only in tap mode.
    ///
    /// A tapped button's action runs right away, before the menu starts
    /// tearing down.
    pub fn tap(&mut self, point: Point) -> Option<Resolution> {
        let resolution = self.state.session()?.resolve_tap(point);
        Some(self.finish(resolution, ActionTiming::BeforeDismiss))
    }

    fn close(&mut self, ending: Ending) -> Option<Resolution> {
        let resolution = self.state.session()?.resolve(ending);
        Some(self.finish(resolution, ActionTiming::AfterTeardown))
    }

    fn finish(&mut self, resolution: Resolution, timing: ActionTiming) -> Resolution {
        log::debug!(
            "Menu resolved: {}",
            resolution
                .item()
                .map_or_else(|| "dismissed".to_string(), |item| item.label.to_string())
        );
        self.state = MenuState::Closed(resolution.clone());
        self.notify(|p| p.session_resolved(&resolution));

        if timing == ActionTiming::BeforeDismiss {
            // nothing left to run once teardown completes
            self.state = MenuState::Closed(Resolution::Dismissed);
            resolution.run_action();
        }

        let mut teardown = Teardown::Immediate;
        if let Some(presenter) = self.presenter()
            && let Ok(mut p) = presenter.try_borrow_mut()
        {
            teardown = p.dismiss();
        }
        match teardown {
            Teardown::Deferred => log::debug!("Waiting for presenter teardown"),
            Teardown::Immediate => self.teardown_complete(),
        }
        resolution
    }

    /// Releases the closed session and runs the selected action, if any.
    /// Does nothing unless a resolved menu is waiting for teardown.
    pub fn teardown_complete(&mut self) {
        if !matches!(self.state, MenuState::Closed(_)) {
            return;
        }
        if let MenuState::Closed(resolution) = std::mem::take(&mut self.state) {
            resolution.run_action();
        }
    }

    fn presenter(&self) -> Option<Rc<RefCell<dyn Presenter>>> {
        self.presenter.as_ref()?.upgrade()
    }

    fn notify(&self, signal: impl FnOnce(&mut dyn Presenter)) {
        let Some(presenter) = self.presenter() else {
            log::debug!("No presenter attached, signal dropped");
            return;
        };
        match presenter.try_borrow_mut() {
            Ok(mut p) => signal(&mut *p),
            Err(_) => log::debug!("Presenter busy, signal dropped"),
        };
    }
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new(ArcLayout::default())
    }
}
