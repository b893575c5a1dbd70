use crate::gui::app::AppMsg;
use arcmenu::binding::TargetId;
use arcmenu::controller::{Presenter, Teardown};
use arcmenu::geometry::{Point, ScreenBounds};
use arcmenu::highlight::HighlightConfig;
use arcmenu::menu::{ButtonSlot, HighlightChange, LabelPosition, Resolution, Session};
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use std::time::{Duration, Instant};

/// Snapshot of the open menu, everything the canvas needs to draw it.
#[derive(Debug, Clone)]
pub struct Scene {
    pub anchor: Point,
    pub bounds: ScreenBounds,
    pub target: Option<TargetId>,
    pub highlight: HighlightConfig,
    pub button_radius: f64,
    pub slots: Vec<ButtonSlot>,
    pub labels: Vec<String>,
    pub colors: Vec<Srgba<f64>>,
    pub label_position: LabelPosition,
    pub selected: Option<usize>,
    pub closing_since: Option<Instant>,
}

impl Scene {
    fn from_session(session: &Session) -> Self {
        Self {
            anchor: session.anchor(),
            bounds: *session.bounds(),
            target: session.target().cloned(),
            highlight: session.highlight().clone(),
            button_radius: session.button_radius(),
            slots: session.slots().to_vec(),
            labels: session.items().iter().map(|i| i.label.to_string()).collect(),
            colors: session.items().iter().map(|i| i.color).collect(),
            label_position: LabelPosition::for_anchor(session.anchor(), session.bounds()),
            selected: None,
            closing_since: None,
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.selected
            .or_else(|| self.slots.iter().find(|s| s.highlighted).map(|s| s.index))
    }

    /// 1.0 while open, falling to 0.0 over the dismiss animation.
    pub fn opacity(&self) -> f64 {
        let Some(since) = self.closing_since else {
            return 1.0;
        };
        let duration = self.highlight.animation_duration.as_secs_f64();
        if duration <= 0.0 {
            return 0.0;
        }
        (1.0 - since.elapsed().as_secs_f64() / duration).clamp(0.0, 1.0)
    }
}

/// Draws the controller's menu on a [`gtk::DrawingArea`] and fades it out
/// before reporting teardown complete.
pub struct CanvasPresenter {
    scene: Option<Scene>,
    area: gtk::DrawingArea,
    sender: relm4::Sender<AppMsg>,
    pub label_margin: f64,
}

impl CanvasPresenter {
    pub fn new(area: gtk::DrawingArea, sender: relm4::Sender<AppMsg>, label_margin: f64) -> Self {
        Self {
            scene: None,
            area,
            sender,
            label_margin,
        }
    }

    pub fn set_area(&mut self, area: gtk::DrawingArea) {
        self.area = area;
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn clear(&mut self) {
        self.scene = None;
        self.area.queue_draw();
    }
}

impl Presenter for CanvasPresenter {
    fn session_opened(&mut self, session: &Session) {
        self.scene = Some(Scene::from_session(session));
        self.area.queue_draw();
    }

    fn highlight_changed(&mut self, change: HighlightChange) {
        if let Some(scene) = &mut self.scene {
            for slot in &mut scene.slots {
                slot.highlighted = Some(slot.index) == change.current;
            }
        }
        self.area.queue_draw();
    }

    fn session_resolved(&mut self, resolution: &Resolution) {
        if let Some(scene) = &mut self.scene {
            scene.selected = resolution.selected_index();
        }
    }

    fn dismiss(&mut self) -> Teardown {
        let Some(scene) = &mut self.scene else {
            return Teardown::Immediate;
        };
        let duration: Duration = scene.highlight.animation_duration;
        let deadline = Instant::now() + duration;
        scene.closing_since = Some(Instant::now());

        self.area.add_tick_callback(move |area, _| {
            area.queue_draw();
            if Instant::now() < deadline {
                glib::ControlFlow::Continue
            } else {
                glib::ControlFlow::Break
            }
        });

        let sender = self.sender.clone();
        glib::timeout_add_local_once(duration, move || sender.emit(AppMsg::TeardownComplete));
        Teardown::Deferred
    }
}
