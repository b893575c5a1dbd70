use crate::events::AppEvent;
use crate::gui::demo::{self, Tile};
use crate::gui::presenter::CanvasPresenter;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view;
use arcmenu::binding::{BindingRegistry, DispatchOutcome, TargetId};
use arcmenu::config::{self, MenuConfig};
use arcmenu::controller::{BeginOutcome, MenuController};
use arcmenu::events::GestureEvent;
use arcmenu::geometry::{Insets, Point, ScreenBounds};
use arcmenu::menu::Mode;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const SAFE_AREA: f64 = 8.0;
const GTK_LONG_PRESS_MS: f64 = 500.0; // default gtk-long-press-time

pub struct AppModel {
    pub config: MenuConfig,
    pub controller: MenuController,
    pub registry: BindingRegistry,
    pub presenter: Rc<RefCell<CanvasPresenter>>,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
    pub long_press: gtk::GestureLongPress,
}

#[derive(Debug)]
pub enum AppMsg {
    LongPress(Point),
    Motion(Point),
    Released(Point),
    SecondaryPress(Point),
    Cancel,
    TeardownComplete,
    Selected(String),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn bounds(&self) -> ScreenBounds {
        let (w, h) = (self.drawing_area.width(), self.drawing_area.height());
        ScreenBounds::new(w as f64, h as f64).with_insets(Insets::uniform(SAFE_AREA))
    }

    fn tiles(&self) -> Vec<Tile> {
        demo::tiles(&self.bounds())
    }

    fn active_target(&self) -> Option<TargetId> {
        self.controller.session()?.target().cloned()
    }

    fn dispatch(&mut self, target: &TargetId, event: GestureEvent) {
        let bounds = self.bounds();
        if let DispatchOutcome::Begin(BeginOutcome::Ignored) =
            self.registry
                .dispatch(target, event, &bounds, &mut self.controller)
        {
            self.status = "A menu is already open".to_string();
        }
    }

    /// Sends `event` to the open menu, if there is one.
    fn dispatch_active(&mut self, event: GestureEvent) {
        if let Some(target) = self.active_target() {
            self.dispatch(&target, event);
        }
    }

    fn apply_config(&mut self, config: MenuConfig, sender: &ComponentSender<Self>) {
        self.controller.set_layout(config.layout());
        self.registry = demo::build_registry(&config, selection_sink(sender));
        self.long_press.set_delay_factor(delay_factor(&config));
        self.presenter.borrow_mut().label_margin = config.label_margin;
        self.config = config;
        self.drawing_area.queue_draw();
    }
}

/// GTK only accepts factors between 0.5 and 2.0.
fn delay_factor(config: &MenuConfig) -> f64 {
    (config.min_press_duration.as_millis() as f64 / GTK_LONG_PRESS_MS).clamp(0.5, 2.0)
}

fn selection_sink(sender: &ComponentSender<AppModel>) -> Rc<dyn Fn(String)> {
    let sender = sender.input_sender().clone();
    Rc::new(move |message| sender.emit(AppMsg::Selected(message)))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (MenuConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("arcmenu"),
            set_default_size: (800, 600),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Cancel);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,

                    add_controller = gtk::GestureDrag {
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Motion(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::Released(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Cancel);
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 3,
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::SecondaryPress(Point::new(x, y)));
                        }
                    }
                },

                gtk::Label {
                    add_css_class: "arcmenu-status",
                    set_xalign: 0.0,
                    #[watch]
                    set_label: &model.status,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let placeholder = gtk::DrawingArea::default();
        let model = AppModel {
            registry: demo::build_registry(&config, selection_sink(&sender)),
            controller: MenuController::from_config(&config),
            presenter: Rc::new(RefCell::new(CanvasPresenter::new(
                placeholder.clone(),
                sender.input_sender().clone(),
                config.label_margin,
            ))),
            config,
            status: "Long-press a tile, or right-click for a tap menu".to_string(),
            drawing_area: placeholder,
            long_press: gtk::GestureLongPress::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model
            .presenter
            .borrow_mut()
            .set_area(widgets.drawing_area.clone());
        model.controller.attach_presenter(&model.presenter);

        let input = sender.input_sender().clone();
        model.long_press.connect_pressed(move |_, x, y| {
            input.emit(AppMsg::LongPress(Point::new(x, y)));
        });
        model.long_press.set_delay_factor(delay_factor(&model.config));
        widgets.drawing_area.add_controller(model.long_press.clone());

        let presenter = model.presenter.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let bounds = ScreenBounds::new(width as f64, height as f64)
                    .with_insets(Insets::uniform(SAFE_AREA));
                let tiles = demo::tiles(&bounds);
                let presenter = presenter.borrow();
                if let Err(e) =
                    view::draw(cr, &tiles, presenter.scene(), &colors, presenter.label_margin)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::LongPress(point) => {
                let tiles = self.tiles();
                match demo::tile_at(&tiles, point) {
                    Some(tile) => self.dispatch(&tile.target, GestureEvent::Began(point)),
                    None => log::debug!("Long press outside any tile"),
                }
            }
            AppMsg::Motion(point) => self.dispatch_active(GestureEvent::Changed(point)),
            AppMsg::Released(point) => {
                let event = match self.controller.session().map(|s| s.mode()) {
                    Some(Mode::Tap) => GestureEvent::Tapped(point),
                    _ => GestureEvent::Ended,
                };
                self.dispatch_active(event);
            }
            AppMsg::SecondaryPress(point) => {
                if self.controller.is_active() {
                    self.dispatch_active(GestureEvent::Tapped(point));
                    return;
                }
                let tiles = self.tiles();
                if let Some(tile) = demo::tile_at(&tiles, point) {
                    self.dispatch(&tile.tap_target, GestureEvent::Tapped(point));
                }
            }
            AppMsg::Cancel => self.dispatch_active(GestureEvent::Cancelled),
            AppMsg::TeardownComplete => {
                self.presenter.borrow_mut().clear();
                self.controller.teardown_complete();
            }
            AppMsg::Selected(message) => {
                log::info!("Selected {}", message);
                self.status = format!("Selected {message}");
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_config(new_config, &sender);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
