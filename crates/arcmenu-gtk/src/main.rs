use arcmenu::config;
use arcmenu_gtk::gui::app::AppModel;
use arcmenu_gtk::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.arcmenu.demo");

    app.run::<AppModel>((config, rx));
}
