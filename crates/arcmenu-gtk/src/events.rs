/// Messages from background services to the UI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
