use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime, config reload disabled: {}", e);
                return;
            }
        };

        rt.block_on(async {
            tokio::spawn(async move {
                if let Err(e) = crate::sys::watcher::run_async_watcher(tx).await {
                    log::error!("Config watcher stopped: {:#}", e);
                }
            });

            std::future::pending::<()>().await;
        });
    });
}
