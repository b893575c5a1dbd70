use crate::events::AppEvent;
use anyhow::Context;
use arcmenu::config::get_config_path;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;

/// Sends [`AppEvent::ConfigReload`] whenever the config file is written,
/// created or removed. Returns once the receiving side is gone.
pub async fn run_async_watcher(tx: Sender<AppEvent>) -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .context("Config path has no parent directory")?;

    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .context("Failed to create watcher")?;

    watcher
        .watch(config_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", config_dir.display()))?;

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if touches_config(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}
