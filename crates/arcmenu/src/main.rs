use anyhow::Context;
use arcmenu::binding::{BindingRegistry, DispatchOutcome, MenuBinding, TargetId};
use arcmenu::config::{self, MenuConfig};
use arcmenu::controller::{BeginOutcome, MenuController, Presenter};
use arcmenu::geometry::{Insets, Point, ScreenBounds};
use arcmenu::item::MenuItem;
use arcmenu::menu::{HighlightChange, LabelPosition, Mode, Resolution, Session, is_left_side};
use arcmenu::script::parse_script;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "arcmenu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read settings from this file instead of the user config
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the button positions for a menu opened at X,Y as JSON.
    Layout {
        x: f64,
        y: f64,
        #[command(flatten)]
        screen: Screen,
        /// Number of items
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },
    /// Run a gesture script against a menu and print what happens.
    Replay {
        /// Script file, one event per line
        script: PathBuf,
        #[command(flatten)]
        screen: Screen,
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
        /// Open tap-mode menus instead of long-press ones
        #[arg(long)]
        tap: bool,
    },
    /// Write the default config file if there is none yet.
    InitConfig,
}

#[derive(Args, Debug, Clone)]
struct Screen {
    #[arg(long, default_value_t = 800.0)]
    width: f64,
    #[arg(long, default_value_t = 600.0)]
    height: f64,
    /// Safe-area inset applied on every edge
    #[arg(long, default_value_t = 0.0)]
    inset: f64,
}

impl Screen {
    fn bounds(&self) -> anyhow::Result<ScreenBounds> {
        if self.width <= 0.0 || self.height <= 0.0 {
            anyhow::bail!("Screen size must be positive, got {}x{}", self.width, self.height);
        }
        Ok(ScreenBounds::new(self.width, self.height).with_insets(Insets::uniform(self.inset)))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            x,
            y,
            screen,
            count,
        } => {
            let config = load(cli.config.as_deref())?;
            print_layout(&config, Point::new(x, y), screen.bounds()?, count)
        }
        Commands::Replay {
            script,
            screen,
            count,
            tap,
        } => {
            let config = load(cli.config.as_deref())?;
            let mode = if tap { Mode::Tap } else { config.mode };
            replay(&config, &script, screen.bounds()?, count, mode)
        }
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<MenuConfig> {
    match path {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_or_default()),
    }
}

#[derive(Serialize)]
struct LayoutReport {
    anchor: Point,
    start_angle: f64,
    left_side: bool,
    angles: Vec<f64>,
    positions: Vec<Point>,
}

fn print_layout(
    config: &MenuConfig,
    anchor: Point,
    bounds: ScreenBounds,
    count: usize,
) -> anyhow::Result<()> {
    let layout = config.layout();
    let report = LayoutReport {
        anchor,
        start_angle: layout.start_angle(anchor, &bounds),
        left_side: is_left_side(anchor, &bounds),
        angles: layout.angles(anchor, &bounds, count),
        positions: layout.positions(anchor, &bounds, count),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Prints every signal it receives.
struct ConsolePresenter {
    items: Vec<String>,
    label_margin: f64,
}

impl ConsolePresenter {
    fn name(&self, idx: Option<usize>) -> String {
        idx.and_then(|i| self.items.get(i))
            .cloned()
            .unwrap_or_else(|| "-".to_string())
    }
}

impl Presenter for ConsolePresenter {
    fn session_opened(&mut self, session: &Session) {
        self.items = session.items().iter().map(|i| i.label.to_string()).collect();
        let label = LabelPosition::for_anchor(session.anchor(), session.bounds());
        println!(
            "opened {} menu at ({:.1}, {:.1}), label {:?} with margin {}",
            session.mode(),
            session.anchor().x,
            session.anchor().y,
            label,
            self.label_margin
        );
        for slot in session.slots() {
            println!(
                "  [{}] {:<10} ({:.1}, {:.1})",
                slot.index,
                self.name(Some(slot.index)),
                slot.center.x,
                slot.center.y
            );
        }
    }

    fn highlight_changed(&mut self, change: HighlightChange) {
        println!(
            "highlight {} -> {}",
            self.name(change.previous),
            self.name(change.current)
        );
    }

    fn session_resolved(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Selected { index, item } => println!("selected [{}] {}", index, item.label),
            Resolution::Dismissed => println!("dismissed"),
        }
    }
}

fn replay(
    config: &MenuConfig,
    script: &Path,
    bounds: ScreenBounds,
    count: usize,
    mode: Mode,
) -> anyhow::Result<()> {
    let text = fs_err::read_to_string(script)?;
    let events = parse_script(&text)?;

    let items = (1..=count)
        .map(|n| {
            let label = format!("Item {n}");
            let message = label.clone();
            MenuItem::new(label).with_action(move || println!("action: {message}"))
        })
        .collect();
    let binding = MenuBinding {
        items,
        mode,
        highlight: config.highlight_config(),
    };

    let presenter = Rc::new(RefCell::new(ConsolePresenter {
        items: Vec::new(),
        label_margin: config.label_margin,
    }));
    let mut controller = MenuController::from_config(config);
    controller.attach_presenter(&presenter);

    let target = TargetId::new("replay");
    let mut registry = BindingRegistry::new().with_min_press(config.min_press_duration);
    registry.bind(target.clone(), binding);

    for event in events {
        log::debug!("Replaying {:?}", event);
        if let DispatchOutcome::Begin(BeginOutcome::Ignored) =
            registry.dispatch(&target, event, &bounds, &mut controller)
        {
            println!("ignored: a menu is already open");
        }
    }

    if controller.is_active() {
        log::warn!("Script ended with the menu still open");
    }
    Ok(())
}
