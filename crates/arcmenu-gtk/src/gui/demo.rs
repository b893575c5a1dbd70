//! The tiles shown on the demo canvas and the menus bound to them.

use arcmenu::binding::{BindingRegistry, MenuBinding, TargetId};
use arcmenu::config::MenuConfig;
use arcmenu::geometry::{Point, Rect, ScreenBounds};
use arcmenu::item::MenuItem;
use palette::Srgba;
use std::rc::Rc;

pub const TILE_CORNER_RADIUS: f64 = 12.0;
const COLUMNS: usize = 3;
const ROWS: usize = 2;
const GAP: f64 = 24.0;

struct TileSpec {
    name: &'static str,
    color: (f64, f64, f64),
    items: &'static [(&'static str, &'static str)],
}

const TILES: [TileSpec; COLUMNS * ROWS] = [
    TileSpec {
        name: "Inbox",
        color: (0.26, 0.52, 0.96),
        items: &[
            ("Reply", "mail-reply-sender"),
            ("Forward", "mail-forward"),
            ("Archive", "folder"),
            ("Delete", "user-trash"),
        ],
    },
    TileSpec {
        name: "Photos",
        color: (0.96, 0.62, 0.16),
        items: &[
            ("Share", "emblem-shared"),
            ("Favorite", "starred"),
            ("Delete", "user-trash"),
        ],
    },
    TileSpec {
        name: "Notes",
        color: (0.98, 0.82, 0.25),
        items: &[("Pin", "view-pin"), ("Copy", "edit-copy")],
    },
    TileSpec {
        name: "Music",
        color: (0.85, 0.27, 0.45),
        items: &[
            ("Play", "media-playback-start"),
            ("Queue", "view-list"),
            ("Like", "emblem-favorite"),
            ("Share", "emblem-shared"),
            ("Hide", "view-conceal"),
        ],
    },
    TileSpec {
        name: "Files",
        color: (0.30, 0.69, 0.45),
        items: &[("Open", "document-open")],
    },
    TileSpec {
        name: "Trash",
        color: (0.55, 0.55, 0.58),
        items: &[],
    },
];

#[derive(Debug, Clone)]
pub struct Tile {
    pub name: &'static str,
    /// Long-press menu.
    pub target: TargetId,
    /// Tap menu, opened with the secondary button.
    pub tap_target: TargetId,
    pub frame: Rect,
    pub color: Srgba<f64>,
}

/// Lays the tiles out in a grid filling `bounds` inside its insets.
pub fn tiles(bounds: &ScreenBounds) -> Vec<Tile> {
    let area = bounds.clamp_area();
    let width = ((area.size.width - GAP * (COLUMNS + 1) as f64) / COLUMNS as f64).max(0.0);
    let height = ((area.size.height - GAP * (ROWS + 1) as f64) / ROWS as f64).max(0.0);

    TILES
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let (col, row) = ((i % COLUMNS) as f64, (i / COLUMNS) as f64);
            let (r, g, b) = spec.color;
            Tile {
                name: spec.name,
                target: TargetId::new(spec.name),
                tap_target: TargetId::new(format!("{}:tap", spec.name)),
                frame: Rect::new(
                    area.min_x() + GAP + col * (width + GAP),
                    area.min_y() + GAP + row * (height + GAP),
                    width,
                    height,
                ),
                color: Srgba::new(r, g, b, 1.0),
            }
        })
        .collect()
}

pub fn tile_at(tiles: &[Tile], point: Point) -> Option<&Tile> {
    tiles.iter().find(|tile| tile.frame.contains(point))
}

pub fn find_tile<'a>(tiles: &'a [Tile], target: &TargetId) -> Option<&'a Tile> {
    tiles
        .iter()
        .find(|tile| &tile.target == target || &tile.tap_target == target)
}

/// Binds a long-press and a tap menu to every tile. Selected actions report
/// `"<tile>: <item>"` through `on_select`.
pub fn build_registry(config: &MenuConfig, on_select: Rc<dyn Fn(String)>) -> BindingRegistry {
    let highlight = config.highlight_config();
    let mut registry = BindingRegistry::new().with_min_press(config.min_press_duration);

    for spec in &TILES {
        let items: Vec<MenuItem> = spec
            .items
            .iter()
            .map(|(label, icon)| {
                let on_select = on_select.clone();
                let message = format!("{}: {}", spec.name, label);
                let (r, g, b) = spec.color;
                MenuItem::new(*label)
                    .with_icon(*icon)
                    .with_color(Srgba::new(r, g, b, 0.9))
                    .with_action(move || on_select(message.clone()))
            })
            .collect();

        registry.bind(
            TargetId::new(spec.name),
            MenuBinding::long_press(items.clone()).with_highlight(highlight.clone()),
        );
        registry.bind(
            TargetId::new(format!("{}:tap", spec.name)),
            MenuBinding::tap(items).with_highlight(highlight.clone()),
        );
    }

    registry
}
