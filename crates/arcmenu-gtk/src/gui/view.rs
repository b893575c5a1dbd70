use super::demo::{self, TILE_CORNER_RADIUS, Tile};
use super::presenter::Scene;
use crate::gui::theme::ThemeColors;
use arcmenu::geometry::{Rect, Size};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};

const HIGHLIGHTED_SLOT_SCALE: f64 = 1.15;
const LABEL_PADDING: f64 = 10.0;

fn set_color(cr: &Context, color: Srgba<f64>, opacity: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * opacity);
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.size.width / 2.0).min(rect.size.height / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(rect.max_x() - r, rect.min_y() + r, r, -FRAC_PI_2, 0.0);
    cr.arc(rect.max_x() - r, rect.max_y() - r, r, 0.0, FRAC_PI_2);
    cr.arc(rect.min_x() + r, rect.max_y() - r, r, FRAC_PI_2, PI);
    cr.arc(rect.min_x() + r, rect.min_y() + r, r, PI, 3.0 * FRAC_PI_2);
    cr.close_path();
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    rect: Rect,
    size: f64,
    color: Srgba<f64>,
    opacity: f64,
) -> Result<(), cairo::Error> {
    set_color(cr, color, opacity);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        let center = rect.center();
        cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)?;
    }
    Ok(())
}

struct TileRenderer<'a> {
    tile: &'a Tile,
    colors: &'a ThemeColors,
}

impl TileRenderer<'_> {
    fn draw(&self, cr: &Context, frame: Rect, radius: f64) -> Result<(), cairo::Error> {
        set_color(cr, self.tile.color, 1.0);
        rounded_rect(cr, frame, radius);
        cr.fill()?;
        draw_centered_text(cr, self.tile.name, frame, 18.0, self.colors.tile_text, 1.0)
    }

    /// Lifted copy of the tile the menu was opened from.
    fn draw_highlighted(&self, cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
        let config = &scene.highlight;
        let center = self.tile.frame.center();
        let transform = config.transform(center, scene.bounds.center());
        let frame = config.scaled_frame(self.tile.frame);
        let opacity = scene.opacity();

        cr.save()?;
        cr.translate(center.x, center.y);
        cr.rotate(transform.rotation * opacity);
        cr.translate(-center.x, -center.y);
        self.draw(cr, frame, config.corner_radius_for(TILE_CORNER_RADIUS))?;
        cr.restore()
    }
}

struct SlotRenderer<'a> {
    scene: &'a Scene,
    colors: &'a ThemeColors,
}

impl SlotRenderer<'_> {
    fn draw(&self, cr: &Context, idx: usize) -> Result<(), cairo::Error> {
        let Some(slot) = self.scene.slots.get(idx) else {
            return Ok(());
        };
        let opacity = self.scene.opacity();
        let highlighted = self.scene.highlighted() == Some(idx);
        let radius = if highlighted {
            self.scene.button_radius * HIGHLIGHTED_SLOT_SCALE
        } else {
            self.scene.button_radius
        };

        let fill = if highlighted {
            self.colors.slot_highlighted
        } else {
            self.scene.colors.get(idx).copied().unwrap_or(self.colors.label_bg)
        };
        set_color(cr, fill, opacity);
        cr.arc(slot.center.x, slot.center.y, radius, 0.0, 2.0 * PI);
        cr.fill_preserve()?;
        set_color(cr, self.colors.slot_outline, opacity);
        cr.set_line_width(1.5);
        cr.stroke()?;

        let initial: String = self
            .scene
            .labels
            .get(idx)
            .and_then(|label| label.chars().next())
            .map(String::from)
            .unwrap_or_default();
        let bounds = Rect::new(
            slot.center.x - radius,
            slot.center.y - radius,
            2.0 * radius,
            2.0 * radius,
        );
        draw_centered_text(cr, &initial, bounds, radius * 0.8, self.colors.tile_text, opacity)
    }
}

fn draw_label(
    cr: &Context,
    scene: &Scene,
    colors: &ThemeColors,
    margin: f64,
) -> Result<(), cairo::Error> {
    let Some(text) = scene.highlighted().and_then(|idx| scene.labels.get(idx)) else {
        return Ok(());
    };
    let opacity = scene.opacity();

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(16.0);
    let ext = cr.text_extents(text)?;
    let size = Size::new(
        ext.width() + 2.0 * LABEL_PADDING,
        ext.height() + 2.0 * LABEL_PADDING,
    );
    let frame = scene.label_position.frame(size, &scene.bounds, margin);

    set_color(cr, colors.label_bg, opacity);
    rounded_rect(cr, frame, size.height / 2.0);
    cr.fill()?;
    draw_centered_text(cr, text, frame, 16.0, colors.label_fg, opacity)
}

pub fn draw(
    cr: &Context,
    tiles: &[Tile],
    scene: Option<&Scene>,
    colors: &ThemeColors,
    label_margin: f64,
) -> Result<(), cairo::Error> {
    let lifted = scene
        .and_then(|s| s.target.as_ref())
        .and_then(|target| demo::find_tile(tiles, target));

    for tile in tiles {
        let hidden = scene.is_some_and(|s| s.highlight.hide_original)
            && lifted.is_some_and(|l| l.target == tile.target);
        if !hidden {
            TileRenderer { tile, colors }.draw(cr, tile.frame, TILE_CORNER_RADIUS)?;
        }
    }

    let Some(scene) = scene else {
        return Ok(());
    };

    set_color(cr, colors.scrim, scene.opacity());
    cr.paint()?;

    if let Some(tile) = lifted {
        TileRenderer { tile, colors }.draw_highlighted(cr, scene)?;
    }

    let slots = SlotRenderer { scene, colors };
    for idx in 0..scene.slots.len() {
        slots.draw(cr, idx)?;
    }

    draw_label(cr, scene, colors, label_margin)
}
