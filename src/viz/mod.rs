//! Headless snapshots: draw a [`PlotState`] to **SVG** or **PNG**.
//!
//! Nothing is re-laid-out here. Regions, tick labels, point positions, sizes and
//! fills all come from the plot state, so a snapshot matches the interactive view
//! for the same viewport.

pub mod text;

use crate::plot::PlotState;
use crate::view::PanZoom;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use text::truncate_to_width;

pub const LABEL_FONT_PX: u32 = 11;
const GRID: RGBColor = RGBColor(220, 220, 220);
const LABEL_TEXT: RGBColor = RGBColor(90, 90, 90);

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            epaint_default_fonts::UBUNTU_LIGHT,
        )
        .is_err()
        {
            log::warn!("could not register the bundled sans-serif font");
        }
    });
}

/// Write the current plot to `out_path`; `.svg` selects SVG, anything else PNG.
/// The image size is the plot state's viewport size.
pub fn render_snapshot<P: AsRef<Path>>(state: &PlotState, view: &PanZoom, out_path: P) -> Result<()> {
    let vp = state.viewport();
    if vp.width <= 0 || vp.height <= 0 {
        return Err(anyhow!("viewport {}x{} has no area", vp.width, vp.height));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (vp.width as u32, vp.height as u32);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_snapshot(&root, state, view)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_snapshot(&root, state, view)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    log::info!("wrote snapshot to {}", out_path.display());
    Ok(())
}

fn draw_snapshot<DB>(root: &DrawingArea<DB, Shift>, state: &PlotState, view: &PanZoom) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let regions = state.regions();
    let px = |p: (f64, f64)| {
        let (x, y) = view.apply(p);
        (x.round() as i32, y.round() as i32)
    };
    let font = (FontFamily::SansSerif, LABEL_FONT_PX).into_font().color(&LABEL_TEXT);

    // Horizontal gridlines across the y-label strip, tick text at its left edge.
    let y_strip = regions.y_labels;
    for label in state.y_labels() {
        let y = label.position;
        root.draw(&PathElement::new(
            vec![px((regions.data.x as f64, y)), px((y_strip.right() as f64, y))],
            GRID.stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(
            label.text.clone(),
            px((y_strip.x as f64, y)),
            font.pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Vertical gridlines over the data area, tick text at the bottom of the x strip.
    let x_strip = regions.x_labels;
    for label in state.x_labels() {
        let x = label.position;
        root.draw(&PathElement::new(
            vec![px((x, regions.data.y as f64)), px((x, regions.data.bottom() as f64))],
            GRID.stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(
            label.text.clone(),
            px((x, x_strip.bottom() as f64)),
            font.pos(Pos::new(HPos::Center, VPos::Bottom)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    // Field names in the padding: y above the data area, x under the x strip.
    let bindings = state.bindings();
    let title_w = regions.data.width.max(0) as u32;
    root.draw(&Text::new(
        truncate_to_width(&bindings.y, LABEL_FONT_PX, title_w),
        px((regions.data.x as f64, (regions.data.y - 2) as f64)),
        font.pos(Pos::new(HPos::Left, VPos::Bottom)),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    root.draw(&Text::new(
        truncate_to_width(&bindings.x, LABEL_FONT_PX, title_w),
        px((regions.data.right() as f64, (x_strip.bottom() + 2) as f64)),
        font.pos(Pos::new(HPos::Right, VPos::Top)),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    for item in state.visible_items() {
        let Some(center) = item.center() else {
            continue;
        };
        let c = item.fill;
        let fill = RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0);
        let radius = (item.radius * view.scale).round().max(1.0) as i32;
        root.draw(&Circle::new(px(center), radius, fill.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
