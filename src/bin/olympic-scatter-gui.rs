/*!
 * Desktop scatterplot of Olympic country statistics.
 *
 * - Pan with a left-button drag, zoom with a right-button drag or the scroll wheel
 * - Hover a point to see the country's medal counts
 * - Pick the x, y and size fields from the dropdowns below the plot
 */

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use olympic_scatter::viz::text::truncate_to_width;
use olympic_scatter::{Channel, PanZoom, PlotEvent, PlotSettings, PlotState, Viewport};
use olympic_scatter::{dataset, viz};
use std::path::{Path, PathBuf};

/// Approximate height of the selector panel, added to the plot height for the window.
const SELECTOR_PANEL_HEIGHT: f32 = 120.0;
const LABEL_FONT_PX: f32 = 11.0;
const GRID: egui::Color32 = egui::Color32::from_rgb(220, 220, 220);
const LABEL_TEXT: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);

#[derive(Parser, Debug)]
#[command(name = "olympic-scatter-gui", version, about = "Interactive Olympic scatterplot")]
struct GuiArgs {
    /// CSV dataset; a file picker opens when omitted
    data: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = GuiArgs::parse();

    let settings = match &args.settings {
        Some(path) => PlotSettings::from_json_file(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?,
        None => PlotSettings::default(),
    };

    let data_path = match args.data {
        Some(path) => path,
        None => pick_dataset().ok_or_else(|| anyhow!("no dataset selected"))?,
    };

    // Startup load failures are fatal.
    let plot = load_plot(&data_path, &settings, initial_viewport(&settings))
        .with_context(|| format!("error loading table from {}", data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                settings.window_width as f32,
                settings.window_height as f32 + SELECTOR_PANEL_HEIGHT,
            ])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Olympic Scatterplot"),
        ..Default::default()
    };

    eframe::run_native(
        "Olympic Scatterplot",
        options,
        Box::new(move |_cc| Ok(Box::new(ScatterApp::new(plot, settings, data_path)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

fn initial_viewport(settings: &PlotSettings) -> Viewport {
    Viewport::new(
        settings.window_width as i32,
        settings.window_height as i32,
        settings.insets,
    )
}

fn load_plot(path: &Path, settings: &PlotSettings, viewport: Viewport) -> Result<PlotState> {
    let table = dataset::load_for_plot(path, settings)?;
    Ok(PlotState::new(table, settings, viewport)?)
}

fn pick_dataset() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().add_filter("CSV", &["csv"]);
    if let Some(home) = dirs::home_dir() {
        dialog = dialog.set_directory(home);
    }
    dialog.pick_file()
}

/// Main application state
struct ScatterApp {
    plot: PlotState,
    settings: PlotSettings,
    data_path: PathBuf,
    view: PanZoom,
    // Screen point a right-button zoom drag started at, in plot-panel coordinates.
    zoom_anchor: Option<(f64, f64)>,

    status_message: String,
    error_message: String,
}

impl ScatterApp {
    fn new(plot: PlotState, settings: PlotSettings, data_path: PathBuf) -> Self {
        let status_message = format!("{} countries from {}", plot.items().len(), data_path.display());
        Self {
            plot,
            settings,
            data_path,
            view: PanZoom::default(),
            zoom_anchor: None,
            status_message,
            error_message: String::new(),
        }
    }

    fn dispatch(&mut self, event: PlotEvent) {
        match self.plot.handle(event) {
            Ok(()) => self.error_message.clear(),
            Err(err) => self.error_message = err.to_string(),
        }
    }

    fn open_dataset(&mut self) {
        let Some(path) = pick_dataset() else {
            return;
        };
        match load_plot(&path, &self.settings, *self.plot.viewport()) {
            Ok(plot) => {
                self.plot = plot;
                self.view.reset();
                self.status_message =
                    format!("{} countries from {}", self.plot.items().len(), path.display());
                self.error_message.clear();
                self.data_path = path;
            }
            Err(err) => {
                log::error!("failed to open {}: {err:#}", path.display());
                self.error_message = format!("Failed to open {}: {err:#}", path.display());
            }
        }
    }

    fn export_snapshot(&mut self) {
        let stem = self
            .data_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("scatterplot");
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .set_file_name(format!("{stem}.svg"))
            .save_file()
        else {
            return;
        };
        match viz::render_snapshot(&self.plot, &self.view, &path) {
            Ok(()) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Err(err) => self.error_message = format!("Failed to save snapshot: {err}"),
        }
    }

    fn selector_panel(&mut self, ui: &mut egui::Ui) {
        let mut events = Vec::new();
        ui.add_space(4.0);
        for (channel, title) in [
            (Channel::Size, "Size of points"),
            (Channel::Y, "Y-Axis"),
            (Channel::X, "X-Axis"),
        ] {
            ui.horizontal(|ui| {
                ui.label(title);
                let current = self.plot.bindings().get(channel);
                egui::ComboBox::from_id_salt(title)
                    .width(380.0)
                    .selected_text(truncate_to_width(current, 10, 380))
                    .show_ui(ui, |ui| {
                        for field in &self.settings.selectable_fields {
                            if ui.selectable_label(field == current, field.as_str()).clicked() {
                                events.push(PlotEvent::Select {
                                    channel,
                                    field: field.clone(),
                                });
                            }
                        }
                    });
            });
        }

        ui.horizontal(|ui| {
            if ui.button("Open dataset…").clicked() {
                self.open_dataset();
            }
            if ui.button("Export snapshot…").clicked() {
                self.export_snapshot();
            }
            if ui.button("Reset view").clicked() {
                self.view.reset();
            }
        });

        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        } else if !self.status_message.is_empty() {
            ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
        }
        ui.add_space(4.0);

        for event in events {
            self.dispatch(event);
        }
    }

    fn plot_panel(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let origin = rect.min;
        let local = |p: egui::Pos2| ((p.x - origin.x) as f64, (p.y - origin.y) as f64);

        let viewport = Viewport::new(
            rect.width().round() as i32,
            rect.height().round() as i32,
            self.settings.insets,
        );
        if viewport != *self.plot.viewport() {
            self.dispatch(PlotEvent::Resize(viewport));
        }

        // Pan: left drag. Zoom: right drag (down zooms in) around the press point, or scroll.
        if response.dragged_by(egui::PointerButton::Primary) {
            let d = response.drag_delta();
            self.view.pan(d.x as f64, d.y as f64);
        }
        if response.drag_started_by(egui::PointerButton::Secondary) {
            self.zoom_anchor = response.interact_pointer_pos().map(local);
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            && let Some(anchor) = self.zoom_anchor
        {
            let dy = response.drag_delta().y as f64;
            self.view.zoom_about(anchor, (1.0 + dy * 0.01).max(0.1));
        }
        if response.drag_stopped() {
            self.zoom_anchor = None;
        }
        if let Some(pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.view.zoom_about(local(pos), (scroll as f64 * 0.002).exp());
            }
        }

        let painter = painter.with_clip_rect(rect);
        self.paint(&painter, origin);

        let hovered = response
            .hover_pos()
            .and_then(|pos| self.plot.item_at(local(pos), &self.view))
            .map(|item| item.label.clone());
        if let Some(label) = hovered {
            response.on_hover_text_at_pointer(label);
        }
    }

    fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let view = self.view;
        let screen = |p: (f64, f64)| {
            let (x, y) = view.apply(p);
            egui::pos2(origin.x + x as f32, origin.y + y as f32)
        };
        let regions = self.plot.regions();
        let font = egui::FontId::proportional(LABEL_FONT_PX);
        let grid = egui::Stroke::new(1.0, GRID);

        let y_strip = regions.y_labels;
        for label in self.plot.y_labels() {
            let y = label.position;
            painter.line_segment(
                [screen((regions.data.x as f64, y)), screen((y_strip.right() as f64, y))],
                grid,
            );
            painter.text(
                screen((y_strip.x as f64, y)),
                egui::Align2::LEFT_CENTER,
                &label.text,
                font.clone(),
                LABEL_TEXT,
            );
        }

        let x_strip = regions.x_labels;
        for label in self.plot.x_labels() {
            let x = label.position;
            painter.line_segment(
                [
                    screen((x, regions.data.y as f64)),
                    screen((x, regions.data.bottom() as f64)),
                ],
                grid,
            );
            painter.text(
                screen((x, x_strip.bottom() as f64)),
                egui::Align2::CENTER_BOTTOM,
                &label.text,
                font.clone(),
                LABEL_TEXT,
            );
        }

        let bindings = self.plot.bindings();
        let title_w = regions.data.width.max(0) as u32;
        painter.text(
            screen((regions.data.x as f64, (regions.data.y - 2) as f64)),
            egui::Align2::LEFT_BOTTOM,
            truncate_to_width(&bindings.y, LABEL_FONT_PX as u32, title_w),
            font.clone(),
            LABEL_TEXT,
        );
        painter.text(
            screen((regions.data.right() as f64, (x_strip.bottom() + 2) as f64)),
            egui::Align2::RIGHT_TOP,
            truncate_to_width(&bindings.x, LABEL_FONT_PX as u32, title_w),
            font,
            LABEL_TEXT,
        );

        for item in self.plot.visible_items() {
            let Some(center) = item.center() else {
                continue;
            };
            let c = item.fill;
            painter.circle_filled(
                screen(center),
                (item.radius * view.scale) as f32,
                egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a),
            );
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("selectors").show(ctx, |ui| {
            self.selector_panel(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                self.plot_panel(ui);
            });
    }
}
