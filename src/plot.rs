//! Plot binding controller.
//!
//! [`PlotState`] owns the loaded table, the channel bindings, the layout regions
//! and the visual table (one [`VisualItem`] per record). Resizes and field
//! selections both arrive as a [`PlotEvent`] through [`PlotState::handle`]; each
//! recomputes the regions and then re-runs the full ordered action list, so no
//! derived value can be left stale.

use crate::dataset::tooltip_label;
use crate::error::{Result, ScatterError};
use crate::layout::{LayoutRegions, Viewport};
use crate::models::{Channel, FieldBindings, Table};
use crate::palette::{CONTINENT_PALETTE, CategoryColors, MISSING_COLOR, Rgba};
use crate::scale::{AxisLabel, AxisScale, Orientation, ScaleDomain, map_locale};
use crate::settings::PlotSettings;
use crate::view::PanZoom;
use log::{debug, warn};
use num_format::Locale;

/// Point radius range in pixels for the size channel.
pub const MIN_RADIUS: f64 = 3.0;
pub const MAX_RADIUS: f64 = 15.0;

/// One step of the update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
    XAxis,
    YAxis,
    XLabels,
    YLabels,
    Fill,
    Size,
}

/// Executed in this order on every update.
pub const UPDATE_ACTIONS: [LayoutAction; 6] = [
    LayoutAction::XAxis,
    LayoutAction::YAxis,
    LayoutAction::XLabels,
    LayoutAction::YLabels,
    LayoutAction::Fill,
    LayoutAction::Size,
];

#[derive(Debug, Clone, PartialEq)]
pub enum PlotEvent {
    Resize(Viewport),
    Select { channel: Channel, field: String },
}

/// A record augmented with its rendering state.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualItem {
    pub row: usize,
    /// `None` when the bound x value cannot be placed (missing or unknown).
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub radius: f64,
    pub fill: Rgba,
    pub label: String,
}

impl VisualItem {
    pub fn center(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    pub fn is_visible(&self) -> bool {
        self.center().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PlotState {
    table: Table,
    bindings: FieldBindings,
    viewport: Viewport,
    regions: LayoutRegions,
    x_scale: AxisScale,
    y_scale: AxisScale,
    x_labels: Vec<AxisLabel>,
    y_labels: Vec<AxisLabel>,
    colors: CategoryColors,
    items: Vec<VisualItem>,
    locale: &'static Locale,
    decimal_sep: char,
}

impl PlotState {
    /// Bind the table per `settings` and run the initial draw pass.
    pub fn new(table: Table, settings: &PlotSettings, viewport: Viewport) -> Result<Self> {
        let bindings = settings.bindings();
        for channel in Channel::ALL.into_iter().filter(|c| c.is_rebindable()) {
            let field = bindings.get(channel);
            if !table.has_column(field) {
                return Err(ScatterError::UnknownField(field.to_string()));
            }
        }
        if table.is_empty() {
            return Err(ScatterError::EmptyTable);
        }

        let color_col = table
            .column_index(&bindings.color)
            .ok_or_else(|| ScatterError::UnknownField(bindings.color.clone()))?;
        let colors = CategoryColors::assign(&CONTINENT_PALETTE, table.column_values(color_col));
        let items = (0..table.len())
            .map(|row| VisualItem {
                row,
                x: None,
                y: None,
                radius: MIN_RADIUS,
                fill: MISSING_COLOR,
                label: tooltip_label(&table, row, &settings.label_field),
            })
            .collect();
        let (locale, decimal_sep) = map_locale(&settings.locale);

        let mut state = Self {
            x_scale: AxisScale::from_table(&table, &bindings.x, Orientation::Horizontal),
            y_scale: AxisScale::from_table(&table, &bindings.y, Orientation::Vertical),
            table,
            bindings,
            viewport,
            regions: LayoutRegions::default(),
            x_labels: Vec::new(),
            y_labels: Vec::new(),
            colors,
            items,
            locale,
            decimal_sep,
        };
        state.update();
        Ok(state)
    }

    /// Single entry point for user-interface events.
    pub fn handle(&mut self, event: PlotEvent) -> Result<()> {
        match event {
            PlotEvent::Resize(viewport) => {
                self.resize(viewport);
                Ok(())
            }
            PlotEvent::Select { channel, field } => self.rebind(channel, &field),
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update();
    }

    /// Point `channel` at `field`. Unknown fields and the fixed color channel are
    /// rejected without touching any state.
    pub fn rebind(&mut self, channel: Channel, field: &str) -> Result<()> {
        if !channel.is_rebindable() {
            warn!("ignoring attempt to rebind fixed channel {channel} to `{field}`");
            return Err(ScatterError::ChannelNotRebindable(channel));
        }
        if !self.table.has_column(field) {
            warn!("ignoring unknown field `{field}` for channel {channel}");
            return Err(ScatterError::UnknownField(field.to_string()));
        }
        self.bindings.set(channel, field);
        self.update();
        Ok(())
    }

    /// Tick labels are re-rendered with the new locale.
    pub fn set_locale(&mut self, tag: &str) {
        (self.locale, self.decimal_sep) = map_locale(tag);
        self.update();
    }

    fn update(&mut self) {
        self.regions.update(&self.viewport);
        for action in UPDATE_ACTIONS {
            self.run(action);
        }
        debug!(
            "update: viewport {}x{}, x={}, y={}, size={}, {} of {} items visible",
            self.viewport.width,
            self.viewport.height,
            self.bindings.x,
            self.bindings.y,
            self.bindings.size,
            self.items.iter().filter(|i| i.is_visible()).count(),
            self.items.len()
        );
    }

    fn run(&mut self, action: LayoutAction) {
        match action {
            LayoutAction::XAxis => {
                self.x_scale =
                    AxisScale::from_table(&self.table, &self.bindings.x, Orientation::Horizontal);
                for item in &mut self.items {
                    let value = self.table.get(item.row, &self.bindings.x);
                    item.x = self.x_scale.position(value, &self.regions.data);
                }
            }
            LayoutAction::YAxis => {
                self.y_scale =
                    AxisScale::from_table(&self.table, &self.bindings.y, Orientation::Vertical);
                for item in &mut self.items {
                    let value = self.table.get(item.row, &self.bindings.y);
                    item.y = self.y_scale.position(value, &self.regions.data);
                }
            }
            LayoutAction::XLabels => {
                self.x_labels =
                    self.x_scale
                        .labels(&self.regions.x_labels, self.locale, self.decimal_sep);
            }
            LayoutAction::YLabels => {
                self.y_labels =
                    self.y_scale
                        .labels(&self.regions.y_labels, self.locale, self.decimal_sep);
            }
            LayoutAction::Fill => {
                for item in &mut self.items {
                    item.fill = self
                        .colors
                        .color_for(self.table.get(item.row, &self.bindings.color));
                }
            }
            LayoutAction::Size => {
                let scale =
                    AxisScale::from_table(&self.table, &self.bindings.size, Orientation::Horizontal);
                let numeric = matches!(scale.domain, ScaleDomain::Numeric { .. });
                for item in &mut self.items {
                    let fraction = if numeric {
                        scale.fraction(self.table.get(item.row, &self.bindings.size))
                    } else {
                        None
                    };
                    item.radius = fraction
                        .map(|f| MIN_RADIUS + f * (MAX_RADIUS - MIN_RADIUS))
                        .unwrap_or(MIN_RADIUS);
                }
            }
        }
    }

    /// Topmost visible item under a screen point. Later rows are drawn above
    /// earlier ones, so the search runs back to front.
    pub fn item_at(&self, screen: (f64, f64), view: &PanZoom) -> Option<&VisualItem> {
        let (px, py) = view.invert(screen);
        self.items.iter().rev().find(|item| match item.center() {
            Some((cx, cy)) => (px - cx).powi(2) + (py - cy).powi(2) <= item.radius.powi(2),
            None => false,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn bindings(&self) -> &FieldBindings {
        &self.bindings
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn regions(&self) -> &LayoutRegions {
        &self.regions
    }

    pub fn x_labels(&self) -> &[AxisLabel] {
        &self.x_labels
    }

    pub fn y_labels(&self) -> &[AxisLabel] {
        &self.y_labels
    }

    pub fn items(&self) -> &[VisualItem] {
        &self.items
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &VisualItem> {
        self.items.iter().filter(|i| i.is_visible())
    }
}
