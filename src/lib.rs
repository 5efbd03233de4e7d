//! olympic_scatter
//!
//! Scatterplots of Olympic country statistics with rebindable channels. The
//! library owns everything except pixels: dataset loading, layout bounds, axis
//! scales and tick labels, category colors, point sizes and hit-testing. The two
//! binaries put it on screen (`egui`) or into a file (`plotters`).
//!
//! ### Features
//! - Load a CSV dataset into a typed table (integer / real / text columns)
//! - Bind fields to the x, y and size channels and rebind them at runtime
//! - Stable per-category fill colors from a fixed palette
//! - Locale-aware tick labels
//! - SVG/PNG snapshots and grouped field statistics
//!
//! ### Example
//! ```no_run
//! use olympic_scatter::{Channel, Insets, PlotEvent, PlotSettings, PlotState, Viewport};
//!
//! let settings = PlotSettings::default();
//! let table = olympic_scatter::dataset::load_for_plot("olympics.csv", &settings)?;
//! let mut plot = PlotState::new(table, &settings, Viewport::new(720, 500, Insets::default()))?;
//! plot.handle(PlotEvent::Select { channel: Channel::X, field: "Silver".into() })?;
//! olympic_scatter::viz::render_snapshot(&plot, &Default::default(), "medals.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dataset;
pub mod error;
pub mod layout;
pub mod models;
pub mod palette;
pub mod plot;
pub mod scale;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod view;
pub mod viz;

pub use error::ScatterError;
pub use layout::{Insets, LayoutRegions, Rect, Viewport};
pub use models::{Channel, FieldBindings, Table, Value};
pub use plot::{PlotEvent, PlotState, VisualItem};
pub use settings::PlotSettings;
pub use view::PanZoom;
