//! trend-chart-rs: lab-value trend charts for chronic-disease tracking.
//!
//! Raw readings (mixed numeric/string encodings, comparison-prefixed values
//! such as `"<3.0E+1"`) are normalized, grouped into per-metric series and
//! drawn as scrollable line charts with clinical overlays and touch tooltips.
//! Drawing goes through a backend-agnostic `RenderFrame`, replayed onto any
//! immediate-mode surface.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartOptions};
pub use error::{ChartError, ChartResult};
