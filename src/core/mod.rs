pub mod color;
pub mod label_format;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod range;
pub mod record;
pub mod scale;
pub mod series_builder;
pub mod types;
pub mod windowing;

pub use color::Color;
pub use label_format::{LabelPrecision, ValueFormatter, ValueLabeler, format_scientific};
pub use mapper::CoordinateMapper;
pub use model::{
    ChartModel, DashPattern, GridStyle, GuideLine, Region, SafeRegion, Series, YAxisConfig,
};
pub use normalize::{Comparator, NormalizedValue, ParseFailure, RawValue, normalize};
pub use policy::{MetricPolicyTable, PresentationPolicy};
pub use range::{ResolvedRange, resolve_range};
pub use record::{FieldAliases, Record, group_by_metric};
pub use scale::LinearScale;
pub use series_builder::{DateGranularity, SeriesBuilder};
pub use types::{Padding, PixelPoint, PlotArea, Viewport, ViewportConfig};
pub use windowing::CategoryWindow;
