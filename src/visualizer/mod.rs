pub mod deltas;
pub mod poller;
pub mod renderer;

pub use deltas::{build_points, first_differences, rows_in_window, ChartPoint};
pub use poller::{TickOutcome, Visualizer};
pub use renderer::{ChartRenderer, SvgChartRenderer};
