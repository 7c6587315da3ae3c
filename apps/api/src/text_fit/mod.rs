// Dynamic text fitting for card labels.
// Tables live in `metrics` and are swappable at startup; `estimator` is pure.

pub mod estimator;
pub mod handlers;
pub mod metrics;

pub use metrics::TextMetrics;
