mod aggregation;

pub use aggregation::{aggregate_points, histogram};
