//! Log transformations. Each takes a log and returns a new one; row count
//! changes only in the filters and row order never changes.

pub mod activity;
pub mod duration;
pub mod encode;
pub mod group;
pub mod scale;
pub mod temporal;
pub mod window;

pub use activity::{
    activity_count, activity_counts, count_column, filter_by_activity_count, sequence_length,
    trace_count, SEQUENCE_LENGTH_COL,
};
pub use duration::{
    cumulative_duration, event_duration, total_duration, DurationColumn,
    CUMULATIVE_DURATION_COL, DURATION_COL, TOTAL_DURATION_COL,
};
pub use encode::{one_hot_encode, ColumnSelection};
pub use group::{aggregate_and_join, aggregate_mapping_and_join, over_group};
pub use scale::scale_features;
pub use temporal::{time_attributes, HOUR_COL, MONTH_COL, WEEKDAY_COL};
pub use window::filter_by_time_window;
