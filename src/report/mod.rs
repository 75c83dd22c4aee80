//! Read-only views over a generated plan: dashboard numbers, summaries, search and the
//! per-hall supervisor sheet.

mod filter;
mod hall;
mod summary;

pub use filter::{filter_plan, room_names};
pub use hall::{hall_report, HallReport, HallRow, HALL_REPORT_TITLE};
pub use summary::{branch_summary, dashboard, room_summary, CountRow, DashboardMetrics, PlanStatus};

pub use crate::storage::plan_to_csv;
