//! Domain models for Salesboard.

pub mod dashboard;
pub mod table;
pub mod upload;
pub mod user;

// Re-export commonly used types
pub use dashboard::{ChartSeries, DashboardData, DashboardSnapshot, SalesTotals};
pub use table::DataTable;
pub use upload::{UploadEntry, UploadPreview};
pub use user::UserAccount;
