//! Business logic services.

pub mod accounts;
pub mod csv;
pub mod dashboard;
pub mod history;
pub mod password;
pub mod session;
pub mod storage;
pub mod visualize;

pub use history::HistoryCache;
pub use session::{Session, SessionStore};
pub use storage::FileStore;
pub use visualize::{ChartBuilder, SalesChartBuilder};
