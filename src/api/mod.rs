//! API endpoint modules.

pub mod accounts;
pub mod dashboard;
pub mod health;
pub mod openapi;
pub mod uploads;

pub use accounts::configure_routes as configure_auth_routes;
pub use dashboard::configure_routes as configure_dashboard_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use uploads::configure_routes as configure_upload_routes;
