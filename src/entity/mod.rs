//! SeaORM entity definitions for the SQLite database.

pub mod upload_record;
pub mod user;
