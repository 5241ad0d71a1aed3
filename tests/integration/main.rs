//! Integration tests for the Salesboard API.

mod helpers;

mod auth_flow;
mod dashboard_flow;
mod upload_flow;
