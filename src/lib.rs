//! Salesboard server library.
//!
//! This library provides the core functionality for the sales dashboard
//! server: account and session management, CSV upload storage, the upload
//! log, and dashboard assembly.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
