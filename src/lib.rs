//! Personal recipe catalog.
//!
//! The [`server`] module exposes the recipes table as a JSON REST API; the
//! [`app`] and [`tui`] modules form a terminal client that keeps its list in
//! sync with the API by reloading after every change.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod models;
pub mod server;
pub mod services;
pub mod tui;
