//! claimdesk - A terminal dashboard for an insurance claims REST backend
//!
//! This library provides a keyboard-driven interface for browsing, searching,
//! filing and editing insurance claims, managing the customer and employee
//! registries, and viewing summary analytics. All data lives on the remote
//! backend; nothing is cached locally apart from the bearer token.
//!
//! # Modules
//!
//! * [`backend`] - REST client, request payloads and error taxonomy
//! * [`claims_list`] - Pagination, filter and sort pipeline of the claims table
//! * [`config`] - Application configuration management
//! * [`forms`] - Form state, validation and payload construction
//! * [`models`] - Domain view-models decoded from backend JSON
//! * [`ui`] - Terminal user interface components and pages
//! * [`utils`] - Formatting and date helpers

/// Dashboard figures and analytics chart series
pub mod analytics;
/// Bearer token storage
pub mod auth;
/// HTTP client layer for the claims REST backend
pub mod backend;
/// Claims list pagination, filtering and sorting
pub mod claims_list;
/// Configuration module for managing application settings
pub mod config;
/// Application constants and default values
pub mod constants;
/// Form state and validation
pub mod forms;
/// Log capture for the in-app logs dialog and the optional log file
pub mod logger;
/// Domain view-models
pub mod models;
/// Client-side routes
pub mod routes;
/// Terminal user interface components and rendering
pub mod ui;
/// Utility functions for formatting and date handling
pub mod utils;
