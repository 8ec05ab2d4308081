//! UI module for claimdesk
//!
//! This module handles all user interface components, pages, rendering, and
//! user interactions.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod pages;
pub mod renderer;

pub use app_component::AppComponent;
pub use layout::LayoutManager;
pub use renderer::run_app;
