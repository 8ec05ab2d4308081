//! Reusable UI components

pub mod badge;
pub mod text_input;

// Component architecture
pub mod dialog_component;
pub mod dialogs;
pub mod form_component;
pub mod help_panel;
pub mod sidebar_component;
pub mod status_bar;

// Component exports
pub use dialog_component::DialogComponent;
pub use form_component::FormComponent;
pub use help_panel::HelpPage;
pub use sidebar_component::SidebarComponent;
pub use status_bar::StatusBar;
pub use text_input::TextInput;
