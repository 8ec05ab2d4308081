pub mod common;
pub mod filter_dialog;
pub mod scroll_behavior;
pub mod search_dialog;
pub mod system_dialogs;

pub use filter_dialog::FilterDialog;
pub use search_dialog::SearchDialog;
