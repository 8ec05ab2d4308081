//! Constants used throughout the application
//!
//! Notification texts, dialog titles and layout limits live here so pages and
//! dialogs stay consistent.

/// Claims shown per page unless the config says otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "CLAIMDESK_API_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_NOTIFICATION_SECS: u64 = 4;

pub const APP_NAME: &str = "claimdesk";
pub const CONFIG_FILE_NAME: &str = "claimdesk.toml";
pub const TOKEN_FILE_NAME: &str = "token";
pub const LOG_FILE_NAME: &str = "claimdesk.log";

// Success Messages
pub const SUCCESS_CLAIM_CREATED: &str = "✅ Claim created";
pub const SUCCESS_CLAIM_UPDATED: &str = "✅ Claim updated";
pub const SUCCESS_CLAIM_DELETED: &str = "✅ Claim deleted";
pub const SUCCESS_CUSTOMER_CREATED: &str = "✅ Customer created";
pub const SUCCESS_EMPLOYEE_CREATED: &str = "✅ Employee created";
pub const SUCCESS_SIGNED_IN: &str = "✅ Signed in";
pub const SUCCESS_REGISTERED: &str = "✅ Account created";
pub const SUCCESS_RESET_EMAIL_SENT: &str = "✅ If the address is registered, a reset link is on its way";
pub const SUCCESS_PASSWORD_RESET: &str = "✅ Password reset, please sign in";
pub const SUCCESS_PASSWORD_CHANGED: &str = "✅ Password changed";
pub const SUCCESS_SIGNED_OUT: &str = "👋 Signed out";

// Error Messages
pub const ERROR_FETCH_FAILED: &str = "❌ Failed to fetch";
pub const ERROR_SAVE_FAILED: &str = "❌ Failed to save";
pub const ERROR_DELETE_FAILED: &str = "❌ Failed to delete";
pub const ERROR_SESSION_EXPIRED: &str = "🔒 Session expired, please sign in again";
pub const ERROR_CLAIM_NOT_FOUND: &str = "Claim not found";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const DIALOG_TITLE_FILTER: &str = "🔎 Filter claims";
pub const DIALOG_TITLE_DELETE: &str = "🗑 Delete claim";
pub const LOADING: &str = "⏳ Loading...";
pub const RETRY_HINT: &str = "Press 'r' to retry";

// UI Layout Constants
/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 24;
/// Minimum main area width to preserve usability
pub const MAIN_AREA_MIN_WIDTH: u16 = 20;
