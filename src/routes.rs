//! Client-side routes.
//!
//! Every screen is addressed by a path so navigation, the start route from
//! config and the `--route` flag all go through [`Route::parse`].

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Claims,
    ClaimDetail(i64),
    NewClaim,
    EditClaim(i64),
    Analytics,
    Settings,
    Employees,
    Profile,
    Help,
    Customers,
    Login,
    Register,
    ForgotPassword,
    ResetPassword { token: Option<String> },
    ChangePassword,
    NotFound(String),
}

impl Route {
    /// Routes listed in the sidebar, in display order.
    pub const SIDEBAR: [Route; 8] = [
        Route::Dashboard,
        Route::Claims,
        Route::NewClaim,
        Route::Customers,
        Route::Employees,
        Route::Analytics,
        Route::Profile,
        Route::Settings,
    ];

    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let (path_part, query) = match trimmed.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (trimmed, None),
        };
        let normalized = path_part.trim_end_matches('/');
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["claims"] => Route::Claims,
            ["claims", "new"] => Route::NewClaim,
            ["claims", "edit", id] => parse_id(id).map(Route::EditClaim).unwrap_or_else(|| not_found(trimmed)),
            ["claims", id] => parse_id(id).map(Route::ClaimDetail).unwrap_or_else(|| not_found(trimmed)),
            ["analytics"] => Route::Analytics,
            ["settings"] => Route::Settings,
            ["employees"] => Route::Employees,
            ["profile"] => Route::Profile,
            ["help"] => Route::Help,
            ["customers"] => Route::Customers,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ResetPassword {
                token: query.and_then(token_param),
            },
            ["change-password"] => Route::ChangePassword,
            _ => not_found(trimmed),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Claims => "/claims".to_string(),
            Route::ClaimDetail(id) => format!("/claims/{id}"),
            Route::NewClaim => "/claims/new".to_string(),
            Route::EditClaim(id) => format!("/claims/edit/{id}"),
            Route::Analytics => "/analytics".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Employees => "/employees".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Help => "/help".to_string(),
            Route::Customers => "/customers".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { token: Some(token) } => format!("/reset-password?token={token}"),
            Route::ResetPassword { token: None } => "/reset-password".to_string(),
            Route::ChangePassword => "/change-password".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Claims => "Claims",
            Route::ClaimDetail(_) => "Claim",
            Route::NewClaim => "New Claim",
            Route::EditClaim(_) => "Edit Claim",
            Route::Analytics => "Analytics",
            Route::Settings => "Settings",
            Route::Employees => "Employees",
            Route::Profile => "Profile",
            Route::Help => "Help",
            Route::Customers => "Customers",
            Route::Login => "Sign In",
            Route::Register => "Register",
            Route::ForgotPassword => "Forgot Password",
            Route::ResetPassword { .. } => "Reset Password",
            Route::ChangePassword => "Change Password",
            Route::NotFound(_) => "Not Found",
        }
    }

    /// Screens reachable without a token.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login
                | Route::Register
                | Route::ForgotPassword
                | Route::ResetPassword { .. }
                | Route::Help
                | Route::NotFound(_)
        )
    }

    pub fn requires_auth(&self) -> bool {
        !self.is_public()
    }

    /// Where to actually go: protected routes without a token go to login.
    pub fn resolve(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Login
        } else {
            self
        }
    }

    /// The sidebar entry that should be highlighted for this route.
    pub fn sidebar_index(&self) -> Option<usize> {
        let section = match self {
            Route::ClaimDetail(_) | Route::EditClaim(_) => Route::Claims,
            Route::ChangePassword => Route::Profile,
            other => other.clone(),
        };
        Route::SIDEBAR.iter().position(|r| *r == section)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse::<i64>().ok().filter(|id| *id > 0)
}

fn not_found(path: &str) -> Route {
    Route::NotFound(path.to_string())
}

fn token_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "token")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
