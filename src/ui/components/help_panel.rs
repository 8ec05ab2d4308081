//! Help panel component
//!
//! The same text backs the `?` overlay and the `/help` screen.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders},
    Frame,
};

use super::dialogs::{common, scroll_behavior::ScrollPosition};
use crate::ui::core::{Action, Component};

pub const HELP_TEXT: &str = r"
CLAIMDESK - Insurance Claims Dashboard
======================================

NAVIGATION
----------
J/K         Next/previous section (Shift+j/k)
g           Go to a path, e.g. /claims/42 or /reset-password?token=...
Esc         Back / cancel / close dialogs
Tab         Next form field (Shift+Tab: previous)

CLAIMS LIST
-----------
j/k         Move selection down/up
Enter       Open selected claim
1-9         Sort by column; again to flip direction
n/p         Next/previous page
/           Search (policy, customer, employee, status, dates)
f           Filter the loaded page (employees, statuses, date range)
x           Clear search and filters
a           New claim
e           Edit selected claim
d           Delete selected claim (with confirmation)

CLAIM DETAIL
------------
e           Edit claim
d           Delete claim (with confirmation)
Esc         Back to the list

FORMS
-----
Enter       Submit (on the last field or with Ctrl+S anywhere)
Space       Toggle a checkbox field
←/→         Cycle a choice field (status, priority, ids)

REGISTRIES
----------
a           Add a customer or employee

ACCOUNT
-------
c           Change password (on the profile screen)
L           Sign out (on the settings screen)

GENERAL
-------
r           Reload the current screen
?           Toggle this help
G           Show application logs
q           Quit application (Ctrl+C also quits)

STATUS COLORS
-------------
Pending (orange), Approved (green), Rejected (red),
In Review (teal), In Progress (blue), Completed (sea green)

Documentation flags are shown as P E R C: photo evidence, estimate,
police report, contractor report.
";

/// The `/help` screen
#[derive(Default)]
pub struct HelpPage {
    scroll: ScrollPosition,
}

impl Component for HelpPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.scroll.handle_key(key);
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("📖 Help")
            .title_alignment(Alignment::Center);
        common::render_scrollable_text(f, rect, HELP_TEXT, self.scroll.offset, &mut self.scroll.scrollbar, Some(block));
    }
}
