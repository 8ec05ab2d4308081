//! Status bar component
//!
//! Shows the key hints for the current screen, a spinner line while a write
//! is in flight, and transient notifications that expire on their own.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    shown_at: Instant,
}

pub struct StatusBar {
    notification: Option<Notification>,
    lifetime: Duration,
}

impl StatusBar {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            notification: None,
            lifetime,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.show(message.into(), NotificationLevel::Success);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.show(message.into(), NotificationLevel::Error);
    }

    fn show(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            shown_at: Instant::now(),
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Drop the notification once it has been shown long enough.
    pub fn expire(&mut self, now: Instant) {
        if let Some(notification) = &self.notification {
            if now.duration_since(notification.shown_at) >= self.lifetime {
                self.notification = None;
            }
        }
    }

    /// Render the status bar
    pub fn render(&self, f: &mut Frame, area: Rect, hints: &str, busy: Option<&str>) {
        let (status_text, status_color) = if let Some(notification) = &self.notification {
            let color = match notification.level {
                NotificationLevel::Success => Color::Green,
                NotificationLevel::Error => Color::Red,
            };
            (notification.message.clone(), color)
        } else if let Some(busy) = busy {
            (format!("🔄 {busy}..."), Color::Yellow)
        } else {
            (hints.to_string(), Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_lifetime() {
        let mut bar = StatusBar::new(Duration::from_secs(4));
        bar.notify_error("boom");
        let shown = bar.current().map(|n| n.level);
        assert_eq!(shown, Some(NotificationLevel::Error));

        bar.expire(Instant::now());
        assert!(bar.current().is_some());

        bar.expire(Instant::now() + Duration::from_secs(5));
        assert!(bar.current().is_none());
    }
}
