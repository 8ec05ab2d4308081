use crate::constants::{DIALOG_TITLE_DELETE, DIALOG_TITLE_LOGS};
use crate::logger::Logger;
use crate::ui::components::help_panel::HELP_TEXT;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::common::{self, shortcuts};
use super::scroll_behavior::ScrollPosition;

pub fn render_delete_confirmation_dialog(f: &mut Frame, area: Rect, claim_id: i64, policy_number: &str) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 7, area);
    f.render_widget(Clear, dialog_area);

    let label = if policy_number.is_empty() {
        format!("claim #{claim_id}")
    } else {
        format!("claim #{claim_id} ({policy_number})")
    };
    let message = format!("Are you sure you want to delete {label}?\nThis cannot be undone.");

    let block = common::create_dialog_block(DIALOG_TITLE_DELETE, Color::Red);

    let message_paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);

    let instructions = common::create_instructions_paragraph(&[
        ("Enter/y", Color::Red, " Delete"),
        shortcuts::SEPARATOR,
        shortcuts::ESC_CANCEL,
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(dialog_area);

    f.render_widget(block, dialog_area);
    f.render_widget(message_paragraph, chunks[0]);
    f.render_widget(instructions, chunks[1]);
}

fn render_message_dialog(f: &mut Frame, area: Rect, title: &str, color: Color, message: &str, scroll: &mut ScrollPosition) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 10, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(color));

    let content_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + 1,
        dialog_area.width.saturating_sub(2),
        dialog_area.height.saturating_sub(4),
    );

    let instructions_area = Rect::new(
        dialog_area.x + 1,
        dialog_area.y + dialog_area.height.saturating_sub(2),
        dialog_area.width.saturating_sub(2),
        1,
    );

    let instructions = Paragraph::new("Press any key to continue • j/k to scroll if needed")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(block, dialog_area);
    common::render_scrollable_text(f, content_area, message, scroll.offset, &mut scroll.scrollbar, None);
    f.render_widget(instructions, instructions_area);
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, message: &str, scroll: &mut ScrollPosition) {
    render_message_dialog(f, area, "ℹ Info", Color::Blue, message, scroll);
}

pub fn render_error_dialog(f: &mut Frame, area: Rect, message: &str, scroll: &mut ScrollPosition) {
    render_message_dialog(f, area, "⚠ Error", Color::Red, message, scroll);
}

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll: &mut ScrollPosition) {
    let help_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("📖 Help - Press 'Esc' or '?' to close")
        .title_alignment(Alignment::Center);

    common::render_scrollable_text(f, help_area, HELP_TEXT, scroll.offset, &mut scroll.scrollbar, Some(block));
}

pub fn render_logs_dialog(f: &mut Frame, area: Rect, logger: &Logger, scroll: &mut ScrollPosition) {
    let logs_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, logs_area);

    let logs = logger.get_logs();
    let logs_content = if logs.is_empty() {
        "No logs yet".to_string()
    } else {
        logs.join("\n")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(DIALOG_TITLE_LOGS)
        .title_alignment(Alignment::Center);

    common::render_scrollable_text(f, logs_area, &logs_content, scroll.offset, &mut scroll.scrollbar, Some(block));
}
