//! Colors and styles shared by the shoely screens.

use ratatui::style::{Color, Modifier, Style};

use shoely_core::NoticeLevel;

const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
const RED: Color = Color::Rgb(255, 99, 99); // #ff6363
const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
const SELECTION_BG: Color = Color::Rgb(40, 42, 54); // #282a36
const DIALOG_BG: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Frames ────────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { ACCENT } else { MUTED })
}

/// Background for dialogs and toasts drawn over a screen.
pub fn overlay() -> Style {
    Style::default().bg(DIALOG_BG)
}

/// Confirmation dialog border; destructive prompts are drawn in red.
pub fn confirm_border(destructive: bool) -> Style {
    Style::default().fg(if destructive { RED } else { YELLOW })
}

/// Border color and icon for a notice toast.
pub fn notice(level: NoticeLevel) -> (Style, &'static str) {
    match level {
        NoticeLevel::Success => (Style::default().fg(GREEN), "✓"),
        NoticeLevel::Error => (Style::default().fg(RED), "✗"),
    }
}

// ── Text ──────────────────────────────────────────────────────────────

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Placeholders and secondary text.
pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn screen_label() -> Style {
    Style::default().fg(ACCENT)
}

pub fn refreshing() -> Style {
    Style::default().fg(YELLOW)
}

pub fn key_hint() -> Style {
    muted()
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

// ── Product table ─────────────────────────────────────────────────────

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn row(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(ACCENT)
            .bg(SELECTION_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        text()
    }
}

pub fn product_name(selected: bool) -> Style {
    let style = Style::default().fg(CYAN);
    if selected {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn price() -> Style {
    Style::default().fg(CORAL)
}

// ── Product form ──────────────────────────────────────────────────────

pub fn field_label() -> Style {
    text()
}

/// Field value; the field under the cursor is highlighted.
pub fn field_value(active: bool) -> Style {
    if active {
        Style::default()
            .fg(CYAN)
            .bg(SELECTION_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(CYAN)
    }
}

pub fn cursor() -> Style {
    Style::default().fg(CYAN)
}
