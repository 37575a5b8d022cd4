//! Semantic style builders.

use ledgrid_app::StatusLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
        .style(Style::default().bg(palette::CARD_BG))
}

// --- Status line ---

/// Style for a transient status message
pub fn status_message(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default().fg(palette::STATUS_GREEN),
        StatusLevel::Error => Style::default()
            .fg(palette::STATUS_RED)
            .add_modifier(Modifier::BOLD),
    }
}

/// Sync indicator: `(icon, label, style)`
pub fn sync_indicator(healthy: bool, polling: bool) -> (&'static str, &'static str, Style) {
    match (healthy, polling) {
        (false, _) => (
            "✗",
            "Offline",
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        ),
        (true, true) => ("↻", "Syncing", Style::default().fg(palette::STATUS_YELLOW)),
        (true, false) => ("●", "Online", Style::default().fg(palette::STATUS_GREEN)),
    }
}

// --- LED colors ---

/// Terminal color for an LED
pub fn led(color: ledgrid_core::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Foreground that stays readable on top of an LED color
pub fn led_contrast(color: ledgrid_core::Color) -> Color {
    // ITU-R BT.601 luma
    let luma = 299 * u32::from(color.r) + 587 * u32::from(color.g) + 114 * u32::from(color.b);
    if luma > 128_000 {
        palette::CONTRAST_FG
    } else {
        palette::CONTRAST_FG_LIGHT
    }
}

/// Filled swatch for an LED color, with contrasting text
pub fn led_swatch(color: ledgrid_core::Color) -> Style {
    Style::default().bg(led(color)).fg(led_contrast(color))
}
