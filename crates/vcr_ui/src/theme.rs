//! Theme configuration for VCR Manager.
//!
//! Dark VHS-flavored skin: phosphor status readout, bevelled panels.

use iced::widget::{button, container};
use iced::{Border, Color, Theme};

/// Application colors.
pub mod colors {
    use super::Color;

    /// Window background
    pub const BACKGROUND: Color = Color::from_rgb(0.07, 0.06, 0.10);

    /// Panel surface (the "plastic" face)
    pub const SURFACE: Color = Color::from_rgb(0.16, 0.15, 0.20);

    /// Title bar background (deep VHS navy)
    pub const TITLE: Color = Color::from_rgb(0.05, 0.09, 0.38);

    /// Primary accent (load button)
    pub const PRIMARY: Color = Color::from_rgb(0.33, 0.18, 0.48);

    /// Primary accent hover
    pub const PRIMARY_HOVER: Color = Color::from_rgb(0.41, 0.24, 0.58);

    /// Primary accent pressed
    pub const PRIMARY_PRESSED: Color = Color::from_rgb(0.25, 0.13, 0.38);

    /// Status readout background (CRT black)
    pub const READOUT_BG: Color = Color::from_rgb(0.02, 0.02, 0.02);

    /// Status readout text (phosphor green)
    pub const PHOSPHOR: Color = Color::from_rgb(0.02, 1.0, 0.63);

    /// Text primary
    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.93, 0.93, 0.93);

    /// Text secondary
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.62, 0.60, 0.68);

    /// Text muted
    pub const TEXT_MUTED: Color = Color::from_rgb(0.42, 0.40, 0.48);

    /// Border color
    pub const BORDER: Color = Color::from_rgb(0.30, 0.28, 0.36);
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: f32 = 4.0;
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
    /// Large spacing (16px)
    pub const LG: f32 = 16.0;
}

/// Font size constants.
pub mod font {
    /// Small text (log lines, credits)
    pub const SMALL: f32 = 12.0;
    /// Normal text
    pub const NORMAL: f32 = 14.0;
    /// Large text (title bar)
    pub const LG: f32 = 18.0;
    /// Splash title
    pub const TITLE: f32 = 32.0;
}

/// Root window background.
pub fn root(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::BACKGROUND.into()),
        text_color: Some(colors::TEXT_PRIMARY),
        ..container::Style::default()
    }
}

/// Fake title bar across the top of the panel.
pub fn title_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::TITLE.into()),
        text_color: Some(colors::TEXT_PRIMARY),
        ..container::Style::default()
    }
}

/// Central control panel.
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::SURFACE.into()),
        text_color: Some(colors::TEXT_PRIMARY),
        border: Border {
            color: colors::BORDER,
            width: 2.0,
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// CRT-style status readout.
pub fn status_readout(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::READOUT_BG.into()),
        text_color: Some(colors::PHOSPHOR),
        border: Border {
            color: colors::BORDER,
            width: 2.0,
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Log panel surface.
pub fn log_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(colors::READOUT_BG.into()),
        text_color: Some(colors::TEXT_SECONDARY),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Primary action button.
pub fn load_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Pressed => colors::PRIMARY_PRESSED,
        button::Status::Hovered => colors::PRIMARY_HOVER,
        button::Status::Disabled => colors::SURFACE,
        _ => colors::PRIMARY,
    };
    let text_color = if matches!(status, button::Status::Disabled) {
        colors::TEXT_MUTED
    } else {
        colors::TEXT_PRIMARY
    };

    button::Style {
        background: Some(background.into()),
        text_color,
        border: Border {
            color: colors::BORDER,
            width: 2.0,
            ..Border::default()
        },
        ..button::Style::default()
    }
}

/// Secondary action button (open folder).
pub fn secondary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Pressed => colors::BACKGROUND,
        button::Status::Hovered => colors::BORDER,
        button::Status::Disabled => colors::SURFACE,
        _ => colors::SURFACE,
    };
    let text_color = if matches!(status, button::Status::Disabled) {
        colors::TEXT_MUTED
    } else {
        colors::TEXT_SECONDARY
    };

    button::Style {
        background: Some(background.into()),
        text_color,
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            ..Border::default()
        },
        ..button::Style::default()
    }
}
