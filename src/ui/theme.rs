use ratatui::style::Color;

use crate::system::process::ProcessState;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub table_header: Color,
    pub user_fg: Color,
    pub memory_fg: Color,
    pub network_fg: Color,
    pub load_fg: Color,
    pub state_ok: Color,
    pub state_warn: Color,
    pub state_err: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
}

impl Theme {
    pub fn from_show_colors(show_colors: bool) -> Self {
        if show_colors {
            Self::dark()
        } else {
            Self::mono()
        }
    }

    /// Zombies are flagged red, uninterruptible waits yellow.
    pub fn state_color(&self, state: ProcessState) -> Color {
        match state {
            ProcessState::Zombie => self.state_err,
            ProcessState::DiskWait => self.state_warn,
            _ => self.state_ok,
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Magenta,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::Cyan,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            table_header: Color::Blue,
            user_fg: Color::Cyan,
            memory_fg: Color::Magenta,
            network_fg: Color::Cyan,
            load_fg: Color::Green,
            state_ok: Color::Green,
            state_warn: Color::Yellow,
            state_err: Color::Red,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Green,
            gauge_unfilled: Color::DarkGray,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::Reset,
            overlay_border: Color::Reset,
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
            table_header: Color::Reset,
            user_fg: Color::Reset,
            memory_fg: Color::Reset,
            network_fg: Color::Reset,
            load_fg: Color::Reset,
            state_ok: Color::Reset,
            state_warn: Color::Reset,
            state_err: Color::Reset,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::Reset,
            surface_bg: Color::Reset,
            gauge_filled: Color::White,
            gauge_unfilled: Color::Reset,
        }
    }
}
