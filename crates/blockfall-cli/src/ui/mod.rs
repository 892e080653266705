use ratatui::{layout::Rect, widgets::Block};

pub(crate) use self::board_display::BoardDisplay;

mod board_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub(crate) mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const EMPTY: Style = fg_bg(color::GRAY, color::BLACK);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);
    pub const INFO: Style = fg_bg(color::WHITE, color::BLACK);
    pub const GAME_OVER: Style = fg_bg(color::RED, color::BLACK).add_modifier(Modifier::BOLD);

    /// Block color for a piece kind.
    #[must_use]
    pub fn piece(kind: PieceKind) -> Style {
        match kind {
            PieceKind::T => bg_only(color::RED),
            PieceKind::O => bg_only(color::GREEN),
            PieceKind::S => bg_only(color::BLUE),
            PieceKind::Z => bg_only(color::YELLOW),
            PieceKind::L => bg_only(color::CYAN),
            PieceKind::J => bg_only(color::MAGENTA),
            PieceKind::I => bg_only(color::ORANGE),
        }
    }
}

/// (horizontal, vertical) space a surrounding block frame consumes.
fn block_margins(block: Option<&Block>) -> (u16, u16) {
    let probe = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(probe, |block| block.inner(probe));
    (probe.width - inner.width, probe.height - inner.height)
}
