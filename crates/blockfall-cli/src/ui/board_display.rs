use blockfall_engine::{ActivePiece, Board, Cell};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::style;

/// Renders the board grid with the active piece overlaid.
///
/// Each grid cell is `cell_width` terminal columns wide and one terminal
/// row tall. Empty cells show a dim dot; locked cells and the active piece
/// fill their kind's color. Board dimensions are runtime values, so cells
/// are written straight into the buffer rather than through a fixed layout.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<&'a ActivePiece>,
    cell_width: u16,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(board: &'a Board, cell_width: u16) -> Self {
        Self {
            board,
            active_piece: None,
            cell_width: cell_width.max(1),
            block: None,
        }
    }

    pub(crate) fn active_piece(self, piece: Option<&'a ActivePiece>) -> Self {
        Self {
            active_piece: piece,
            ..self
        }
    }

    pub(crate) fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        self.board.width() as u16 * self.cell_width + super::block_margins(self.block.as_ref()).0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        self.board.height() as u16 + super::block_margins(self.block.as_ref()).1
    }

    #[expect(clippy::cast_possible_truncation)]
    fn draw_cell(&self, area: Rect, buf: &mut Buffer, x: usize, y: usize, style: Style, dot: bool) {
        let base_x = area.x + x as u16 * self.cell_width;
        let base_y = area.y + y as u16;
        if base_y >= area.bottom() {
            return;
        }
        for dx in 0..self.cell_width {
            let px = base_x + dx;
            if px >= area.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((px, base_y)) {
                cell.set_style(style);
                cell.set_symbol(if dot && dx == 0 { "." } else { " " });
            }
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    #[expect(clippy::cast_sign_loss)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (y, row) in self.board.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => self.draw_cell(area, buf, x, y, style::EMPTY, true),
                    Cell::Piece(kind) => self.draw_cell(area, buf, x, y, style::piece(kind), false),
                }
            }
        }

        if let Some(piece) = self.active_piece {
            let piece_style = style::piece(piece.kind());
            for (x, y) in piece.occupied_cells() {
                // Cells above the top row have no on-screen position.
                if x >= 0 && y >= 0 {
                    self.draw_cell(area, buf, x as usize, y as usize, piece_style, false);
                }
            }
        }
    }
}
