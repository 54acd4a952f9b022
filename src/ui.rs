//! Layout and drawing: playfield, next preview, score, pause and game over overlays.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
use crate::game::Session;
use crate::shapes::Shape;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// Terminal columns per board cell; two keeps cells roughly square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 20;
const PLAYFIELD_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
const PLAYFIELD_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;

/// Centre playfield + sidebar in `area`. Returns (playfield, sidebar), both clipped to `area`.
pub fn layout(area: Rect) -> (Rect, Rect) {
    let total_w = PLAYFIELD_WIDTH + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(PLAYFIELD_HEIGHT),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PLAYFIELD_WIDTH),
            Constraint::Length(SIDEBAR_WIDTH),
        ])
        .split(vert[1]);
    (inner[0], inner[1])
}

/// Draw the whole game screen for the session's current state.
pub fn draw(frame: &mut Frame, session: &Session, theme: &Theme) {
    let area = frame.area();
    let (playfield, sidebar) = layout(area);
    let buf = frame.buffer_mut();

    draw_playfield(buf, session, theme, playfield);
    draw_sidebar(buf, session, theme, sidebar);

    if session.is_game_over() {
        draw_game_over(buf, session, theme, playfield);
    } else if session.is_paused() {
        draw_pause_overlay(buf, theme, playfield);
    }
}

fn block_style(theme: &Theme) -> Style {
    Style::default().fg(theme.grid).bg(theme.bg)
}

/// Write one buffer cell if it lies inside `clip`.
fn put(buf: &mut Buffer, clip: Rect, x: u16, y: u16, symbol: &str, style: Style) {
    if x >= clip.x && x < clip.right() && y >= clip.y && y < clip.bottom() {
        buf[(x, y)].set_symbol(symbol).set_style(style);
    }
}

/// Paint board cell (col, row) as a solid two-column block.
fn put_block(buf: &mut Buffer, clip: Rect, col: u16, row: u16, style: Style) {
    let x = clip.x + col * CELL_WIDTH;
    let y = clip.y + row;
    put(buf, clip, x, y, "█", style);
    put(buf, clip, x + 1, y, "█", style);
}

fn draw_playfield(buf: &mut Buffer, session: &Session, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(block_style(theme))
        .title(Span::styled(" blockdrop ", Style::default().fg(theme.title)));
    let inner = block.inner(area);
    block.render(area, buf);

    let dot = Style::default().fg(theme.grid).bg(theme.bg);
    for (y, row) in session.board().rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let (cx, cy) = (x as u16, y as u16);
            match cell {
                Cell::Filled(color) => {
                    let c = theme.piece_color(*color);
                    put_block(buf, inner, cx, cy, Style::default().fg(c).bg(c));
                }
                Cell::Empty => {
                    let px = inner.x + cx * CELL_WIDTH;
                    let py = inner.y + cy;
                    put(buf, inner, px, py, "·", dot);
                    put(buf, inner, px + 1, py, " ", dot);
                }
            }
        }
    }

    let piece = session.piece();
    let c = theme.piece_color(piece.color);
    for (x, y) in piece.cells() {
        // Rows above the top edge are not shown.
        if x >= 0 && y >= 0 {
            put_block(buf, inner, x as u16, y as u16, Style::default().fg(c).bg(c));
        }
    }
}

fn draw_sidebar(buf: &mut Buffer, session: &Session, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = block_style(theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Next (border + title + preview)
            Constraint::Length(4), // Score + lines
            Constraint::Min(0),    // Keys
        ])
        .split(area);

    // --- Next ---
    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled("Next", title_style));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], buf);
    let next = session.next();
    draw_shape_preview(buf, next_inner, &next.shape, theme.piece_color(next.color));

    // --- Stats ---
    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let stats_inner = stats_block.inner(chunks[1]);
    stats_block.render(chunks[1], buf);
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(session.score().to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Lines: ", title_style),
            Span::styled(session.lines_cleared().to_string(), fg_style),
        ]),
    ])
    .render(stats_inner, buf);

    // --- Keys ---
    let keys_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let keys_inner = keys_block.inner(chunks[2]);
    keys_block.render(chunks[2], buf);
    let hint = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(key, title_style),
            Span::styled(what, fg_style),
        ])
    };
    Paragraph::new(vec![
        hint("←/→ ", "move"),
        hint("↑   ", "rotate"),
        hint("↓   ", "soft drop"),
        hint("P   ", "pause"),
        hint("R   ", "restart"),
        hint("Q   ", "quit"),
    ])
    .render(keys_inner, buf);
}

/// Draw a shape centred in `area`.
fn draw_shape_preview(buf: &mut Buffer, area: Rect, shape: &Shape, color: Color) {
    let (w, h) = shape.extent();
    let off_x = area.width.saturating_sub(w * CELL_WIDTH) / 2;
    let off_y = area.height.saturating_sub(h) / 2;
    let origin = Rect {
        x: area.x + off_x,
        y: area.y + off_y,
        width: area.width.saturating_sub(off_x),
        height: area.height.saturating_sub(off_y),
    };
    for &(dx, dy) in shape.cells() {
        put_block(
            buf,
            origin,
            dx as u16,
            dy as u16,
            Style::default().fg(color).bg(color),
        );
    }
}

/// Popup rect of the given size centred over `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_popup(buf: &mut Buffer, theme: &Theme, area: Rect, lines: Vec<Line>) {
    let popup = centered(area, PLAYFIELD_WIDTH - 2, lines.len() as u16 + 2);
    Clear.render(popup, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.title).bg(theme.bg)),
        )
        .render(popup, buf);
}

fn draw_pause_overlay(buf: &mut Buffer, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " Paused ",
            Style::default()
                .fg(theme.bg)
                .bg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "P to resume",
            Style::default().fg(theme.main_fg),
        )),
    ];
    draw_popup(buf, theme, area, lines);
}

fn draw_game_over(buf: &mut Buffer, session: &Session, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " GAME OVER ",
            Style::default()
                .fg(theme.main_fg)
                .bg(theme.piece_color(6))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {}", session.score()),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "R restart  Q quit",
            Style::default().fg(theme.main_fg),
        )),
    ];
    draw_popup(buf, theme, area, lines);
}
