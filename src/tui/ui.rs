//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_duel::{Board, FeatureFlag, Player, Position, Square, Theme};

use super::app::App;

/// Colours for one theme.
struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    x: Color,
    o: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                x: Color::Blue,
                o: Color::Red,
                highlight: Color::LightGreen,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                x: Color::LightBlue,
                o: Color::LightRed,
                highlight: Color::Green,
            },
        }
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme());

    let background = Block::default().style(Style::default().bg(palette.background).fg(palette.text));
    frame.render_widget(background, area);
    if app.config().has_flag(FeatureFlag::RetroNoiseBg) {
        draw_noise(frame, area, &palette);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Scores
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe Duel")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app, &palette);
    draw_status(frame, chunks[2], app, &palette);
    draw_scores(frame, chunks[3], app, &palette);
    draw_footer(frame, chunks[4], app, &palette);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let session = app.session();
    let board = session.game().board();
    let winning = session.winning_line();
    let highlight = |pos: Position| winning.is_some_and(|line| line.contains(&pos.to_index()));
    let cursor = (!session.locked()).then_some(app.cursor());

    let board_area = center_rect(area, 40, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Length(2),
                Constraint::Length(12),
                Constraint::Length(2),
                Constraint::Length(12),
            ])
            .split(rows[row * 2]);

        for column in 0..3 {
            if let Some(pos) = Position::from_row_col(row, column) {
                let style = CellStyle {
                    cursor: cursor == Some(pos),
                    winning: highlight(pos),
                };
                draw_cell(frame, cols[column * 2], board, pos, style, palette);
            }
            if column < 2 {
                let sep = Paragraph::new("│").style(Style::default().fg(palette.muted));
                frame.render_widget(sep, cols[column * 2 + 1]);
            }
        }
        if row < 2 {
            let sep = Paragraph::new("─".repeat(rows[row * 2 + 1].width as usize))
                .style(Style::default().fg(palette.muted));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

#[derive(Clone, Copy)]
struct CellStyle {
    cursor: bool,
    winning: bool,
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    pos: Position,
    cell: CellStyle,
    palette: &Palette,
) {
    let (symbol, mut style) = match board.get(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(palette.muted),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(palette.x).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(palette.o).add_modifier(Modifier::BOLD),
        ),
    };

    if cell.winning {
        style = style.bg(palette.highlight).fg(Color::Black);
    } else if cell.cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}  ", symbol), style)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let session = app.session();
    let mut text = session.status().to_string();
    if app.is_thinking() {
        text.push_str("  (thinking...)");
    }
    if let Some(notice) = app.notice() {
        text = format!("{}  [{}]", text, notice);
    }

    let color = if session.locked() { Color::Green } else { Color::Yellow };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
    frame.render_widget(status, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let scores = app.session().scores();
    let line = Line::from(vec![
        Span::styled(format!("X: {}", scores.x()), Style::default().fg(palette.x)),
        Span::raw("   "),
        Span::styled(format!("O: {}", scores.o()), Style::default().fg(palette.o)),
        Span::raw("   "),
        Span::styled(format!("Draws: {}", scores.draws()), Style::default().fg(palette.text)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let session = app.session();
    let settings = format!(
        "Difficulty: {}  |  First: {}  |  Theme: {}",
        session.current_difficulty(),
        session.first_player(),
        app.theme()
    );
    let keys = "1-9/arrows+Enter: move  n: new  r: reset  d: difficulty  f: first  t: theme  q: quit";
    let footer = Paragraph::new(vec![Line::from(settings), Line::from(keys)])
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Sparse dotted backdrop.
fn draw_noise(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines: Vec<Line> = (0..area.height)
        .map(|y| {
            let row: String = (0..area.width)
                .map(|x| if noise_at(x, y) { '·' } else { ' ' })
                .collect();
            Line::from(row)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(palette.muted)),
        area,
    );
}

/// Deterministic speckle pattern; any terminal size is valid.
fn noise_at(x: u16, y: u16) -> bool {
    let h = u32::from(x).wrapping_mul(7919) ^ u32::from(y).wrapping_mul(104_729);
    h % 13 == 0
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
