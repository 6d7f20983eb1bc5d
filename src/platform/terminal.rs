//! Snapshot → terminal cells
//!
//! Composition is pure (`compose` builds the character grid); `render` only
//! queues the rows and flushes. World coordinates are scaled to whatever
//! size the terminal currently has.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor, style::Print};

use crate::sim::{FailCause, GamePhase, Rect, Snapshot};

const BODY: char = '@';
const OBSTACLE: char = '#';
const GROUND: char = '=';
const EMPTY: char = ' ';

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Handle terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        log::debug!("Terminal resized to {}x{}", self.cols, self.rows);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Draw one frame
    pub fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let lines = compose(snapshot, self.cols, self.rows);
        for (row, line) in lines.iter().enumerate() {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            self.out.queue(Print(line))?;
        }
        self.out.flush()
    }
}

/// Build the `rows` lines of `cols` characters showing `snapshot`
pub fn compose(snapshot: &Snapshot, cols: u16, rows: u16) -> Vec<String> {
    let cols = usize::from(cols.max(1));
    let rows = usize::from(rows.max(1));
    let mut grid = vec![vec![EMPTY; cols]; rows];

    let scale_x = cols as f32 / snapshot.world.x.max(1.0);
    let scale_y = rows as f32 / snapshot.world.y.max(1.0);

    if let Some(ground) = snapshot.ground {
        let row = ((ground * scale_y) as usize).min(rows - 1);
        grid[row].fill(GROUND);
    }
    for rect in &snapshot.obstacles {
        fill(&mut grid, rect, scale_x, scale_y, OBSTACLE);
    }
    fill(&mut grid, &snapshot.body, scale_x, scale_y, BODY);

    let hud = match snapshot.level_cap {
        Some(cap) => format!(
            "Score: {}  Level: {}/{}",
            snapshot.score, snapshot.level, cap
        ),
        None => format!("Score: {}  Level: {}", snapshot.score, snapshot.level),
    };
    write_text(&mut grid, 0, 0, &hud);

    let overlay: Vec<String> = match snapshot.phase {
        GamePhase::Idle => vec!["Press SPACE to start".to_string()],
        GamePhase::Playing => Vec::new(),
        GamePhase::Failed => vec![
            match snapshot.fail_cause {
                Some(FailCause::OutOfBounds) => "GAME OVER - out of bounds".to_string(),
                _ => "GAME OVER".to_string(),
            },
            format!("Score: {}", snapshot.score),
            "ENTER to restart, Q to quit".to_string(),
        ],
        GamePhase::Completed => vec![
            format!("You reached level {}!", snapshot.level),
            format!("Score: {}", snapshot.score),
            "ENTER to restart, Q to quit".to_string(),
        ],
    };
    let top = (rows / 2).saturating_sub(overlay.len() / 2);
    for (i, text) in overlay.iter().enumerate() {
        let col = (cols / 2).saturating_sub(text.chars().count() / 2);
        write_text(&mut grid, top + i, col, text);
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Cells covered by `rect`, clipped to the grid. Any non-empty rect covers at
/// least one cell so thin obstacles stay visible when scaled down.
fn fill(grid: &mut [Vec<char>], rect: &Rect, scale_x: f32, scale_y: f32, ch: char) {
    if rect.is_empty() {
        return;
    }
    let rows = grid.len() as i64;
    let cols = grid.first().map_or(0, Vec::len) as i64;

    let (x0, x1) = span(rect.left() * scale_x, rect.right() * scale_x);
    let (y0, y1) = span(rect.top() * scale_y, rect.bottom() * scale_y);
    for y in y0.max(0)..y1.min(rows) {
        for x in x0.max(0)..x1.min(cols) {
            grid[y as usize][x as usize] = ch;
        }
    }
}

fn span(start: f32, end: f32) -> (i64, i64) {
    let first = start.floor() as i64;
    let last = (end.ceil() as i64).max(first + 1);
    (first, last)
}

fn write_text(grid: &mut [Vec<char>], row: usize, col: usize, text: &str) {
    let Some(line) = grid.get_mut(row) else {
        return;
    };
    for (cell, ch) in line.iter_mut().skip(col).zip(text.chars()) {
        *cell = ch;
    }
}
