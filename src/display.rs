/// Rendering layer: all terminal I/O lives here.
///
/// The world is 800×600 pixels; each frame it is rasterised onto a cell
/// canvas the size of the terminal and written out row by row. No game
/// logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use dogfight::stats::StatKind;
use dogfight::World;

use crate::catalog::Catalog;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_VOID: Color = Color::Black;
const C_HUD: Color = Color::Yellow;
const C_BANNER: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: C_VOID,
};

struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Fill the cells covered by a world-pixel rectangle.
    fn fill(&mut self, rect: (i32, i32, i32, i32), world: (f32, f32), ch: char, fg: Color, bg: Option<Color>) {
        let (x, y, w, h) = rect;
        let sx = self.cols as f32 / world.0;
        let sy = self.rows as f32 / world.1;
        let c0 = ((x as f32 * sx).floor() as i32).max(0);
        let c1 = (((x + w) as f32 * sx).ceil() as i32).min(self.cols as i32);
        let r0 = ((y as f32 * sy).floor() as i32).max(0);
        let r1 = (((y + h) as f32 * sy).ceil() as i32).min(self.rows as i32);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(cell) = self.cell_mut(col as u16, row as u16) {
                    cell.ch = ch;
                    cell.fg = fg;
                    if let Some(bg) = bg {
                        cell.bg = bg;
                    }
                }
            }
        }
    }

    /// Overlay text centred on `row`, or starting at `col` when given.
    fn text(&mut self, row: u16, col: Option<u16>, msg: &str, fg: Color) {
        let len = msg.chars().count() as u16;
        let start = col.unwrap_or_else(|| (self.cols / 2).saturating_sub(len / 2));
        for (i, ch) in msg.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as u16, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut current: Option<(Color, Color)> = None;
            let mut run = String::with_capacity(self.cols as usize);
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some((cell.fg, cell.bg)) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    current = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
            }
        }
        Ok(())
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, catalog: &Catalog) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);
    let vp = world.viewport();

    for item in world.draw_list() {
        let Some(glyph) = catalog.glyph(item.visual.id) else {
            continue;
        };
        canvas.fill(item.rect.rounded(), (vp.width, vp.height), glyph.ch, glyph.fg, glyph.bg);
    }

    draw_hud(&mut canvas, world);

    if world.ufo_banner() {
        let mid = rows / 2;
        canvas.text(mid.saturating_sub(1), None, "THEY'VE SEEN YOU!", C_BANNER);
        canvas.text(mid + 1, None, "FLY FORWARD AND TAKE THEM FROM THE BACK!", C_BANNER);
    }

    if world.is_game_over() {
        draw_game_over(&mut canvas);
    }

    canvas.flush(out)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn draw_hud(canvas: &mut Canvas, world: &World) {
    let row = canvas.rows.saturating_sub(1);
    let stats = world.stats();

    let score = format!("{}: {}", StatKind::Score.label(), stats.get(StatKind::Score));
    canvas.text(row, Some(1), &score, C_HUD);

    let health = format!("{}: {}", StatKind::Health.label(), stats.get(StatKind::Health));
    let col = canvas.cols.saturating_sub(health.chars().count() as u16 + 2);
    canvas.text(row, Some(col), &health, C_HUD);
}

fn draw_game_over(canvas: &mut Canvas) {
    let mid = canvas.rows / 2;
    canvas.text(mid.saturating_sub(2), None, "╔════════════════════╗", Color::Red);
    canvas.text(mid.saturating_sub(1), None, "║     GAME  OVER     ║", Color::Red);
    canvas.text(mid, None, "╚════════════════════╝", Color::Red);
    canvas.text(mid + 2, None, "Q - Quit      R - Play", Color::White);
}

/// Title screen; `help` swaps in the controls page.
pub fn render_menu<W: Write>(out: &mut W, help: bool) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows);
    let cy = rows / 2;

    canvas.text(cy.saturating_sub(5), None, "★  D O G F I G H T  ★", Color::Cyan);

    if help {
        let lines = [
            "↑ / W      fly up (take off from the ground)",
            "← → / A D  walk on the ground, steer in the air",
            "↓ / S      stop walking, drop while flying",
            "SPACE      shoot",
            "",
            "Dodge cacti and bombs, shoot them for points.",
            "When the UFO has seen you, keep moving!",
        ];
        for (i, line) in lines.iter().enumerate() {
            canvas.text(cy.saturating_sub(2) + i as u16, None, line, Color::White);
        }
        canvas.text(cy + 7, None, "H : back   ENTER : play   Q : quit", C_HINT);
    } else {
        canvas.text(cy.saturating_sub(1), None, "Press ENTER or SPACE to play", Color::White);
        canvas.text(cy + 1, None, "H : help   Q : quit", C_HINT);
    }

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    canvas.flush(out)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
