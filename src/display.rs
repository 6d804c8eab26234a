/// Terminal host surface: every crossterm write happens here.
///
/// `TerminalSurface` rasterises the library's primitive draw calls into a
/// grid of coloured character cells (one cell covers a rectangle of the
/// playfield) and flushes the grid with crossterm.  No game logic is
/// performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use sweep_shooter::entities::{GameState, GameStatus, Rgb};
use sweep_shooter::geometry::Vec2;
use sweep_shooter::render::Surface;

const GLYPH_FILL: char = '█';
const GLYPH_STROKE: char = '░';

const C_HINT: Rgb = Rgb(0x80, 0x80, 0x80);
const C_GAME_OVER: Rgb = Rgb(0xff, 0x40, 0x40);

/// Rows kept below the playfield for the controls hint.
const HINT_ROWS: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

const BLANK: Cell = Cell { ch: ' ', fg: Rgb::WHITE, bg: Rgb::BLACK };

fn blend(under: Rgb, over: Rgb, alpha: f64) -> Rgb {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |u: u8, o: u8| (u as f64 + (o as f64 - u as f64) * a).round() as u8;
    Rgb(mix(under.0, over.0), mix(under.1, over.1), mix(under.2, over.2))
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Ray-casting point-in-polygon test.
fn inside_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = poly.len().wrapping_sub(1);
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the closed outline through `poly`.
fn distance_to_outline(p: Vec2, poly: &[Vec2]) -> f64 {
    let mut best = f64::MAX;
    let mut j = poly.len().wrapping_sub(1);
    for i in 0..poly.len() {
        let (a, b) = (poly[j], poly[i]);
        let (ex, ey) = (b.x - a.x, b.y - a.y);
        let len_sq = ex * ex + ey * ey;
        let t = if len_sq > 0.0 {
            (((p.x - a.x) * ex + (p.y - a.y) * ey) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        best = best.min(p.distance(Vec2::new(a.x + ex * t, a.y + ey * t)));
        j = i;
    }
    best
}

fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::new(f64::MAX, f64::MAX), Vec2::new(f64::MIN, f64::MIN)),
        |(lo, hi), p| (Vec2::new(lo.x.min(p.x), lo.y.min(p.y)), Vec2::new(hi.x.max(p.x), hi.y.max(p.y))),
    )
}

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    world_w: f64,
    world_h: f64,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, world_w: f64, world_h: f64) -> Self {
        let mut surface = TerminalSurface {
            cols: 0,
            rows: 0,
            world_w,
            world_h,
            cells: Vec::new(),
        };
        surface.resize(cols, rows);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (cols, rows) = (cols.max(1), rows.max(HINT_ROWS + 1));
        if (cols, rows) == (self.cols, self.rows) {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    fn field_rows(&self) -> u16 {
        self.rows - HINT_ROWS
    }

    fn cell_w(&self) -> f64 {
        self.world_w / self.cols as f64
    }

    fn cell_h(&self) -> f64 {
        self.world_h / self.field_rows() as f64
    }

    fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let col = (p.x / self.cell_w()).floor();
        let row = (p.y / self.cell_h()).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.field_rows() as f64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f64 + 0.5) * self.cell_w(),
            (row as f64 + 0.5) * self.cell_h(),
        )
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    fn put(&mut self, col: u16, row: u16, ch: char, fg: Rgb, alpha: f64) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = ch;
            cell.fg = blend(cell.bg, fg, alpha);
        }
    }

    /// Paint every cell in the `lo..hi` box whose centre satisfies `inside`.
    /// Shapes smaller than a cell still mark the cell holding `anchor`.
    fn cover(
        &mut self,
        (lo, hi): (Vec2, Vec2),
        anchor: Vec2,
        ch: char,
        fg: Rgb,
        alpha: f64,
        inside: impl Fn(Vec2) -> bool,
    ) {
        let (cw, ch_h) = (self.cell_w(), self.cell_h());
        let col_lo = (lo.x / cw).floor().max(0.0) as u16;
        let row_lo = (lo.y / ch_h).floor().max(0.0) as u16;
        let col_hi = ((hi.x / cw).floor().max(0.0) as u16).min(self.cols.saturating_sub(1));
        let row_hi = ((hi.y / ch_h).floor().max(0.0) as u16).min(self.field_rows() - 1);

        let mut painted = false;
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                if inside(self.cell_center(col, row)) {
                    self.put(col, row, ch, fg, alpha);
                    painted = true;
                }
            }
        }
        if !painted {
            if let Some((col, row)) = self.to_cell(anchor) {
                self.put(col, row, ch, fg, alpha);
            }
        }
    }

    fn half_cell(&self) -> f64 {
        self.cell_w().max(self.cell_h()) / 2.0
    }

    /// Write `text` at a terminal position, bypassing playfield scaling.
    pub fn put_text(&mut self, col: u16, row: u16, text: &str, fg: Rgb, bg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(col.saturating_add(i as u16), row) {
                *cell = Cell { ch, fg, bg };
            }
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Flush the whole grid, emitting colour changes only where they occur.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgb, alpha: f64) {
        let r = Vec2::new(radius, radius);
        let bbox = (Vec2::new(center.x - r.x, center.y - r.y), center.add(r));
        self.cover(bbox, center, GLYPH_FILL, color, alpha, |c| c.distance(center) <= radius);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Rgb, alpha: f64) {
        let r = Vec2::new(radius, radius);
        let bbox = (Vec2::new(center.x - r.x, center.y - r.y), center.add(r));
        let band = self.half_cell();
        self.cover(bbox, center, GLYPH_STROKE, color, alpha, |c| {
            (c.distance(center) - radius).abs() <= band
        });
    }

    fn fill_rect(&mut self, center: Vec2, size: f64, rotation: f64, color: Rgb, alpha: f64) {
        let half = size / 2.0;
        // A rotated square never reaches further than its half-diagonal.
        let reach = half * std::f64::consts::SQRT_2;
        let bbox = (
            Vec2::new(center.x - reach, center.y - reach),
            Vec2::new(center.x + reach, center.y + reach),
        );
        let (sin, cos) = (-rotation).sin_cos();
        self.cover(bbox, center, GLYPH_FILL, color, alpha, |c| {
            let (dx, dy) = (c.x - center.x, c.y - center.y);
            let lx = dx * cos - dy * sin;
            let ly = dx * sin + dy * cos;
            lx.abs() <= half && ly.abs() <= half
        });
    }

    fn stroke_rect(&mut self, center: Vec2, size: f64, color: Rgb, alpha: f64) {
        let half = size / 2.0;
        let bbox = (
            Vec2::new(center.x - half, center.y - half),
            Vec2::new(center.x + half, center.y + half),
        );
        let band = self.half_cell();
        self.cover(bbox, center, GLYPH_STROKE, color, alpha, |c| {
            let edge = (c.x - center.x).abs().max((c.y - center.y).abs());
            edge <= half && edge >= half - band
        });
    }

    fn fill_path(&mut self, points: &[Vec2], color: Rgb, alpha: f64) {
        if points.is_empty() {
            return;
        }
        let bbox = bounds(points);
        self.cover(bbox, points[0], GLYPH_FILL, color, alpha, |c| inside_polygon(c, points));
    }

    fn stroke_path(&mut self, points: &[Vec2], color: Rgb, alpha: f64) {
        if points.is_empty() {
            return;
        }
        let bbox = bounds(points);
        let band = self.half_cell();
        self.cover(bbox, points[0], GLYPH_STROKE, color, alpha, |c| {
            distance_to_outline(c, points) <= band
        });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Rgb) {
        if let Some((col, row)) = self.to_cell(at) {
            self.put_text(col, row, text, color, Rgb::BLACK);
        }
    }

    fn outlined_text(&mut self, at: Vec2, text: &str, fill: Rgb, outline: Rgb) {
        if let Some((col, row)) = self.to_cell(at) {
            let half = text.chars().count() as u16 / 2;
            self.put_text(col.saturating_sub(half), row, text, fill, outline);
        }
    }

    fn fill_screen(&mut self, color: Rgb, alpha: f64) {
        for cell in &mut self.cells {
            cell.bg = blend(cell.bg, color, alpha);
            cell.fg = blend(cell.fg, color, alpha);
        }
    }
}

// ── Host overlays ─────────────────────────────────────────────────────────────

pub fn draw_controls_hint(surface: &mut TerminalSurface) {
    let (_, rows) = surface.size();
    surface.put_text(
        1,
        rows - 1,
        "← → / A D : Move   SPACE : Shoot   6 / 7 : ATK   Q : Quit",
        C_HINT,
        Rgb::BLACK,
    );
}

pub fn draw_game_over(surface: &mut TerminalSurface, state: &GameState) {
    if state.status != GameStatus::GameOver {
        return;
    }
    let lines = [
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];
    let (cols, rows) = surface.size();
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        let col = (cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        surface.put_text(col, start_row + i as u16, line, C_GAME_OVER, Rgb::BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph_at(surface: &TerminalSurface, col: u16, row: u16) -> char {
        surface.cells[row as usize * surface.cols as usize + col as usize].ch
    }

    #[test]
    fn tiny_circle_still_marks_one_cell() {
        let mut s = TerminalSurface::new(60, 41, 600.0, 800.0); // 10×20 units per cell
        s.fill_circle(Vec2::new(105.0, 105.0), 1.0, Rgb::WHITE, 1.0);
        assert_eq!(glyph_at(&s, 10, 5), GLYPH_FILL);
    }

    #[test]
    fn player_circle_spans_several_columns() {
        let mut s = TerminalSurface::new(60, 41, 600.0, 800.0);
        s.fill_circle(Vec2::new(300.0, 775.0), 15.0, Rgb::WHITE, 1.0);
        assert_eq!(glyph_at(&s, 29, 38), GLYPH_FILL);
        assert_eq!(glyph_at(&s, 30, 38), GLYPH_FILL);
        assert_eq!(glyph_at(&s, 0, 38), ' ');
    }

    #[test]
    fn star_polygon_contains_its_center() {
        let star = sweep_shooter::render::star_points(Vec2::new(0.0, 0.0), 10.0);
        assert!(inside_polygon(Vec2::new(0.0, 0.0), &star));
        assert!(!inside_polygon(Vec2::new(20.0, 0.0), &star));
    }

    #[test]
    fn outlined_star_leaves_its_interior_blank() {
        let mut s = TerminalSurface::new(60, 41, 600.0, 800.0);
        // Cell (30, 20) has its centre at (305, 410).
        let star = sweep_shooter::render::star_points(Vec2::new(305.0, 410.0), 120.0);

        s.stroke_path(&star, Rgb::WHITE, 1.0);
        assert_eq!(glyph_at(&s, 30, 20), ' ');
        assert!(s.cells.iter().any(|c| c.ch == GLYPH_STROKE));

        s.fill_path(&star, Rgb::WHITE, 1.0);
        assert_eq!(glyph_at(&s, 30, 20), GLYPH_FILL);
    }

    #[test]
    fn outline_distance_is_zero_on_an_edge() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_eq!(distance_to_outline(Vec2::new(5.0, 0.0), &square), 0.0);
        assert_eq!(distance_to_outline(Vec2::new(5.0, 5.0), &square), 5.0);
        assert_eq!(distance_to_outline(Vec2::new(-3.0, 5.0), &square), 3.0);
    }

    #[test]
    fn flash_overlay_tints_background() {
        let mut s = TerminalSurface::new(4, 3, 40.0, 20.0);
        s.fill_screen(Rgb::WHITE, 0.5);
        assert_eq!(s.cells[0].bg, Rgb(128, 128, 128));
    }
}
