//! Half-block terminal renderer
//!
//! The 600x800 world canvas is scaled into the terminal's pixel grid (two
//! pixels per cell, stacked vertically) and letterboxed. Text goes on top
//! as plain terminal characters after the pixels are drawn.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::consts::*;
use crate::controller::{Controller, Mode};
use crate::sim::{Avatar, GameOver, Obstacle};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    /// `num / den` of the way from `self` to `to`
    fn mix(self, to: Rgb, num: i32, den: i32) -> Rgb {
        if den <= 0 {
            return to;
        }
        let num = num.clamp(0, den);
        let channel = |a: u8, b: u8| (a as i32 + (b as i32 - a as i32) * num / den) as u8;
        Rgb(
            channel(self.0, to.0),
            channel(self.1, to.1),
            channel(self.2, to.2),
        )
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const LETTERBOX: Rgb = Rgb(18, 18, 24);
const SKY_TOP: Rgb = Rgb(40, 200, 220);
const SKY_BOT: Rgb = Rgb(170, 240, 250);
const PIPE_L: Rgb = Rgb(30, 120, 30);
const PIPE_M: Rgb = Rgb(40, 170, 40);
const PIPE_HI: Rgb = Rgb(110, 220, 90);
const AVATAR: Rgb = Rgb(245, 210, 40);
const AVATAR_HI: Rgb = Rgb(255, 235, 120);
const AVATAR_EYE: Rgb = Rgb(20, 20, 20);
const PANEL: Rgb = Rgb(220, 195, 120);
const PANEL_EDGE: Rgb = Rgb(150, 120, 60);
const TEXT: Rgb = Rgb(10, 10, 10);
const TEXT_LIGHT: Rgb = Rgb(240, 240, 240);

// ── Canvas: world rectangles onto half-block cells ──────────────────────────

/// Terminal cells as a pixel grid, two pixels per cell, with the world
/// canvas fitted inside it
struct Canvas {
    cols: usize,
    rows: usize,
    /// Row-major, `rows * 2` pixel rows of `cols` pixels
    pixels: Vec<Rgb>,
    view: Viewport,
}

impl Canvas {
    fn fit(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            pixels: vec![LETTERBOX; cols * rows * 2],
            view: Viewport::fit(cols, rows * 2),
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(LETTERBOX);
    }

    /// Paint the pixel box `[x0, x1) x [y0, y1)`, colour chosen per column
    fn paint(&mut self, (x0, y0, x1, y1): (i32, i32, i32, i32), shade: impl Fn(i32) -> Rgb) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.cols as i32);
        let y1 = y1.min(self.rows as i32 * 2);
        for x in x0..x1 {
            let c = shade(x);
            for y in y0..y1 {
                self.pixels[y as usize * self.cols + x as usize] = c;
            }
        }
    }

    /// Flat fill of a world rectangle
    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        let area = self.view.rect(x, y, w, h);
        self.paint(area, |_| c);
    }

    /// Top and bottom pixel of a terminal cell
    fn cell(&self, col: usize, row: usize) -> (Rgb, Rgb) {
        let top = row * 2 * self.cols + col;
        (self.pixels[top], self.pixels[top + self.cols])
    }

    /// Queue every cell; the caller flushes
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        for row in 0..self.rows {
            let mut fg = None;
            let mut bg = None;
            for col in 0..self.cols {
                let (top, bot) = self.cell(col, row);
                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < self.rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── World to pixel mapping ──────────────────────────────────────────────────

/// Uniform scale of the world canvas into the pixel grid, centred
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    scale: f64,
    left: f64,
    top: f64,
}

impl Viewport {
    fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / CANVAS_WIDTH as f64).min(ph as f64 / CANVAS_HEIGHT as f64);
        Self {
            scale,
            left: (pw as f64 - CANVAS_WIDTH as f64 * scale) / 2.0,
            top: (ph as f64 - CANVAS_HEIGHT as f64 * scale) / 2.0,
        }
    }

    fn px(&self, x: i32) -> i32 {
        (self.left + x as f64 * self.scale).round() as i32
    }

    fn py(&self, y: i32) -> i32 {
        (self.top + y as f64 * self.scale).round() as i32
    }

    /// Pixel rows/columns covered by a world rectangle, clipped to the canvas
    fn rect(&self, x: i32, y: i32, w: i32, h: i32) -> (i32, i32, i32, i32) {
        let x0 = self.px(x.max(0));
        let x1 = self.px((x + w).min(CANVAS_WIDTH));
        let y0 = self.py(y.max(0));
        let y1 = self.py((y + h).min(CANVAS_HEIGHT));
        (x0, y0, x1, y1)
    }
}

// ── Screen ──────────────────────────────────────────────────────────────────

struct Label {
    col: i32,
    row: i32,
    text: String,
    fg: Rgb,
}

/// Draws controller state to the terminal
pub struct Screen {
    canvas: Canvas,
    labels: Vec<Label>,
}

impl Screen {
    /// Sized for a terminal of `cols` x `rows` cells
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            canvas: Canvas::fit(cols, rows),
            labels: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.canvas = Canvas::fit(cols, rows);
    }

    /// Draw one frame and flush it
    pub fn draw(&mut self, controller: &Controller, out: &mut impl Write) -> io::Result<()> {
        self.canvas.clear();
        self.labels.clear();
        self.draw_sky();

        let session = controller.session();
        match controller.mode() {
            Mode::Playing => {
                for obstacle in session.obstacles() {
                    self.draw_obstacle(obstacle);
                }
                self.draw_avatar(session.avatar());
                self.label(10, 50, format!("Score: {}", session.score()), TEXT);
                self.label(10, 100, format!("High Score: {}", session.high_score()), TEXT);
            }
            Mode::Menu => self.draw_menu(controller),
        }

        self.canvas.render(out)?;
        self.render_labels(out)?;
        out.flush()
    }

    fn draw_sky(&mut self) {
        let area = self.canvas.view.rect(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let (_, y0, _, y1) = area;
        for y in y0..y1 {
            let c = SKY_TOP.mix(SKY_BOT, y - y0, y1 - y0);
            self.canvas.paint((area.0, y, area.2, y + 1), |_| c);
        }
    }

    /// Pipe section shaded across its full width, even when clipped at the
    /// canvas edge
    fn fill_shaded(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let area = self.canvas.view.rect(x, y, w, h);
        let full_x0 = self.canvas.view.px(x);
        let full_w = self.canvas.view.px(x + w) - full_x0;
        self.canvas.paint(area, |px| pipe_shade(px - full_x0, full_w));
    }

    fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        self.canvas.fill(x, y, w, h, c);
    }

    fn draw_obstacle(&mut self, obstacle: &Obstacle) {
        let x = obstacle.x();
        let w = obstacle.width();
        self.fill_shaded(x, 0, w, obstacle.gap_top());
        self.fill_shaded(x, obstacle.gap_bottom(), w, CANVAS_HEIGHT - obstacle.gap_bottom());
    }

    fn draw_avatar(&mut self, avatar: &Avatar) {
        let (x, y, size) = (avatar.x(), avatar.y(), avatar.size());
        self.fill(x, y, size, size, AVATAR);
        self.fill(x + 4, y + 4, size - 8, size / 5, AVATAR_HI);
        self.fill(x + size - 14, y + 10, 8, 8, AVATAR_EYE);
    }

    fn draw_menu(&mut self, controller: &Controller) {
        if let Some(report) = controller.last_game() {
            self.draw_game_over(report);
        }

        self.centered(CANVAS_HEIGHT / 2 - 24, "Main Menu".to_string(), TEXT);
        self.centered(
            CANVAS_HEIGHT / 2 + 24,
            "Press Space to start the game".to_string(),
            TEXT,
        );

        let ranked = controller.history().ranked();
        let mut y = CANVAS_HEIGHT / 2 + 100;
        self.centered(y, "High Scores".to_string(), TEXT);
        if ranked.is_empty() {
            y += self.row_height();
            self.centered(y, "(none yet)".to_string(), TEXT);
        }
        for (rank, score) in ranked {
            y += self.row_height();
            self.centered(y, format!("High Score {}: {}", rank, score), TEXT);
        }

        self.centered(CANVAS_HEIGHT - 40, "Q / Esc: Exit".to_string(), TEXT);
    }

    fn draw_game_over(&mut self, report: &GameOver) {
        let (w, h) = (360, 220);
        let (x, y) = ((CANVAS_WIDTH - w) / 2, 100);
        self.fill(x - 6, y - 6, w + 12, h + 12, PANEL_EDGE);
        self.fill(x, y, w, h, PANEL);

        let step = self.row_height().max(40);
        self.centered(y + 30, "Game over!".to_string(), TEXT);
        self.centered(y + 30 + step, format!("Score: {}", report.score), TEXT);
        self.centered(
            y + 30 + step * 2,
            format!("High Score: {}", report.high_score),
            TEXT,
        );
    }

    /// World units covered by one terminal row
    fn row_height(&self) -> i32 {
        if self.canvas.view.scale > 0.0 {
            (2.0 / self.canvas.view.scale).ceil() as i32
        } else {
            CANVAS_HEIGHT
        }
    }

    fn label(&mut self, x: i32, y: i32, text: String, fg: Rgb) {
        self.labels.push(Label {
            col: self.canvas.view.px(x),
            row: self.canvas.view.py(y) / 2,
            text,
            fg,
        });
    }

    fn centered(&mut self, y: i32, text: String, fg: Rgb) {
        let mid = self.canvas.view.px(CANVAS_WIDTH / 2);
        self.labels.push(Label {
            col: mid - text.chars().count() as i32 / 2,
            row: self.canvas.view.py(y) / 2,
            text,
            fg,
        });
    }

    fn render_labels(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.canvas.rows as i32;
        let cols = self.canvas.cols as i32;
        for label in &self.labels {
            if label.row < 0 || label.row >= rows {
                continue;
            }
            let skip = (-label.col).max(0) as usize;
            let col = label.col.max(0);
            let room = (cols - col).max(0) as usize;
            let text: String = label.text.chars().skip(skip).take(room).collect();
            if text.is_empty() {
                continue;
            }
            // Take the background from the pixel under the first character
            let (bg, _) = self.canvas.cell(col as usize, label.row as usize);
            let fg = if bg == LETTERBOX { TEXT_LIGHT } else { label.fg };
            queue!(
                out,
                cursor::MoveTo(col as u16, label.row as u16),
                style::SetBackgroundColor(bg.term()),
                style::SetForegroundColor(fg.term()),
                style::Print(text),
            )?;
        }
        queue!(out, style::ResetColor)
    }
}

/// Dark edges, highlight three eighths of the way across
fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let last = total_w - 1;
    let x = x.clamp(0, last);
    let peak = last * 3 / 8;
    if x < peak {
        PIPE_L.mix(PIPE_HI, x, peak)
    } else {
        PIPE_HI.mix(PIPE_L, x - peak, last - peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::controller::Input;
    use crate::scores::ScoreFile;

    fn controller(dir: &tempfile::TempDir) -> Controller {
        Controller::new(1, ScoreFile::new(dir.path().join("scores.txt")), Box::new(Silent))
    }

    #[test]
    fn test_viewport_identity() {
        let view = Viewport::fit(600, 800);
        assert_eq!(view.scale, 1.0);
        assert_eq!((view.px(0), view.py(0)), (0, 0));
        assert_eq!(view.rect(-50, 700, 100, 300), (0, 700, 50, 800));
    }

    #[test]
    fn test_viewport_letterboxes_wide_terminal() {
        // 120 x 40 cells is 120 x 80 pixels; height limits the scale
        let view = Viewport::fit(120, 80);
        assert_eq!(view.scale, 0.1);
        assert_eq!(view.px(0), 30);
        assert_eq!(view.px(CANVAS_WIDTH), 90);
        assert_eq!(view.py(CANVAS_HEIGHT), 80);
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(SKY_TOP.mix(SKY_BOT, 0, 10), SKY_TOP);
        assert_eq!(SKY_TOP.mix(SKY_BOT, 10, 10), SKY_BOT);
        assert_eq!(Rgb(0, 0, 0).mix(Rgb(200, 100, 50), 1, 2), Rgb(100, 50, 25));
        assert_eq!(SKY_TOP.mix(SKY_BOT, 3, 0), SKY_BOT);
    }

    #[test]
    fn test_canvas_fill_clips_to_world() {
        // 60 x 80 pixels is the world at a tenth of its size
        let mut canvas = Canvas::fit(60, 40);
        canvas.fill(-100, 780, 200, 100, AVATAR);
        assert_eq!(canvas.cell(0, 39), (AVATAR, AVATAR));
        assert_eq!(canvas.cell(9, 39), (AVATAR, AVATAR));
        assert_eq!(canvas.cell(10, 39), (LETTERBOX, LETTERBOX));
        assert_eq!(canvas.cell(0, 38), (LETTERBOX, LETTERBOX));
    }

    #[test]
    fn test_pipe_shade_edges_dark() {
        assert_eq!(pipe_shade(0, 8), PIPE_L);
        assert_eq!(pipe_shade(7, 8), PIPE_L);
        assert_eq!(pipe_shade(0, 1), PIPE_M);
    }

    #[test]
    fn test_menu_frame_shows_title() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(&dir);
        let mut screen = Screen::new(80, 40);
        let mut out = Vec::new();
        screen.draw(&controller, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Main Menu"));
        assert!(text.contains("High Scores"));
    }

    #[test]
    fn test_playing_frame_shows_score() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller(&dir);
        controller.handle(Input::Space);
        let mut screen = Screen::new(80, 40);
        let mut out = Vec::new();
        screen.draw(&controller, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score: 0"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(&dir);
        let mut screen = Screen::new(3, 1);
        let mut out = Vec::new();
        screen.draw(&controller, &mut out).unwrap();
        screen.resize(0, 0);
        screen.draw(&controller, &mut out).unwrap();
    }
}
