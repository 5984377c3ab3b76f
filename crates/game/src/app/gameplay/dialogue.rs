use engine::{Color, Rect, Surface, SurfaceError, TextAlign, TextStyle, Vec2};
use tracing::debug;

pub(crate) const REVEAL_INTERVAL_MS: f64 = 50.0;
const INTRO_SPEAKER: &str = "Nathan";
const INTRO_LINES: [&str; 2] = [
    "Um where am i lol",
    "A Hallway thats long and purple, sounds familular",
];

const BOX_WIDTH: f32 = 600.0;
const BOX_HEIGHT: f32 = 150.0;
const BOX_BOTTOM_MARGIN: f32 = 50.0;
const TEXT_INSET: f32 = 20.0;
const LINE_SPACING: f32 = 25.0;
// 16px text is drawn at 12px per glyph cell; 560 inner px fit 46 cells.
const WRAP_COLUMNS: usize = 46;
const PROMPT_COLOR: Color = Color::rgb(0x88, 0x88, 0x88);

/// Typewriter dialogue: reveals one character per interval of simulated time.
#[derive(Debug, Clone)]
pub(crate) struct DialogueEngine {
    speaker: String,
    lines: Vec<String>,
    active: bool,
    line_index: usize,
    revealed_chars: usize,
    revealed_text: String,
    reveal_clock_ms: f64,
}

impl DialogueEngine {
    pub(crate) fn new(speaker: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            speaker: speaker.into(),
            lines,
            active: false,
            line_index: 0,
            revealed_chars: 0,
            revealed_text: String::new(),
            reveal_clock_ms: 0.0,
        }
    }

    pub(crate) fn intro() -> Self {
        Self::new(
            INTRO_SPEAKER,
            INTRO_LINES.iter().map(ToString::to_string).collect(),
        )
    }

    pub(crate) fn start(&mut self) {
        self.line_index = 0;
        self.reset_line();
        self.active = !self.lines.is_empty();
        debug!(lines = self.lines.len(), "dialogue_started");
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn speaker(&self) -> &str {
        &self.speaker
    }

    pub(crate) fn revealed_text(&self) -> &str {
        &self.revealed_text
    }

    #[cfg(test)]
    pub(crate) fn line_index(&self) -> usize {
        self.line_index
    }

    pub(crate) fn is_line_complete(&self) -> bool {
        self.current_line()
            .map_or(true, |line| self.revealed_chars >= line.chars().count())
    }

    pub(crate) fn update(&mut self, fixed_dt_ms: f64) {
        if !self.active {
            return;
        }
        self.reveal_clock_ms += fixed_dt_ms;
        if self.reveal_clock_ms < REVEAL_INTERVAL_MS || self.is_line_complete() {
            return;
        }
        let next_char = self
            .current_line()
            .and_then(|line| line.chars().nth(self.revealed_chars));
        if let Some(ch) = next_char {
            self.revealed_text.push(ch);
            self.revealed_chars += 1;
        }
        self.reveal_clock_ms = 0.0;
    }

    /// Completes a partially revealed line, otherwise moves to the next one.
    pub(crate) fn advance(&mut self) {
        if !self.active {
            return;
        }
        if !self.is_line_complete() {
            if let Some(line) = self.lines.get(self.line_index) {
                self.revealed_text.clone_from(line);
                self.revealed_chars = line.chars().count();
            }
            return;
        }
        self.line_index += 1;
        if self.line_index >= self.lines.len() {
            self.active = false;
            debug!("dialogue_finished");
        } else {
            self.reset_line();
        }
    }

    fn current_line(&self) -> Option<&String> {
        self.lines.get(self.line_index)
    }

    fn reset_line(&mut self) {
        self.revealed_chars = 0;
        self.revealed_text.clear();
        self.reveal_clock_ms = 0.0;
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        if !self.active {
            return Ok(());
        }
        let (canvas_width, canvas_height) = surface.size();
        let box_rect = Rect::new(
            (canvas_width as f32 - BOX_WIDTH) / 2.0,
            canvas_height as f32 - BOX_HEIGHT - BOX_BOTTOM_MARGIN,
            BOX_WIDTH,
            BOX_HEIGHT,
        );
        surface.fill_rect(box_rect.inflate(6.0), Color::WHITE)?;
        surface.fill_rect(box_rect.inflate(3.0), Color::BLACK)?;

        let text_x = box_rect.x + TEXT_INSET;
        surface.fill_text(
            &format!("{}:", self.speaker()),
            Vec2::new(text_x, box_rect.y + 30.0),
            TextStyle::new(Color::WHITE, 18.0),
        )?;

        let body_style = TextStyle::new(Color::WHITE, 16.0);
        for (row, line) in wrap_words(self.revealed_text(), WRAP_COLUMNS)
            .iter()
            .enumerate()
        {
            let y = box_rect.y + 60.0 + row as f32 * LINE_SPACING;
            surface.fill_text(line, Vec2::new(text_x, y), body_style)?;
        }

        if self.is_line_complete() {
            surface.fill_text(
                "Press SPACE to continue",
                Vec2::new(box_rect.right() - TEXT_INSET, box_rect.bottom() - 20.0),
                TextStyle::new(PROMPT_COLOR, 14.0).aligned(TextAlign::Right),
            )?;
        }
        Ok(())
    }
}

/// Greedy word wrap; a word longer than `columns` gets a row of its own.
pub(crate) fn wrap_words(text: &str, columns: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
