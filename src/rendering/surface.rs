use crate::core::bounds::PixelRect;

/// A request to copy a rectangle of the map image onto the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBlit {
    /// Rectangle within the full map image
    pub source: PixelRect,
    /// Rectangle on the physical display
    pub dest: PixelRect,
}

/// Trait for the physical display the browser draws onto.
///
/// Implementations own pixel composition and image decoding; the browser
/// only decides which rectangles to copy and what text to print.
pub trait DisplaySurface {
    fn draw_tile(&mut self, blit: &TileBlit);

    fn fill_cursor(&mut self, rect: &PixelRect);

    fn clear(&mut self);

    /// Print one line of text below the previous one
    fn print_line(&mut self, text: &str);
}

/// A single call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Blit(TileBlit),
    Cursor(PixelRect),
    Clear,
    Line(String),
}

/// Surface that records every call, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text printed since the last clear
    pub fn lines(&self) -> Vec<String> {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn blits(&self) -> Vec<TileBlit> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Blit(blit) => Some(*blit),
                _ => None,
            })
            .collect()
    }

    /// Last cursor rectangle filled, if any
    pub fn cursor(&self) -> Option<PixelRect> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Cursor(rect) => Some(*rect),
            _ => None,
        })
    }

    /// Drains the recorded commands
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DisplaySurface for RecordingSurface {
    fn draw_tile(&mut self, blit: &TileBlit) {
        self.commands.push(DrawCommand::Blit(*blit));
    }

    fn fill_cursor(&mut self, rect: &PixelRect) {
        self.commands.push(DrawCommand::Cursor(*rect));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn print_line(&mut self, text: &str) {
        self.commands.push(DrawCommand::Line(text.to_string()));
    }
}
