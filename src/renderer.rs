use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::config::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{Facing, SpriteKind, SpriteView, Vec2};
use crate::menu::{MENU_TITLE, MenuButton, WorldRect};
use crate::session::{GameSession, SessionState};
use crate::tilemap::TileMap;

const MAGE_LEFT_GLYPHS: [&str; 4] = ["◂@", "◃@", "◂@", "◃@"];
const MAGE_RIGHT_GLYPHS: [&str; 4] = ["@▸", "@▹", "@▸", "@▹"];
const FIREBALL_GLYPHS: [&str; 6] = ["*", "✶", "✷", "✸", "✷", "✶"];
const ENEMY_GLYPHS: [&str; 8] = ["☻", "☻", "☺", "☺", "☻", "☻", "☺", "☺"];

/// Maps the world rectangle onto a block of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    /// The playfield inside the outer border of the terminal area.
    pub fn for_terminal(area: Rect) -> Self {
        let block = Block::default().borders(Borders::ALL);
        Self {
            area: block.inner(area),
        }
    }

    fn scale_x(&self) -> f32 {
        WORLD_WIDTH / f32::from(self.area.width.max(1))
    }

    fn scale_y(&self) -> f32 {
        WORLD_HEIGHT / f32::from(self.area.height.max(1))
    }

    /// Terminal cell showing the world point, if it is on screen.
    pub fn to_cell(&self, point: Vec2) -> Option<(u16, u16)> {
        if self.area.is_empty() || !(0.0..WORLD_WIDTH).contains(&point.x) {
            return None;
        }
        if !(0.0..WORLD_HEIGHT).contains(&point.y) {
            return None;
        }
        let col = (point.x / self.scale_x()) as u16;
        let row = (point.y / self.scale_y()) as u16;
        Some((
            self.area.x + col.min(self.area.width - 1),
            self.area.y + row.min(self.area.height - 1),
        ))
    }

    /// World point at the center of a terminal cell, if the cell is on the playfield.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        let inside = column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom();
        if !inside {
            return None;
        }
        Some(Vec2::new(
            (f32::from(column - self.area.x) + 0.5) * self.scale_x(),
            (f32::from(row - self.area.y) + 0.5) * self.scale_y(),
        ))
    }

    /// Smallest cell rectangle covering a world rectangle.
    pub fn cover(&self, rect: WorldRect) -> Rect {
        let left = (rect.x / self.scale_x()).floor() as u16;
        let top = (rect.y / self.scale_y()).floor() as u16;
        let right = ((rect.x + rect.width) / self.scale_x()).ceil() as u16;
        let bottom = ((rect.y + rect.height) / self.scale_y()).ceil() as u16;
        Rect::new(
            self.area.x + left,
            self.area.y + top,
            right.saturating_sub(left).max(1),
            bottom.saturating_sub(top).max(1),
        )
        .intersection(self.area)
    }
}

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub session: &'a GameSession,
    pub area: Rect,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.session.state() {
            SessionState::Menu => self.render_menu(frame, view),
            SessionState::Playing => self.render_game(frame, view),
        }
    }

    fn outer_block<'a>(&self, title: Line<'a>, footer: Line<'a>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(footer.centered())
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let viewport = Viewport::for_terminal(view.area);

        let title = Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", view.session.score()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", view.session.enemies().len()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let footer = Line::from(Span::styled(
            " [WASD/Arrows: Move] [Click: Cast] [Q: Quit] ",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(self.outer_block(title, footer), view.area);

        self.render_map(frame, view.session.map(), &viewport);

        // Sprites go straight into the buffer
        let buffer = frame.buffer_mut();
        for sprite in view.session.sprites() {
            let Some((x, y)) = viewport.to_cell(sprite.position) else {
                continue;
            };
            let (glyph, style) = sprite_glyph(&sprite);
            let max_width = usize::from(viewport.area.right() - x);
            buffer.set_stringn(x, y, glyph, max_width, style);
        }
    }

    /// Paints every playfield cell as wall or floor by sampling its center
    fn render_map(&self, frame: &mut Frame, map: &TileMap, viewport: &Viewport) {
        let buffer = frame.buffer_mut();
        let wall = Style::default().fg(Color::Gray).bg(Color::DarkGray);
        let floor = Style::default().fg(Color::Rgb(60, 60, 60));

        for row in viewport.area.top()..viewport.area.bottom() {
            for column in viewport.area.left()..viewport.area.right() {
                let Some(point) = viewport.to_world(column, row) else {
                    continue;
                };
                let (symbol, style) = if map.is_wall(point.x, point.y) {
                    ("▓", wall)
                } else {
                    ("·", floor)
                };
                buffer.set_string(column, row, symbol, style);
            }
        }
    }

    /// Renders the title menu and its three buttons
    fn render_menu(&self, frame: &mut Frame, view: &RenderView) {
        let viewport = Viewport::for_terminal(view.area);
        let footer = Line::from(Span::styled(
            " [Click/Enter: Start] [M: Sound] [Q: Quit] ",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(self.outer_block(Line::from(""), footer), view.area);

        let title_area = viewport.cover(WorldRect::new(0.0, 50.0, WORLD_WIDTH, 50.0));
        frame.render_widget(
            Paragraph::new(Line::from(MENU_TITLE).bold().white()).alignment(Alignment::Center),
            title_area,
        );

        for button in MenuButton::ALL {
            let area = viewport.cover(button.rect());
            let label = button.label(view.session.sound_enabled());
            frame.render_widget(Clear, area);

            // Tiny terminals cannot fit a bordered button
            let widget = if area.height >= 3 {
                Paragraph::new(label).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Blue)),
                )
            } else {
                Paragraph::new(label)
            };
            frame.render_widget(
                widget
                    .style(Style::default().fg(Color::White).bg(Color::Rgb(0, 0, 139)))
                    .alignment(Alignment::Center),
                area,
            );
        }
    }
}

/// Glyph and style for one sprite frame
fn sprite_glyph(sprite: &SpriteView) -> (&'static str, Style) {
    match sprite.kind {
        SpriteKind::Mage(facing) => {
            let glyphs = match facing {
                Facing::Left => &MAGE_LEFT_GLYPHS,
                Facing::Right => &MAGE_RIGHT_GLYPHS,
            };
            (
                glyphs[sprite.frame % glyphs.len()],
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )
        }
        SpriteKind::Fireball => {
            let color = if sprite.frame % 2 == 0 {
                Color::Yellow
            } else {
                Color::LightRed
            };
            (
                FIREBALL_GLYPHS[sprite.frame % FIREBALL_GLYPHS.len()],
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        SpriteKind::Enemy => (
            ENEMY_GLYPHS[sprite.frame % ENEMY_GLYPHS.len()],
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}
