//! Main menu buttons and their hit areas in world coordinates.
use crate::entities::Vec2;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Start,
    Sound,
    Exit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Start, MenuButton::Sound, MenuButton::Exit];

    pub fn rect(self) -> WorldRect {
        match self {
            MenuButton::Start => WorldRect::new(220.0, 150.0, 200.0, 50.0),
            MenuButton::Sound => WorldRect::new(220.0, 230.0, 200.0, 50.0),
            MenuButton::Exit => WorldRect::new(220.0, 310.0, 200.0, 50.0),
        }
    }

    pub fn label(self, sound_enabled: bool) -> &'static str {
        match self {
            MenuButton::Start => "Start Game",
            MenuButton::Sound if sound_enabled => "Sound: ON",
            MenuButton::Sound => "Sound: OFF",
            MenuButton::Exit => "Exit",
        }
    }

    /// The button under `point`, if any.
    pub fn at(point: Vec2) -> Option<MenuButton> {
        Self::ALL.into_iter().find(|button| button.rect().contains(point))
    }
}

pub const MENU_TITLE: &str = "Mage Arena - Menu";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_hit_testing() {
        assert_eq!(MenuButton::at(Vec2::new(320.0, 175.0)), Some(MenuButton::Start));
        assert_eq!(MenuButton::at(Vec2::new(220.0, 230.0)), Some(MenuButton::Sound));
        assert_eq!(MenuButton::at(Vec2::new(419.0, 359.0)), Some(MenuButton::Exit));
        assert_eq!(MenuButton::at(Vec2::new(420.0, 175.0)), None);
        assert_eq!(MenuButton::at(Vec2::new(320.0, 210.0)), None);
    }

    #[test]
    fn test_sound_label_follows_flag() {
        assert_eq!(MenuButton::Sound.label(true), "Sound: ON");
        assert_eq!(MenuButton::Sound.label(false), "Sound: OFF");
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        for a in MenuButton::ALL {
            for b in MenuButton::ALL {
                if a == b {
                    continue;
                }
                let (ra, rb) = (a.rect(), b.rect());
                let overlap = ra.x < rb.x + rb.width
                    && ra.x + ra.width > rb.x
                    && ra.y < rb.y + rb.height
                    && ra.y + ra.height > rb.y;
                assert!(!overlap, "{a:?} overlaps {b:?}");
            }
        }
    }
}
