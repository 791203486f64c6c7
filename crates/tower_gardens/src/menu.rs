//! Menu state machine
//!
//! One struct owns the screen flow; every transition is an explicit method
//! so tests can drive the machine without a keyboard.

use siege_engine::prelude::{InputState, KeyCode};

/// Which screen the game is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    /// Waiting for the player to start
    Title,
    /// Gameplay running
    Playing,
    /// Gameplay suspended
    Paused,
    /// The base fell; waiting to return to the title
    GameOver,
}

/// What the game loop should do in response to a menu transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// No transition happened
    None,
    /// A fresh run begins
    StartRun,
    /// Gameplay resumes
    Resume,
    /// Gameplay suspends
    Suspend,
    /// The player asked to leave from the title screen
    Quit,
}

/// Screen flow plus the scoreboard shown on it
#[derive(Debug)]
pub struct MenuState {
    screen: MenuScreen,
    score: u32,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            screen: MenuScreen::Title,
            score: 0,
        }
    }
}

impl MenuState {
    /// Start at the title screen
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen currently shown
    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    /// Whether gameplay systems should advance
    pub fn gameplay_active(&self) -> bool {
        self.screen == MenuScreen::Playing
    }

    /// Goblins defeated this run
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Award a point for a defeated goblin
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// The base fell; only meaningful while playing
    pub fn notify_defeat(&mut self) {
        if self.screen == MenuScreen::Playing {
            log::info!("Game over, final score {}", self.score);
            self.screen = MenuScreen::GameOver;
        }
    }

    /// Apply this frame's key edges and report the resulting transition
    pub fn apply_input(&mut self, input: &InputState) -> MenuAction {
        let enter = input.was_pressed(KeyCode::Enter);
        let escape = input.was_pressed(KeyCode::Escape);

        match self.screen {
            MenuScreen::Title if enter => {
                self.screen = MenuScreen::Playing;
                self.score = 0;
                log::info!("Run started");
                MenuAction::StartRun
            }
            MenuScreen::Title if escape => MenuAction::Quit,
            MenuScreen::Playing if escape => {
                self.screen = MenuScreen::Paused;
                MenuAction::Suspend
            }
            MenuScreen::Paused if escape || enter => {
                self.screen = MenuScreen::Playing;
                MenuAction::Resume
            }
            MenuScreen::GameOver if enter => {
                self.screen = MenuScreen::Title;
                MenuAction::None
            }
            _ => MenuAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: KeyCode) {
        input.begin_frame();
        input.set_key(key, false);
        input.begin_frame();
        input.set_key(key, true);
    }

    #[test]
    fn test_title_to_playing_on_enter() {
        let mut menu = MenuState::new();
        let mut input = InputState::new();

        press(&mut input, KeyCode::Enter);
        assert_eq!(menu.apply_input(&input), MenuAction::StartRun);
        assert_eq!(menu.screen(), MenuScreen::Playing);
        assert!(menu.gameplay_active());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut menu = MenuState::new();
        let mut input = InputState::new();
        press(&mut input, KeyCode::Enter);
        menu.apply_input(&input);

        press(&mut input, KeyCode::Escape);
        assert_eq!(menu.apply_input(&input), MenuAction::Suspend);
        assert_eq!(menu.screen(), MenuScreen::Paused);

        press(&mut input, KeyCode::Escape);
        assert_eq!(menu.apply_input(&input), MenuAction::Resume);
        assert!(menu.gameplay_active());
    }

    #[test]
    fn test_defeat_only_fires_while_playing() {
        let mut menu = MenuState::new();
        menu.notify_defeat();
        assert_eq!(menu.screen(), MenuScreen::Title);

        let mut input = InputState::new();
        press(&mut input, KeyCode::Enter);
        menu.apply_input(&input);
        menu.notify_defeat();
        assert_eq!(menu.screen(), MenuScreen::GameOver);

        // Enter returns to the title and a new run resets the score
        menu.add_score(5);
        press(&mut input, KeyCode::Enter);
        menu.apply_input(&input);
        assert_eq!(menu.screen(), MenuScreen::Title);
        press(&mut input, KeyCode::Enter);
        menu.apply_input(&input);
        assert_eq!(menu.score(), 0);
    }

    #[test]
    fn test_held_key_is_not_a_transition() {
        let mut menu = MenuState::new();
        let mut input = InputState::new();
        press(&mut input, KeyCode::Enter);
        menu.apply_input(&input);

        // Enter still held on the next frame: no edge, no transition
        input.begin_frame();
        assert_eq!(menu.apply_input(&input), MenuAction::None);
        assert_eq!(menu.screen(), MenuScreen::Playing);
    }
}
