//! JS-facing surface for the rendering layer.
//!
//! The rendering layer forwards every click and every AI choice through
//! `submitMove` and redraws from the returned state; it never edits the board.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::{Result, ReversiError};
use crate::game::GameInstance;
use crate::types::{MoveReport, Position};

#[wasm_bindgen]
pub struct ReversiSession {
    game: GameInstance,
}

impl ReversiSession {
    pub fn from_config(config: GameConfig) -> Result<Self> {
        Ok(Self {
            game: GameInstance::new(config)?,
        })
    }

    pub fn game(&self) -> &GameInstance {
        &self.game
    }

    /// Plays for the color to move; illegal moves are reported, not raised.
    pub fn submit(&mut self, col: i32, row: i32) -> MoveReport {
        let Some(color) = self.game.current_color() else {
            return MoveReport::rejected(ReversiError::GameOver);
        };
        match self.game.submit_move(color, col, row) {
            Ok(outcome) => outcome.into(),
            Err(err) => MoveReport::rejected(err),
        }
    }

    /// Asks the AI for the color to move without playing it.
    pub fn suggest(&mut self) -> Option<Position> {
        let color = self.game.current_color()?;
        self.game.request_ai_move(color)
    }

    pub fn ai_turn(&mut self) -> MoveReport {
        match self.game.play_ai_turn() {
            Ok(outcome) => outcome.into(),
            Err(err) => MoveReport::rejected(err),
        }
    }
}

#[wasm_bindgen]
impl ReversiSession {
    /// `options` is a plain object of `GameConfig` fields; `undefined` means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> std::result::Result<ReversiSession, JsValue> {
        let config: GameConfig = if options.is_undefined() || options.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Self::from_config(config).map_err(to_js_error)
    }

    /// Starts over on a fresh board; the AI keeps what it learned.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> std::result::Result<JsValue, JsValue> {
        self.game.restart().map_err(to_js_error)?;
        self.state()
    }

    pub fn state(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.game.to_game_state())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.game.legal_moves())
    }

    #[wasm_bindgen(js_name = isAiTurn)]
    pub fn is_ai_turn(&self) -> bool {
        self.game.is_ai_turn()
    }

    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, col: i32, row: i32) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.submit(col, row))
    }

    /// Returns `{col, row}` or `null` when the color to move must pass.
    #[wasm_bindgen(js_name = requestAiMove)]
    pub fn request_ai_move(&mut self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.suggest())
    }

    #[wasm_bindgen(js_name = playAiTurn)]
    pub fn play_ai_turn(&mut self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.ai_turn())
    }

    pub fn result(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.game.to_game_result())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn to_js_error(err: ReversiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::types::Color;

    fn session(strategy: StrategyKind) -> ReversiSession {
        ReversiSession::from_config(GameConfig {
            strategy,
            seed: Some(21),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn submit_reports_accepted_move() {
        let mut session = session(StrategyKind::Heuristic);

        let report = session.submit(2, 3);

        assert!(report.accepted);
        assert_eq!(report.flips, vec![Position::new(3, 3)]);
        assert!(report.error.is_none());
        assert_eq!(session.game().current_color(), Some(Color::White));
    }

    #[test]
    fn submit_reports_rejection_instead_of_failing() {
        let mut session = session(StrategyKind::Heuristic);

        let report = session.submit(0, 0);

        assert!(!report.accepted);
        assert!(report.error.unwrap().contains("illegal move"));
        assert_eq!(session.game().current_color(), Some(Color::Black));
    }

    #[test]
    fn ai_reply_follows_human_move() {
        let mut session = session(StrategyKind::Experience);
        session.submit(2, 3);

        let suggestion = session.suggest().unwrap();
        let report = session.submit(suggestion.col as i32, suggestion.row as i32);

        assert!(report.accepted);
        assert_eq!(session.game().current_color(), Some(Color::Black));
    }

    #[test]
    fn ai_turn_is_refused_on_human_turn() {
        let mut session = session(StrategyKind::Heuristic);

        assert!(!session.ai_turn().accepted);
    }
}
