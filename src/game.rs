use tracing::{debug, info, warn};

use crate::ai::{MoveSelector, build_selector};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{ReversiError, Result};
use crate::rules::{apply_move, has_legal_move, is_finished, is_legal, legal_moves};
use crate::types::{Color, GameResult, GameState, MoveOutcome, Outcome, Position};

/// Whose move it is, or how the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Color),
    Finished(Outcome),
}

/// Owns the board and arbitrates turns between a human and an optional AI.
pub struct GameInstance {
    board: Board,
    state: TurnState,
    config: GameConfig,
    passed: Option<Color>,
    flipped: Vec<Position>,
    selector: Option<Box<dyn MoveSelector>>,
}

/// Starts a default game of the given size with the configured AI.
pub fn new_game(columns: u8, rows: u8) -> Result<GameInstance> {
    GameInstance::new(GameConfig::with_size(columns, rows))
}

impl GameInstance {
    /// Creates a game with the selector named in `config` (none for two humans).
    pub fn new(config: GameConfig) -> Result<Self> {
        let selector = config.human_color.map(|_| build_selector(&config));
        Self::build(config, selector)
    }

    pub fn with_selector(config: GameConfig, selector: Box<dyn MoveSelector>) -> Result<Self> {
        Self::build(config, Some(selector))
    }

    fn build(config: GameConfig, selector: Option<Box<dyn MoveSelector>>) -> Result<Self> {
        config.validate()?;
        let board = Board::with_diagonal(config.columns, config.rows, config.diagonal_color)?;
        let mut game = Self {
            board,
            state: TurnState::AwaitingMove(Color::Black),
            config,
            passed: None,
            flipped: Vec::new(),
            selector,
        };
        game.settle_start();
        Ok(game)
    }

    /// Resets to the initial board, keeping the selector and whatever it learned.
    pub fn restart(&mut self) -> Result<()> {
        self.board =
            Board::with_diagonal(self.config.columns, self.config.rows, self.config.diagonal_color)?;
        self.state = TurnState::AwaitingMove(Color::Black);
        self.passed = None;
        self.flipped.clear();
        self.settle_start();
        Ok(())
    }

    /// A 2x2 board is full from the start.
    fn settle_start(&mut self) {
        if is_finished(&self.board) {
            self.finish();
        }
    }

    pub fn into_selector(self) -> Option<Box<dyn MoveSelector>> {
        self.selector
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Color to move; `None` once the game is over.
    pub fn current_color(&self) -> Option<Color> {
        match self.state {
            TurnState::AwaitingMove(color) => Some(color),
            TurnState::Finished(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, TurnState::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TurnState::Finished(outcome) => Some(outcome),
            TurnState::AwaitingMove(_) => None,
        }
    }

    /// Legal moves for the color to move, row-major.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.current_color()
            .map(|color| legal_moves(&self.board, color))
            .unwrap_or_default()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.selector.is_some()
            && self.config.human_color.is_some()
            && self.current_color().is_some_and(|color| Some(color) != self.config.human_color)
    }

    /// Plays `(col, row)` for `color`. On error nothing changes.
    pub fn submit_move(&mut self, color: Color, col: i32, row: i32) -> Result<MoveOutcome> {
        let expected = match self.state {
            TurnState::Finished(_) => return Err(ReversiError::GameOver),
            TurnState::AwaitingMove(expected) => expected,
        };
        if color != expected {
            return Err(ReversiError::NotYourTurn {
                expected,
                got: color,
            });
        }

        let flips = apply_move(&mut self.board, color, col, row).inspect_err(|err| {
            warn!(%color, col, row, error = %err, "move rejected");
        })?;
        debug!(%color, col, row, flipped = flips.len(), "move applied");

        self.flipped = flips.clone();
        self.passed = None;
        self.advance_turn(color);

        Ok(MoveOutcome {
            flips,
            terminal: self.is_game_over(),
            passed: self.passed,
            winner: self.outcome(),
        })
    }

    /// Asks the selector for a move for `color`. `None` means `color` passes.
    pub fn request_ai_move(&mut self, color: Color) -> Option<Position> {
        let selector = self.selector.as_mut()?;
        let choice = selector.select_move(&self.board, color);
        debug!(%color, selector = selector.name(), ?choice, "ai move requested");
        choice
    }

    /// Lets the AI play for the color to move.
    pub fn play_ai_turn(&mut self) -> Result<MoveOutcome> {
        let color = self.current_color().ok_or(ReversiError::GameOver)?;
        if !self.is_ai_turn() {
            return Err(ReversiError::NotYourTurn {
                expected: color,
                got: color.opposite(),
            });
        }

        let Some(choice) = self.request_ai_move(color) else {
            if !self.pass_if_stuck() {
                warn!(%color, "ai returned no move despite legal moves");
                return Err(ReversiError::NoAiMove { color });
            }
            return Ok(MoveOutcome {
                flips: Vec::new(),
                terminal: self.is_game_over(),
                passed: self.passed,
                winner: self.outcome(),
            });
        };

        let (col, row) = (choice.col as i32, choice.row as i32);
        if !is_legal(&self.board, color, col, row) {
            warn!(%color, %choice, "ai selected an illegal move");
        }
        self.submit_move(color, col, row)
    }

    /// Resolves a to-move color that has no legal move: the turn goes to the
    /// opponent, or the game ends if neither side can move. Returns whether
    /// anything changed.
    pub fn pass_if_stuck(&mut self) -> bool {
        let TurnState::AwaitingMove(color) = self.state else {
            return false;
        };
        if has_legal_move(&self.board, color) {
            return false;
        }

        if has_legal_move(&self.board, color.opposite()) && !is_finished(&self.board) {
            info!(%color, "no legal move, passing");
            self.passed = Some(color);
            self.state = TurnState::AwaitingMove(color.opposite());
        } else {
            self.finish();
        }
        true
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.counts();
        GameState {
            columns: self.board.columns(),
            rows: self.board.rows(),
            board: self.board.to_array(),
            current_player: self.current_color(),
            black_count,
            white_count,
            is_game_over: self.is_game_over(),
            passed: self.passed,
            flipped: self.flipped.clone(),
            outcome: self.outcome(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.counts();
        GameResult {
            outcome: Outcome::from_counts(black_count, white_count),
            black_count,
            white_count,
        }
    }

    fn advance_turn(&mut self, mover: Color) {
        if is_finished(&self.board) {
            self.finish();
            return;
        }

        let opponent = mover.opposite();
        if has_legal_move(&self.board, opponent) {
            self.state = TurnState::AwaitingMove(opponent);
        } else if has_legal_move(&self.board, mover) {
            info!(color = %opponent, "no legal move, passing");
            self.passed = Some(opponent);
            self.state = TurnState::AwaitingMove(mover);
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let (black, white) = self.board.counts();
        let outcome = Outcome::from_counts(black, white);
        info!(?outcome, black, white, "game over");
        self.state = TurnState::Finished(outcome);
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, to_move: Color) {
        self.board = board;
        self.state = TurnState::AwaitingMove(to_move);
        self.passed = None;
        self.flipped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMoveReason;

    struct FixedMoveSelector {
        mv: Option<Position>,
    }

    impl MoveSelector for FixedMoveSelector {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn select_move(&mut self, _board: &Board, _color: Color) -> Option<Position> {
            self.mv
        }
    }

    fn two_humans() -> GameConfig {
        GameConfig {
            human_color: None,
            ..GameConfig::default()
        }
    }

    fn fixed(mv: Option<Position>) -> Box<dyn MoveSelector> {
        Box::new(FixedMoveSelector { mv })
    }

    #[test]
    fn initial_state_is_correct() {
        let game = new_game(8, 8).unwrap();
        let state = game.to_game_state();

        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
        assert_eq!(state.current_player, Some(Color::Black));
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert!(!state.is_game_over);
        assert!(state.passed.is_none());
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
        assert!(!game.is_ai_turn());
    }

    #[test]
    fn malformed_dimensions_are_rejected_at_setup() {
        assert!(matches!(
            new_game(7, 8),
            Err(ReversiError::Configuration(_))
        ));
        assert!(matches!(
            new_game(0, 2),
            Err(ReversiError::Configuration(_))
        ));
    }

    #[test]
    fn illegal_move_is_rejected_without_side_effects() {
        let mut game = GameInstance::new(two_humans()).unwrap();
        let before = game.board().clone();

        let err = game.submit_move(Color::Black, 0, 0).unwrap_err();

        assert_eq!(
            err,
            ReversiError::invalid_move(0, 0, InvalidMoveReason::NoFlips)
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
    }

    #[test]
    fn out_of_turn_move_is_rejected() {
        let mut game = GameInstance::new(two_humans()).unwrap();

        let err = game.submit_move(Color::White, 2, 3).unwrap_err();

        assert_eq!(
            err,
            ReversiError::NotYourTurn {
                expected: Color::Black,
                got: Color::White,
            }
        );
    }

    #[test]
    fn accepted_move_hands_turn_to_opponent() {
        let mut game = GameInstance::new(two_humans()).unwrap();

        let outcome = game.submit_move(Color::Black, 2, 3).unwrap();

        assert_eq!(outcome.flips, vec![Position::new(3, 3)]);
        assert!(!outcome.terminal);
        assert_eq!(outcome.passed, None);
        assert_eq!(outcome.winner, None);
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::White));
        assert_eq!(game.to_game_state().flipped, vec![Position::new(3, 3)]);
    }

    #[test]
    fn opponent_without_moves_passes_back() {
        // After black takes (2,0), white has no reply but black can still play (0,2).
        let mut game = GameInstance::new(two_humans()).unwrap();
        let board = Board::from_diagram(
            "
            BW..
            W...
            ....
            ....
            ",
        )
        .unwrap();
        game.set_board_for_test(board, Color::Black);

        let outcome = game.submit_move(Color::Black, 2, 0).unwrap();

        assert_eq!(outcome.passed, Some(Color::White));
        assert!(!outcome.terminal);
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
        assert_eq!(game.to_game_state().passed, Some(Color::White));
    }

    #[test]
    fn full_board_after_move_finishes_game() {
        let mut game = GameInstance::new(two_humans()).unwrap();
        let board = Board::from_diagram("WB.").unwrap();
        game.set_board_for_test(board, Color::White);

        let outcome = game.submit_move(Color::White, 2, 0).unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.winner, Some(Outcome::Winner(Color::White)));
        assert!(game.is_game_over());
        assert_eq!(game.current_color(), None);
        assert_eq!(game.submit_move(Color::Black, 0, 0), Err(ReversiError::GameOver));
    }

    #[test]
    fn wiping_out_a_color_finishes_game() {
        let mut game = GameInstance::new(two_humans()).unwrap();
        let board = Board::from_diagram("BW..\n....").unwrap();
        game.set_board_for_test(board, Color::Black);

        let outcome = game.submit_move(Color::Black, 2, 0).unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.winner, Some(Outcome::Winner(Color::Black)));
        assert_eq!(game.to_game_result().white_count, 0);
    }

    #[test]
    fn neither_side_able_to_move_finishes_game() {
        // After black plays (2,0) neither side can move although two cells stay empty.
        let mut game = GameInstance::new(two_humans()).unwrap();
        let board = Board::from_diagram(
            "
            BW..
            W...
            ",
        )
        .unwrap();
        game.set_board_for_test(board, Color::Black);

        let outcome = game.submit_move(Color::Black, 2, 0).unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.winner, Some(Outcome::Winner(Color::Black)));
    }

    #[test]
    fn equal_counts_are_a_draw() {
        let mut game = GameInstance::new(two_humans()).unwrap();
        let board = Board::from_diagram("WB.B\nBBBW").unwrap();
        game.set_board_for_test(board, Color::White);

        let outcome = game.submit_move(Color::White, 2, 0).unwrap();

        assert_eq!(outcome.winner, Some(Outcome::Draw));
        assert_eq!(game.to_game_result().outcome, Outcome::Draw);
    }

    #[test]
    fn ai_turn_plays_selected_move() {
        let mut game =
            GameInstance::with_selector(GameConfig::default(), fixed(Some(Position::new(2, 3))))
                .unwrap();
        game.submit_move(Color::Black, 2, 3).unwrap();
        assert!(game.is_ai_turn());

        // White replies; the fixed selector's choice must still be legal for white.
        game.selector = Some(fixed(Some(Position::new(2, 2))));
        let outcome = game.play_ai_turn().unwrap();

        assert_eq!(outcome.flips, vec![Position::new(3, 3)]);
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
    }

    #[test]
    fn ai_illegal_choice_is_rejected() {
        let mut game =
            GameInstance::with_selector(GameConfig::default(), fixed(Some(Position::new(0, 0))))
                .unwrap();
        game.submit_move(Color::Black, 2, 3).unwrap();

        let err = game.play_ai_turn().unwrap_err();

        assert!(matches!(err, ReversiError::InvalidMove { .. }));
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::White));
    }

    #[test]
    fn play_ai_turn_refuses_human_turn() {
        let mut game = GameInstance::new(GameConfig::default()).unwrap();

        assert!(matches!(
            game.play_ai_turn(),
            Err(ReversiError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn stuck_color_passes_or_finishes() {
        let mut game = GameInstance::with_selector(GameConfig::default(), fixed(None)).unwrap();
        // White to move cannot play; black can take (2,0).
        let board = Board::from_diagram("BW..\nW...\n....\n....").unwrap();
        game.set_board_for_test(board, Color::White);

        let outcome = game.play_ai_turn().unwrap();

        assert_eq!(outcome.passed, Some(Color::White));
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
        assert!(!game.pass_if_stuck());
    }

    #[test]
    fn ai_giving_up_with_legal_moves_is_an_error() {
        let mut game = GameInstance::with_selector(GameConfig::default(), fixed(None)).unwrap();
        game.submit_move(Color::Black, 2, 3).unwrap();
        let before = game.board().clone();

        let err = game.play_ai_turn().unwrap_err();

        assert_eq!(err, ReversiError::NoAiMove { color: Color::White });
        assert_eq!(game.board(), &before);
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::White));
        assert_eq!(game.to_game_state().passed, None);
    }

    #[test]
    fn stuck_on_both_sides_finishes_game() {
        // Two empties remain but neither color can flip anything.
        let mut game = GameInstance::with_selector(GameConfig::default(), fixed(None)).unwrap();
        let board = Board::from_diagram("B.W.").unwrap();
        assert!(!is_finished(&board));
        game.set_board_for_test(board, Color::White);

        let outcome = game.play_ai_turn().unwrap();

        assert!(outcome.terminal);
        assert_eq!(outcome.passed, None);
        assert_eq!(outcome.winner, Some(Outcome::Draw));
        assert_eq!(game.state(), TurnState::Finished(Outcome::Draw));
    }

    #[test]
    fn ai_opens_when_human_plays_white() {
        let config = GameConfig {
            human_color: Some(Color::White),
            seed: Some(5),
            ..GameConfig::default()
        };
        let mut game = GameInstance::new(config).unwrap();

        assert_eq!(game.config().ai_color(), Some(Color::Black));
        assert!(game.is_ai_turn());

        let outcome = game.play_ai_turn().unwrap();

        assert_eq!(outcome.flips.len(), 1);
        assert_eq!(game.board().counts(), (4, 1));
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::White));
        assert!(!game.is_ai_turn());
        assert!(matches!(
            game.play_ai_turn(),
            Err(ReversiError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn restart_keeps_selector() {
        let mut game = GameInstance::new(GameConfig::default()).unwrap();
        game.submit_move(Color::Black, 2, 3).unwrap();

        game.restart().unwrap();

        assert_eq!(game.board(), &Board::default());
        assert_eq!(game.state(), TurnState::AwaitingMove(Color::Black));
        assert!(game.into_selector().is_some());
    }
}
