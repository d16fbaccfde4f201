//! Single-agent environment against a fixed opponent
//!
//! The agent plays one color; after each agent move the opponent policy
//! answers. Rewards are from the agent's perspective: +1 win, -1 loss,
//! 0 while the game is undecided.

use hex_core::{
    action_space, apply, evaluate, is_legal, Board, Cell, GameResult, HexError, Move, MovePolicy,
    Player, Result,
};

use crate::config::{EnvConfig, IllegalMoveMode};
use crate::observation::Observation;

/// Outcome of one environment step
#[derive(Clone, Debug)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub result: GameResult,
}

/// Game driver for one agent versus an opponent policy
pub struct HexEnv {
    config: EnvConfig,
    board: Board,
    to_play: Player,
    done: bool,
    result: GameResult,
    opponent: Box<dyn MovePolicy>,
}

impl HexEnv {
    /// Build the environment with the configured opponent and reset it
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let opponent = config.opponent.build(seed);
        Self::with_opponent(config, opponent)
    }

    /// Build the environment with a caller-supplied opponent
    pub fn with_opponent(config: EnvConfig, opponent: Box<dyn MovePolicy>) -> Result<Self> {
        config.validate()?;
        let mut env = Self {
            board: Board::new(config.board_size)?,
            config,
            to_play: Player::First,
            done: false,
            result: GameResult::Undecided,
            opponent,
        };
        env.reset()?;
        Ok(env)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Number of discrete actions (cells, pass, resign)
    pub fn action_space(&self) -> usize {
        action_space(self.config.board_size)
    }

    /// Action indices of the empty cells
    pub fn legal_actions(&self) -> Vec<usize> {
        let size = self.board.size();
        self.board
            .empty_cells()
            .into_iter()
            .map(|cell| Move::Place(cell).to_action(size))
            .collect()
    }

    pub fn observation(&self) -> Observation {
        Observation::encode(&self.board, self.config.observation_type)
    }

    /// Text dump of the board
    pub fn render(&self) -> String {
        self.board.to_string()
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Start a new game; the opponent opens if the agent plays Second
    pub fn reset(&mut self) -> Result<Observation> {
        self.board = Board::new(self.config.board_size)?;
        self.to_play = Player::First;
        self.done = false;
        self.result = GameResult::Undecided;

        if self.config.player_color != self.to_play {
            if let Some(result) = self.opponent_turn()? {
                self.finish(result);
            }
        }
        Ok(self.observation())
    }

    /// Play the agent's action followed by the opponent's reply
    pub fn step(&mut self, action: usize) -> Result<Step> {
        if self.done {
            return Ok(self.snapshot(0.0));
        }

        let agent = self.config.player_color;
        // Restored if the opponent's reply errors
        let before = self.board.clone();
        match Move::from_action(self.board.size(), action)? {
            Move::Resign => {
                tracing::debug!("{} resigns", agent);
                return Ok(self.finish(GameResult::win_for(agent.opponent())));
            }
            Move::Pass => {
                tracing::debug!("{} passes", agent);
            }
            Move::Place(cell) => {
                if !is_legal(&self.board, cell.row, cell.col)? {
                    return self.agent_illegal_move(cell);
                }
                apply(&mut self.board, cell.row, cell.col, agent)?;
                tracing::debug!("{} plays ({}, {})", agent, cell.row, cell.col);

                let result = evaluate(&self.board);
                if result.is_decided() {
                    return Ok(self.finish(result));
                }
            }
        }

        self.to_play = agent.opponent();
        match self.opponent_turn() {
            Ok(Some(result)) => Ok(self.finish(result)),
            Ok(None) => Ok(self.snapshot(0.0)),
            Err(err) => {
                self.board = before;
                self.to_play = agent;
                Err(err)
            }
        }
    }

    // ========================================================================
    // TURN HELPERS
    // ========================================================================

    fn agent_illegal_move(&mut self, cell: Cell) -> Result<Step> {
        match self.config.illegal_move_mode {
            IllegalMoveMode::Raise => Err(HexError::IllegalMove {
                row: cell.row,
                col: cell.col,
            }),
            IllegalMoveMode::Lose => {
                tracing::warn!(
                    "{} played occupied cell ({}, {}), forfeiting",
                    self.config.player_color,
                    cell.row,
                    cell.col
                );
                let winner = self.config.player_color.opponent();
                Ok(self.finish(GameResult::win_for(winner)))
            }
        }
    }

    /// Let the opponent place a stone; returns the result if decided
    fn opponent_turn(&mut self) -> Result<Option<GameResult>> {
        let opponent = self.to_play;

        let cell = match self.opponent.select_move(&self.board, opponent) {
            Some(cell) => cell,
            None => {
                tracing::warn!("{} opponent has no move, resigning", self.opponent.name());
                return Ok(Some(GameResult::win_for(opponent.opponent())));
            }
        };

        let legal = match self.config.illegal_move_mode {
            IllegalMoveMode::Raise => is_legal(&self.board, cell.row, cell.col)?,
            IllegalMoveMode::Lose => is_legal(&self.board, cell.row, cell.col).unwrap_or(false),
        };
        if !legal {
            if self.config.illegal_move_mode == IllegalMoveMode::Raise {
                return Err(HexError::IllegalMove {
                    row: cell.row,
                    col: cell.col,
                });
            }
            tracing::warn!(
                "{} opponent chose illegal cell ({}, {}), forfeiting",
                self.opponent.name(),
                cell.row,
                cell.col
            );
            return Ok(Some(GameResult::win_for(opponent.opponent())));
        }

        apply(&mut self.board, cell.row, cell.col, opponent)?;
        tracing::debug!("{} plays ({}, {})", opponent, cell.row, cell.col);
        self.to_play = opponent.opponent();

        let result = evaluate(&self.board);
        Ok(result.is_decided().then_some(result))
    }

    /// Mark the episode terminal and report the agent's reward
    fn finish(&mut self, result: GameResult) -> Step {
        self.done = true;
        self.result = result;
        let reward = self.reward_for(result);
        tracing::info!(
            "Episode over: {:?} (agent {}, reward {})",
            result,
            self.config.player_color,
            reward
        );
        self.snapshot(reward)
    }

    fn reward_for(&self, result: GameResult) -> f32 {
        match result.winner() {
            Some(winner) if winner == self.config.player_color => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    fn snapshot(&self, reward: f32) -> Step {
        Step {
            observation: self.observation(),
            reward,
            done: self.done,
            result: self.result,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
