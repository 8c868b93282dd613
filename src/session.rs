//! Play session: one live board, one learning agent, one human opponent
//!
//! The session is the driver of the learning core. It applies the human's
//! move, lets the agent learn once the history holds two plies, asks the agent
//! for a reply and lets it learn again if that reply ended the episode.

pub mod observers;

use serde::{Deserialize, Serialize};

pub use observers::{TallyObserver, TracingObserver};

use crate::{
    Error, Result,
    learning::RewardFn,
    ports::{Learner, Observer},
    tictactoe::{Board, Outcome, Player},
};

/// Result of one call into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Move the agent played in response, if it moved
    pub reply: Option<usize>,
    /// Outcome if the episode ended during this turn
    pub outcome: Option<Outcome>,
}

/// Running tally of finished episodes from the agent's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub episodes: usize,
    pub agent_wins: usize,
    pub human_wins: usize,
    pub draws: usize,
}

impl SessionStats {
    /// Count an outcome given the token the agent played
    pub fn record(&mut self, outcome: Outcome, agent: Player) {
        self.episodes += 1;
        match outcome {
            Outcome::Win(winner) if winner == agent => self.agent_wins += 1,
            Outcome::Win(_) => self.human_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Fraction of finished episodes the agent won
    pub fn agent_win_rate(&self) -> f64 {
        if self.episodes > 0 {
            self.agent_wins as f64 / self.episodes as f64
        } else {
            0.0
        }
    }
}

/// An interactive session against a learning agent
pub struct Session {
    board: Board,
    agent: Box<dyn Learner>,
    reward: Box<dyn RewardFn + Send>,
    observers: Vec<Box<dyn Observer>>,
    stats: SessionStats,
}

impl Session {
    /// Create a session on `board` with the given agent and reward function
    pub fn new(board: Board, agent: Box<dyn Learner>, reward: Box<dyn RewardFn + Send>) -> Self {
        Self {
            board,
            agent,
            reward,
            observers: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> &dyn Learner {
        self.agent.as_ref()
    }

    /// Mutable access for changing hyperparameters between episodes
    pub fn agent_mut(&mut self) -> &mut dyn Learner {
        self.agent.as_mut()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Token the human plays
    pub fn human_player(&self) -> Player {
        self.agent.player().opponent()
    }

    /// Reset the board and let the agent open if it moves first
    pub fn new_episode(&mut self, first_player: Player) -> Result<Turn> {
        self.board.reset(first_player);
        let episode = self.board.episode();
        for observer in &mut self.observers {
            observer.on_episode_start(episode, first_player)?;
        }
        tracing::debug!(episode, %first_player, agent = %self.agent.player(), "episode started");

        if self.board.to_move() == self.agent.player() {
            let reply = self.agent_move()?;
            return Ok(Turn {
                reply: Some(reply),
                outcome: None,
            });
        }
        Ok(Turn {
            reply: None,
            outcome: None,
        })
    }

    /// Hand the agent the other token; takes effect from the next episode
    pub fn swap_sides(&mut self) {
        let player = self.agent.player().opponent();
        self.agent.set_player(player);
    }

    /// Apply the human's move and let the agent learn and reply.
    ///
    /// # Errors
    ///
    /// [`Error::MisalignedPlayer`] if it is the agent's turn and
    /// [`Error::InvalidAction`] for illegal moves.
    pub fn human_move(&mut self, index: usize) -> Result<Turn> {
        let human = self.human_player();
        if self.board.to_move() != human {
            return Err(Error::MisalignedPlayer {
                player: human,
                to_move: self.board.to_move(),
            });
        }

        self.board.apply_move(index)?;
        self.notify_move(human, index)?;
        if self.board.plies() >= 2 {
            self.learn()?;
        }
        if let Some(outcome) = self.board.outcome() {
            self.finish(outcome)?;
            return Ok(Turn {
                reply: None,
                outcome: Some(outcome),
            });
        }

        let reply = self.agent_move()?;
        let outcome = self.board.outcome();
        if let Some(outcome) = outcome {
            self.learn()?;
            self.finish(outcome)?;
        }
        Ok(Turn {
            reply: Some(reply),
            outcome,
        })
    }

    /// Ask the agent for a move in the live position and apply it
    pub fn agent_move(&mut self) -> Result<usize> {
        let action = self.agent.policy(&self.board, None)?;
        self.board.apply_move(action)?;
        self.notify_move(self.agent.player(), action)?;
        Ok(action)
    }

    fn learn(&mut self) -> Result<()> {
        self.agent.learn(&self.board, self.reward.as_ref())?;
        let table_size = self.agent.table().len();
        for observer in &mut self.observers {
            observer.on_learn(&self.board, table_size)?;
        }
        Ok(())
    }

    fn notify_move(&mut self, player: Player, action: usize) -> Result<()> {
        for observer in &mut self.observers {
            observer.on_move(&self.board, player, action)?;
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) -> Result<()> {
        self.stats.record(outcome, self.agent.player());
        let episode = self.board.episode();
        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome)?;
        }
        tracing::info!(
            episode,
            %outcome,
            agent = self.agent.name(),
            table_size = self.agent.table().len(),
            "episode finished"
        );
        Ok(())
    }
}
