//! GameLedger - the caller-owned collection of games
//!
//! Holds every game in creation order plus which one is active. There is no
//! process-wide state: the game loop owns one ledger and passes it around by
//! reference.

use tracing::info;

use crate::error::LedgerError;
use crate::game::{Game, GameId};
use crate::snapshot::ScorecardSnapshot;
use crate::types::{RollPosition, ScoreAction, MAX_GAMES};

/// What an applied action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Rolled(RollPosition),
    Undone(RollPosition),
    Started(GameId),
    Selected(GameId),
    Deleted(GameId),
    /// Nothing to select or delete.
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct GameLedger {
    games: Vec<Game>,
    active: Option<GameId>,
    next_id: u64,
    capacity: usize,
}

impl Default for GameLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLedger {
    pub fn new() -> Self {
        Self::with_capacity(MAX_GAMES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            games: Vec::new(),
            active: None,
            next_id: 1,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id() == id)
    }

    pub fn get_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.id() == id)
    }

    pub fn active_id(&self) -> Option<GameId> {
        self.active
    }

    pub fn active(&self) -> Option<&Game> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Game> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Create an empty game, make it active and return it.
    pub fn start_new_game(&mut self, started_at: impl Into<String>) -> Result<&mut Game, LedgerError> {
        if self.games.len() >= self.capacity {
            return Err(LedgerError::Full(self.capacity));
        }
        let id = GameId(self.next_id);
        self.next_id += 1;
        self.games.push(Game::new(id, started_at));
        self.active = Some(id);
        info!(game = %id, "game started");

        let last = self.games.len() - 1;
        Ok(&mut self.games[last])
    }

    pub fn select(&mut self, id: GameId) -> Result<(), LedgerError> {
        if self.get(id).is_none() {
            return Err(LedgerError::UnknownGame(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Leave the scorecard and go back to the game list.
    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Select the following game, wrapping around. Selects the first game when
    /// nothing is active.
    pub fn select_next(&mut self) -> Option<GameId> {
        let len = self.games.len();
        let next = match self.active_index() {
            Some(i) => (i + 1) % len,
            None if len > 0 => 0,
            None => return None,
        };
        self.active = Some(self.games[next].id());
        self.active
    }

    /// Select the preceding game, wrapping around. Selects the last game when
    /// nothing is active.
    pub fn select_prev(&mut self) -> Option<GameId> {
        let len = self.games.len();
        let prev = match self.active_index() {
            Some(i) => (i + len - 1) % len,
            None if len > 0 => len - 1,
            None => return None,
        };
        self.active = Some(self.games[prev].id());
        self.active
    }

    /// Remove a game. Deleting the active game leaves nothing selected.
    pub fn delete(&mut self, id: GameId) -> Result<Game, LedgerError> {
        let index = self
            .games
            .iter()
            .position(|g| g.id() == id)
            .ok_or(LedgerError::UnknownGame(id))?;
        if self.active == Some(id) {
            self.active = None;
        }
        info!(game = %id, "game deleted");
        Ok(self.games.remove(index))
    }

    /// Apply a keyboard or feed action.
    ///
    /// Ball actions go to the active game. `started_at` is only used when the
    /// action starts a new game.
    pub fn apply_action(
        &mut self,
        action: ScoreAction,
        started_at: &str,
    ) -> Result<ActionOutcome, LedgerError> {
        match action {
            ScoreAction::Pins(_) | ScoreAction::Strike | ScoreAction::Spare => {
                let game = self.active_mut().ok_or(LedgerError::NoActiveGame)?;
                Ok(ActionOutcome::Rolled(game.record_action(action)?))
            }
            ScoreAction::Undo => {
                let game = self.active_mut().ok_or(LedgerError::NoActiveGame)?;
                Ok(ActionOutcome::Undone(game.undo()?))
            }
            ScoreAction::NewGame => {
                let game = self.start_new_game(started_at)?;
                Ok(ActionOutcome::Started(game.id()))
            }
            ScoreAction::NextGame => Ok(self
                .select_next()
                .map(ActionOutcome::Selected)
                .unwrap_or(ActionOutcome::Unchanged)),
            ScoreAction::PrevGame => Ok(self
                .select_prev()
                .map(ActionOutcome::Selected)
                .unwrap_or(ActionOutcome::Unchanged)),
            ScoreAction::DeleteGame => match self.active {
                Some(id) => {
                    self.delete(id)?;
                    Ok(ActionOutcome::Deleted(id))
                }
                None => Ok(ActionOutcome::Unchanged),
            },
        }
    }

    /// Record a ball on a specific game, wherever the selection is.
    pub fn record_roll(&mut self, id: GameId, pins: u8) -> Result<RollPosition, LedgerError> {
        let game = self.get_mut(id).ok_or(LedgerError::UnknownGame(id))?;
        game.record_roll(pins).map_err(LedgerError::from)
    }

    /// Snapshot of the active scorecard (an empty card when nothing is active).
    pub fn snapshot(&self) -> ScorecardSnapshot {
        let mut snap = ScorecardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut ScorecardSnapshot) {
        out.clear();
        if let Some(game) = self.active() {
            game.snapshot_into(out);
        }
        out.game_index = self.active_index().map(|i| i + 1).unwrap_or(0);
        out.game_count = self.games.len();
    }

    fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.games.iter().position(|g| g.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_start_selects_new_game() {
        let mut ledger = GameLedger::new();
        assert!(ledger.active().is_none());

        let id = ledger.start_new_game("t0").unwrap().id();
        assert_eq!(id, GameId(1));
        assert_eq!(ledger.active_id(), Some(id));

        let id2 = ledger.start_new_game("t1").unwrap().id();
        assert_eq!(id2, GameId(2));
        assert_eq!(ledger.active_id(), Some(id2));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut ledger = GameLedger::new();
        let a = ledger.start_new_game("t0").unwrap().id();
        ledger.delete(a).unwrap();
        let b = ledger.start_new_game("t1").unwrap().id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_delete_active_clears_selection() {
        let mut ledger = GameLedger::new();
        let a = ledger.start_new_game("t0").unwrap().id();
        let b = ledger.start_new_game("t1").unwrap().id();

        ledger.select(a).unwrap();
        ledger.delete(b).unwrap();
        assert_eq!(ledger.active_id(), Some(a));

        ledger.delete(a).unwrap();
        assert_eq!(ledger.active_id(), None);
        assert_eq!(ledger.delete(a).unwrap_err(), LedgerError::UnknownGame(a));
    }

    #[test]
    fn test_select_wraps_around() {
        let mut ledger = GameLedger::new();
        assert_eq!(ledger.select_next(), None);

        let a = ledger.start_new_game("t0").unwrap().id();
        let b = ledger.start_new_game("t1").unwrap().id();
        let c = ledger.start_new_game("t2").unwrap().id();

        assert_eq!(ledger.select_next(), Some(a));
        assert_eq!(ledger.select_prev(), Some(c));
        assert_eq!(ledger.select_prev(), Some(b));

        ledger.clear_selection();
        assert_eq!(ledger.select_prev(), Some(c));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut ledger = GameLedger::with_capacity(1);
        ledger.start_new_game("t0").unwrap();
        assert_eq!(ledger.start_new_game("t1").unwrap_err(), LedgerError::Full(1));
    }

    #[test]
    fn test_apply_action_routes_to_active_game() {
        let mut ledger = GameLedger::new();
        assert_eq!(
            ledger.apply_action(ScoreAction::Pins(3), "t"),
            Err(LedgerError::NoActiveGame)
        );

        let started = ledger.apply_action(ScoreAction::NewGame, "t").unwrap();
        assert_eq!(started, ActionOutcome::Started(GameId(1)));

        assert_eq!(
            ledger.apply_action(ScoreAction::Strike, "t"),
            Ok(ActionOutcome::Rolled(RollPosition::new(0, 0)))
        );
        assert_eq!(
            ledger.apply_action(ScoreAction::Undo, "t"),
            Ok(ActionOutcome::Undone(RollPosition::new(0, 0)))
        );
        assert_eq!(
            ledger.apply_action(ScoreAction::Undo, "t"),
            Err(LedgerError::Game(GameError::NothingToUndo))
        );

        assert_eq!(
            ledger.apply_action(ScoreAction::DeleteGame, "t"),
            Ok(ActionOutcome::Deleted(GameId(1)))
        );
        assert_eq!(
            ledger.apply_action(ScoreAction::DeleteGame, "t"),
            Ok(ActionOutcome::Unchanged)
        );
    }

    #[test]
    fn test_record_roll_on_inactive_game() {
        let mut ledger = GameLedger::new();
        let a = ledger.start_new_game("t0").unwrap().id();
        ledger.start_new_game("t1").unwrap();

        ledger.record_roll(a, 9).unwrap();
        assert_eq!(ledger.get(a).map(Game::total), Some(9));
        assert_eq!(
            ledger.record_roll(GameId(99), 1),
            Err(LedgerError::UnknownGame(GameId(99)))
        );
    }

    #[test]
    fn test_snapshot_reports_position() {
        let mut ledger = GameLedger::new();
        let snap = ledger.snapshot();
        assert_eq!(snap.game_id, None);
        assert_eq!(snap.game_count, 0);

        ledger.start_new_game("t0").unwrap();
        ledger.start_new_game("t1").unwrap();
        ledger.apply_action(ScoreAction::Pins(4), "t").unwrap();

        let snap = ledger.snapshot();
        assert_eq!(snap.game_id, Some(GameId(2)));
        assert_eq!(snap.game_index, 2);
        assert_eq!(snap.game_count, 2);
        assert_eq!(snap.total, 4);
    }
}
