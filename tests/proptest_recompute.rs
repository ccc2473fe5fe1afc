//! Property-based tests for scoring recompute.
//!
//! Games are built from arbitrary ball sequences clamped to the pins standing,
//! so every generated card is one a bowler could actually produce.

use proptest::prelude::*;

use tui_bowling::core::{cumulative_scores, total_score, Game, GameId};
use tui_bowling::types::{FRAME_COUNT, PERFECT_GAME};

/// Feed `balls` into a fresh game until it completes or the balls run out.
fn build(balls: &[u8]) -> Game {
    let mut game = Game::new(GameId(1), "prop");
    for &b in balls {
        if game.is_complete() {
            break;
        }
        let pins = b.min(game.pins_standing());
        game.record_roll(pins).unwrap();
    }
    game
}

fn balls() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=10, 0..=21)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn incremental_scores_match_from_scratch(balls in balls()) {
        let mut game = Game::new(GameId(1), "prop");
        for &b in &balls {
            if game.is_complete() {
                break;
            }
            let pins = b.min(game.pins_standing());
            game.record_roll(pins).unwrap();

            let fresh = cumulative_scores(game.frames());
            for (frame, want) in game.frames().iter().zip(fresh) {
                prop_assert_eq!(frame.score, want);
            }
            prop_assert_eq!(game.total(), total_score(game.frames()));
        }
    }

    #[test]
    fn total_never_exceeds_perfect_game(balls in balls()) {
        let game = build(&balls);
        prop_assert!(game.total() <= PERFECT_GAME);
    }

    #[test]
    fn contiguous_cumulative_scores_never_decrease(balls in balls()) {
        let game = build(&balls);
        let scores = cumulative_scores(game.frames());
        for pair in scores.windows(2) {
            if let (Some(a), Some(b)) = (pair[0], pair[1]) {
                prop_assert!(b >= a, "{} then {}", a, b);
            }
        }
    }

    #[test]
    fn complete_games_score_every_frame(balls in prop::collection::vec(0u8..=10, 21)) {
        let game = build(&balls);
        // 21 balls always finish a game once clamped.
        prop_assert!(game.is_complete());
        let scores = cumulative_scores(game.frames());
        prop_assert!(scores.iter().all(Option::is_some));
        prop_assert_eq!(Some(game.total()), scores[FRAME_COUNT - 1]);
    }

    #[test]
    fn undo_then_replay_restores_the_card(balls in balls()) {
        let mut game = build(&balls);
        let before = game.clone();
        let Some(last) = game.frames().iter().rev().find_map(|f| {
            f.rolls().iter().rev().find_map(|r| *r)
        }) else {
            return Ok(());
        };

        game.undo().unwrap();
        game.record_roll(last).unwrap();
        prop_assert_eq!(game, before);
    }

    #[test]
    fn rescoring_is_idempotent(balls in balls()) {
        let mut game = build(&balls);
        let before = game.frames().clone();
        game.recompute();
        prop_assert_eq!(game.frames(), &before);
    }
}
