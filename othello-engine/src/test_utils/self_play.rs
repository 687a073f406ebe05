use crate::{GameEngine, Location, LocationList, MoveOutcome};

/// Play the game to the end, letting `choose` pick one of the legal moves
/// for whoever is on turn. Returns every accepted move in order.
///
/// Panics if `choose` returns a move the engine rejects.
pub fn play_out<F>(engine: &mut GameEngine, mut choose: F) -> Vec<MoveOutcome>
where
    F: FnMut(&GameEngine, LocationList) -> Location,
{
    let mut outcomes = Vec::new();

    while let Some(player) = engine.current_player() {
        let moves = engine.legal_moves(player);
        assert!(!moves.is_empty(), "{} is on turn without a legal move", player);

        let mv = choose(engine, moves);
        match engine.apply_move(mv, player) {
            Ok(outcome) => outcomes.push(outcome),
            Err(error) => panic!("chosen move rejected: {}", error),
        }
    }

    outcomes
}
