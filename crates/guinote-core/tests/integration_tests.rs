//! Integration tests for the Guinote game engine.
//!
//! These tests drive complete deals and matches through the public API and
//! check the invariants that should hold at every step along the way.

use guinote_core::*;

fn table(seed: u64) -> GameState {
    GameState::new_table(["Ana", "Blas", "Carmen", "Diego"], seed)
}

fn named_players() -> [Player; 4] {
    [
        Player::human(0, "Ana".into()),
        Player::human(1, "Blas".into()),
        Player::human(2, "Carmen".into()),
        Player::human(3, "Diego".into()),
    ]
}

/// Play the first legal card for the seat on turn
fn play_one(game: &GameState) -> (GameState, Vec<GameEvent>) {
    let seat = game.current_player;
    let card = game.valid_cards(seat)[0];
    game.apply_action(seat, &GameAction::PlayCard { card })
        .expect("first valid card must be accepted")
}

/// Card-only playout until the partida is decided, returning every event
fn play_out(mut game: GameState, max_plays: usize) -> (GameState, Vec<GameEvent>) {
    let mut all_events = Vec::new();
    let mut plays = 0;
    while !game.is_finished() && plays < max_plays {
        let (next, events) = play_one(&game);
        all_events.extend(events);
        game = next;
        plays += 1;
    }
    assert!(game.is_finished(), "playout did not finish in {} plays", max_plays);
    (game, all_events)
}

#[test]
fn test_fresh_deal_shape() {
    let game = table(7);

    for seat in 0..4 {
        assert_eq!(game.hand(seat).len(), 6);
    }
    // 40 - 24 dealt, face-up trump at the bottom of the pile
    assert_eq!(game.deck.len(), 16);
    assert_eq!(game.deck[0], game.trump_card);
    assert_eq!(game.trump_card.suit, game.trump_suit);
    assert_eq!(game.phase, GamePhase::Playing);
    // Mano sits to the dealer's right
    assert_eq!(game.current_player, next_seat(game.dealer));
    assert_eq!(game.total_cards_in_play(), 40);
}

#[test]
fn test_same_seed_same_deal() {
    let a = table(99);
    let b = table(99);
    assert_eq!(a.hands, b.hands);
    assert_eq!(a.deck, b.deck);
    assert_eq!(a.trump_card, b.trump_card);
}

#[test]
fn test_cards_conserved_at_every_step() {
    let mut game = table(3);
    let mut plays = 0;
    while !game.is_finished() && plays < 1000 {
        assert_eq!(game.total_cards_in_play(), 40, "after {} plays", plays);
        let (next, _) = play_one(&game);
        game = next;
        plays += 1;
    }
    assert!(game.is_finished());
    assert_eq!(game.total_cards_in_play(), 40);
}

#[test]
fn test_turn_rotates_counter_clockwise_within_a_trick() {
    let mut game = table(11);
    for _ in 0..60 {
        if game.is_finished() {
            break;
        }
        let before = game.current_player;
        let (next, events) = play_one(&game);
        let trick_closed = events
            .iter()
            .any(|e| matches!(e, GameEvent::TrickCompleted { .. }));
        let redealt = events
            .iter()
            .any(|e| matches!(e, GameEvent::VueltasStarted { .. }));
        if !trick_closed {
            // Trick still open: the next seat is to the right
            assert_eq!(next.current_player, next_seat(before));
        } else if !redealt && !next.is_finished() {
            // Trick closed: its winner leads. A re-deal instead seats mano.
            assert_eq!(Some(next.current_player), next.last_trick_winner);
        } else if redealt {
            assert_eq!(next.current_player, next_seat(next.dealer));
        }
        game = next;
    }
}

#[test]
fn test_arrastre_begins_exactly_when_the_pile_empties() {
    let mut game = table(5);
    let mut seen_arrastre = false;

    let mut plays = 0;
    while !game.is_finished() && plays < 1000 {
        let (next, events) = play_one(&game);

        for event in &events {
            if matches!(event, GameEvent::ArrastreStarted) {
                assert!(!seen_arrastre, "arrastre must start once per deal");
                seen_arrastre = true;
                assert!(next.deck.is_empty());
                assert_eq!(next.phase, GamePhase::Arrastre);
                // The flip lands in the same application as the last draw
                assert!(events
                    .iter()
                    .any(|e| matches!(e, GameEvent::CardsDrawn { remaining_deck: 0, .. })));
            }
        }
        if matches!(events.last(), Some(GameEvent::VueltasStarted { .. })) {
            seen_arrastre = false;
        }
        // The phase never becomes Arrastre silently
        if next.phase == GamePhase::Arrastre {
            assert!(seen_arrastre);
        }

        game = next;
        plays += 1;
    }
    assert!(game.is_finished());
}

#[test]
fn test_played_out_deal_accounts_for_all_points() {
    let (game, events) = play_out(table(17), 1000);

    // Card points over the final deal always total 120
    let card_points: u32 = game.teams.iter().map(|t| t.card_points).sum();
    assert_eq!(card_points, 120);

    // Ultimo was paid exactly once per deal
    let deals = 1 + events
        .iter()
        .filter(|e| matches!(e, GameEvent::VueltasStarted { .. }))
        .count() as u32;
    let bonuses = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LastTrickBonus { .. }))
        .count() as u32;
    assert_eq!(bonuses, deals);

    // No declarations in a card-only playout: final scores are the carried
    // totals plus this deal's 120 card points and the bonus
    let scores: u32 = game.teams.iter().map(|t| t.score).sum();
    let carried: u32 = game.teams.iter().map(|t| t.initial_score).sum();
    assert_eq!(scores, carried + 120 + 10);

    let winner = game.winner().expect("finished partida has a winner");
    let loser = 1 - winner;
    assert!(game.teams[winner as usize].score >= game.teams[loser as usize].score);
}

#[test]
fn test_vueltas_carries_scores_and_passes_the_deal() {
    // Find a seed whose first deal ends with both teams short of 101
    for seed in 0..200 {
        let mut game = table(seed);
        let dealer_before = game.dealer;
        let mut plays = 0;
        let mut vueltas_event = None;

        while !game.is_finished() && plays < 1000 {
            let (next, events) = play_one(&game);
            if let Some(e) = events
                .iter()
                .find(|e| matches!(e, GameEvent::VueltasStarted { .. }))
            {
                vueltas_event = Some(e.clone());
                game = next;
                break;
            }
            game = next;
            plays += 1;
        }

        if let Some(GameEvent::VueltasStarted { carried_scores }) = vueltas_event {
            assert!(game.is_vueltas);
            assert_eq!(game.dealer, next_seat(dealer_before));
            assert_eq!(game.current_player, next_seat(game.dealer));
            assert!(carried_scores.iter().all(|&s| s < WINNING_SCORE));
            for (team, &carried) in game.teams.iter().zip(carried_scores.iter()) {
                assert_eq!(team.initial_score, carried);
                assert_eq!(team.score, carried);
                assert_eq!(team.card_points, 0);
                assert!(team.collected.is_empty());
            }
            // The seven may be exchanged again in the replay
            assert!(game.can_cambiar7);
            assert_eq!(game.total_cards_in_play(), 40);
            return;
        }
    }
    panic!("no seed in 0..200 produced a vueltas replay");
}

#[test]
fn test_rejected_actions_leave_the_state_untouched() {
    let game = table(29);
    let off_turn = next_seat(game.current_player);
    let card = game.hand(off_turn)[0];

    let result = game.apply_action(off_turn, &GameAction::PlayCard { card });
    assert_eq!(result.unwrap_err(), GameError::NotPlayersTurn);

    // Apply is pure: the original binding is exactly as dealt
    assert_eq!(game, table(29));
}

#[test]
fn test_renuncio_forfeits_the_partida_to_the_accusers() {
    let game = table(31);
    let accuser = game.current_player;
    let (after, events) = game
        .apply_action(
            accuser,
            &GameAction::DeclareRenuncio {
                reason: RenuncioReason::FailedToFollowSuit,
            },
        )
        .expect("renuncio is accepted during play");

    assert!(after.is_finished());
    assert_eq!(after.winner(), Some(team_of(accuser)));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::RenuncioDeclared { against, .. } if *against == 1 - team_of(accuser)
    )));
}

#[test]
fn test_snapshot_round_trip_mid_deal_continues_identically() {
    let mut game = table(41);
    for _ in 0..10 {
        let (next, _) = play_one(&game);
        game = next;
    }

    let json = snapshot::to_json(&game).expect("snapshot serializes");
    let restored = snapshot::from_json(&json).expect("snapshot restores");

    let (from_live, live_events) = play_one(&game);
    let (from_restored, restored_events) = play_one(&restored);
    assert_eq!(from_live.hands, from_restored.hands);
    assert_eq!(from_live.teams, from_restored.teams);
    assert_eq!(from_live.current_player, from_restored.current_player);
    assert_eq!(live_events, restored_events);
}

#[test]
fn test_coto_match_plays_to_a_match_winner() {
    let mut game = GameState::with_match(named_players(), 57, MatchFormat::Coto);
    let mut all_events = Vec::new();

    let mut partidas = 0;
    loop {
        let (finished, events) = play_out(game, 1000);
        all_events.extend(events);
        partidas += 1;
        assert!(partidas <= 10, "a coto should settle quickly");

        let standing = finished
            .match_score
            .as_ref()
            .expect("match game keeps a standing");
        if standing.is_finished() {
            let champion = standing.winner().expect("finished match has a winner");
            assert_eq!(finished.winner(), Some(champion));
            assert!(all_events
                .iter()
                .any(|e| matches!(e, GameEvent::CotoWon { team } if *team == champion)));
            assert!(all_events
                .iter()
                .any(|e| matches!(e, GameEvent::MatchWon { team } if *team == champion)));
            // At least two partida wins behind the coto
            let wins = all_events
                .iter()
                .filter(|e| matches!(e, GameEvent::PartidaFinished { winner, .. } if *winner == champion))
                .count();
            assert!(wins >= 2);
            return;
        }

        game = finished.next_partida().expect("match continues");
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(game.teams.iter().all(|t| t.score == 0));
    }
}

#[test]
fn test_bots_complete_a_partida_legally() {
    let mut game = table(63);
    let mut bots: Vec<Bot> = (0..4)
        .map(|s| Bot::with_seed(s, BotDifficulty::Medium, 100 + s as u64))
        .collect();

    let mut plays = 0;
    while !game.is_finished() && plays < 1000 {
        let seat = game.current_player;
        let action = bots[seat as usize]
            .choose_action(&game)
            .expect("bot on turn always has an action");
        assert!(game.valid_actions(seat).contains(&action));
        let (next, _) = game.apply_action(seat, &action).expect("bot actions are legal");
        game = next;
        plays += 1;
    }
    assert!(game.is_finished());
    assert_eq!(game.total_cards_in_play(), 40);
}
