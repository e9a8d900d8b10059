use feud_core::pack::{Answer, QuestionPack, Round};
use feud_core::round::{FaceoffChoice, RoundPhase};
use feud_core::settings::Settings;
use feud_core::{FeudEngine, GameEvent, GamePhase, GameSession, TeamId};

fn pack(rounds: usize) -> QuestionPack {
    let rounds = (1..=rounds)
        .map(|i| {
            Round::new(
                format!("r{i}"),
                "Name a planet",
                vec![Answer::new("Mars", 60), Answer::new("Earth", 40)],
            )
        })
        .collect();
    QuestionPack::new("Advance", rounds)
}

/// Team wins the current round by clearing the board.
fn win_round(s: &mut GameSession, team: TeamId) {
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    s.faceoff_pick_winner(team);
    s.faceoff_decide(team, FaceoffChoice::Play);
    s.reveal(0);
    s.reveal(1);
    assert_eq!(s.round_phase(), Some(RoundPhase::Ended));
}

#[test]
fn multipliers_follow_settings() {
    let settings =
        Settings { number_of_rounds: 4, multipliers: vec![1, 2, 3], ..Settings::default() };
    let mut s = GameSession::new();
    s.start_game_seeded(settings, pack(4), 2);
    let mut seen = vec![s.current_round().unwrap().multiplier()];
    for _ in 0..3 {
        let events = s.skip_round();
        let m = s.current_round().unwrap().multiplier();
        let started = GameEvent::RoundStarted { round_index: s.round_index(), multiplier: m };
        assert!(events.contains(&started));
        seen.push(m);
    }
    assert_eq!(seen, vec![1, 2, 3, 1]);
}

#[test]
fn settled_round_pays_with_multiplier() {
    let settings = Settings { number_of_rounds: 2, multipliers: vec![1, 3], ..Settings::default() };
    let mut s = GameSession::new();
    s.start_game_seeded(settings, pack(2), 4);
    win_round(&mut s, TeamId::A);
    s.next_round();
    win_round(&mut s, TeamId::B);
    assert_eq!(s.score(TeamId::A), 100);
    assert_eq!(s.score(TeamId::B), 300);
}

#[test]
fn next_round_needs_an_ended_round() {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(3), 4);
    assert!(s.next_round().is_empty());
    assert_eq!(s.round_index(), 0);
    win_round(&mut s, TeamId::A);
    s.next_round();
    assert_eq!(s.round_index(), 1);
    assert_eq!(s.round_phase(), Some(RoundPhase::Faceoff));
}

#[test]
fn last_round_ends_the_game() {
    let settings = Settings { number_of_rounds: 2, ..Settings::default() };
    let mut s = GameSession::new();
    s.start_game_seeded(settings, pack(5), 8);
    assert_eq!(s.rounds_to_play(), 2);
    win_round(&mut s, TeamId::B);
    s.next_round();
    win_round(&mut s, TeamId::B);
    let events = s.next_round();
    assert_eq!(events, vec![GameEvent::GameOver { winner: Some(TeamId::B) }]);
    assert_eq!(s.phase(), GamePhase::GameOver);
    assert!(s.current_round().is_none());
    assert!(!s.can_undo());
}

#[test]
fn short_pack_caps_the_game() {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(1), 8);
    assert_eq!(s.rounds_to_play(), 1);
    let events = s.skip_round();
    assert_eq!(events, vec![GameEvent::GameOver { winner: None }]);
}

#[test]
fn skipping_awards_nothing() {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(3), 8);
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    s.faceoff_pick_winner(TeamId::A);
    s.faceoff_decide(TeamId::A, FaceoffChoice::Play);
    s.reveal(0);
    s.skip_round();
    assert_eq!(s.score(TeamId::A), 0);
    assert_eq!(s.round_index(), 1);
    assert_eq!(s.current_round().unwrap().pot(), 0);
}

#[test]
fn restart_replays_same_order_from_zero() {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(3), 8);
    let ids = |s: &GameSession| -> Vec<String> {
        s.pack().unwrap().rounds().iter().map(|r| r.id().to_string()).collect()
    };
    let order = ids(&s);
    win_round(&mut s, TeamId::A);
    s.next_round();
    s.restart_game();
    assert_eq!(s.round_index(), 0);
    assert_eq!(s.score(TeamId::A), 0);
    assert_eq!(s.phase(), GamePhase::Playing);
    assert_eq!(order, ids(&s));
}

#[test]
fn same_seed_same_order() {
    let mut a = GameSession::new();
    let mut b = GameSession::new();
    a.start_game_seeded(Settings::default(), pack(5), 77);
    b.start_game_seeded(Settings::default(), pack(5), 77);
    assert_eq!(a.pack(), b.pack());
}

#[test]
fn reset_returns_to_setup() {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(2), 8);
    s.adjust_score(TeamId::A, 50);
    s.reset_all();
    assert_eq!(s, GameSession::new());
}
