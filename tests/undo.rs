use feud_core::pack::{Answer, QuestionPack, Round};
use feud_core::round::FaceoffChoice;
use feud_core::settings::Settings;
use feud_core::{Action, FeudEngine, GameSession, SessionError, TeamId};

fn pack() -> QuestionPack {
    let rounds = (1..=3)
        .map(|i| {
            Round::new(
                format!("r{i}"),
                "Name a sport",
                vec![Answer::new("Soccer", 50), Answer::new("Tennis", 30), Answer::new("Golf", 20)],
            )
        })
        .collect();
    QuestionPack::new("Undo", rounds)
}

fn started() -> GameSession {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), pack(), 21);
    s
}

#[test]
fn undo_reverses_each_gameplay_action() {
    let s0 = started();
    let steps = [
        Action::FaceoffCorrect { team: TeamId::A, answer_index: 0 },
        Action::FaceoffStrike { team: TeamId::B },
        Action::FaceoffDecide { team: TeamId::A, choice: FaceoffChoice::Play },
        Action::RevealAnswer { answer_index: 1 },
        Action::AddStrike,
        Action::RemoveStrike,
        Action::EnterStealMode,
        Action::ResolveSteal { success: true, match_index: Some(2) },
    ];
    let mut s = s0;
    for action in steps {
        let (next, _) = s.clone().apply(action.clone());
        assert_ne!(next, s, "{action:?} should change the session");
        let (undone, events) = next.apply(Action::Undo);
        assert!(events.is_empty());
        assert_eq!(undone, s, "undo of {action:?}");
        s = s.apply(action).0;
    }
    assert_eq!(s.history().len(), 8);
}

#[test]
fn undo_restores_settled_score() {
    let mut s = started();
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    s.faceoff_pick_winner(TeamId::B);
    s.faceoff_decide(TeamId::B, FaceoffChoice::Play);
    s.reveal(0);
    s.end_round(TeamId::B);
    assert_eq!(s.score(TeamId::B), 50);
    s.undo();
    assert_eq!(s.score(TeamId::B), 0);
    assert_eq!(s.current_round().unwrap().pot(), 50);
}

#[test]
fn history_is_cleared_on_round_change() {
    let mut s = started();
    s.faceoff_strike(TeamId::A);
    assert!(s.can_undo());
    s.skip_round();
    assert!(!s.can_undo());
    let before = s.clone();
    s.undo();
    assert_eq!(s, before);
}

#[test]
fn empty_history_reports_error() {
    let s = started();
    assert_eq!(s.try_apply(Action::Undo).unwrap_err(), SessionError::EmptyHistory);
}

#[test]
fn snapshots_carry_labels() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 1);
    s.faceoff_strike(TeamId::B);
    let labels = s.history().labels();
    assert_eq!(labels, vec!["Faceoff: Team A got answer 2", "Faceoff: Team B got a strike"]);
}

#[test]
fn history_is_bounded() {
    let settings = Settings { history_limit: 3, ..Settings::default() };
    let mut s = GameSession::new();
    s.start_game_seeded(settings, pack(), 1);
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    s.faceoff_pick_winner(TeamId::A);
    s.faceoff_decide(TeamId::A, FaceoffChoice::Play);
    for _ in 0..2 {
        s.add_strike();
        s.remove_strike();
    }
    assert_eq!(s.history().len(), 3);
    assert_eq!(s.history().labels(), vec!["Strike removed", "Strike added", "Strike removed"]);
}

#[test]
fn undo_at_the_limit_restores_board_but_not_the_dropped_snapshot() {
    let settings = Settings { history_limit: 3, ..Settings::default() };
    let mut s = GameSession::new();
    s.start_game_seeded(settings, pack(), 1);
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    s.faceoff_pick_winner(TeamId::A);
    assert_eq!(s.history().len(), 3);
    let before = s.clone();

    s.faceoff_decide(TeamId::A, FaceoffChoice::Play);
    s.undo();

    assert_eq!(s.teams(), before.teams());
    assert_eq!(s.round_index(), before.round_index());
    assert_eq!(s.current_round(), before.current_round());
    assert_ne!(s, before);
    assert_eq!(
        s.history().labels(),
        vec!["Faceoff: Team B got a strike", "Faceoff: Team A declared winner"]
    );
}
