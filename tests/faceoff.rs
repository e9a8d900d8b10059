use feud_core::pack::{Answer, QuestionPack, Round};
use feud_core::round::{ActionError, FaceoffChoice, FaceoffTurn, RoundPhase};
use feud_core::settings::Settings;
use feud_core::{Action, FeudEngine, GameEvent, GameSession, SessionError, TeamId};

fn board() -> QuestionPack {
    QuestionPack::new(
        "Faceoff",
        vec![Round::new(
            "fruit",
            "Name a fruit",
            vec![
                Answer::new("Apple", 500),
                Answer::new("Banana", 300),
                Answer::new("Cherry", 200),
                Answer::new("Date", 100),
            ],
        )],
    )
}

fn started() -> GameSession {
    let mut s = GameSession::new();
    s.start_game_seeded(Settings::default(), board(), 11);
    s
}

#[test]
fn higher_answer_wins_the_faceoff() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 0);
    let events = s.faceoff_correct(TeamId::B, 1);

    let round = s.current_round().unwrap();
    assert_eq!(round.faceoff().winner(), Some(TeamId::A));
    assert_eq!(round.faceoff().current_turn(), FaceoffTurn::Decide);
    assert_eq!(round.pot(), 800);
    assert!(events.contains(&GameEvent::FaceoffWinner { team: TeamId::A }));
}

#[test]
fn double_strike_has_no_winner_until_picked() {
    let mut s = started();
    s.faceoff_strike(TeamId::A);
    s.faceoff_strike(TeamId::B);
    assert_eq!(s.current_round().unwrap().faceoff().winner(), None);

    // Deciding without a winner does nothing.
    let before = s.clone();
    assert!(s.faceoff_decide(TeamId::A, FaceoffChoice::Play).is_empty());
    assert_eq!(s, before);

    s.faceoff_pick_winner(TeamId::B);
    s.faceoff_decide(TeamId::B, FaceoffChoice::Play);
    let round = s.current_round().unwrap();
    assert_eq!(round.controller(), Some(TeamId::B));
    assert_eq!(round.phase(), RoundPhase::Play);
}

#[test]
fn strike_then_answer_goes_to_answering_team() {
    let mut s = started();
    s.faceoff_strike(TeamId::A);
    s.faceoff_correct(TeamId::B, 2);
    let round = s.current_round().unwrap();
    assert_eq!(round.faceoff().winner(), Some(TeamId::B));
    assert_eq!(round.pot(), 200);
}

#[test]
fn passing_hands_control_to_the_other_team() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 0);
    s.faceoff_strike(TeamId::B);
    let events = s.faceoff_decide(TeamId::A, FaceoffChoice::Pass);
    assert_eq!(
        events,
        vec![GameEvent::FaceoffDecided {
            team: TeamId::A,
            choice: FaceoffChoice::Pass,
            controller: TeamId::B,
        }]
    );
    assert_eq!(s.current_round().unwrap().controller(), Some(TeamId::B));
}

#[test]
fn buzzer_sets_who_answers_first() {
    let mut s = started();
    s.faceoff_buzzer(TeamId::B);
    assert_eq!(s.current_round().unwrap().faceoff().current_turn(), FaceoffTurn::Team(TeamId::B));
    assert!(s.faceoff_correct(TeamId::A, 0).is_empty());
    s.faceoff_correct(TeamId::B, 1);
    assert_eq!(s.current_round().unwrap().faceoff().current_turn(), FaceoffTurn::Team(TeamId::A));
}

#[test]
fn loser_cannot_decide() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 0);
    s.faceoff_correct(TeamId::B, 1);
    let err = s.try_apply(Action::FaceoffDecide { team: TeamId::B, choice: FaceoffChoice::Play });
    assert!(matches!(err, Err(SessionError::Round(_))));
}

#[test]
fn faceoff_reveals_are_not_scored_yet() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 0);
    s.faceoff_correct(TeamId::B, 1);
    assert_eq!(s.score(TeamId::A), 0);
    assert_eq!(s.score(TeamId::B), 0);
}

#[test]
fn manual_pick_before_both_teams_act_is_ignored() {
    let mut s = started();
    let before = s.clone();
    assert!(s.faceoff_pick_winner(TeamId::B).is_empty());
    assert_eq!(s, before);
    assert!(s.faceoff_decide(TeamId::B, FaceoffChoice::Play).is_empty());
    assert_eq!(s.round_phase(), Some(RoundPhase::Faceoff));

    s.faceoff_strike(TeamId::A);
    let before = s.clone();
    assert!(s.faceoff_pick_winner(TeamId::B).is_empty());
    assert_eq!(s, before);
}

#[test]
fn manual_pick_cannot_override_computed_winner() {
    let mut s = started();
    s.faceoff_correct(TeamId::A, 0);
    s.faceoff_correct(TeamId::B, 1);
    let err = s.try_apply(Action::FaceoffPickWinner { team: TeamId::B }).unwrap_err();
    assert_eq!(err, SessionError::Round(ActionError::NoDeadlock));
    assert_eq!(s.current_round().unwrap().faceoff().winner(), Some(TeamId::A));
}
