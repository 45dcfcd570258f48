mod common;

use rstest::rstest;

use playlearn::{AgeTier, GameConfig, QuizPhase, QuizSession, Resumable, SubmitOutcome};

#[rstest]
fn a_full_quiz_run_for_every_tier(
    #[values(
        AgeTier::FiveToSix,
        AgeTier::SevenToEight,
        AgeTier::NineToTen,
        AgeTier::ElevenToTwelve
    )]
    tier: AgeTier,
) {
    common::init_logging();
    let mut session =
        QuizSession::with_rng(tier, GameConfig::default(), common::seeded(31)).unwrap();
    assert_eq!(session.tier(), tier);

    // Five right answers in a row.
    for expected_streak in 1..=5 {
        let answer = session.question().answer;
        let SubmitOutcome::Answered {
            continuation: Some(next),
            ..
        } = session.submit_answer(answer)
        else {
            panic!("correct answers always advance");
        };
        assert_eq!(session.streak(), expected_streak);
        assert!(session.resume(next.ticket).unwrap());
    }
    assert_eq!(session.score(), 50);
    assert_eq!(session.lives(), 3);

    // Then miss until the game ends.
    while !session.is_over() {
        let lives_before = session.lives();
        let choice = common::distractor(session.question());
        match session.submit_answer(choice) {
            SubmitOutcome::Answered { verdict, continuation } => {
                assert!(!verdict.correct);
                assert_eq!(session.lives(), lives_before - 1);
                assert_eq!(session.streak(), 0);
                if let Some(next) = continuation {
                    session.resume(next.ticket).unwrap();
                } else if !session.is_over() {
                    assert!(session.acknowledge().unwrap());
                }
            }
            SubmitOutcome::Ignored => panic!("answer ignored while playing"),
        }
    }

    assert_eq!(session.score(), 50);
    let answer = session.question().answer;
    assert_eq!(session.submit_answer(answer), SubmitOutcome::Ignored);
    assert!(!session.acknowledge().unwrap());

    session.restart().unwrap();
    assert_eq!(session.phase(), QuizPhase::Playing);
    assert_eq!(session.tier(), tier);
    assert_eq!(
        (
            session.score(),
            session.lives(),
            session.streak(),
            session.wrong_streak()
        ),
        (0, 3, 0, 0)
    );
}

#[test]
fn explanation_threshold_is_configurable() {
    let config = GameConfig {
        explanation_threshold: 1,
        ..GameConfig::default()
    };
    let mut session =
        QuizSession::with_rng(AgeTier::SevenToEight, config, common::seeded(6)).unwrap();

    let choice = common::distractor(session.question());
    let outcome = session.submit_answer(choice);
    assert!(matches!(outcome, SubmitOutcome::Answered { continuation: None, .. }));
    assert!(matches!(session.phase(), QuizPhase::Explanation(v) if v.choice == choice));
    assert!(session
        .explanation()
        .unwrap()
        .contains(&session.question().answer.to_string()));
}

#[test]
fn huge_rewards_cap_the_score_instead_of_overflowing() {
    let config = GameConfig {
        points_per_correct: u32::MAX,
        ..GameConfig::default()
    };
    let mut session =
        QuizSession::with_rng(AgeTier::FiveToSix, config, common::seeded(9)).unwrap();
    for _ in 0..2 {
        let answer = session.question().answer;
        let SubmitOutcome::Answered {
            continuation: Some(next),
            ..
        } = session.submit_answer(answer)
        else {
            panic!("correct answers always advance");
        };
        session.resume(next.ticket).unwrap();
    }
    assert_eq!(session.score(), u32::MAX);
    assert_eq!(session.streak(), 2);
}
