//! Progress service integration tests over the in-memory store

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use futures::future::join_all;
use tokio_test::{assert_err, assert_ok};
use helpers::{FailingNotifier, RecordingNotifier, TestContext};
use BirthdayGift::database::SessionStore;
use BirthdayGift::models::{GameId, RewardStatus};
use BirthdayGift::utils::errors::GiftError;

#[tokio::test]
async fn test_full_journey_to_confirmed_reward() {
    let notifier = RecordingNotifier::new();
    let ctx = TestContext::new(notifier.clone());
    let id = "birthday-session-1";

    let session = assert_ok!(ctx.service.get_progress(id).await);
    assert!(session.completed_games.is_empty());
    assert_eq!(session.reward_status, RewardStatus::Locked);

    let err = ctx.service.complete_game(id, GameId::RockPaperScissors).await.unwrap_err();
    assert_matches!(
        err,
        GiftError::OutOfOrderCompletion { game: GameId::RockPaperScissors, missing: GameId::TicTacToe }
    );

    let session = assert_ok!(ctx.service.complete_game(id, GameId::TicTacToe).await);
    assert_eq!(session.reward_status, RewardStatus::Locked);
    let session = assert_ok!(ctx.service.complete_game(id, GameId::RockPaperScissors).await);
    assert_eq!(session.reward_status, RewardStatus::Locked);
    assert_eq!(notifier.call_count(), 0);

    let session = assert_ok!(ctx.service.complete_game(id, GameId::FindTheGift).await);
    assert!(session.all_games_completed());
    assert_eq!(session.reward_status, RewardStatus::PendingConfirmation);
    assert_eq!(notifier.sessions(), vec![id.to_string()]);

    let view = assert_ok!(ctx.service.reward_status_view(id).await);
    assert_eq!(view.message, "Please wait while your gift is being sent manually");

    let session = assert_ok!(ctx.service.confirm_reward(id).await);
    assert_eq!(session.reward_status, RewardStatus::Confirmed);
    assert!(session.confirmed_at.is_some());

    let view = assert_ok!(ctx.service.reward_status_view(id).await);
    assert_eq!(view.message, "Gift received! 20€ successfully sent. Happy Birthday!");

    let err = ctx.service.confirm_reward(id).await.unwrap_err();
    assert_matches!(
        err,
        GiftError::InvalidTransition { from: RewardStatus::Confirmed, to: RewardStatus::Confirmed }
    );
    assert_eq!(notifier.call_count(), 1);
}

#[tokio::test]
async fn test_long_opaque_session_id_reaches_confirmation() {
    let notifier = RecordingNotifier::new();
    let ctx = TestContext::new(notifier.clone());
    let id = format!("first.last+{}@example.com", "birthday".repeat(8));
    assert!(id.len() >= 64);

    let view = assert_ok!(ctx.service.query_status(&id).await);
    assert_eq!(view.reward_status, RewardStatus::Locked);
    assert!(ctx.store.is_empty().await);

    for game in GameId::SEQUENCE {
        assert_ok!(ctx.service.complete_game(&id, game).await);
    }
    assert_eq!(notifier.sessions(), vec![id.clone()]);
    assert_eq!(
        assert_ok!(ctx.service.get_reward_status(&id).await),
        RewardStatus::PendingConfirmation
    );

    let session = assert_ok!(ctx.service.confirm_reward(&id).await);
    assert_eq!(session.session_id, id);
    assert_eq!(session.reward_status, RewardStatus::Confirmed);
}

#[tokio::test]
async fn test_out_of_order_completion_leaves_session_unchanged() {
    let ctx = TestContext::new(RecordingNotifier::new());
    let id = "ordering";

    let before = assert_ok!(ctx.service.get_progress(id).await);
    let err = ctx.service.complete_game(id, GameId::FindTheGift).await.unwrap_err();
    assert_matches!(err, GiftError::OutOfOrderCompletion { missing: GameId::TicTacToe, .. });

    let after = assert_ok!(ctx.service.get_progress(id).await);
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_completion_of_unknown_session_creates_it() {
    let ctx = TestContext::new(RecordingNotifier::new());

    let session = assert_ok!(ctx.service.complete_game("fresh", GameId::TicTacToe).await);
    assert!(session.is_completed(GameId::TicTacToe));
    assert_eq!(ctx.store.len().await, 1);
}

#[tokio::test]
async fn test_recompletion_is_idempotent() {
    let notifier = RecordingNotifier::new();
    let ctx = TestContext::new(notifier.clone());
    let id = "idempotent";

    for game in GameId::SEQUENCE {
        assert_ok!(ctx.service.complete_game(id, game).await);
    }
    let unlocked = assert_ok!(ctx.service.get_progress(id).await);

    for game in GameId::SEQUENCE {
        let again = assert_ok!(ctx.service.complete_game(id, game).await);
        assert_eq!(again, unlocked);
    }
    assert_eq!(notifier.call_count(), 1);
}

#[tokio::test]
async fn test_reward_status_never_moves_backwards() {
    let ctx = TestContext::new(RecordingNotifier::new());
    let id = "monotonic";
    let mut last_rank = 0;

    for game in GameId::SEQUENCE {
        let session = assert_ok!(ctx.service.complete_game(id, game).await);
        assert!(session.reward_status.rank() >= last_rank);
        last_rank = session.reward_status.rank();
    }
    let session = assert_ok!(ctx.service.confirm_reward(id).await);
    assert!(session.reward_status.rank() > last_rank);

    // Completions after confirmation do not touch the status
    let session = assert_ok!(ctx.service.complete_game(id, GameId::TicTacToe).await);
    assert_eq!(session.reward_status, RewardStatus::Confirmed);
}

#[tokio::test]
async fn test_confirm_requires_pending_reward() {
    let ctx = TestContext::new(RecordingNotifier::new());

    let err = ctx.service.confirm_reward("nobody").await.unwrap_err();
    assert_matches!(err, GiftError::SessionNotFound { .. });
    assert!(ctx.store.is_empty().await);

    assert_ok!(ctx.service.complete_game("locked", GameId::TicTacToe).await);
    let err = ctx.service.confirm_reward("locked").await.unwrap_err();
    assert_matches!(
        err,
        GiftError::InvalidTransition { from: RewardStatus::Locked, to: RewardStatus::Confirmed }
    );
}

#[tokio::test]
async fn test_read_only_queries_do_not_create_sessions() {
    let ctx = TestContext::new(RecordingNotifier::new());

    let status = assert_ok!(ctx.service.get_reward_status("ghost").await);
    assert_eq!(status, RewardStatus::Locked);

    let view = assert_ok!(ctx.service.query_status("ghost").await);
    assert_eq!(view.next_game, Some(GameId::TicTacToe));
    assert!(!view.all_games_completed);

    assert!(ctx.store.is_empty().await);
    assert_err!(ctx.service.query_status("").await);
}

#[tokio::test]
async fn test_query_status_reports_progress() {
    let ctx = TestContext::new(RecordingNotifier::new());
    let id = "progress-view";

    assert_ok!(ctx.service.complete_game(id, GameId::TicTacToe).await);
    let view = assert_ok!(ctx.service.query_status(id).await);
    assert!(view.tic_tac_toe_completed);
    assert!(!view.rock_paper_scissors_completed);
    assert_eq!(view.completed_games, vec![GameId::TicTacToe]);
    assert_eq!(view.next_game, Some(GameId::RockPaperScissors));
    assert_eq!(view.reward_status, RewardStatus::Locked);
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_completion() {
    let notifier = Arc::new(FailingNotifier::default());
    let ctx = TestContext::new(notifier.clone());
    let id = "unreachable-admin";

    for game in GameId::SEQUENCE {
        assert_ok!(ctx.service.complete_game(id, game).await);
    }

    assert_eq!(notifier.call_count(), 1);
    let stored = ctx.store.find(id).await.unwrap().unwrap();
    assert_eq!(stored.reward_status, RewardStatus::PendingConfirmation);
}

#[tokio::test]
async fn test_list_pending() {
    let ctx = TestContext::new(RecordingNotifier::new());

    for id in ["pending-a", "pending-b", "confirmed"] {
        for game in GameId::SEQUENCE {
            assert_ok!(ctx.service.complete_game(id, game).await);
        }
    }
    assert_ok!(ctx.service.complete_game("locked", GameId::TicTacToe).await);
    assert_ok!(ctx.service.confirm_reward("confirmed").await);

    let mut pending: Vec<String> = assert_ok!(ctx.service.list_pending().await)
        .into_iter()
        .map(|s| s.session_id)
        .collect();
    pending.sort();
    assert_eq!(pending, vec!["pending-a".to_string(), "pending-b".to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_final_completion_notifies_once() {
    let notifier = RecordingNotifier::new();
    let ctx = Arc::new(TestContext::new(notifier.clone()));
    let id = "race-final";

    assert_ok!(ctx.service.complete_game(id, GameId::TicTacToe).await);
    assert_ok!(ctx.service.complete_game(id, GameId::RockPaperScissors).await);

    let tasks = (0..32).map(|_| {
        let ctx = ctx.clone();
        tokio::spawn(async move { ctx.service.complete_game(id, GameId::FindTheGift).await })
    });

    for result in join_all(tasks).await {
        let session = result.expect("task panicked").expect("completion failed");
        assert_eq!(session.reward_status, RewardStatus::PendingConfirmation);
    }

    assert_eq!(notifier.call_count(), 1);
    assert_eq!(ctx.store.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_creates_one_session() {
    let ctx = Arc::new(TestContext::new(RecordingNotifier::new()));
    let id = "race-create";

    let tasks = (0..16).map(|_| {
        let ctx = ctx.clone();
        tokio::spawn(async move { ctx.service.get_progress(id).await })
    });

    let created: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked").expect("get_progress failed"))
        .collect();

    assert_eq!(ctx.store.len().await, 1);
    assert!(created.iter().all(|s| s.created_at == created[0].created_at));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirmation_succeeds_once() {
    let ctx = Arc::new(TestContext::new(RecordingNotifier::new()));
    let id = "race-confirm";

    for game in GameId::SEQUENCE {
        assert_ok!(ctx.service.complete_game(id, game).await);
    }

    let tasks = (0..16).map(|_| {
        let ctx = ctx.clone();
        tokio::spawn(async move { ctx.service.confirm_reward(id).await })
    });

    let mut confirmed = 0;
    for result in join_all(tasks).await {
        match result.expect("task panicked") {
            Ok(session) => {
                assert_eq!(session.reward_status, RewardStatus::Confirmed);
                confirmed += 1;
            }
            Err(e) => assert_matches!(e, GiftError::InvalidTransition { from: RewardStatus::Confirmed, .. }),
        }
    }
    assert_eq!(confirmed, 1);
}
