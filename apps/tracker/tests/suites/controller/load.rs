use tracker::domain::{Choice, Phase, Player, PlayerId};
use tracker::errors::ErrorCode;
use tracker::{Controller, ControllerOptions};

use crate::support::fake_service::Failures;
use crate::support::{loaded_controller, FakeGameService, RecordingView};

fn id(raw: &str) -> PlayerId {
    PlayerId::from(raw)
}

#[tokio::test]
async fn load_renders_roster() {
    let c = loaded_controller().await;

    assert_eq!(c.roster().len(), 3);
    assert_eq!(c.view().roster_renders, 1);
    assert_eq!(c.view().last_phase(), Some(Phase::Idle));
    assert!(!c.view().submit_enabled);
}

#[tokio::test]
async fn failed_load_keeps_previous_state() {
    let mut c = loaded_controller().await;
    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.service().set_failures(Failures {
        players: Some(503),
        ..Failures::default()
    });

    let err = c.load_players().await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::UpstreamUnavailable);
    assert_eq!(c.roster().len(), 3);
    assert_eq!(c.selection().choice(&id("1")), Some(Choice::Rock));
    assert_eq!(c.view().roster_renders, 1);
    assert_eq!(c.view().last_error(), Some(ErrorCode::UpstreamUnavailable));
}

#[tokio::test]
async fn first_load_failure_leaves_empty_roster() {
    let service = FakeGameService::with_players(vec![]);
    service.set_failures(Failures {
        players: Some(502),
        ..Failures::default()
    });
    let mut c = Controller::new(service, RecordingView::default(), ControllerOptions::default());

    assert!(c.load_players().await.is_err());
    assert!(c.roster().is_empty());
    assert_eq!(c.phase(), Phase::Idle);
}

#[tokio::test]
async fn reload_drops_players_that_disappeared() {
    let mut c = loaded_controller().await;
    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.set_choice(&id("3"), Choice::Paper).unwrap();
    assert_eq!(c.phase(), Phase::Ready);

    c.service()
        .set_players(vec![Player::new("1", "Alice"), Player::new("2", "Bob")]);
    assert_eq!(c.load_players().await.unwrap(), 2);

    assert_eq!(c.selection().selected(), &[id("1")]);
    assert_eq!(c.selection().choice(&id("3")), None);
    assert_eq!(c.phase(), Phase::Selecting);
    assert!(!c.view().submit_enabled);
}

#[tokio::test]
async fn duplicate_names_are_kept_apart_by_id() {
    let service = FakeGameService::with_players(vec![
        Player::new("1", "Sam"),
        Player::new("2", "Sam"),
    ]);
    let mut c = Controller::new(service, RecordingView::default(), ControllerOptions::default());
    c.load_players().await.unwrap();

    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.set_choice(&id("2"), Choice::Paper).unwrap();
    assert_eq!(c.selection().choice(&id("1")), Some(Choice::Rock));
    assert_eq!(c.selection().choice(&id("2")), Some(Choice::Paper));
    assert!(c.eligibility());

    let err = c.resolve_player("sam").unwrap_err();
    assert_eq!(err.code(), ErrorCode::AmbiguousPlayer);
}
