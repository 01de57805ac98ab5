use tracker::domain::{Choice, Phase, PlayerId};
use tracker::errors::ErrorCode;
use tracker::ControllerOptions;

use crate::support::{loaded_controller, loaded_controller_with};

fn id(raw: &str) -> PlayerId {
    PlayerId::from(raw)
}

#[tokio::test]
async fn two_players_with_choices_become_ready() {
    let mut c = loaded_controller().await;
    assert_eq!(c.phase(), Phase::Idle);

    c.toggle_selection(&id("1")).unwrap();
    assert_eq!(c.phase(), Phase::Selecting);
    c.toggle_selection(&id("2")).unwrap();
    c.set_choice(&id("1"), Choice::Rock).unwrap();
    assert!(!c.eligibility());
    c.set_choice(&id("2"), Choice::Scissors).unwrap();

    assert!(c.eligibility());
    assert_eq!(c.phase(), Phase::Ready);
    assert!(c.view().submit_enabled);
    assert_eq!(c.view().last_phase(), Some(Phase::Ready));
}

#[tokio::test]
async fn missing_choice_keeps_submit_disabled() {
    let mut c = loaded_controller().await;
    for raw in ["1", "2", "3"] {
        c.toggle_selection(&id(raw)).unwrap();
    }
    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.set_choice(&id("2"), Choice::Paper).unwrap();

    assert!(!c.eligibility());
    assert_eq!(c.phase(), Phase::Selecting);
    assert!(!c.view().submit_enabled);
    assert_eq!(c.selection().missing_choices(), vec![&id("3")]);
}

#[tokio::test]
async fn deselect_drops_choice() {
    let mut c = loaded_controller().await;
    c.toggle_selection(&id("1")).unwrap();
    c.set_choice(&id("1"), Choice::Rock).unwrap();

    let selected = c.toggle_selection(&id("1")).unwrap();

    assert!(!selected);
    assert_eq!(c.selection().choice_count(), 0);
    assert_eq!(c.selection().choice(&id("1")), None);
    assert!(!c.eligibility());
    assert_eq!(c.phase(), Phase::Idle);
}

#[tokio::test]
async fn choosing_for_unselected_player_selects_it() {
    let mut c = loaded_controller().await;
    c.toggle_selection(&id("1")).unwrap();
    let before = c.selection().len();

    c.set_choice(&id("3"), Choice::Paper).unwrap();

    assert_eq!(c.selection().len(), before + 1);
    assert!(c.selection().is_selected(&id("3")));
    // choosing again for the same player does not select twice
    c.set_choice(&id("3"), Choice::Rock).unwrap();
    assert_eq!(c.selection().len(), before + 1);
}

#[tokio::test]
async fn repeated_choice_replaces_previous() {
    let mut c = loaded_controller().await;
    c.set_choice(&id("2"), Choice::Rock).unwrap();
    c.set_choice(&id("2"), Choice::Scissors).unwrap();

    assert_eq!(c.selection().choice(&id("2")), Some(Choice::Scissors));
    assert_eq!(c.selection().choice_count(), 1);
}

#[tokio::test]
async fn unknown_player_is_rejected_without_change() {
    let mut c = loaded_controller().await;
    c.toggle_selection(&id("1")).unwrap();

    let err = c.toggle_selection(&id("99")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotFound);
    let err = c.set_choice(&id("99"), Choice::Rock).unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotFound);

    assert_eq!(c.selection().selected(), &[id("1")]);
    assert_eq!(c.view().last_error(), Some(ErrorCode::PlayerNotFound));
    assert!(c.last_error().is_some());
}

#[tokio::test]
async fn reset_clears_everything() {
    let mut c = loaded_controller().await;
    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.set_choice(&id("2"), Choice::Paper).unwrap();
    assert!(c.eligibility());

    c.reset().unwrap();

    assert!(c.selection().is_empty());
    assert_eq!(c.selection().choice_count(), 0);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.eligibility());
    assert!(!c.view().submit_enabled);
}

#[tokio::test]
async fn reset_reselects_default_player() {
    let options = ControllerOptions {
        default_player: Some("carol".into()),
        ..ControllerOptions::default()
    };
    let mut c = loaded_controller_with(options).await;
    // applied on first load
    assert_eq!(c.selection().selected(), &[id("3")]);

    c.set_choice(&id("1"), Choice::Rock).unwrap();
    c.reset().unwrap();

    assert_eq!(c.selection().selected(), &[id("3")]);
    assert_eq!(c.selection().choice_count(), 0);
    assert_eq!(c.phase(), Phase::Selecting);
    assert!(!c.view().submit_enabled);
}

#[tokio::test]
async fn resolve_player_by_id_then_name() {
    let mut c = loaded_controller().await;
    assert_eq!(c.resolve_player("2").unwrap().name, "Bob");
    assert_eq!(c.resolve_player("ALICE").unwrap().id, id("1"));

    let err = c.resolve_player("Dave").unwrap_err();
    assert_eq!(err.code(), ErrorCode::PlayerNotFound);
}

#[tokio::test]
async fn payload_follows_selection_order() {
    let mut c = loaded_controller().await;
    c.set_choice(&id("2"), Choice::Scissors).unwrap();
    c.set_choice(&id("1"), Choice::Rock).unwrap();

    let submission = c.begin_submit().unwrap();
    let names: Vec<&str> = submission
        .player_choices
        .iter()
        .map(|pc| pc.player_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob", "Alice"]);
}
