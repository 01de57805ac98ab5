use serde_json::json;
use time::macros::datetime;
use tracker::domain::{Choice, GameId, Phase, Player, PlayerId, Roster, Selection};
use tracker::errors::ErrorCode;
use tracker::protocol::GameSubmission;
use tracker::services::GameService;
use tracker::{Controller, ControllerOptions};

use crate::support::http_server::{start_fake_server, ServerState};
use crate::support::RecordingView;

fn submission() -> GameSubmission {
    let roster = Roster::new(vec![Player::new("1", "Alice"), Player::new("2", "Bob")]);
    let mut selection = Selection::new();
    selection.set_choice(&PlayerId::from("1"), Choice::Rock);
    selection.set_choice(&PlayerId::from("2"), Choice::Scissors);
    GameSubmission::from_selection(&selection, &roster, None).unwrap()
}

#[tokio::test]
async fn create_posts_payload_and_reads_embedded_results(
) -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        created: json!({
            "id": 42,
            "message": "Game created successfully",
            "analysis": {
                "win_rates": {"Alice": 100.0, "Bob": 0.0},
                "choice_patterns": {"Alice": {"rock": 1, "paper": 0, "scissors": 0}},
                "predictions": {"Alice": "rock"}
            },
            "history": [{
                "id": 42,
                "created_at": "2024-05-01T10:30:00",
                "players": [
                    {"name": "Alice", "choice": "rock", "is_winner": true},
                    {"name": "Bob", "choice": "scissors", "is_winner": false}
                ]
            }]
        }),
        ..ServerState::default()
    })
    .await?;

    let created = server.client().create_game(&submission()).await?;

    assert_eq!(created.id, GameId(42));
    let analysis = created.analysis.expect("analysis embedded");
    assert_eq!(analysis.predictions.get("Alice"), Some(&Choice::Rock));
    let history = created.history.expect("history embedded");
    assert_eq!(history[0].winners(), vec!["Alice"]);
    assert_eq!(history[0].played_at, Some(datetime!(2024-05-01 10:30:00 UTC)));

    let posted = server.state.lock().posted.clone();
    assert_eq!(
        posted,
        vec![json!({
            "player_choices": [
                {"player_name": "Alice", "choice": "rock"},
                {"player_name": "Bob", "choice": "scissors"}
            ]
        })]
    );
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn create_rejection_is_upstream_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        fail: Some((422, "player_choices must not be empty".into())),
        ..ServerState::default()
    })
    .await?;

    let err = server.client().create_game(&submission()).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::UpstreamRejected);
    assert_eq!(err.detail(), "player_choices must not be empty");
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn list_games_prefers_game_date() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        games: json!([
            {
                "id": 2,
                "game_date": "2024-06-01T08:00:00+02:00",
                "created_at": "2024-06-02T00:00:00Z",
                "players": [
                    {"name": "A", "choice": "paper", "is_winner": false},
                    {"name": "B", "choice": "paper", "is_winner": false}
                ]
            },
            {"id": 1, "players": []}
        ]),
        ..ServerState::default()
    })
    .await?;

    let games = server.client().list_games().await?;

    assert_eq!(games.len(), 2);
    assert_eq!(games[0].id, GameId(2));
    assert_eq!(
        games[0].played_at,
        Some(datetime!(2024-06-01 06:00:00 UTC))
    );
    assert!(games[0].is_draw());
    assert_eq!(games[1].played_at, None);
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn bad_choice_in_history_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        games: json!([{"id": 1, "players": [{"name": "A", "choice": "lizard"}]}]),
        ..ServerState::default()
    })
    .await?;

    let err = server.client().list_games().await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::MalformedResponse);
    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn deletes_hit_expected_paths() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState::default()).await?;
    let client = server.client();

    client.delete_game(GameId(5)).await?;
    client.delete_all_games().await?;

    assert_eq!(server.state.lock().deleted, vec!["5".to_string(), "*".to_string()]);

    server.state.lock().fail = Some((404, "Game not found".into()));
    let err = client.delete_game(GameId(6)).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.detail(), "Game not found");

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn analysis_validates_rates() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        analysis: json!({
            "win_rates": {"Alice": 50.0},
            "choice_patterns": {"Alice": {"rock": 2, "paper": 1, "scissors": 1}},
            "predictions": {"Alice": "rock"}
        }),
        ..ServerState::default()
    })
    .await?;
    let client = server.client();

    let analysis = client.analysis().await?;
    assert_eq!(analysis.win_rates.get("Alice"), Some(&50.0));
    assert_eq!(
        analysis.choice_patterns.get("Alice").and_then(|c| c.favourite()),
        Some(Choice::Rock)
    );

    server.state.lock().analysis = json!({"win_rates": {"Alice": 250.0}});
    let err = client.analysis().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedResponse);

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn stored_game_with_malformed_extras_still_resets() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_fake_server(ServerState {
        players: json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]),
        created: json!({
            "id": 5,
            "analysis": {"win_rates": {"A": 100.00001}},
            "history": [{"id": 5, "created_at": "yesterday", "players": []}]
        }),
        games: json!([{
            "id": 5,
            "created_at": "2024-05-01T10:30:00Z",
            "players": [
                {"name": "A", "choice": "rock", "is_winner": true},
                {"name": "B", "choice": "scissors", "is_winner": false}
            ]
        }]),
        analysis: json!({"win_rates": {"A": 100.0, "B": 0.0}}),
        ..ServerState::default()
    })
    .await?;
    let mut c = Controller::new(
        server.client(),
        RecordingView::default(),
        ControllerOptions::default(),
    );
    c.load_players().await?;
    c.set_choice(&PlayerId::from("1"), Choice::Rock)?;
    c.set_choice(&PlayerId::from("2"), Choice::Scissors)?;

    let game_id = c.submit().await?;

    assert_eq!(game_id, GameId(5));
    assert_eq!(server.state.lock().posted.len(), 1);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(c.selection().is_empty());
    assert!(c.view().errors.is_empty());
    // dropped extras were fetched again
    assert_eq!(c.history().len(), 1);
    assert_eq!(c.analysis().and_then(|a| a.win_rates.get("A")), Some(&100.0));

    server.stop().await;
    Ok(())
}
