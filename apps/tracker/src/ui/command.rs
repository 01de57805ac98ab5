//! Line commands understood by the terminal binding.

use std::str::FromStr;

use tracing::debug;

use crate::controller::Controller;
use crate::domain::{Choice, GameId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::GameService;
use crate::ui::View;

pub const HELP: &str = "\
commands:
  players                      reload the player list
  select <player>              select or deselect a player (id or name)
  choose <player> <choice>     set rock, paper or scissors (selects the player)
  submit                       save the game
  reset                        clear the selection
  history                      show stored games
  stats                        show win rates, patterns and predictions
  delete <game-id>             delete a stored game
  clear                        delete every stored game
  status                       show the current selection state
  help                         show this text
  quit                         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Players,
    Select(String),
    Choose { player: String, choice: Choice },
    Submit,
    Reset,
    History,
    Stats,
    Delete(GameId),
    Clear,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| AppError::invalid(ErrorCode::ValidationError, "empty command"))?
            .to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let no_args = |cmd: Command| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(AppError::invalid(
                    ErrorCode::ValidationError,
                    format!("'{verb}' takes no arguments"),
                ))
            }
        };

        match verb.as_str() {
            "players" => no_args(Command::Players),
            "select" | "toggle" => {
                if rest.is_empty() {
                    return Err(usage("select <player>"));
                }
                Ok(Command::Select(rest.join(" ")))
            }
            "choose" => {
                let Some((choice, player)) = rest.split_last() else {
                    return Err(usage("choose <player> <choice>"));
                };
                if player.is_empty() {
                    return Err(usage("choose <player> <choice>"));
                }
                let choice = choice.parse::<Choice>()?;
                Ok(Command::Choose {
                    player: player.join(" "),
                    choice,
                })
            }
            "submit" => no_args(Command::Submit),
            "reset" => no_args(Command::Reset),
            "history" => no_args(Command::History),
            "stats" => no_args(Command::Stats),
            "delete" => match rest.as_slice() {
                [id] => id
                    .parse::<i64>()
                    .map(|id| Command::Delete(GameId(id)))
                    .map_err(|_| {
                        AppError::invalid(
                            ErrorCode::ValidationError,
                            format!("game id must be a number, got '{id}'"),
                        )
                    }),
                _ => Err(usage("delete <game-id>")),
            },
            "clear" => no_args(Command::Clear),
            "status" => no_args(Command::Status),
            "help" | "?" => no_args(Command::Help),
            "quit" | "exit" | "q" => no_args(Command::Quit),
            other => Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("unknown command '{other}'; type 'help'"),
            )),
        }
    }
}

fn usage(text: &str) -> AppError {
    AppError::invalid(ErrorCode::ValidationError, format!("usage: {text}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the controller.
///
/// Failures have already been surfaced to the view by the controller, so
/// they only get a debug log here.
pub async fn dispatch<S: GameService, V: View>(
    controller: &mut Controller<S, V>,
    command: Command,
) -> Flow {
    let result = match command {
        Command::Players => controller.load_players().await.map(|_| ()),
        Command::Select(token) => match controller.resolve_player(&token) {
            Ok(player) => controller.toggle_selection(&player.id).map(|_| ()),
            Err(e) => Err(e),
        },
        Command::Choose { player, choice } => match controller.resolve_player(&player) {
            Ok(player) => controller.set_choice(&player.id, choice),
            Err(e) => Err(e),
        },
        Command::Submit => controller.submit().await.map(|_| ()),
        Command::Reset => controller.reset(),
        Command::History => controller.refresh_history().await.map(|_| ()),
        Command::Stats => controller.refresh_analysis().await,
        Command::Delete(id) => controller.delete_submission(id).await.map(|_| ()),
        Command::Clear => controller.clear_history().await.map(|_| ()),
        Command::Status => {
            let status = status_line(controller);
            controller.view_mut().notify_info(&status);
            Ok(())
        }
        Command::Help => {
            controller.view_mut().notify_info(HELP);
            Ok(())
        }
        Command::Quit => return Flow::Quit,
    };
    if let Err(e) = result {
        debug!(code = %e.code(), "command failed");
    }
    Flow::Continue
}

fn status_line<S: GameService, V: View>(controller: &Controller<S, V>) -> String {
    let selection = controller.selection();
    let mut line = format!(
        "{} | {} selected, {} chosen | submit {}",
        controller.phase().as_str(),
        selection.len(),
        selection.choice_count(),
        if controller.eligibility() { "enabled" } else { "disabled" }
    );
    let waiting: Vec<String> = selection
        .missing_choices()
        .into_iter()
        .map(|id| {
            controller
                .roster()
                .get(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
        .collect();
    if !waiting.is_empty() {
        line.push_str(&format!(" | waiting on: {}", waiting.join(", ")));
    }
    if let Some(err) = controller.last_error() {
        line.push_str(&format!(" | last error: {err}"));
    }
    line
}
