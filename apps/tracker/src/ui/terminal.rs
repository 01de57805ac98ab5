//! Line-oriented terminal binding.

use std::fmt::Display;
use std::io::{self, Write};

use async_trait::async_trait;
use time::macros::format_description;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::controller::Controller;
use crate::domain::{Analysis, GameRecord, Phase, Roster, Selection};
use crate::error::AppError;
use crate::services::GameService;
use crate::ui::command::{dispatch, Command, Flow};
use crate::ui::View;

pub struct TerminalView<R, W> {
    lines: Lines<R>,
    out: W,
    submit_enabled: bool,
    /// First failed write; the session ends at the next prompt.
    write_error: Option<io::Error>,
}

impl<R, W> TerminalView<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
            submit_enabled: false,
            write_error: None,
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fails once any write to the output has failed.
    pub fn check_output(&self) -> Result<(), AppError> {
        match &self.write_error {
            Some(e) => Err(AppError::internal(format!("cannot write output: {e}"))),
            None => Ok(()),
        }
    }

    /// Prompt and read the next input line. `None` at end of input.
    pub async fn next_line(&mut self) -> Result<Option<String>, AppError> {
        let prompt = if self.submit_enabled { "ready> " } else { "> " };
        self.emit(prompt, true);
        self.check_output()?;
        self.lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("cannot read input: {e}")))
    }

    fn line(&mut self, text: impl Display) {
        self.emit(&format!("{text}\n"), false);
    }

    /// Write `text`, remembering the first failure. Returns whether the
    /// output is still usable.
    fn emit(&mut self, text: &str, flush: bool) -> bool {
        if self.write_error.is_some() {
            return false;
        }
        let mut result = self.out.write_all(text.as_bytes());
        if flush {
            result = result.and_then(|()| self.out.flush());
        }
        match result {
            Ok(()) => true,
            Err(e) => {
                self.write_error = Some(e);
                false
            }
        }
    }
}

#[async_trait]
impl<R, W> View for TerminalView<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    fn render_roster(&mut self, roster: &Roster, selection: &Selection) {
        if roster.is_empty() {
            self.line("No players available.");
            return;
        }
        self.line("Players:");
        for player in roster.players() {
            let mark = if selection.is_selected(&player.id) { "x" } else { " " };
            let choice = selection
                .choice(&player.id)
                .map(|c| c.to_string())
                .unwrap_or_default();
            self.line(format!(
                "  [{mark}] {:<4} {:<16} {choice}",
                player.id, player.name
            ));
        }
    }

    fn render_selection(&mut self, roster: &Roster, selection: &Selection, phase: Phase) {
        let picks: Vec<String> = selection
            .selected()
            .iter()
            .map(|id| {
                let name = roster
                    .get(id)
                    .map(|p| p.name.as_str())
                    .unwrap_or_else(|| id.as_str());
                match selection.choice(id) {
                    Some(choice) => format!("{name}={choice}"),
                    None => format!("{name}=?"),
                }
            })
            .collect();
        if picks.is_empty() {
            self.line(format!("[{}] nobody selected", phase.as_str()));
        } else {
            self.line(format!("[{}] {}", phase.as_str(), picks.join(", ")));
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn render_history(&mut self, history: &[GameRecord]) {
        if history.is_empty() {
            self.line("No games recorded.");
            return;
        }
        let when_format = format_description!("[year]-[month]-[day] [hour]:[minute]");
        self.line("History:");
        for game in history {
            let when = game
                .played_at
                .and_then(|ts| ts.format(when_format).ok())
                .unwrap_or_else(|| "-".to_string());
            let moves: Vec<String> = game
                .players
                .iter()
                .map(|p| format!("{} {}", p.name, p.choice))
                .collect();
            let result = if game.is_draw() {
                "draw".to_string()
            } else {
                format!("winner: {}", game.winners().join(", "))
            };
            self.line(format!(
                "  #{:<5} {when}  {}  | {result}",
                game.id,
                moves.join(", ")
            ));
        }
    }

    fn render_analysis(&mut self, analysis: &Analysis) {
        if analysis.is_empty() {
            self.line("No statistics yet.");
            return;
        }
        self.line(format!(
            "  {:<16} {:>7} {:>5} {:>5} {:>8}  next",
            "player", "win %", "rock", "paper", "scissors"
        ));
        for name in analysis.player_names() {
            let rate = analysis
                .win_rates
                .get(name)
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "-".to_string());
            let counts = analysis
                .choice_patterns
                .get(name)
                .copied()
                .unwrap_or_default();
            let next = analysis
                .predictions
                .get(name)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            self.line(format!(
                "  {name:<16} {rate:>7} {:>5} {:>5} {:>8}  {next}",
                counts.rock, counts.paper, counts.scissors
            ));
        }
    }

    fn notify_info(&mut self, message: &str) {
        self.line(message);
    }

    fn notify_error(&mut self, error: &AppError) {
        self.line(format!("error: {}", error.user_message()));
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        if !self.emit(&format!("{prompt} [y/N] "), true) {
            return false;
        }
        match self.lines.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// Read commands until `quit`, end of input, or a failed read or write.
pub async fn run<S, R, W>(controller: &mut Controller<S, TerminalView<R, W>>) -> Result<(), AppError>
where
    S: GameService,
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    while let Some(line) = controller.view_mut().next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if dispatch(controller, command).await == Flow::Quit {
                    break;
                }
            }
            Err(e) => controller.view_mut().notify_error(&e),
        }
    }
    controller.view().check_output()
}
