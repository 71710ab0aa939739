//! Terminal shell for cinedex.
//!
//! Reads one command per line from stdin, turns it into an application event,
//! runs the resulting actions and redraws when the handler asks for it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐        ApiRequest         ┌──────────────────┐
//! │  Shell (this file)      │ ────────────────────────▶ │  ApiWorker       │
//! │  - stdin commands       │                           │  (tokio tasks)   │
//! │  - handle_event         │ ◀──────────────────────── │  - ApiClient     │
//! │  - render               │        ApiResponse        └──────────────────┘
//! └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! cinedex [--config <file>] [start path]
//! ```
//!
//! Type `help` for the command list. Deletes ask for confirmation: the next
//! line answers the prompt (`y` to proceed).

#![allow(clippy::multiple_crate_versions)]

mod command;

use cinedex::app::{Confirmation, FormEvent, NoticeLevel};
use cinedex::form::PosterUpload;
use cinedex::infrastructure::session_file;
use cinedex::storage::{JsonTokenStore, TokenStore};
use cinedex::worker::{ApiResponse, ApiWorker, WorkerHandle};
use cinedex::{handle_event, Action, ApiClient, AppState, Config, Event, Route};
use clap::Parser;
use command::Command;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

const DEFAULT_COLS: usize = 100;

/// What the loop should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Shell {
    app: AppState,
    api: ApiClient,
    worker: WorkerHandle,
    tokens: Option<JsonTokenStore>,
    pending_confirmation: Option<Confirmation>,
    cols: usize,
}

/// Terminal client for a movie catalog.
#[derive(Parser, Debug)]
#[command(name = "cinedex", version, about)]
struct Args {
    /// Configuration file (defaults to ~/.config/cinedex/config.toml)
    #[arg(short, long, env = "CINEDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Screen to open first, e.g. /dashboard or /edit/<id>
    #[arg(default_value = "/")]
    start: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cinedex: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (app, api) = cinedex::initialize(&config);
    let span = tracing::debug_span!("shell_start", api = %config.api_base_url);
    let guard = span.enter();

    let tokens = if config.persist_session {
        match JsonTokenStore::new(session_file(&config.data_dir())) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, "session file unavailable, not persisting");
                None
            }
        }
    } else {
        None
    };

    let (worker, responses, worker_task) = ApiWorker::spawn(api.clone());
    let mut shell = Shell {
        app,
        api,
        worker,
        tokens,
        pending_confirmation: None,
        cols: terminal_cols(),
    };

    shell.restore_session();
    shell.dispatch(Event::Navigate(Route::parse(&args.start)));
    drop(guard);

    shell.run(responses).await;

    drop(shell);
    if let Err(e) = worker_task.await {
        tracing::warn!(error = %e, "api worker ended abnormally");
    }
    cinedex::observability::shutdown_tracing();
    ExitCode::SUCCESS
}

fn terminal_cols() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse().ok())
        .filter(|cols| *cols > 0)
        .unwrap_or(DEFAULT_COLS)
}

impl Shell {
    async fn run(&mut self, mut responses: UnboundedReceiver<ApiResponse>) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if self.handle_line(&line).await == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to read stdin");
                        break;
                    }
                },
                Some(response) = responses.recv() => {
                    self.dispatch(Event::Api(response));
                }
            }
        }
    }

    fn restore_session(&mut self) {
        let Some(store) = &self.tokens else {
            return;
        };
        match store.load() {
            Ok(Some(token)) => {
                tracing::debug!("restoring saved session");
                self.dispatch(Event::SessionRestored(token));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable session file"),
        }
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        if let Some(confirmation) = self.pending_confirmation.take() {
            if matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                self.dispatch(confirmation.confirmed_event());
            } else {
                println!("cancelled");
            }
            return Flow::Continue;
        }

        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(message) => {
                eprintln!("{message}");
                return Flow::Continue;
            }
        };

        let event = match command {
            Command::Quit => return Flow::Quit,
            Command::Help => {
                println!("{}", command::HELP);
                return Flow::Continue;
            }
            Command::Show => {
                self.render();
                return Flow::Continue;
            }
            Command::Poster(Some(path)) => match PosterUpload::load(&path).await {
                Ok(upload) => Event::Form(FormEvent::SetPoster(Some(upload))),
                Err(e) => {
                    eprintln!("error: {e}");
                    return Flow::Continue;
                }
            },
            Command::Delete(sr) => match self.app.listed_movie(sr) {
                Some(movie) => Event::RequestDelete(movie.id.clone()),
                None => {
                    eprintln!("error: no movie at row {sr}");
                    return Flow::Continue;
                }
            },
            other => match to_event(other) {
                Some(event) => event,
                None => return Flow::Continue,
            },
        };

        self.dispatch(event);
        Flow::Continue
    }

    /// Feeds one event through the handler, runs its actions and redraws if asked.
    fn dispatch(&mut self, event: Event) {
        let span = tracing::debug_span!("shell_event", event_type = %event.name());
        let _guard = span.enter();

        match handle_event(&mut self.app, &event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in actions {
                    self.execute_action(action);
                }
                if should_render {
                    self.render();
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                eprintln!("error: {e}");
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Dispatch(request) => {
                tracing::debug!(request = request.name(), "posting request to worker");
                if let Err(e) = self.worker.post(request) {
                    eprintln!("error: {e}");
                }
            }
            Action::Confirm(confirmation) => {
                println!("{} [y/N]", confirmation.prompt());
                self.pending_confirmation = Some(confirmation);
            }
            Action::SetCredential(token) => self.api.set_auth_token(token),
            Action::PersistSession(token) => {
                if let Some(store) = self.tokens.as_mut() {
                    if let Err(e) = store.save(token.as_deref()) {
                        tracing::warn!(error = %e, "failed to persist session");
                    }
                }
            }
            Action::Notify(notice) => match notice.level {
                NoticeLevel::Info => println!("{notice}"),
                NoticeLevel::Error => eprintln!("{notice}"),
            },
        }
    }

    fn render(&self) {
        let vm = self.app.compute_viewmodel();
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = cinedex::ui::render(&vm, &mut out, self.cols) {
            tracing::debug!(error = %e, "render failed");
        }
        if let Err(e) = out.flush() {
            tracing::debug!(error = %e, "flush failed");
        }
    }
}

/// Commands that map straight onto an event; the rest are handled by the shell.
fn to_event(command: Command) -> Option<Event> {
    let event = match command {
        Command::Open(route) => Event::Navigate(route),
        Command::Login(credentials) => Event::Login(credentials),
        Command::Signup(credentials) => Event::Signup(credentials),
        Command::Logout => Event::Logout,
        Command::Nav(None) => Event::ToggleNav,
        Command::Nav(Some(open)) => Event::SetNav(open),
        Command::Search(query) => Event::Search(query),
        Command::Select(n) => Event::SelectMovie(n),
        Command::Set { path, value } => Event::Form(FormEvent::SetField { path, value }),
        Command::Poster(_) => Event::Form(FormEvent::SetPoster(None)),
        Command::AddActor => Event::Form(FormEvent::AddActor),
        Command::RemoveActor(index) => Event::Form(FormEvent::RemoveActor(index)),
        Command::Submit => Event::Form(FormEvent::Submit),
        Command::Cancel => Event::Form(FormEvent::Cancel),
        Command::Refresh => Event::Refresh,
        Command::Delete(_) | Command::Show | Command::Help | Command::Quit => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_home_without_config() {
        let args = Args::try_parse_from(["cinedex"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(Route::parse(&args.start), Route::Home);
    }

    #[test]
    fn args_take_config_and_start_path() {
        let args = Args::try_parse_from(["cinedex", "-c", "/tmp/c.toml", "/dashboard"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(Route::parse(&args.start), Route::Dashboard);
    }

    #[test]
    fn args_reject_unknown_flags() {
        assert!(Args::try_parse_from(["cinedex", "--bogus"]).is_err());
    }
}
