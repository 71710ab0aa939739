//! Line commands read from stdin.

use cinedex::domain::Credentials;
use cinedex::form::FieldPath;
use cinedex::Route;
use std::path::PathBuf;

pub const HELP: &str = "\
commands:
  open <path>                 /, /login, /signup, /dashboard, /add, /edit/<id>
  login <user> <password>     sign in
  signup <user> <password>    create an account
  logout                      sign out
  nav [open|close]            toggle the navigation panel
  search [text]               filter movies by name (empty clears)
  select <n>                  feature the n-th movie on the home screen
  set <key> <value>           edit a form field (name, year, plot, producer.dob, actor.0.gender, ...)
  poster <file>|none          attach or drop the poster image
  actor add | actor remove <i>
  submit | cancel             finish the form
  delete <sr>                 delete the movie at a dashboard row
  refresh                     reload the catalog
  show                        redraw the screen
  help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Route),
    Login(Credentials),
    Signup(Credentials),
    Logout,
    /// `None` toggles.
    Nav(Option<bool>),
    Search(String),
    Select(usize),
    Set { path: FieldPath, value: String },
    /// `None` removes the attached file.
    Poster(Option<PathBuf>),
    AddActor,
    RemoveActor(usize),
    Submit,
    Cancel,
    Delete(usize),
    Refresh,
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a usage message for unknown commands or bad arguments.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "open" | "go" => Command::Open(Route::parse(required(rest, "open <path>")?)),
        "login" => Command::Login(credentials(rest, "login <username> <password>")?),
        "signup" => Command::Signup(credentials(rest, "signup <username> <password>")?),
        "logout" => Command::Logout,
        "nav" => match rest {
            "" => Command::Nav(None),
            "open" => Command::Nav(Some(true)),
            "close" => Command::Nav(Some(false)),
            _ => return Err("usage: nav [open|close]".to_string()),
        },
        "search" => Command::Search(rest.to_string()),
        "select" => Command::Select(number(rest, "select <n>")?),
        "set" => {
            let usage = "set <key> <value>";
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(key, value)| (key, value.trim()));
            let path = FieldPath::parse(required(key, usage)?)
                .ok_or_else(|| format!("unknown field `{key}`"))?;
            Command::Set {
                path,
                value: value.to_string(),
            }
        }
        "poster" => match required(rest, "poster <file>|none")? {
            "none" => Command::Poster(None),
            file => Command::Poster(Some(PathBuf::from(file))),
        },
        "actor" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("add"), None) => Command::AddActor,
                (Some("remove"), Some(index)) => {
                    Command::RemoveActor(index.parse().map_err(|_| "usage: actor remove <i>")?)
                }
                _ => return Err("usage: actor add | actor remove <i>".to_string()),
            }
        }
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "delete" => Command::Delete(number(rest, "delete <sr>")?),
        "refresh" => Command::Refresh,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest)
    }
}

fn credentials(rest: &str, usage: &str) -> Result<Credentials, String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(username), Some(password), None) => Ok(Credentials::new(username, password)),
        _ => Err(format!("usage: {usage}")),
    }
}

/// One-based positions; zero is rejected.
fn number(rest: &str, usage: &str) -> Result<usize, String> {
    rest.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("usage: {usage}"))
}
