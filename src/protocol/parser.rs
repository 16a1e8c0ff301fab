//! Host command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the main loop can dispatch on.

/// Parameters passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Turn number; the engine counts turns itself when absent.
    pub turn: Option<u32>,
}

/// A parsed host-to-client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Cci,

    /// Synchronization ping; client must reply `readyok`.
    IsReady,

    /// Set an option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset client state for a new match.
    NewGame,

    /// Request team registration.
    TeamData,

    /// Set the board snapshot from a JSON document.
    Position { json: String },

    /// Decide the actions for the current turn.
    Go(GoParams),

    /// Terminate the client process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "cci" => Some(Command::Cci),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "teamdata" => Some(Command::TeamData),

        "setoption" => parse_setoption(trimmed),
        "position" => parse_position(trimmed),
        "go" => parse_go(&tokens),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
///
/// Option ids are single tokens. The value is the rest of the line with its
/// inner spacing intact, so file paths survive.
fn parse_setoption(line: &str) -> Option<Command> {
    let args = line.strip_prefix("setoption").unwrap_or_default().trim();
    let rest = match args.split_once(char::is_whitespace) {
        Some(("name", rest)) => rest.trim_start(),
        _ => {
            tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            return None;
        }
    };

    let (name, value) = match rest.split_once(char::is_whitespace) {
        None => (rest, None),
        Some((name, tail)) => match tail.trim_start().strip_prefix("value") {
            Some(v) if v.is_empty() || v.starts_with(char::is_whitespace) => {
                let v = v.trim();
                (name, (!v.is_empty()).then_some(v))
            }
            _ => {
                tracing::warn!("malformed setoption: expected 'value' after option '{}'", name);
                return None;
            }
        },
    };

    if name == "value" {
        tracing::warn!("malformed setoption: empty name");
        return None;
    }

    Some(Command::SetOption {
        name: name.to_string(),
        value: value.map(str::to_string),
    })
}

/// Parses `position <json>`. The JSON may contain spaces, so everything
/// after the keyword is captured.
fn parse_position(full_line: &str) -> Option<Command> {
    let json = full_line
        .strip_prefix("position")
        .unwrap_or("")
        .trim();
    if json.is_empty() {
        tracing::warn!("malformed position: expected 'position <json>'");
        return None;
    }
    Some(Command::Position {
        json: json.to_string(),
    })
}

/// Parses `go [turn <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "turn" => {
                i += 1;
                match tokens.get(i).map(|t| t.parse::<u32>()) {
                    Some(Ok(v)) if v >= 1 => params.turn = Some(v),
                    Some(_) => tracing::warn!("invalid turn value: '{}'", tokens[i]),
                    None => tracing::warn!("missing turn value"),
                }
            }
            other => {
                tracing::warn!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}
