//! REPL line parsing.

use sharetimer_server::{
    domain::{ProtocolError, TimerAction, TimerCode},
    infrastructure::dto::websocket::{Area, CommandFrame},
};

use crate::error::ClientError;

const TIMER_USAGE: &str = "create|join|leave|start|pause|resume <CODE>";
const RAW_USAGE: &str = "raw <frame>";

/// What a REPL line asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Send this frame to the server
    Frame(String),
    Help,
    Quit,
}

/// Frame that declares the client id to the server
pub fn setid_frame(client_id: &str) -> String {
    CommandFrame::new(Area::Auth, "setid", vec![client_id.to_string()]).to_string()
}

/// Parse one REPL line
pub fn parse_input(line: &str) -> Result<Input, ClientError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "help" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        "raw" if rest.is_empty() => Err(ClientError::Usage(RAW_USAGE)),
        "raw" => Ok(Input::Frame(rest.to_string())),
        _ => {
            let action = TimerAction::from_name(&word.to_lowercase())
                .ok_or_else(|| ClientError::UnknownCommand(word.to_string()))?;
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                return Err(ClientError::Usage(TIMER_USAGE));
            }
            let code = TimerCode::new(rest).map_err(ProtocolError::from)?;
            let frame = CommandFrame::new(Area::Timer, action.as_str(), vec![code.to_string()]);
            Ok(Input::Frame(frame.to_string()))
        }
    }
}

/// Help text shown by the `help` command
pub fn help_text() -> String {
    format!(
        "Commands:\n  {}\n  {}\n  help\n  quit\n",
        TIMER_USAGE, RAW_USAGE
    )
}
