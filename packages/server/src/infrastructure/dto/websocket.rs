//! WebSocket wire format.
//!
//! Inbound commands:
//!
//! ```text
//! <version>:cmd:<area>:<command>[:<arg>]*
//! ```
//!
//! Outbound events:
//!
//! ```text
//! 1:event:timer:<timerId>:<eventName>
//! ```
//!
//! The codec is stateless. Anything it rejects is dropped by the caller with a log line.

use std::{fmt, str::FromStr};

use crate::domain::{ProtocolError, TimerCode, TimerEvent};

/// The only protocol version the server speaks.
pub const PROTOCOL_VERSION: u32 = 1;

const FIELD_SEPARATOR: char = ':';
const COMMAND_HEADER_FIELDS: usize = 4;
const EVENT_FIELDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Cmd,
    Event,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Cmd => "cmd",
            MessageType::Event => "event",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Auth,
    Timer,
}

impl Area {
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Auth => "auth",
            Area::Timer => "timer",
        }
    }
}

impl FromStr for Area {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth" => Ok(Area::Auth),
            "timer" => Ok(Area::Timer),
            other => Err(ProtocolError::UnknownArea(other.to_string())),
        }
    }
}

/// A decoded inbound command frame. The command name is not validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    pub version: u32,
    pub area: Area,
    pub command: String,
    pub args: Vec<String>,
}

impl CommandFrame {
    pub fn new(area: Area, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            area,
            command: command.into(),
            args,
        }
    }
}

impl FromStr for CommandFrame {
    type Err = ProtocolError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();

        let version = parse_version(fields[0])?;
        if fields.len() < COMMAND_HEADER_FIELDS {
            return Err(ProtocolError::TooFewFields {
                expected: COMMAND_HEADER_FIELDS,
                actual: fields.len(),
            });
        }
        if fields[1] != MessageType::Cmd.as_str() {
            return Err(ProtocolError::UnsupportedMessageType(fields[1].to_string()));
        }
        let area = fields[2].parse::<Area>()?;

        Ok(Self {
            version,
            area,
            command: fields[3].to_string(),
            args: fields[COMMAND_HEADER_FIELDS..]
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        })
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.version,
            MessageType::Cmd.as_str(),
            self.area.as_str(),
            self.command
        )?;
        for arg in &self.args {
            write!(f, "{}{}", FIELD_SEPARATOR, arg)?;
        }
        Ok(())
    }
}

/// An outbound timer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    pub code: TimerCode,
    pub event: TimerEvent,
}

impl EventFrame {
    pub fn new(code: TimerCode, event: TimerEvent) -> Self {
        Self { code, event }
    }
}

impl fmt::Display for EventFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            PROTOCOL_VERSION,
            MessageType::Event.as_str(),
            Area::Timer.as_str(),
            self.code,
            self.event
        )
    }
}

impl FromStr for EventFrame {
    type Err = ProtocolError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();

        parse_version(fields[0])?;
        if fields.len() != EVENT_FIELDS {
            return Err(ProtocolError::TooFewFields {
                expected: EVENT_FIELDS,
                actual: fields.len(),
            });
        }
        if fields[1] != MessageType::Event.as_str() {
            return Err(ProtocolError::UnsupportedMessageType(fields[1].to_string()));
        }
        if fields[2].parse::<Area>()? != Area::Timer {
            return Err(ProtocolError::UnknownArea(fields[2].to_string()));
        }
        let code = TimerCode::new(fields[3])?;
        let event = TimerEvent::from_name(fields[4])
            .ok_or_else(|| ProtocolError::UnknownEvent(fields[4].to_string()))?;

        Ok(Self { code, event })
    }
}

fn parse_version(field: &str) -> Result<u32, ProtocolError> {
    // u32::from_str は先頭の '+' を受け付けるため、数字のみに限定する
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::InvalidVersion(field.to_string()));
    }
    let version = field
        .parse::<u32>()
        .map_err(|_| ProtocolError::InvalidVersion(field.to_string()))?;
    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version));
    }
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timer_command() {
        // テスト項目: timer コマンドのフレームが解析される
        // given (前提条件):
        let text = "1:cmd:timer:create:abcdef";

        // when (操作):
        let frame: CommandFrame = text.parse().unwrap();

        // then (期待する結果):
        assert_eq!(frame.version, 1);
        assert_eq!(frame.area, Area::Timer);
        assert_eq!(frame.command, "create");
        assert_eq!(frame.args, vec!["abcdef".to_string()]);
    }

    #[test]
    fn test_parse_rejects_unsupported_version() {
        // テスト項目: バージョン 1 以外は拒否される
        // given (前提条件):
        let text = "2:cmd:timer:create:ABCDEF";

        // when (操作):
        let result = text.parse::<CommandFrame>();

        // then (期待する結果):
        assert_eq!(result, Err(ProtocolError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_version() {
        // テスト項目: 数値でないバージョンは拒否される
        // given (前提条件):
        let text = "hello world";

        // when (操作):
        let result = text.parse::<CommandFrame>();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ProtocolError::InvalidVersion("hello world".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_signed_version() {
        // テスト項目: 符号付きのバージョンは拒否される
        // given (前提条件):
        let texts = ["+1:cmd:timer:create:ABCDEF", "-1:cmd:timer:create:ABCDEF"];

        for text in texts {
            // when (操作):
            let result = text.parse::<CommandFrame>();

            // then (期待する結果):
            let field = &text[..2];
            assert_eq!(result, Err(ProtocolError::InvalidVersion(field.to_string())));
        }
    }

    #[test]
    fn test_parse_rejects_too_few_fields() {
        // テスト項目: フィールドが足りないフレームは拒否される
        // given (前提条件):
        let text = "1:cmd:timer";

        // when (操作):
        let result = text.parse::<CommandFrame>();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ProtocolError::TooFewFields {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_parse_rejects_event_message_type_from_client() {
        // テスト項目: クライアントからの event フレームは受け付けない
        // given (前提条件):
        let text = "1:event:timer:ABCDEF:start";

        // when (操作):
        let result = text.parse::<CommandFrame>();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ProtocolError::UnsupportedMessageType("event".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_area() {
        // テスト項目: 未知のエリアは拒否される
        // given (前提条件):
        let text = "1:cmd:chat:say:hello";

        // when (操作):
        let result = text.parse::<CommandFrame>();

        // then (期待する結果):
        assert_eq!(result, Err(ProtocolError::UnknownArea("chat".to_string())));
    }

    #[test]
    fn test_command_frame_display() {
        // テスト項目: コマンドフレームがワイヤーフォーマットに変換される
        // given (前提条件):
        let frame = CommandFrame::new(Area::Auth, "setid", vec!["alice".to_string()]);

        // when (操作):
        let text = frame.to_string();

        // then (期待する結果):
        assert_eq!(text, "1:cmd:auth:setid:alice");
    }

    #[test]
    fn test_event_frame_display() {
        // テスト項目: イベントがワイヤーフォーマットに変換される
        // given (前提条件):
        let frame = EventFrame::new(TimerCode::new("ABCDEF").unwrap(), TimerEvent::Join);

        // when (操作):
        let text = frame.to_string();

        // then (期待する結果):
        assert_eq!(text, "1:event:timer:ABCDEF:join");
    }

    #[test]
    fn test_event_frame_parse() {
        // テスト項目: クライアント側でイベントフレームを解析できる
        // given (前提条件):
        let text = "1:event:timer:ABCDEF:resume";

        // when (操作):
        let frame: EventFrame = text.parse().unwrap();

        // then (期待する結果):
        assert_eq!(frame.code.as_str(), "ABCDEF");
        assert_eq!(frame.event, TimerEvent::Resume);
    }

    #[test]
    fn test_event_frame_parse_rejects_unknown_event() {
        // テスト項目: 未知のイベント名は拒否される
        // given (前提条件):
        let text = "1:event:timer:ABCDEF:explode";

        // when (操作):
        let result = text.parse::<EventFrame>();

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ProtocolError::UnknownEvent("explode".to_string()))
        );
    }
}
