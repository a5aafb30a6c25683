//! Event formatting for client display.

use sharetimer_server::{domain::TimerEvent, infrastructure::dto::websocket::EventFrame};
use sharetimer_shared::time::millis_to_clock_time;

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format one inbound text frame
    ///
    /// # Arguments
    ///
    /// * `text` - The frame as received
    /// * `received_at` - Unix timestamp when the frame arrived (milliseconds)
    pub fn format_frame(text: &str, received_at: i64) -> String {
        let time = millis_to_clock_time(received_at);
        match text.parse::<EventFrame>() {
            Ok(frame) => format!(
                "\n[{}] {} {}\n",
                time,
                frame.code,
                Self::describe(frame.event)
            ),
            Err(_) => format!("\n[{}] {}\n", time, text),
        }
    }

    fn describe(event: TimerEvent) -> &'static str {
        match event {
            TimerEvent::Join => "+ a participant joined",
            TimerEvent::Leave => "- a participant left",
            TimerEvent::Start => "> timer started",
            TimerEvent::Pause => "|| timer paused",
            TimerEvent::Resume => "> timer resumed",
        }
    }

    /// Format a non-text frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\n(binary frame, {} bytes ignored)\n", len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_event() {
        // テスト項目: イベントフレームはコードと内容を表示する
        // given (前提条件):
        let text = "1:event:timer:ABCDEF:start";
        let received_at = 0;

        // when (操作):
        let result = EventFormatter::format_frame(text, received_at);

        // then (期待する結果):
        assert!(result.contains("ABCDEF > timer started"));
        assert!(result.starts_with("\n["));
    }

    #[test]
    fn test_format_unknown_frame_verbatim() {
        // テスト項目: 解釈できないフレームはそのまま表示する
        // given (前提条件):
        let text = "1:event:timer:ABCDEF:explode";

        // when (操作):
        let result = EventFormatter::format_frame(text, 0);

        // then (期待する結果):
        assert!(result.ends_with("] 1:event:timer:ABCDEF:explode\n"));
    }

    #[test]
    fn test_format_binary_message() {
        assert_eq!(
            EventFormatter::format_binary_message(3),
            "\n(binary frame, 3 bytes ignored)\n"
        );
    }
}
