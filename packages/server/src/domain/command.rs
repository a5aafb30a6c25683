//! コマンドとイベントのドメイン表現
//!
//! ワイヤー上の文字列はここに来る前に閉じた列挙型へ変換される。

use std::fmt;

use super::{ClientId, TimerCode};

/// 受信したコマンド（エリアごとに分類済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Auth(AuthCommand),
    Timer(TimerCommand),
}

/// `auth` エリアのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    /// 接続にクライアント ID を宣言する（接続ごとに一度だけ有効）
    SetId(ClientId),
}

/// `timer` エリアのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerCommand {
    pub action: TimerAction,
    pub code: TimerCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    Create,
    Join,
    Leave,
    Start,
    Pause,
    Resume,
}

impl TimerAction {
    pub const ALL: [TimerAction; 6] = [
        TimerAction::Create,
        TimerAction::Join,
        TimerAction::Leave,
        TimerAction::Start,
        TimerAction::Pause,
        TimerAction::Resume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerAction::Create => "create",
            TimerAction::Join => "join",
            TimerAction::Leave => "leave",
            TimerAction::Start => "start",
            TimerAction::Pause => "pause",
            TimerAction::Resume => "resume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

impl fmt::Display for TimerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// サーバーから送信されるタイマーイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    Join,
    Leave,
    Start,
    Pause,
    Resume,
}

impl TimerEvent {
    pub const ALL: [TimerEvent; 5] = [
        TimerEvent::Join,
        TimerEvent::Leave,
        TimerEvent::Start,
        TimerEvent::Pause,
        TimerEvent::Resume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerEvent::Join => "join",
            TimerEvent::Leave => "leave",
            TimerEvent::Start => "start",
            TimerEvent::Pause => "pause",
            TimerEvent::Resume => "resume",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.as_str() == name)
    }
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
