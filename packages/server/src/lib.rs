//! Real-time synchronization engine for shared countdown timers.
//!
//! Clients connect over WebSocket, declare a client id, and then create, join,
//! or control timer rooms. The owner's start/pause/resume commands are fanned
//! out to every participant of the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
