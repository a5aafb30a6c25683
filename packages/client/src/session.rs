//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use sharetimer_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    error::ClientError,
    formatter::EventFormatter,
    input::{Input, help_text, parse_input, setid_frame},
    ui::redisplay_prompt,
};

/// Run one WebSocket session
///
/// Returns `Ok(())` when the user quits, and an error when the connection fails or drops.
/// Lines typed while disconnected stay queued in `input_rx` for the next session.
pub async fn run_client_session(
    url: &str,
    client_id: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to timer server!");
    let (mut write, mut read) = ws_stream.split();

    // 接続のたびに ID を宣言し直す
    write
        .send(Message::Text(setid_frame(client_id).into()))
        .await
        .map_err(|_| ClientError::ConnectionLost)?;
    println!(
        "\nYou are '{}'. Type 'help' for commands. Press Ctrl+C to exit.\n",
        client_id
    );
    redisplay_prompt(client_id);

    // Spawn a task to handle incoming events
    let client_id_for_read = client_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", EventFormatter::format_frame(text.as_str(), now_millis()));
                    redisplay_prompt(&client_id_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", EventFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&client_id_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let result = loop {
        tokio::select! {
            _ = &mut read_task => break Err(ClientError::ConnectionLost),
            line = input_rx.recv() => {
                // 入力スレッドが終了した (Ctrl+C / Ctrl+D)
                let Some(line) = line else { break Ok(()) };

                let frame = match parse_input(&line) {
                    Ok(Input::Frame(frame)) => frame,
                    Ok(Input::Help) => {
                        print!("{}", help_text());
                        redisplay_prompt(client_id);
                        continue;
                    }
                    Ok(Input::Quit) => break Ok(()),
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(client_id);
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::Text(frame.into())).await {
                    tracing::warn!("Failed to send command: {}", e);
                    break Err(ClientError::ConnectionLost);
                }
            }
        }
    };

    read_task.abort();
    if result.is_ok() {
        let _ = write.close().await;
    }
    result
}
