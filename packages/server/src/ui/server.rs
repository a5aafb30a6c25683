//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use sharetimer_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        registry::{InMemoryConnectionRegistry, InMemoryIdentityMap},
        repository::InMemoryRoomRepository,
    },
    usecase::{
        CommandDispatcher, ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, SetIdentityUseCase, TimerCommandUseCase,
    },
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Shared timer server
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(Arc::new(SystemClock));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    dispatcher: Arc<CommandDispatcher>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        dispatcher: Arc<CommandDispatcher>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            dispatcher,
            get_rooms_usecase,
            get_room_detail_usecase,
        }
    }

    /// Wire a server backed by the in-memory stores.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        // Initialize dependencies in order:
        // 1. Stores (room table, connection registry, identity map)
        // 2. MessagePusher
        // 3. UseCases

        // 1. Create stores
        let repository = Arc::new(InMemoryRoomRepository::new());
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let identities = Arc::new(InMemoryIdentityMap::new());

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new(
            connections.clone(),
            identities.clone(),
        ));

        // 3. Create UseCases
        let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
            connections.clone(),
            clock.clone(),
        ));
        let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
            connections,
            identities.clone(),
            repository.clone(),
            message_pusher.clone(),
        ));
        let set_identity_usecase = Arc::new(SetIdentityUseCase::new(identities.clone()));
        let timer_command_usecase = Arc::new(TimerCommandUseCase::new(
            repository.clone(),
            identities,
            message_pusher,
            clock,
        ));
        let dispatcher = Arc::new(CommandDispatcher::new(
            set_identity_usecase,
            timer_command_usecase,
        ));
        let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
        let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

        Self::new(
            connect_client_usecase,
            disconnect_client_usecase,
            dispatcher,
            get_rooms_usecase,
            get_room_detail_usecase,
        )
    }

    fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            dispatcher: self.dispatcher,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(get_rooms))
            .route("/debug/rooms/{code}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the shared timer server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Shared timer server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
