//! Watch-party relay server.
//!
//! Keeps viewers in a room synchronized on shared media playback state.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin watchsync-server
//! cargo run --bin watchsync-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 cargo run --bin watchsync-server
//! ```

use std::sync::Arc;

use clap::Parser;
use watchsync_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
        repository::InMemoryRoomRepository,
    },
    ui::Server,
    usecase::{GetHealthUseCase, GetRoomDetailUseCase, GetRoomsUseCase, SyncEngine},
};
use watchsync_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "watchsync-server")]
#[command(about = "WebSocket relay keeping watch-party rooms in sync", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository / Registry (in-memory)
    // 2. MessagePusher
    // 3. SyncEngine and read-side UseCases
    // 4. Server

    // 1. Room Directory and Connection Registry
    let repository = Arc::new(InMemoryRoomRepository::default());
    let registry = Arc::new(InMemoryConnectionRegistry::default());

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. SyncEngine and UseCases
    let sync_engine = Arc::new(SyncEngine::new(
        repository.clone(),
        registry.clone(),
        message_pusher,
        Arc::new(SystemClock),
    ));
    let get_health_usecase = Arc::new(GetHealthUseCase::new(repository.clone(), registry));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 4. Create and run the server
    let server = Server::new(
        sync_engine,
        get_health_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
