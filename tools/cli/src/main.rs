mod console;

use clap::{Parser, Subcommand};
use console::ConsoleView;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsudoi::client::{HttpLobbyService, LobbyClient, PollerConfig, SessionState};
use tsudoi::lobby::QueryFilter;

#[derive(Parser)]
#[command(name = "tsudoi", about = "Browse, host and join lobbies from a terminal")]
struct Args {
    /// Lobby service base URL
    #[arg(long, env = "TSUDOI_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Name shown to other members
    #[arg(short, long, env = "TSUDOI_NAME")]
    name: Option<String>,

    /// Seconds between lobby and list refreshes
    #[arg(long, default_value_t = 2)]
    refresh_secs: u64,

    /// Seconds between host heartbeats
    #[arg(long, default_value_t = 15)]
    heartbeat_secs: u64,

    /// Only list lobbies whose name contains this
    #[arg(long)]
    filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print open lobbies once
    List,
    /// Create a lobby and wait in its room
    Create {
        lobby_name: String,
        #[arg(short, long, default_value_t = 4)]
        max_players: u32,
        #[arg(long)]
        private: bool,
    },
    /// Join a lobby by its six character code
    JoinCode { code: String },
    /// Join a public lobby by id
    JoinId { lobby_id: String },
    /// Follow the lobby list until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let refresh = Duration::from_secs(args.refresh_secs.max(1));
    let config = PollerConfig {
        room_refresh: refresh,
        list_refresh: refresh,
        heartbeat: Duration::from_secs(args.heartbeat_secs.max(1)),
        list_filter: QueryFilter {
            name_contains: args.filter.clone(),
            ..Default::default()
        },
    };

    let service = HttpLobbyService::sign_in_anonymously(args.server.as_str()).await?;
    let mut client = LobbyClient::new(service, config);
    let mut state = client.new_session();
    if let Some(name) = &args.name {
        state.set_display_name(name.as_str());
    }
    let mut view = ConsoleView::default();

    println!("Signed in as {}", state.player_id());

    match args.command {
        Command::List => {
            client.refresh_lobby_list(&mut view).await?;
            return Ok(());
        }
        Command::Watch => {
            client.refresh_lobby_list(&mut view).await?;
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            client
                .run_until(&mut state, &mut view, Duration::from_millis(200), shutdown)
                .await;
            return Ok(());
        }
        Command::Create {
            lobby_name,
            max_players,
            private,
        } => {
            client
                .create_lobby(&mut state, &mut view, &lobby_name, max_players, private)
                .await?;
        }
        Command::JoinCode { code } => {
            client.join_by_code(&mut state, &mut view, &code).await?;
        }
        Command::JoinId { lobby_id } => {
            client.join_by_id(&mut state, &mut view, &lobby_id).await?;
        }
    }

    println!("Commands: leave, kick <player id>, start, enter, join <code>, list, quit");
    interact(&mut client, &mut state, &mut view).await?;
    Ok(())
}

/// Poll in the background while reading commands from stdin
async fn interact(
    client: &mut LobbyClient<HttpLobbyService>,
    state: &mut SessionState,
    view: &mut ConsoleView,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                client.poll(state, view, elapsed).await;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !run_command(client, state, view, line.trim()).await {
                    break;
                }
            }
        }
    }

    if state.lobby().is_some() {
        let _ = client.leave(state, view).await;
    }
    Ok(())
}

/// Returns false when the user asked to quit
async fn run_command(
    client: &LobbyClient<HttpLobbyService>,
    state: &mut SessionState,
    view: &mut ConsoleView,
    line: &str,
) -> bool {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    // Failures are already logged by the client; echo a short reason
    let result = match command {
        "" => Ok(()),
        "quit" | "exit" => return false,
        "leave" => client.leave(state, view).await,
        "kick" if !argument.is_empty() => client.kick(state, argument).await,
        "start" => client.start_game(state, view).await,
        "enter" => {
            if !client.enter_game(state, view) {
                println!("No started game to enter");
            }
            Ok(())
        }
        "join" if !argument.is_empty() => client.join_by_code(state, view, argument).await,
        "list" => client.refresh_lobby_list(view).await,
        _ => {
            println!("Unknown command: {line}");
            Ok(())
        }
    };

    if let Err(err) = result {
        println!("{err}");
    }
    true
}
