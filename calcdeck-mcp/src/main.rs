//! Calcdeck MCP Server
//!
//! Newline-delimited JSON-RPC 2.0 over stdio.
//!
//! Tools:
//! - call: Run a calculator function with positional arguments
//! - help: Get documentation for a function
//! - list_functions: List available functions

mod config;
mod protocol;
mod server;

use std::io::{self, BufRead, IsTerminal, Write};
use calcdeck::Calcdeck;
use tracing::{debug, error, info};
use config::ServerConfig;
use server::{Server, PROTOCOL_VERSION, SERVER_VERSION};

fn main() {
    let config = ServerConfig::from_env();
    config.init_logging();

    let deck = Calcdeck::with_standard_library();
    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        functions = deck.registry().len(),
        trace = config.trace,
        "calcdeck MCP server started"
    );
    debug!(
        stdin_terminal = io::stdin().is_terminal(),
        stdout_terminal = io::stdout().is_terminal(),
        "stdio"
    );

    let server = Server::new(deck, &config);
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let Some(response) = server.process_line(&line) else {
                    continue;
                };

                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", response).and_then(|_| stdout.flush()) {
                    error!(error = %e, "writing response failed");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "reading input failed");
                break;
            }
        }
    }

    info!("server shutting down");
}
