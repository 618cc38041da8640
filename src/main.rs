//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use clap::Parser;
use lineshell::config::{Arguments, Configuration};
use lineshell::context::ServerContext;
use lineshell::telnet::TelnetServer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .with_ansi(true)
        .init();

    // Load environment variables from .env file if specified
    if let Some(ref env_file) = arguments.env_file {
        if std::path::Path::new(env_file).exists() {
            debug!("Loading environment variables from file: {}", env_file);
            dotenv::from_filename(env_file).ok();
        }
    } else {
        debug!("Loading environment variables from default file");
        dotenv::dotenv().ok();
    }

    // Load configuration, falling back to defaults when no file is present
    let config: Configuration = if std::path::Path::new(&arguments.config_file).exists() {
        Configuration::load(&arguments.config_file)
            .inspect_err(|err| eprintln!("Configuration load error: {}", err))
            .expect("Unable to load configuration file")
    } else {
        debug!(
            "No configuration file at {}, using defaults",
            arguments.config_file
        );
        Configuration::default()
    };

    debug!("Configuration loaded: {:?}", config);
    info!("Starting Lineshell Telnet Server...");

    // Create server context shared by every connection task
    let context = ServerContext::new(config.session);

    // Get telnet config or use defaults
    let telnet_config = config.telnet.unwrap_or_default();
    let listener = tokio::net::TcpListener::bind(telnet_config.addr.to_addr())
        .await
        .expect("Unable to bind to telnet port");

    info!(
        "Telnet Server listening on {} ({}:{})",
        telnet_config.addr,
        telnet_config.addr.to_ip(),
        telnet_config.addr.to_port(),
    );

    let server = TelnetServer::new(context.clone());

    // Run until the shutdown signal; dropping the accept loop closes the
    // listening socket.
    tokio::select! {
        result = server.run(listener) => {
            if let Err(e) = result {
                tracing::error!("Telnet server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    // Force-close every session still registered; each task observes the
    // cancellation and exits through its own teardown.
    let released = context.registry().cleanup_all();
    info!("Released {} outstanding session(s)", released);
}
