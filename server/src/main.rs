/*
 * Copyright (c) 2021 gematik GmbH
 * 
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 * 
 *    http://www.apache.org/licenses/LICENSE-2.0
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_rt::System;
use log::info;
use structopt::StructOpt;

use erx_auth_server::{
    authorization_requests::AuthorizationRequestService,
    batch::{BatchConfig, BatchDriver, HttpSubmitter},
    error::Error,
    generator::Generator,
    logging::{init_logger, TARGET},
    misc::{create_reqwest_client, format_version},
    service::{AccessTokenSecret, AppData, Service},
    state::State,
};

fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    init_logger(&opts.log_config)?;

    System::new("erx-auth-server").block_on(run(opts))
}

async fn run(opts: Options) -> Result<(), Error> {
    info!(target: TARGET, "Starting erx-auth-server v{}", format_version());

    let state = State::default();

    if let Some(path) = &opts.state {
        if path.exists() {
            state.load_file(path).await?;
        } else {
            info!(target: TARGET, "State file {} does not exist yet, starting empty", path.display());
        }
    }

    if let Some(path) = &opts.members {
        state.load_members_file(path).await?;
    }

    let client = create_reqwest_client(Duration::from_secs(opts.submit_timeout))?;
    let submitter = HttpSubmitter::new(client, opts.submit_url.clone());
    let batch = BatchDriver::new(
        Arc::new(state.clone()),
        Arc::new(submitter),
        Generator::from_entropy(),
        BatchConfig {
            pacing: Duration::from_millis(opts.pacing),
        },
    );

    let data = AppData {
        requests: AuthorizationRequestService::new(Arc::new(state.clone())),
        batch: Arc::new(batch),
        members: Arc::new(state.clone()),
        drugs: Arc::new(state.clone()),
        secret: AccessTokenSecret(opts.jwt_secret.clone()),
    };

    Service::new(data)
        .listen(&opts.server_addr)?
        .run()?
        .await?;

    if let Some(path) = &opts.state {
        state.save_file(path).await?;
    }

    Ok(())
}

#[derive(Clone, StructOpt)]
struct Options {
    /// Address to listen on.
    #[structopt(short = "l", long = "listen", env = "LISTEN", default_value = "[::]:3000")]
    server_addr: String,

    /// Path of the log4rs configuration.
    #[structopt(short = "c", long = "log-config", env = "LOG_CONFIG", default_value = "./log4rs.yml")]
    log_config: PathBuf,

    /// JSON snapshot the state is loaded from on startup and written to on shutdown.
    #[structopt(short = "s", long = "state", env = "STATE_FILE")]
    state: Option<PathBuf>,

    /// JSON file with members (`[{"id": 1}, ...]`) to add to the member directory.
    #[structopt(short = "m", long = "members", env = "MEMBERS_FILE")]
    members: Option<PathBuf>,

    /// Secret of the HS256 access tokens. Write routes are open if not set.
    #[structopt(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// URL generated requests are submitted to.
    #[structopt(
        long = "submit-url",
        env = "SUBMIT_URL",
        default_value = "http://localhost:3000/authorization-requests"
    )]
    submit_url: String,

    /// Delay after each generated request in milliseconds.
    #[structopt(long = "pacing", env = "BATCH_PACING_MS", default_value = "1000")]
    pacing: u64,

    /// Timeout of a single submission in seconds.
    #[structopt(long = "submit-timeout", env = "SUBMIT_TIMEOUT", default_value = "30")]
    submit_timeout: u64,
}
