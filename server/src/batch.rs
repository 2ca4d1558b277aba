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

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};
use rand::rngs::StdRng;
use reqwest::{Client, Error as ReqwestError};
use resources::AuthorizationRequestPayload;
use thiserror::Error;
use tokio::{sync::Mutex, time::delay_for};

use crate::generator::{Error as GeneratorError, Generator};
use crate::logging::TARGET;
use crate::state::{MemberDirectory, StoreError};

pub const DEFAULT_COUNT: usize = 5;
pub const DEFAULT_PACING: Duration = Duration::from_millis(1000);

#[derive(Error, Debug)]
pub enum Error {
    #[error("No member records found!")]
    NoMembersFound,

    #[error("Store Error: {0}")]
    Store(StoreError),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Transport Error: {0}")]
    Transport(ReqwestError),

    #[error("Submission was rejected (status={status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<GeneratorError> for Error {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::NoMembersFound => Self::NoMembersFound,
            GeneratorError::Store(err) => Self::Store(err),
        }
    }
}

impl From<ReqwestError> for SubmitError {
    fn from(err: ReqwestError) -> Self {
        Self::Transport(err)
    }
}

/// Delivers a generated payload to the intake endpoint.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &AuthorizationRequestPayload) -> Result<(), SubmitError>;
}

/// Submits payloads as JSON `POST` requests.
pub struct HttpSubmitter {
    client: Client,
    url: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    pub pacing: Duration,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub failed: usize,
}

/// Runs generate-and-submit cycles one after another.
pub struct BatchDriver {
    members: Arc<dyn MemberDirectory>,
    submitter: Arc<dyn Submitter>,
    generator: Mutex<Generator<StdRng>>,
    config: BatchConfig,
}

impl HttpSubmitter {
    pub fn new(client: Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &AuthorizationRequestPayload) -> Result<(), SubmitError> {
        let res = self.client.post(&self.url).json(payload).send().await?;

        let status = res.status();
        if status.is_success() {
            return Ok(());
        }

        let body = res.text().await.unwrap_or_default();

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
        }
    }
}

impl BatchDriver {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        submitter: Arc<dyn Submitter>,
        generator: Generator<StdRng>,
        config: BatchConfig,
    ) -> Self {
        Self {
            members,
            submitter,
            generator: Mutex::new(generator),
            config,
        }
    }

    /// Generates and submits `count` requests.
    ///
    /// Failed submissions are logged and skipped. The batch is aborted if the
    /// member directory is empty.
    pub async fn run(&self, count: usize) -> Result<BatchOutcome, Error> {
        let mut outcome = BatchOutcome {
            attempted: 0,
            failed: 0,
        };

        for i in 0..count {
            if self.members.count().await? == 0 {
                return Err(Error::NoMembersFound);
            }

            let members = self.members.find_all().await?;
            let payload = self.generator.lock().await.generate(&members)?;

            info!(target: TARGET, "Submitting generated authorization request {}/{} (member={}, reqId={})",
                i + 1, count, payload.member_id, payload.req_id.as_deref().unwrap_or("-"));

            outcome.attempted += 1;
            if let Err(err) = self.submitter.submit(&payload).await {
                outcome.failed += 1;

                error!(target: TARGET, "Unable to submit generated authorization request {}/{}: {}",
                    i + 1, count, err);
            }

            delay_for(self.config.pacing).await;
        }

        info!(target: TARGET, "Batch finished (attempted={}, failed={})",
            outcome.attempted, outcome.failed);

        Ok(outcome)
    }
}
