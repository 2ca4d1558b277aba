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

use std::convert::TryFrom;
use std::sync::Arc;

use log::{debug, info};
use resources::{primitives::Id, AuthorizationRequest};
use serde_json::Value;
use thiserror::Error;

use crate::logging::TARGET;
use crate::state::{AuthorizationRequestStore, StoreError};
use crate::validation::{validate, Violations};

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    ValidationFailed(Violations),

    #[error("Authorization request not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::PersistenceFailure(err)
    }
}

/// Validates, stores and reads authorization requests.
#[derive(Clone)]
pub struct AuthorizationRequestService {
    store: Arc<dyn AuthorizationRequestStore>,
}

impl AuthorizationRequestService {
    pub fn new(store: Arc<dyn AuthorizationRequestStore>) -> Self {
        Self { store }
    }

    /// Validates the payload and persists the retained parts of it.
    pub async fn create(&self, payload: &Value) -> Result<AuthorizationRequest, Error> {
        let validated = match validate(payload) {
            Ok(validated) => validated,
            Err(violations) => {
                debug!(target: TARGET, "Rejected authorization request: {}", violations);

                return Err(Error::ValidationFailed(violations));
            }
        };

        let request = self.store.create(validated.member_id).await?;

        info!(target: TARGET, "Saved authorization request {} (member={}, reqId={})",
            request.id, request.member_id, validated.req_id.as_deref().unwrap_or("-"));

        Ok(request)
    }

    pub async fn list(&self) -> Result<Vec<AuthorizationRequest>, Error> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AuthorizationRequest, Error> {
        let pk = match Id::try_from(id) {
            Ok(pk) => pk,
            Err(_) => return Err(Error::NotFound(id.into())),
        };

        self.store
            .find_by_pk(&pk)
            .await?
            .ok_or_else(|| Error::NotFound(id.into()))
    }
}
