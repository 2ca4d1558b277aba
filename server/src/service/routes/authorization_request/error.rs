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

use log::error;
use thiserror::Error;

use crate::authorization_requests::Error as ServiceError;
use crate::batch::Error as BatchError;
use crate::logging::TARGET;
use crate::validation::Violations;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(Violations),

    #[error("Not Found: /authorization-requests/{0}!")]
    NotFound(String),

    #[error("Unable to save authorization request: {0}")]
    SaveFailed(String),

    #[error("Unable to fetch authorization requests: {0}")]
    FetchFailed(String),

    #[error("Unable to fetch authorization request: {0}")]
    FetchOneFailed(String),

    #[error("No member records found!")]
    NoMembersFound,

    #[error("Unable to generate authorization requests: {0}")]
    GenerateFailed(String),
}

impl Error {
    pub fn save(err: ServiceError) -> Self {
        match err {
            ServiceError::PersistenceFailure(err) => {
                error!(target: TARGET, "Unable to save authorization request: {}", err);

                Self::SaveFailed(err.to_string())
            }
            err => Self::from(err),
        }
    }

    pub fn fetch(err: ServiceError) -> Self {
        match err {
            ServiceError::PersistenceFailure(err) => {
                error!(target: TARGET, "Unable to fetch authorization requests: {}", err);

                Self::FetchFailed(err.to_string())
            }
            err => Self::from(err),
        }
    }

    pub fn fetch_one(err: ServiceError) -> Self {
        match err {
            ServiceError::PersistenceFailure(err) => {
                error!(target: TARGET, "Unable to fetch authorization request: {}", err);

                Self::FetchOneFailed(err.to_string())
            }
            err => Self::from(err),
        }
    }

    pub fn generate(err: BatchError) -> Self {
        match err {
            BatchError::NoMembersFound => Self::NoMembersFound,
            BatchError::Store(err) => {
                error!(target: TARGET, "Unable to generate authorization requests: {}", err);

                Self::GenerateFailed(err.to_string())
            }
        }
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ValidationFailed(violations) => Self::ValidationFailed(violations),
            ServiceError::NotFound(id) => Self::NotFound(id),
            ServiceError::PersistenceFailure(err) => Self::FetchFailed(err.to_string()),
        }
    }
}
