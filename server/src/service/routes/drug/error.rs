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

use crate::logging::TARGET;
use crate::state::StoreError;
use crate::validation::Violations;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(Violations),

    #[error("Drug with ID {id} already exists at index {index}")]
    AlreadyExists { id: String, index: usize },

    #[error("Not Found: /drugs/{0}!")]
    NotFound(String),

    #[error("Unable to add drugs: {0}")]
    AddFailed(String),

    #[error("Unable to fetch drugs: {0}")]
    FetchAllFailed(String),

    #[error("Unable to fetch drug: {0}")]
    FetchFailed(String),

    #[error("Unable to update drug: {0}")]
    UpdateFailed(String),

    #[error("Unable to delete drug: {0}")]
    DeleteFailed(String),
}

impl Error {
    pub fn add(err: StoreError) -> Self {
        match err {
            StoreError::DrugExists { id, index } => Self::AlreadyExists { id, index },
            err => {
                error!(target: TARGET, "Unable to add drugs: {}", err);

                Self::AddFailed(err.to_string())
            }
        }
    }

    pub fn fetch_all(err: StoreError) -> Self {
        error!(target: TARGET, "Unable to fetch drugs: {}", err);

        Self::FetchAllFailed(err.to_string())
    }

    pub fn fetch(err: StoreError) -> Self {
        error!(target: TARGET, "Unable to fetch drug: {}", err);

        Self::FetchFailed(err.to_string())
    }

    pub fn update(err: StoreError) -> Self {
        error!(target: TARGET, "Unable to update drug: {}", err);

        Self::UpdateFailed(err.to_string())
    }

    pub fn delete(err: StoreError) -> Self {
        error!(target: TARGET, "Unable to delete drug: {}", err);

        Self::DeleteFailed(err.to_string())
    }
}
