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

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Member already exists: {0}!")]
    AlreadyExists(u64),

    #[error("Unable to fetch members: {0}")]
    FetchFailed(String),

    #[error("Unable to register member: {0}")]
    RegisterFailed(String),
}

impl Error {
    pub fn fetch(err: StoreError) -> Self {
        error!(target: TARGET, "Unable to fetch members: {}", err);

        Self::FetchFailed(err.to_string())
    }

    pub fn register(err: StoreError) -> Self {
        match err {
            StoreError::MemberExists(id) => Self::AlreadyExists(id),
            err => {
                error!(target: TARGET, "Unable to register member: {}", err);

                Self::RegisterFailed(err.to_string())
            }
        }
    }
}
