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

use async_trait::async_trait;
use resources::{misc::MemberId, primitives::Id, AuthorizationRequest, CatalogDrug, DrugUpdate, Member};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Authorization request with this ID ({0}) does already exist!")]
    DuplicateId(Id),

    #[error("Member with this ID ({0}) does already exist!")]
    MemberExists(u64),

    #[error("Drug with ID {id} already exists at index {index}")]
    DrugExists { id: String, index: usize },

    #[error("Member ID space is exhausted!")]
    MemberIdExhausted,

    #[error("Store is not available: {0}")]
    Unavailable(String),
}

/// Persistence contract for authorization requests.
///
/// Records are append only: there is no update or delete.
#[async_trait]
pub trait AuthorizationRequestStore: Send + Sync {
    /// Stores a new record for the passed member and returns it.
    async fn create(&self, member_id: MemberId) -> Result<AuthorizationRequest, StoreError>;

    /// Returns all records in insertion order.
    async fn find_all(&self) -> Result<Vec<AuthorizationRequest>, StoreError>;

    async fn find_by_pk(&self, id: &Id) -> Result<Option<AuthorizationRequest>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

/// Source of member identifiers used for generated requests.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Member>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// Adds a member. If `id` is `None` the next free id is assigned.
    async fn register(&self, id: Option<u64>) -> Result<Member, StoreError>;
}

/// Filter of a drug catalog query. Empty values do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrugFilter {
    pub drug_list_id: Option<String>,

    /// Matches every drug whose code contains this value.
    pub ndc_drug_code: Option<String>,
}

/// Persistence contract of the drug catalog.
#[async_trait]
pub trait DrugCatalog: Send + Sync {
    /// Adds all passed drugs or none of them.
    async fn insert_drugs(&self, drugs: Vec<CatalogDrug>) -> Result<Vec<CatalogDrug>, StoreError>;

    async fn find_drugs(&self, filter: &DrugFilter) -> Result<Vec<CatalogDrug>, StoreError>;

    async fn find_drug(&self, id: &str) -> Result<Option<CatalogDrug>, StoreError>;

    /// Returns the updated drug or `None` if it does not exist.
    async fn update_drug(
        &self,
        id: &str,
        update: DrugUpdate,
    ) -> Result<Option<CatalogDrug>, StoreError>;

    /// Returns `false` if the drug does not exist.
    async fn delete_drug(&self, id: &str) -> Result<bool, StoreError>;
}

impl DrugFilter {
    pub fn matches(&self, drug: &CatalogDrug) -> bool {
        if let Some(drug_list_id) = non_empty(&self.drug_list_id) {
            if drug.drug_list_id != drug_list_id {
                return false;
            }
        }

        if let Some(ndc_drug_code) = non_empty(&self.ndc_drug_code) {
            if !drug.ndc_drug_code.contains(ndc_drug_code) {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
