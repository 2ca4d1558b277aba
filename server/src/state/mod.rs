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

mod persist;
mod store;

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs::{rename, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use resources::{
    misc::MemberId, primitives::Id, AuthorizationRequest, CatalogDrug, DrugUpdate, Member,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::{error::Error, logging::TARGET};

pub use store::{AuthorizationRequestStore, DrugCatalog, DrugFilter, MemberDirectory, StoreError};

/// In-memory implementation of the stores, the member directory and the drug catalog.
#[derive(Default, Clone)]
pub struct State(Arc<Mutex<Inner>>);

#[derive(Default)]
pub struct Inner {
    authorization_requests: AuthorizationRequests,
    members: Members,
    drugs: Drugs,
}

#[derive(Default)]
struct AuthorizationRequests {
    items: Vec<AuthorizationRequest>,
    by_id: HashMap<Id, usize>,
}

#[derive(Default)]
struct Drugs {
    items: Vec<CatalogDrug>,
}

#[derive(Default)]
struct Members {
    items: Vec<Member>,
    ids: HashSet<u64>,
}

impl State {
    pub async fn lock(&self) -> MutexGuard<'_, Inner> {
        self.0.lock().await
    }

    pub async fn load_file(&self, path: &Path) -> Result<(), Error> {
        let file = File::open(path)?;

        let mut inner = self.lock().await;
        inner.load(BufReader::new(file))?;

        info!(target: TARGET, "Loaded {} authorization requests, {} members and {} drugs from {}",
            inner.authorization_requests.items.len(), inner.members.items.len(),
            inner.drugs.items.len(), path.display());

        Ok(())
    }

    /// Writes the state to a temporary file next to `path` and moves it
    /// into place, so an existing snapshot survives a failed write.
    pub async fn save_file(&self, path: &Path) -> Result<(), Error> {
        let tmp = tmp_path(path);

        {
            let inner = self.lock().await;
            let mut writer = BufWriter::new(File::create(&tmp)?);

            inner.save(&mut writer)?;
            writer.flush()?;
        }

        rename(&tmp, path)?;

        info!(target: TARGET, "Saved state to {}", path.display());

        Ok(())
    }

    pub async fn load_members_file(&self, path: &Path) -> Result<(), Error> {
        let file = File::open(path)?;

        let mut inner = self.lock().await;
        let count = inner.load_members(BufReader::new(file))?;

        info!(target: TARGET, "Loaded {} members from {}", count, path.display());

        Ok(())
    }
}

impl AuthorizationRequests {
    fn insert(&mut self, request: AuthorizationRequest) -> Result<(), StoreError> {
        if self.by_id.contains_key(&request.id) {
            return Err(StoreError::DuplicateId(request.id));
        }

        self.by_id.insert(request.id.clone(), self.items.len());
        self.items.push(request);

        Ok(())
    }

    fn get(&self, id: &Id) -> Option<&AuthorizationRequest> {
        self.by_id.get(id).map(|index| &self.items[*index])
    }
}

impl Drugs {
    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|drug| drug.id == id)
    }

    fn insert_all(&mut self, drugs: Vec<CatalogDrug>) -> Result<(), StoreError> {
        for (index, drug) in drugs.iter().enumerate() {
            let known = self.position(&drug.id).is_some()
                || drugs[..index].iter().any(|other| other.id == drug.id);

            if known {
                return Err(StoreError::DrugExists {
                    id: drug.id.clone(),
                    index,
                });
            }
        }

        self.items.extend(drugs);

        Ok(())
    }
}

impl Members {
    fn insert(&mut self, member: Member) -> Result<(), StoreError> {
        if !self.ids.insert(member.id) {
            return Err(StoreError::MemberExists(member.id));
        }

        self.items.push(member);

        Ok(())
    }

    fn next_id(&self) -> Result<u64, StoreError> {
        match self.ids.iter().max() {
            Some(max) => max.checked_add(1).ok_or(StoreError::MemberIdExhausted),
            None => Ok(1),
        }
    }
}

#[async_trait]
impl AuthorizationRequestStore for State {
    async fn create(&self, member_id: MemberId) -> Result<AuthorizationRequest, StoreError> {
        let request = AuthorizationRequest::new(member_id, Utc::now());

        self.lock()
            .await
            .authorization_requests
            .insert(request.clone())?;

        Ok(request)
    }

    async fn find_all(&self) -> Result<Vec<AuthorizationRequest>, StoreError> {
        Ok(self.lock().await.authorization_requests.items.clone())
    }

    async fn find_by_pk(&self, id: &Id) -> Result<Option<AuthorizationRequest>, StoreError> {
        Ok(self.lock().await.authorization_requests.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock().await.authorization_requests.items.len())
    }
}

#[async_trait]
impl MemberDirectory for State {
    async fn find_all(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.lock().await.members.items.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock().await.members.items.len())
    }

    async fn register(&self, id: Option<u64>) -> Result<Member, StoreError> {
        let mut inner = self.lock().await;

        let id = match id {
            Some(id) => id,
            None => inner.members.next_id()?,
        };

        let member = Member::new(id);
        inner.members.insert(member)?;

        Ok(member)
    }
}

#[async_trait]
impl DrugCatalog for State {
    async fn insert_drugs(&self, drugs: Vec<CatalogDrug>) -> Result<Vec<CatalogDrug>, StoreError> {
        let drugs: Vec<CatalogDrug> = drugs.into_iter().map(CatalogDrug::normalize).collect();

        self.lock().await.drugs.insert_all(drugs.clone())?;

        Ok(drugs)
    }

    async fn find_drugs(&self, filter: &DrugFilter) -> Result<Vec<CatalogDrug>, StoreError> {
        let inner = self.lock().await;

        Ok(inner
            .drugs
            .items
            .iter()
            .filter(|drug| filter.matches(drug))
            .cloned()
            .collect())
    }

    async fn find_drug(&self, id: &str) -> Result<Option<CatalogDrug>, StoreError> {
        let inner = self.lock().await;

        Ok(inner.drugs.position(id).map(|i| inner.drugs.items[i].clone()))
    }

    async fn update_drug(
        &self,
        id: &str,
        update: DrugUpdate,
    ) -> Result<Option<CatalogDrug>, StoreError> {
        let mut inner = self.lock().await;

        let index = match inner.drugs.position(id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let drug = &mut inner.drugs.items[index];
        drug.apply(update);

        Ok(Some(drug.clone()))
    }

    async fn delete_drug(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock().await;

        match inner.drugs.position(id) {
            Some(index) => {
                inner.drugs.items.remove(index);

                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");

    PathBuf::from(tmp)
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use serde_json::{from_value, json};

    pub fn drug(id: &str, ndc_drug_code: &str, drug_list_id: &str) -> CatalogDrug {
        from_value(json!({
            "id": id,
            "ndc_drug_code": ndc_drug_code,
            "trade_name": "Paracetamol 500",
            "drug_list_id": drug_list_id,
            "start_date": "2025-01-01",
            "dispensed_quantity": 20
        }))
        .unwrap()
    }

    #[actix_rt::test]
    async fn records_keep_insertion_order() {
        let state = State::default();

        let a = AuthorizationRequestStore::create(&state, MemberId::for_member(1)).await.unwrap();
        let b = AuthorizationRequestStore::create(&state, MemberId::for_member(2)).await.unwrap();
        let c = AuthorizationRequestStore::create(&state, MemberId::for_member(1)).await.unwrap();

        let all = AuthorizationRequestStore::find_all(&state).await.unwrap();

        assert_eq!(all, vec![a, b, c]);
        assert_eq!(AuthorizationRequestStore::count(&state).await.unwrap(), 3);
    }

    #[actix_rt::test]
    async fn find_by_pk() {
        let state = State::default();

        let created = state.create(MemberId::for_member(5)).await.unwrap();

        let found = state.find_by_pk(&created.id).await.unwrap();
        let missing = state.find_by_pk(&Id::generate()).await.unwrap();

        assert_eq!(found, Some(created));
        assert_eq!(missing, None);
    }

    #[actix_rt::test]
    async fn register_assigns_next_free_id() {
        let state = State::default();

        let first = state.register(None).await.unwrap();
        let explicit = state.register(Some(10)).await.unwrap();
        let next = state.register(None).await.unwrap();

        assert_eq!(first, Member::new(1));
        assert_eq!(explicit, Member::new(10));
        assert_eq!(next, Member::new(11));
        assert_eq!(MemberDirectory::count(&state).await.unwrap(), 3);
    }

    #[actix_rt::test]
    async fn register_rejects_duplicates() {
        let state = State::default();

        state.register(Some(3)).await.unwrap();
        let err = state.register(Some(3)).await.unwrap_err();

        assert!(matches!(err, StoreError::MemberExists(3)));
        assert_eq!(MemberDirectory::find_all(&state).await.unwrap(), vec![Member::new(3)]);
    }

    #[actix_rt::test]
    async fn insert_drugs_is_all_or_nothing() {
        let state = State::default();

        state.insert_drugs(vec![drug("1", "0001-0001", "L1")]).await.unwrap();

        let err = state
            .insert_drugs(vec![drug("2", "0002-0002", "L1"), drug("1", "0001-0001", "L1")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DrugExists { ref id, index: 1 } if id == "1"));
        assert_eq!(err.to_string(), "Drug with ID 1 already exists at index 1");
        assert_eq!(state.find_drug("2").await.unwrap(), None);

        let err = state
            .insert_drugs(vec![drug("3", "0003-0003", "L1"), drug("3", "0003-0003", "L1")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DrugExists { index: 1, .. }));
    }

    #[actix_rt::test]
    async fn find_drugs_by_filter() {
        let state = State::default();

        state
            .insert_drugs(vec![
                drug("1", "0001-1234", "L1"),
                drug("2", "0002-1234", "L2"),
                drug("3", "0003-9999", "L1"),
            ])
            .await
            .unwrap();

        let ids = |drugs: Vec<CatalogDrug>| drugs.into_iter().map(|d| d.id).collect::<Vec<_>>();

        let all = state.find_drugs(&DrugFilter::default()).await.unwrap();
        assert_eq!(ids(all), vec!["1", "2", "3"]);

        let filter = DrugFilter {
            drug_list_id: Some("L1".into()),
            ndc_drug_code: Some("1234".into()),
        };
        assert_eq!(ids(state.find_drugs(&filter).await.unwrap()), vec!["1"]);

        let filter = DrugFilter {
            drug_list_id: Some(String::new()),
            ndc_drug_code: Some("1234".into()),
        };
        assert_eq!(ids(state.find_drugs(&filter).await.unwrap()), vec!["1", "2"]);
    }

    #[actix_rt::test]
    async fn update_and_delete_drug() {
        let state = State::default();
        state.insert_drugs(vec![drug("1", "0001-0001", "L1")]).await.unwrap();

        let update = DrugUpdate {
            trade_name: Some("Ibuprofen 400".into()),
            ..Default::default()
        };
        let updated = state.update_drug("1", update.clone()).await.unwrap().unwrap();

        assert_eq!(updated.trade_name, "Ibuprofen 400");
        assert_eq!(state.find_drug("1").await.unwrap(), Some(updated));
        assert_eq!(state.update_drug("9", update).await.unwrap(), None);

        assert!(state.delete_drug("1").await.unwrap());
        assert!(!state.delete_drug("1").await.unwrap());
        assert_eq!(state.find_drug("1").await.unwrap(), None);
    }

    #[actix_rt::test]
    async fn save_file_replaces_snapshot() {
        let path = std::env::temp_dir().join(format!("erx-auth-state-{}.json", Id::generate()));

        let state = State::default();
        state.register(Some(1)).await.unwrap();
        state.save_file(&path).await.unwrap();

        state.register(Some(2)).await.unwrap();
        state.save_file(&path).await.unwrap();

        let restored = State::default();
        restored.load_file(&path).await.unwrap();

        assert_eq!(MemberDirectory::count(&restored).await.unwrap(), 2);
        assert!(!tmp_path(&path).exists());

        std::fs::remove_file(&path).unwrap();
    }
}
