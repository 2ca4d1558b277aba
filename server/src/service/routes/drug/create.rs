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

use actix_web::{
    web::{Bytes, Data},
    HttpResponse,
};
use log::info;
use resources::CatalogDrug;
use serde::Deserialize;
use serde_json::{from_slice, from_value, json, Value};

use crate::{
    logging::TARGET,
    service::RequestError,
    state::DrugCatalog,
    validation::validate_drugs,
};

use super::Error;

#[derive(Deserialize)]
struct Body {
    drugs: Vec<CatalogDrug>,
}

pub async fn create(
    catalog: Data<Arc<dyn DrugCatalog>>,
    body: Bytes,
) -> Result<HttpResponse, RequestError> {
    let body: Value = from_slice(&body).map_err(|err| Error::InvalidJson(err.to_string()))?;

    validate_drugs(&body).map_err(Error::ValidationFailed)?;

    let Body { drugs } = from_value(body).map_err(|err| Error::InvalidJson(err.to_string()))?;
    let drugs = catalog.insert_drugs(drugs).await.map_err(Error::add)?;

    info!(target: TARGET, "Added {} drugs to the catalog", drugs.len());

    Ok(HttpResponse::Created().json(json!({
        "message": "Drugs added successfully",
        "data": drugs,
    })))
}
