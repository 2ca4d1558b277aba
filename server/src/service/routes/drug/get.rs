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
    web::{Data, Path, Query},
    HttpResponse,
};
use serde_json::json;

use crate::{
    service::RequestError,
    state::{DrugCatalog, DrugFilter},
};

use super::Error;

pub async fn get_all(
    catalog: Data<Arc<dyn DrugCatalog>>,
    filter: Query<DrugFilter>,
) -> Result<HttpResponse, RequestError> {
    let drugs = catalog.find_drugs(&filter).await.map_err(Error::fetch_all)?;

    Ok(HttpResponse::Ok().json(json!({ "data": drugs })))
}

pub async fn get_one(
    catalog: Data<Arc<dyn DrugCatalog>>,
    id: Path<String>,
) -> Result<HttpResponse, RequestError> {
    let drug = catalog
        .find_drug(&id)
        .await
        .map_err(Error::fetch)?
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({ "data": drug })))
}
