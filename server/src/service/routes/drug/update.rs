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
    web::{Bytes, Data, Path},
    HttpResponse,
};
use log::info;
use resources::DrugUpdate;
use serde_json::{from_slice, json};

use crate::{logging::TARGET, service::RequestError, state::DrugCatalog};

use super::Error;

pub async fn update(
    catalog: Data<Arc<dyn DrugCatalog>>,
    id: Path<String>,
    body: Bytes,
) -> Result<HttpResponse, RequestError> {
    let update: DrugUpdate =
        from_slice(&body).map_err(|err| Error::InvalidJson(err.to_string()))?;

    let drug = catalog
        .update_drug(&id, update)
        .await
        .map_err(Error::update)?
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    info!(target: TARGET, "Updated drug {}", drug.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Drug updated successfully",
        "data": drug,
    })))
}
