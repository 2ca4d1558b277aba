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
    web::{Data, Path},
    HttpResponse,
};
use log::info;
use serde_json::json;

use crate::{logging::TARGET, service::RequestError, state::DrugCatalog};

use super::Error;

pub async fn delete_one(
    catalog: Data<Arc<dyn DrugCatalog>>,
    id: Path<String>,
) -> Result<HttpResponse, RequestError> {
    if !catalog.delete_drug(&id).await.map_err(Error::delete)? {
        return Err(Error::NotFound(id.to_string()).into());
    }

    info!(target: TARGET, "Deleted drug {}", id);

    Ok(HttpResponse::Ok().json(json!({ "message": "Drug deleted successfully" })))
}
