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

use actix_web::{
    web::{Data, Path},
    HttpResponse,
};
use serde_json::json;

use crate::{authorization_requests::AuthorizationRequestService, service::RequestError};

use super::Error;

pub async fn get_all(
    service: Data<AuthorizationRequestService>,
) -> Result<HttpResponse, RequestError> {
    let requests = service.list().await.map_err(Error::fetch)?;

    Ok(HttpResponse::Ok().json(json!({ "data": requests })))
}

pub async fn get_one(
    service: Data<AuthorizationRequestService>,
    id: Path<String>,
) -> Result<HttpResponse, RequestError> {
    let request = service.get_by_id(&id).await.map_err(Error::fetch_one)?;

    Ok(HttpResponse::Ok().json(json!({ "data": request })))
}
