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
    web::{Bytes, Data},
    HttpResponse,
};
use serde_json::{from_slice, json, Value};

use crate::{authorization_requests::AuthorizationRequestService, service::RequestError};

use super::Error;

pub async fn create(
    service: Data<AuthorizationRequestService>,
    body: Bytes,
) -> Result<HttpResponse, RequestError> {
    let payload: Value = from_slice(&body).map_err(|err| Error::InvalidJson(err.to_string()))?;

    let request = service.create(&payload).await.map_err(Error::save)?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Authorization request saved successfully",
        "data": request,
    })))
}
