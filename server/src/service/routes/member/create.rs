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
use serde::Deserialize;
use serde_json::{from_slice, json};

use crate::{
    logging::TARGET,
    service::{header::Authorization, RequestError},
    state::MemberDirectory,
};

use super::Error;

#[derive(Default, Deserialize)]
struct Args {
    id: Option<u64>,
}

pub async fn create(
    _access_token: Authorization,
    members: Data<Arc<dyn MemberDirectory>>,
    body: Bytes,
) -> Result<HttpResponse, RequestError> {
    let args: Args = if body.is_empty() {
        Args::default()
    } else {
        from_slice(&body).map_err(|err| Error::InvalidJson(err.to_string()))?
    };

    let member = members.register(args.id).await.map_err(Error::register)?;

    info!(target: TARGET, "Registered member {}", member.member_id());

    Ok(HttpResponse::Created().json(json!({
        "message": "Member registered successfully",
        "data": member,
    })))
}
