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
use serde::Deserialize;
use serde_json::{from_slice, json};

use crate::{
    batch::{BatchDriver, DEFAULT_COUNT},
    service::{header::Authorization, RequestError},
};

use super::Error;

#[derive(Default, Deserialize)]
struct Args {
    count: Option<usize>,
}

pub async fn generate(
    _access_token: Authorization,
    batch: Data<BatchDriver>,
    body: Bytes,
) -> Result<HttpResponse, RequestError> {
    let args: Args = if body.is_empty() {
        Args::default()
    } else {
        from_slice(&body).map_err(|err| Error::InvalidJson(err.to_string()))?
    };

    let count = match args.count {
        None | Some(0) => DEFAULT_COUNT,
        Some(count) => count,
    };

    let outcome = batch.run(count).await.map_err(Error::generate)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Successfully generated {} authorization requests", outcome.attempted),
    })))
}
