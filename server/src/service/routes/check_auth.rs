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
    web::{get, resource, ServiceConfig},
    HttpResponse,
};
use serde_json::json;

use crate::service::{header::Authorization, RequestError};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(resource("/check-auth").route(get().to(check_auth)));
}

/// Reports the principal of the verified bearer token.
async fn check_auth(access_token: Authorization) -> Result<HttpResponse, RequestError> {
    let res = match access_token.0 {
        Some(token) => json!({
            "message": format!(
                "Authenticated as {}",
                token.email.as_deref().unwrap_or("anonymous")
            ),
            "data": token,
        }),
        None => json!({ "message": "Authentication is disabled" }),
    };

    Ok(HttpResponse::Ok().json(res))
}
