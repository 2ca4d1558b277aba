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

use actix_web::{dev::Payload, http::header::HeaderName, web::Data, FromRequest, HttpRequest};
use chrono::Utc;
use futures::future::{ready, Ready};

use crate::service::{
    misc::{AccessToken, AccessTokenError, AccessTokenSecret},
    RequestError,
};

lazy_static! {
    pub static ref AUTHORIZATION: HeaderName =
        HeaderName::from_lowercase(b"authorization").unwrap();
}

/// Verified bearer token of the request.
///
/// Contains `None` if no token secret is configured.
pub struct Authorization(pub Option<AccessToken>);

impl FromRequest for Authorization {
    type Error = RequestError;
    type Future = Ready<Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_authorization(req))
    }
}

fn parse_authorization(req: &HttpRequest) -> Result<Authorization, RequestError> {
    let secret = req
        .app_data::<Data<AccessTokenSecret>>()
        .ok_or_else(|| RequestError::internal("Shared data 'AccessTokenSecret' is missing!"))?;

    let secret = match &secret.0 {
        Some(secret) => secret,
        None => return Ok(Authorization(None)),
    };

    let value = req
        .headers()
        .get(&*AUTHORIZATION)
        .ok_or(AccessTokenError::Missing)?
        .to_str()
        .map_err(|_| AccessTokenError::InvalidValue)?;

    let access_token = value
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
        .ok_or(AccessTokenError::Missing)?;
    let access_token = AccessToken::verify(access_token, secret, Utc::now())?;

    Ok(Authorization(Some(access_token)))
}
