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

use chrono::{DateTime, Utc};
use miscellaneous::jwt::{sign, verify, Error as JwtError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Claims of the bearer token that guards the write routes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccessToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, with = "from_timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub iat: Option<DateTime<Utc>>,

    #[serde(default, with = "from_timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub exp: Option<DateTime<Utc>>,
}

/// Secret used to sign and verify access tokens.
///
/// Without a secret the token check is disabled.
#[derive(Debug, Clone, Default)]
pub struct AccessTokenSecret(pub Option<String>);

#[derive(Error, Debug)]
pub enum Error {
    #[error("JWT Error: {0}")]
    JwtError(JwtError),

    #[error("Authorization header is missing!")]
    Missing,

    #[error("Authorization header has invalid value!")]
    InvalidValue,

    #[error("Expired!")]
    Expired,
}

impl AccessToken {
    pub fn verify(access_token: &str, secret: &str, now: DateTime<Utc>) -> Result<Self, Error> {
        let access_token: Self = verify(access_token, secret.as_bytes())?;

        match access_token.exp {
            Some(exp) if now > exp => Err(Error::Expired),
            _ => Ok(access_token),
        }
    }

    pub fn sign(&self, secret: &str) -> Result<String, Error> {
        Ok(sign(self, secret.as_bytes())?)
    }
}

impl AccessTokenSecret {
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

impl From<JwtError> for Error {
    fn from(err: JwtError) -> Self {
        Self::JwtError(err)
    }
}

mod from_timestamp_opt {
    use chrono::{naive::NaiveDateTime, DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_i64(value.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let timestamp = match Option::<i64>::deserialize(deserializer)? {
            Some(timestamp) => timestamp,
            None => return Ok(None),
        };

        let timestamp = NaiveDateTime::from_timestamp_opt(timestamp, 0)
            .ok_or_else(|| D::Error::custom(format!("Invalid timestamp: {}", timestamp)))?;

        Ok(Some(DateTime::from_utc(timestamp, Utc)))
    }
}
