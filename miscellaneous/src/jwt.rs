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

use hmac::{Hmac, NewMac};
use jwt::{FromBase64, SignWithKey, ToBase64, VerifyWithKey};
use sha2::Sha256;

pub use jwt::Error;

/// Signs the passed claims as a HS256 JSON Web Token.
pub fn sign<T: ToBase64>(claims: &T, secret: &[u8]) -> Result<String, Error> {
    let key = hmac_key(secret)?;

    claims.sign_with_key(&key)
}

/// Verifies the signature of the passed token and returns its claims.
///
/// Time based claims (`exp`, `nbf`) are not checked here, this is left to the
/// caller because only the caller knows which claims it expects.
pub fn verify<T: FromBase64>(token: &str, secret: &[u8]) -> Result<T, Error> {
    let key = hmac_key(secret)?;

    token.verify_with_key(&key)
}

fn hmac_key(secret: &[u8]) -> Result<Hmac<Sha256>, Error> {
    Hmac::new_varkey(secret).map_err(|_| Error::InvalidSignature)
}
