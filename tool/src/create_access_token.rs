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

use std::fs::read;
use std::path::PathBuf;
use std::str::from_utf8;

use chrono::{Duration, Utc};
use miscellaneous::jwt::sign;
use serde_json::{from_str, to_string_pretty, Value};
use structopt::StructOpt;

#[derive(StructOpt)]
/// Tool to create ACCESS_TOKEN with.
///
/// This tool is used to create ACCESS_TOKEN to authenticate users against the
/// protected routes of the server.
pub struct Opts {
    /// Secret the ACCESS_TOKEN is signed with (HS256).
    ///
    /// Must be the same value the server is started with (`JWT_SECRET`).
    #[structopt(short, long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// File path of the claims to encode within the ACCESS_TOKEN.
    ///
    /// The claims that are encoded within the ACCESS_TOKEN can be any valid JSON object. The
    /// content of the file is not validated, so you can encode any information in the
    /// ACCESS_TOKEN.
    #[structopt(short, long)]
    claims: PathBuf,

    /// Lifetime of the ACCESS_TOKEN in seconds.
    ///
    /// If set, the `iat` and `exp` claims are overwritten.
    #[structopt(short, long)]
    expires_in: Option<i64>,
}

pub fn execute(opts: Opts) {
    let claims = read(opts.claims).expect("Unable to read claims!");
    let claims = from_utf8(&claims).expect("Unable to interpret claims: Invalid UTF-8 string!");
    let mut claims =
        from_str::<Value>(&claims).expect("Unable to interpret claims: Invalid JSON format!");

    if let Some(expires_in) = opts.expires_in {
        let claims = claims
            .as_object_mut()
            .expect("Unable to set expiration: Claims are not a JSON object!");
        let now = Utc::now();

        claims.insert("iat".into(), now.timestamp().into());
        claims.insert(
            "exp".into(),
            (now + Duration::seconds(expires_in)).timestamp().into(),
        );
    }

    println!(
        "\nRead the following claims:\n{}",
        to_string_pretty(&claims).unwrap()
    );

    let access_token = sign(&claims, opts.secret.as_bytes()).expect("Unable to create ACCESS_TOKEN");

    println!("\nGenerated the following access token:\n{}", access_token);
}
