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

mod create_access_token;
mod generate_payload;
mod misc;
mod validate_payload;

use structopt::StructOpt;

use create_access_token::{execute as create_access_token, Opts as CreateAccessTokenOpts};
use generate_payload::{execute as generate_payload, Opts as GeneratePayloadOpts};
use validate_payload::{execute as validate_payload, Opts as ValidatePayloadOpts};

fn main() {
    let command = Command::from_args();

    match command {
        Command::CreateAccessToken(opts) => create_access_token(opts),
        Command::GeneratePayload(opts) => generate_payload(opts),
        Command::ValidatePayload(opts) => validate_payload(opts),
    }
}

#[derive(StructOpt)]
enum Command {
    CreateAccessToken(CreateAccessTokenOpts),
    GeneratePayload(GeneratePayloadOpts),
    ValidatePayload(ValidatePayloadOpts),
}
