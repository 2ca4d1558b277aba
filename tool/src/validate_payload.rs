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

use std::path::PathBuf;
use std::process::exit;

use erx_auth_server::validation::validate;
use serde_json::{from_slice, Value};
use structopt::StructOpt;

use crate::misc::read_input;

#[derive(StructOpt)]
/// Tool to validate an authorization request payload.
///
/// Prints every violation of the payload and exits with a non-zero code if
/// the payload is invalid.
pub struct Opts {
    /// File to read the payload from (default: stdin).
    #[structopt(short, long)]
    input: Option<PathBuf>,
}

pub fn execute(opts: Opts) {
    let input = read_input(&opts.input);
    let payload = from_slice::<Value>(&input).expect("Unable to interpret payload: Invalid JSON format!");

    match validate(&payload) {
        Ok(validated) => println!("Payload is valid (member: {})", validated.member_id),
        Err(violations) => {
            for violation in violations {
                eprintln!("{}: {}", violation.field, violation.message);
            }

            exit(1);
        }
    }
}
