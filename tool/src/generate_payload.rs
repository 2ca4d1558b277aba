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

use erx_auth_server::generator::Generator;
use resources::Member;
use serde_json::to_vec_pretty;
use structopt::StructOpt;

use crate::misc::write_output;

#[derive(StructOpt)]
/// Tool to generate a synthetic authorization request payload.
pub struct Opts {
    /// Numeric ID of the member the payload is generated for.
    #[structopt(short, long, default_value = "1")]
    member: u64,

    /// Seed of the random number generator.
    ///
    /// The same seed always generates the same payload.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// File to write the payload to (default: stdout).
    #[structopt(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(opts: Opts) {
    let member = Member::new(opts.member);
    let payload = match opts.seed {
        Some(seed) => Generator::from_seed(seed).generate_for(&member),
        None => Generator::from_entropy().generate_for(&member),
    };

    let mut payload = to_vec_pretty(&payload).expect("Unable to serialize payload!");
    payload.push(b'\n');

    write_output(&opts.output, &payload);
}
