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

use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use resources::{
    payload::{
        Attachment, Diagnosis, DiagnosisType, Drug, DISPOSITION_FLAG, REQUEST_TYPE,
    },
    AuthorizationRequestPayload, Member,
};
use thiserror::Error;

use crate::state::{MemberDirectory, StoreError};

lazy_static! {
    static ref ERX_DATE_START: NaiveDate = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
    static ref ERX_DATE_END: NaiveDate = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
}

const ERX_DATE_FORMAT: &str = "%m/%d/%Y";
const FILE_REF_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FILE_REF_LEN: usize = 40;
const ATTACHMENTS: [&str; 2] = ["x-ray", "blood_test"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("No member records found!")]
    NoMembersFound,

    #[error("Store Error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Creates random but schema conformant authorization request payloads.
pub struct Generator<R> {
    rng: R,
}

impl Generator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Fetches the members from `directory` and generates a payload for one of them.
    pub async fn generate_from(
        &mut self,
        directory: &dyn MemberDirectory,
    ) -> Result<AuthorizationRequestPayload, Error> {
        let members = directory.find_all().await?;

        self.generate(&members)
    }

    /// Generates a payload for a member picked uniformly from `members`.
    pub fn generate(&mut self, members: &[Member]) -> Result<AuthorizationRequestPayload, Error> {
        let member = members
            .choose(&mut self.rng)
            .ok_or(Error::NoMembersFound)?;

        Ok(self.generate_for(member))
    }

    pub fn generate_for(&mut self, member: &Member) -> AuthorizationRequestPayload {
        let rng = &mut self.rng;

        AuthorizationRequestPayload {
            type_: REQUEST_TYPE.into(),
            source: format!("test-pharmacy{}", rng.gen_range(0u32, 100)),
            disposition_flag: DISPOSITION_FLAG.into(),
            sender_id: format!("DHA-F-{}", rng.gen_range(0u32, 1_000_000)),
            receiver_id: format!("INS{}", rng.gen_range(0u32, 1000)),
            payer_id: format!("INS{}", rng.gen_range(0u32, 1000)),
            req_id: Some(rng.gen_range(1_000_000_000u64, 10_000_000_000).to_string()),
            member_id: member.member_id(),
            erx_date: erx_date(rng),
            prescriber_id: format!("QTR-{}", rng.gen_range(0u32, 100_000)),
            diagnoses: vec![
                Diagnosis {
                    type_: DiagnosisType::Principal,
                    code: diagnosis_code(rng),
                },
                Diagnosis {
                    type_: DiagnosisType::Secondary,
                    code: diagnosis_code(rng),
                },
            ],
            drug_list: vec![Drug {
                drug_reference_id: rng.gen_range(0u64, 10_000_000_000).to_string(),
                drug_code: format!(
                    "{:02}-{:04}",
                    rng.gen_range(0u32, 100),
                    rng.gen_range(0u32, 10_000)
                ),
                requested_quantity: rng.gen_range(1u32, 11),
                request_days_of_supply: rng.gen_range(1u32, 31),
                requested_amount: rng.gen_range(50u32, 1050),
            }],
            attachment_list: ATTACHMENTS
                .iter()
                .map(|description| Attachment {
                    file_ref_id: rng.gen_range(0u32, 1_000_000).to_string(),
                    file_description: (*description).into(),
                    file_ref: file_ref(rng),
                })
                .collect(),
        }
    }
}

fn erx_date<R: Rng>(rng: &mut R) -> String {
    let days = (*ERX_DATE_END - *ERX_DATE_START).num_days();
    let date = *ERX_DATE_START + Duration::days(rng.gen_range(0, days + 1));

    date.format(ERX_DATE_FORMAT).to_string()
}

fn diagnosis_code<R: Rng>(rng: &mut R) -> String {
    let letter = (b'A' + rng.gen_range(0u8, 26)) as char;
    let number = rng.gen_range(0u32, 100);

    if rng.gen_bool(0.5) {
        format!("{}{:02}.{}", letter, number, rng.gen_range(0u32, 10))
    } else {
        format!("{}{:02}", letter, number)
    }
}

fn file_ref<R: Rng>(rng: &mut R) -> String {
    (0..FILE_REF_LEN)
        .map(|_| FILE_REF_CHARS[rng.gen_range(0, FILE_REF_CHARS.len())] as char)
        .collect()
}
