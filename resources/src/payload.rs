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

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::misc::MemberId;

pub const REQUEST_TYPE: &str = "Authorization";
pub const DISPOSITION_FLAG: &str = "TEST";

/// Authorization request as it is submitted over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequestPayload {
    #[serde(rename = "type")]
    pub type_: String,
    pub source: String,
    pub disposition_flag: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub payer_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<String>,

    pub member_id: MemberId,

    #[serde(rename = "eRxDate")]
    pub erx_date: String,

    pub prescriber_id: String,
    pub diagnoses: Vec<Diagnosis>,
    pub drug_list: Vec<Drug>,
    pub attachment_list: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(rename = "type")]
    pub type_: DiagnosisType,
    pub code: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DiagnosisType {
    Principal,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub drug_reference_id: String,
    pub drug_code: String,
    pub requested_quantity: u32,
    pub request_days_of_supply: u32,
    pub requested_amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_ref_id: String,
    pub file_description: String,
    pub file_ref: String,
}

impl DiagnosisType {
    pub const VALUES: [&'static str; 2] = ["Principal", "Secondary"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Principal => Self::VALUES[0],
            Self::Secondary => Self::VALUES[1],
        }
    }
}

impl Display for DiagnosisType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use serde_json::{json, to_value};

    #[test]
    fn wire_names() {
        let payload = AuthorizationRequestPayload {
            type_: REQUEST_TYPE.into(),
            source: "test-pharmacy1".into(),
            disposition_flag: DISPOSITION_FLAG.into(),
            sender_id: "DHA-F-1".into(),
            receiver_id: "INS1".into(),
            payer_id: "INS2".into(),
            req_id: None,
            member_id: MemberId::for_member(3),
            erx_date: "07/01/2025".into(),
            prescriber_id: "QTR-9".into(),
            diagnoses: vec![Diagnosis {
                type_: DiagnosisType::Principal,
                code: "D28.2".into(),
            }],
            drug_list: vec![Drug {
                drug_reference_id: "123".into(),
                drug_code: "12-3456".into(),
                requested_quantity: 1,
                request_days_of_supply: 30,
                requested_amount: 100,
            }],
            attachment_list: vec![Attachment {
                file_ref_id: "1".into(),
                file_description: "x-ray".into(),
                file_ref: "abc".into(),
            }],
        };

        let value = to_value(&payload).unwrap();

        assert_eq!(value["type"], json!("Authorization"));
        assert_eq!(value["dispositionFlag"], json!("TEST"));
        assert_eq!(value["eRxDate"], json!("07/01/2025"));
        assert_eq!(value["memberId"], json!("TEST-PAYER-3"));
        assert_eq!(value["diagnoses"][0]["type"], json!("Principal"));
        assert_eq!(value["drugList"][0]["requestDaysOfSupply"], json!(30));
        assert_eq!(value["attachmentList"][0]["fileRefId"], json!("1"));
        assert!(value.get("reqId").is_none());
    }
}
