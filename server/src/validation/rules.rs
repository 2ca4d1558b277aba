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

use regex::Regex;
use resources::payload::{DiagnosisType, DISPOSITION_FLAG, REQUEST_TYPE};
use serde_json::Value;

use super::{Violation, Violations};

/// Rule set of a single scalar field.
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub check: Check,
    pub message: &'static str,
}

/// Rule set of a list field and the fields of its elements.
pub struct ListRule {
    pub name: &'static str,
    pub message: &'static str,
    pub fields: &'static [FieldRule],
}

pub enum Check {
    Equals(&'static str),
    Format(Format),
    OneOf(&'static [&'static str]),
    NotEmpty,
    PositiveInt,
}

#[derive(Clone, Copy, Debug)]
pub enum Format {
    Source,
    SenderId,
    InsuranceId,
    MemberId,
    Date,
    PrescriberId,
    DiagnosisCode,
    Numeric,
    DrugCode,
}

pub const PAYLOAD_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "type",
        label: "Type",
        check: Check::Equals(REQUEST_TYPE),
        message: "Type must be 'Authorization'",
    },
    FieldRule {
        name: "source",
        label: "Source",
        check: Check::Format(Format::Source),
        message: "Source must be in the format 'test-pharmacy' followed by digits",
    },
    FieldRule {
        name: "dispositionFlag",
        label: "Disposition flag",
        check: Check::Equals(DISPOSITION_FLAG),
        message: "Disposition flag must be 'TEST'",
    },
    FieldRule {
        name: "senderId",
        label: "Sender ID",
        check: Check::Format(Format::SenderId),
        message: "Sender ID must be in the format 'DHA-F-' followed by digits",
    },
    FieldRule {
        name: "receiverId",
        label: "Receiver ID",
        check: Check::Format(Format::InsuranceId),
        message: "Receiver ID must be in the format 'INS' followed by digits",
    },
    FieldRule {
        name: "payerId",
        label: "Payer ID",
        check: Check::Format(Format::InsuranceId),
        message: "Payer ID must be in the format 'INS' followed by digits",
    },
    FieldRule {
        name: "memberId",
        label: "Member ID",
        check: Check::Format(Format::MemberId),
        message: MEMBER_ID_FORMAT,
    },
    FieldRule {
        name: "eRxDate",
        label: "eRx date",
        check: Check::Format(Format::Date),
        message: "eRx date must be in the format 'MM/DD/YYYY'",
    },
    FieldRule {
        name: "prescriberId",
        label: "Prescriber ID",
        check: Check::Format(Format::PrescriberId),
        message: "Prescriber ID must be in the format 'QTR-' followed by digits",
    },
];

pub const PAYLOAD_LISTS: &[ListRule] = &[
    ListRule {
        name: "diagnoses",
        message: "Diagnoses must be a non-empty array",
        fields: DIAGNOSIS_FIELDS,
    },
    ListRule {
        name: "drugList",
        message: "Drug list must be a non-empty array",
        fields: DRUG_FIELDS,
    },
    ListRule {
        name: "attachmentList",
        message: "Attachment list must be a non-empty array",
        fields: ATTACHMENT_FIELDS,
    },
];

/// Body of a bulk insert into the drug catalog.
pub const CATALOG_LIST: ListRule = ListRule {
    name: "drugs",
    message: "Drugs must be a non-empty array",
    fields: CATALOG_DRUG_FIELDS,
};

pub const MEMBER_ID_FORMAT: &str =
    "Member ID must be in the format 'TEST-PAYER-' followed by digits";

const DIAGNOSIS_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "type",
        label: "Diagnosis type",
        check: Check::OneOf(&DiagnosisType::VALUES),
        message: "Diagnosis type must be 'Principal' or 'Secondary'",
    },
    FieldRule {
        name: "code",
        label: "Diagnosis code",
        check: Check::Format(Format::DiagnosisCode),
        message: "Diagnosis code must be in the format 'XNN' or 'XNN.N' (e.g., 'D28.2')",
    },
];

const DRUG_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "drugReferenceId",
        label: "Drug reference ID",
        check: Check::Format(Format::Numeric),
        message: "Drug reference ID must be numeric",
    },
    FieldRule {
        name: "drugCode",
        label: "Drug code",
        check: Check::Format(Format::DrugCode),
        message: "Drug code must be in the format 'NN-NNNN'",
    },
    FieldRule {
        name: "requestedQuantity",
        label: "Requested quantity",
        check: Check::PositiveInt,
        message: "Requested quantity must be a positive integer",
    },
    FieldRule {
        name: "requestDaysOfSupply",
        label: "Requested days of supply",
        check: Check::PositiveInt,
        message: "Requested days of supply must be a positive integer",
    },
    FieldRule {
        name: "requestedAmount",
        label: "Requested amount",
        check: Check::PositiveInt,
        message: "Requested amount must be a positive integer",
    },
];

const ATTACHMENT_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "fileRefId",
        label: "File reference ID",
        check: Check::Format(Format::Numeric),
        message: "File reference ID must be numeric",
    },
    FieldRule {
        name: "fileDescription",
        label: "File description",
        check: Check::NotEmpty,
        message: "File description must be a string",
    },
    FieldRule {
        name: "fileRef",
        label: "File reference",
        check: Check::NotEmpty,
        message: "File reference must be a string",
    },
];

const CATALOG_DRUG_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "id",
        label: "Drug ID",
        check: Check::NotEmpty,
        message: "Drug ID must be a string",
    },
    FieldRule {
        name: "ndc_drug_code",
        label: "NDC drug code",
        check: Check::NotEmpty,
        message: "NDC drug code must be a string",
    },
    FieldRule {
        name: "trade_name",
        label: "Trade name",
        check: Check::NotEmpty,
        message: "Trade name must be a string",
    },
    FieldRule {
        name: "drug_list_id",
        label: "Drug list ID",
        check: Check::NotEmpty,
        message: "Drug list ID must be a string",
    },
];

impl FieldRule {
    /// Checks the field `self.name` of `parent` and records at most one
    /// violation under `path`.
    pub fn apply(&self, parent: &Value, path: &str, violations: &mut Violations) {
        if let Err(message) = self.check(parent.get(self.name)) {
            violations.push(Violation::new(path, message));
        }
    }

    fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let value = match value {
            None | Some(Value::Null) => return Err(format!("{} is required", self.label)),
            Some(Value::String(s)) if s.is_empty() => {
                return Err(format!("{} is required", self.label))
            }
            Some(value) => value,
        };

        if let Check::PositiveInt = self.check {
            return if is_positive_int(value) {
                Ok(())
            } else {
                Err(self.message.into())
            };
        }

        let value = value
            .as_str()
            .ok_or_else(|| format!("{} must be a string", self.label))?;

        if self.check.matches(value) {
            Ok(())
        } else {
            Err(self.message.into())
        }
    }
}

impl ListRule {
    pub fn apply(&self, payload: &Value, violations: &mut Violations) {
        let items = match payload.get(self.name) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                violations.push(Violation::new(self.name, self.message));

                return;
            }
        };

        for (index, item) in items.iter().enumerate() {
            for field in self.fields {
                let path = format!("{}[{}].{}", self.name, index, field.name);

                field.apply(item, &path, violations);
            }
        }
    }
}

impl Check {
    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Equals(expected) => value == *expected,
            Self::Format(format) => format.regex().is_match(value),
            Self::OneOf(values) => values.iter().any(|v| *v == value),
            Self::NotEmpty => true,
            Self::PositiveInt => is_positive_int_str(value),
        }
    }
}

impl Format {
    pub fn regex(self) -> &'static Regex {
        lazy_static! {
            static ref SOURCE: Regex = Regex::new(r#"^test-pharmacy[0-9]+$"#).unwrap();
            static ref SENDER_ID: Regex = Regex::new(r#"^DHA-F-[0-9]+$"#).unwrap();
            static ref INSURANCE_ID: Regex = Regex::new(r#"^INS[0-9]+$"#).unwrap();
            static ref MEMBER_ID: Regex = Regex::new(r#"^TEST-PAYER-[0-9]+$"#).unwrap();
            static ref DATE: Regex = Regex::new(r#"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"#).unwrap();
            static ref PRESCRIBER_ID: Regex = Regex::new(r#"^QTR-[0-9]+$"#).unwrap();
            static ref DIAGNOSIS_CODE: Regex = Regex::new(r#"^[A-Z][0-9]{2}(\.[0-9])?$"#).unwrap();
            static ref NUMERIC: Regex = Regex::new(r#"^[0-9]+$"#).unwrap();
            static ref DRUG_CODE: Regex = Regex::new(r#"^[0-9]{2}-[0-9]{4}$"#).unwrap();
        }

        match self {
            Self::Source => &SOURCE,
            Self::SenderId => &SENDER_ID,
            Self::InsuranceId => &INSURANCE_ID,
            Self::MemberId => &MEMBER_ID,
            Self::Date => &DATE,
            Self::PrescriberId => &PRESCRIBER_ID,
            Self::DiagnosisCode => &DIAGNOSIS_CODE,
            Self::Numeric => &NUMERIC,
            Self::DrugCode => &DRUG_CODE,
        }
    }
}

/// Integral JSON numbers and digit strings of at least one. Numbers that
/// do not fit a `u64` count as long as they carry no fraction.
fn is_positive_int(value: &Value) -> bool {
    match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(n), _) => n >= 1,
            (None, Some(f)) => f.fract() == 0.0 && f >= 1.0,
            (None, None) => false,
        },
        Value::String(s) => is_positive_int_str(s),
        _ => false,
    }
}

fn is_positive_int_str(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.bytes().any(|b| b != b'0')
}
