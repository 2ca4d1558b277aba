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

mod rules;
mod violation;

pub use rules::{Check, FieldRule, Format, ListRule, CATALOG_LIST, PAYLOAD_FIELDS, PAYLOAD_LISTS};
pub use violation::{Violation, Violations};

use resources::misc::MemberId;
use serde_json::Value;

/// The parts of a validated payload that are retained or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    pub member_id: MemberId,
    pub req_id: Option<String>,
}

/// Validates an incoming authorization request payload.
///
/// All rule sets are evaluated, so the returned violations list every
/// problem of the payload in field declaration order. Arbitrary JSON is
/// accepted as input.
pub fn validate(payload: &Value) -> Result<ValidatedPayload, Violations> {
    let mut violations = Violations::default();

    for field in PAYLOAD_FIELDS {
        field.apply(payload, field.name, &mut violations);
    }

    for list in PAYLOAD_LISTS {
        list.apply(payload, &mut violations);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let member_id = payload
        .get("memberId")
        .and_then(Value::as_str)
        .map(MemberId::new);
    let member_id = match member_id {
        Some(Ok(member_id)) => member_id,
        _ => {
            let violation = Violation::new("memberId", rules::MEMBER_ID_FORMAT);

            return Err(vec![violation].into());
        }
    };

    let req_id = match payload.get("reqId") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    Ok(ValidatedPayload { member_id, req_id })
}

/// Validates the body of a bulk insert into the drug catalog.
pub fn validate_drugs(body: &Value) -> Result<(), Violations> {
    let mut violations = Violations::default();

    CATALOG_LIST.apply(body, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use serde_json::json;

    pub fn valid_payload() -> Value {
        json!({
            "type": "Authorization",
            "source": "test-pharmacy12",
            "dispositionFlag": "TEST",
            "senderId": "DHA-F-0001",
            "receiverId": "INS017",
            "payerId": "INS017",
            "reqId": "1234567890",
            "memberId": "TEST-PAYER-42",
            "eRxDate": "06/20/2025",
            "prescriberId": "QTR-5",
            "diagnoses": [
                { "type": "Principal", "code": "D28.2" },
                { "type": "Secondary", "code": "A01" }
            ],
            "drugList": [{
                "drugReferenceId": "123",
                "drugCode": "12-3456",
                "requestedQuantity": 1,
                "requestDaysOfSupply": 30,
                "requestedAmount": 100
            }],
            "attachmentList": [
                { "fileRefId": "1", "fileDescription": "x-ray", "fileRef": "abc" }
            ]
        })
    }

    fn fields(violations: &Violations) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn accepts_valid_payload() {
        let validated = validate(&valid_payload()).unwrap();

        assert_eq!(validated.member_id.as_string(), "TEST-PAYER-42");
        assert_eq!(validated.req_id.as_deref(), Some("1234567890"));
    }

    #[test]
    fn rejects_malformed_member_id() {
        let mut payload = valid_payload();
        payload["memberId"] = json!("BAD-ID");

        let violations = validate(&payload).unwrap_err();

        assert_eq!(fields(&violations), vec!["memberId"]);
        assert_eq!(
            violations.to_string(),
            "Member ID must be in the format 'TEST-PAYER-' followed by digits"
        );
    }

    #[test]
    fn reports_only_the_missing_field() {
        for field in PAYLOAD_FIELDS {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(field.name);

            let violations = validate(&payload).unwrap_err();

            assert_eq!(fields(&violations), vec![field.name]);
            assert_eq!(
                violations.to_string(),
                format!("{} is required", field.label)
            );
        }

        let names = PAYLOAD_FIELDS.iter().map(|f| f.name).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "type",
                "source",
                "dispositionFlag",
                "senderId",
                "receiverId",
                "payerId",
                "memberId",
                "eRxDate",
                "prescriberId",
            ]
        );
    }

    #[test]
    fn reports_only_the_missing_element_field() {
        for (list, name, message) in &[
            ("drugList", "drugCode", "Drug code is required"),
            ("drugList", "requestedQuantity", "Requested quantity is required"),
            ("diagnoses", "type", "Diagnosis type is required"),
            ("attachmentList", "fileRef", "File reference is required"),
        ] {
            let mut payload = valid_payload();
            payload[*list][0].as_object_mut().unwrap().remove(*name);

            let violations = validate(&payload).unwrap_err();

            assert_eq!(fields(&violations), vec![format!("{}[0].{}", list, name)]);
            assert_eq!(violations.to_string(), *message);
        }
    }

    #[test]
    fn null_integer_field_is_required() {
        let mut payload = valid_payload();
        payload["drugList"][0]["requestedAmount"] = Value::Null;

        let violations = validate(&payload).unwrap_err();

        assert_eq!(fields(&violations), vec!["drugList[0].requestedAmount"]);
        assert_eq!(violations.to_string(), "Requested amount is required");
    }

    #[test]
    fn integral_floats_are_positive_integers() {
        let mut payload = valid_payload();
        payload["drugList"][0]["requestedQuantity"] = json!(2.0);
        payload["drugList"][0]["requestedAmount"] = json!(1e20);

        assert!(validate(&payload).is_ok());
    }

    #[test]
    fn accepts_drug_catalog_body() {
        let body = json!({
            "drugs": [
                { "id": "1", "ndc_drug_code": "0001", "trade_name": "A", "drug_list_id": "L1" },
                { "id": "2", "ndc_drug_code": "0002", "trade_name": "B", "drug_list_id": "L1" }
            ]
        });

        assert!(validate_drugs(&body).is_ok());
    }

    #[test]
    fn rejects_bad_drug_catalog_body() {
        let violations = validate_drugs(&json!({ "drugs": [] })).unwrap_err();
        assert_eq!(violations.to_string(), "Drugs must be a non-empty array");

        let body = json!({
            "drugs": [
                { "id": "1", "ndc_drug_code": "0001", "trade_name": "A", "drug_list_id": "L1" },
                { "id": 2, "ndc_drug_code": "", "trade_name": "B", "drug_list_id": "L1" }
            ]
        });
        let violations = validate_drugs(&body).unwrap_err();

        assert_eq!(fields(&violations), vec!["drugs[1].id", "drugs[1].ndc_drug_code"]);
        assert_eq!(
            violations.to_string(),
            "Drug ID must be a string, NDC drug code is required"
        );
    }

    #[test]
    fn empty_string_and_null_count_as_missing() {
        let mut payload = valid_payload();
        payload["memberId"] = json!("");
        payload["payerId"] = Value::Null;

        let violations = validate(&payload).unwrap_err();

        assert_eq!(fields(&violations), vec!["payerId", "memberId"]);
        assert_eq!(
            violations.field("memberId").unwrap().message,
            "Member ID is required"
        );
    }

    #[test]
    fn non_string_values_are_rejected() {
        let mut payload = valid_payload();
        payload["memberId"] = json!(42);

        let violations = validate(&payload).unwrap_err();

        assert_eq!(
            violations.field("memberId").unwrap().message,
            "Member ID must be a string"
        );
    }

    #[test]
    fn reports_bad_diagnosis_code_on_its_path() {
        let mut payload = valid_payload();
        payload["diagnoses"][1]["code"] = json!("d2");

        let violations = validate(&payload).unwrap_err();

        assert_eq!(fields(&violations), vec!["diagnoses[1].code"]);
        assert_eq!(
            violations.to_string(),
            "Diagnosis code must be in the format 'XNN' or 'XNN.N' (e.g., 'D28.2')"
        );
    }

    #[test]
    fn diagnosis_type_must_be_known() {
        let mut payload = valid_payload();
        payload["diagnoses"][0]["type"] = json!("Tertiary");

        let violations = validate(&payload).unwrap_err();

        assert_eq!(fields(&violations), vec!["diagnoses[0].type"]);
    }

    #[test]
    fn empty_lists_are_rejected() {
        let mut payload = valid_payload();
        payload["diagnoses"] = json!([]);
        payload["drugList"] = json!({});
        payload.as_object_mut().unwrap().remove("attachmentList");

        let violations = validate(&payload).unwrap_err();

        assert_eq!(
            fields(&violations),
            vec!["diagnoses", "drugList", "attachmentList"]
        );
        assert_eq!(
            violations.field("diagnoses").unwrap().message,
            "Diagnoses must be a non-empty array"
        );
    }

    #[test]
    fn integer_fields_accept_digit_strings() {
        let mut payload = valid_payload();
        payload["drugList"][0]["requestedQuantity"] = json!("3");

        assert!(validate(&payload).is_ok());
    }

    #[test]
    fn integer_fields_must_be_positive() {
        let mut payload = valid_payload();
        payload["drugList"][0]["requestedQuantity"] = json!(0);
        payload["drugList"][0]["requestedAmount"] = json!(-5);
        payload["drugList"][0]["requestDaysOfSupply"] = json!(1.5);

        let violations = validate(&payload).unwrap_err();

        assert_eq!(
            fields(&violations),
            vec![
                "drugList[0].requestedQuantity",
                "drugList[0].requestDaysOfSupply",
                "drugList[0].requestedAmount",
            ]
        );
        assert_eq!(
            violations.iter().next().unwrap().message,
            "Requested quantity must be a positive integer"
        );
    }

    #[test]
    fn non_object_element_reports_each_field() {
        let mut payload = valid_payload();
        payload["attachmentList"] = json!(["x-ray"]);

        let violations = validate(&payload).unwrap_err();

        assert_eq!(
            fields(&violations),
            vec![
                "attachmentList[0].fileRefId",
                "attachmentList[0].fileDescription",
                "attachmentList[0].fileRef",
            ]
        );
    }

    #[test]
    fn violations_follow_declaration_order() {
        let violations = validate(&json!({})).unwrap_err();

        assert_eq!(
            fields(&violations),
            vec![
                "type",
                "source",
                "dispositionFlag",
                "senderId",
                "receiverId",
                "payerId",
                "memberId",
                "eRxDate",
                "prescriberId",
                "diagnoses",
                "drugList",
                "attachmentList",
            ]
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let violations = validate(&json!("hello")).unwrap_err();

        assert_eq!(violations.len(), 12);
    }

    #[test]
    fn constants_are_enforced() {
        let mut payload = valid_payload();
        payload["type"] = json!("Claim");
        payload["dispositionFlag"] = json!("PROD");

        let violations = validate(&payload).unwrap_err();

        assert_eq!(
            violations.to_string(),
            "Type must be 'Authorization', Disposition flag must be 'TEST'"
        );
    }

    #[test]
    fn patterns_are_anchored() {
        for (name, value) in &[
            ("source", "xtest-pharmacy1"),
            ("senderId", "DHA-F-12a"),
            ("eRxDate", "6/20/2025"),
            ("eRxDate", "06/20/2025 "),
        ] {
            let mut payload = valid_payload();
            payload[*name] = json!(value);

            let violations = validate(&payload).unwrap_err();

            assert_eq!(fields(&violations), vec![*name]);
        }
    }
}
