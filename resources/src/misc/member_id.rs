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

use std::convert::TryFrom;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payer member identifier of the form `TEST-PAYER-<digits>`.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

#[derive(Debug, Error, PartialEq)]
#[error("Invalid Member ID: {0}!")]
pub struct Error(pub String);

impl MemberId {
    pub fn new<T: Display>(value: T) -> Result<Self, Error> {
        let value = value.to_string();
        if is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(Error(value))
        }
    }

    pub fn for_member(id: u64) -> Self {
        Self(format!("{}{}", PREFIX, id))
    }

    /// Numeric part of the identifier, if it fits into an `u64`.
    pub fn member_number(&self) -> Option<u64> {
        self.0[PREFIX.len()..].parse().ok()
    }

    pub fn as_string(&self) -> &String {
        &self.0
    }
}

impl TryFrom<String> for MemberId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(Error(value))
        }
    }
}

impl FromStr for MemberId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<MemberId> for String {
    fn from(v: MemberId) -> Self {
        v.0
    }
}

impl Deref for MemberId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

fn is_valid(s: &str) -> bool {
    lazy_static! {
        static ref RX: Regex = Regex::new(r#"^TEST-PAYER-[0-9]+$"#).unwrap();
    }

    RX.is_match(s)
}

const PREFIX: &str = "TEST-PAYER-";
