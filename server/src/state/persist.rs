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

use std::io::{Read, Write};

use resources::{AuthorizationRequest, CatalogDrug, Member};
use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer};

use crate::error::Error;

use super::Inner;

impl Inner {
    pub fn load<R>(&mut self, reader: R) -> Result<(), Error>
    where
        R: Read,
    {
        let data: Data = from_reader(reader)?;

        for request in data.authorization_requests {
            self.authorization_requests.insert(request)?;
        }

        for member in data.members {
            self.members.insert(member)?;
        }

        self.drugs.insert_all(data.drugs)?;

        Ok(())
    }

    pub fn save<W>(&self, writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        let data = DataRef {
            authorization_requests: &self.authorization_requests.items,
            members: &self.members.items,
            drugs: &self.drugs.items,
        };

        to_writer(writer, &data)?;

        Ok(())
    }

    /// Loads a plain JSON list of members (`[{"id": 1}, ...]`).
    ///
    /// Members that are already known are skipped.
    pub fn load_members<R>(&mut self, reader: R) -> Result<usize, Error>
    where
        R: Read,
    {
        let members: Vec<Member> = from_reader(reader)?;

        let mut count = 0;
        for member in members {
            if self.members.ids.contains(&member.id) {
                continue;
            }

            self.members.insert(member)?;
            count += 1;
        }

        Ok(count)
    }
}

#[derive(Deserialize)]
struct Data {
    #[serde(default)]
    authorization_requests: Vec<AuthorizationRequest>,

    #[serde(default)]
    members: Vec<Member>,

    #[serde(default)]
    drugs: Vec<CatalogDrug>,
}

#[derive(Serialize)]
struct DataRef<'a> {
    authorization_requests: &'a [AuthorizationRequest],
    members: &'a [Member],
    drugs: &'a [CatalogDrug],
}
