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

#[macro_use]
extern crate lazy_static;

pub mod authorization_request;
pub mod drug;
pub mod member;
pub mod misc;
pub mod payload;
pub mod primitives;

pub use authorization_request::AuthorizationRequest;
pub use drug::{Drug as CatalogDrug, DrugUpdate};
pub use member::Member;
pub use payload::AuthorizationRequestPayload;
