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

pub mod authorization_request;
pub mod check_auth;
pub mod drug;
pub mod health;
pub mod member;

use actix_web::web::ServiceConfig;

use authorization_request::configure_routes as authorization_request_configure_routes;
use check_auth::configure_routes as check_auth_configure_routes;
use drug::configure_routes as drug_configure_routes;
use health::configure_routes as health_configure_routes;
use member::configure_routes as member_configure_routes;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    authorization_request_configure_routes(cfg);
    member_configure_routes(cfg);
    drug_configure_routes(cfg);
    check_auth_configure_routes(cfg);
    health_configure_routes(cfg);
}
