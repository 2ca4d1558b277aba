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

mod create;
mod error;
mod generate;
mod get;

pub use error::Error;

use actix_web::web::{get, post, resource, ServiceConfig};

use create::create;
use generate::generate;
use get::{get_all, get_one};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/authorization-requests")
            .route(get().to(get_all))
            .route(post().to(create)),
    );
    cfg.service(resource("/authorization-requests/generate").route(post().to(generate)));
    cfg.service(resource("/authorization-requests/{id}").route(get().to(get_one)));
}
