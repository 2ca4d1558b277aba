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
mod delete;
mod error;
mod get;
mod update;

pub use error::Error;

use actix_web::web::{delete, get, post, put, resource, ServiceConfig};

use create::create;
use delete::delete_one;
use get::{get_all, get_one};
use update::update;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/drugs")
            .route(get().to(get_all))
            .route(post().to(create)),
    );
    cfg.service(
        resource("/drugs/{id}")
            .route(get().to(get_one))
            .route(put().to(update))
            .route(delete().to(delete_one)),
    );
}
