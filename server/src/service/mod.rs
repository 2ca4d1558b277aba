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

mod error;
mod header;
mod middleware;
mod misc;
mod routes;

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use actix_web::{
    dev::Server,
    web::{Data, ServiceConfig},
    App, HttpServer,
};
use log::warn;

use crate::{
    authorization_requests::AuthorizationRequestService, batch::BatchDriver, error::Error,
    logging::TARGET, state::{DrugCatalog, MemberDirectory},
};

pub use error::{AsReqErr, RequestError};
pub use misc::{AccessToken, AccessTokenError, AccessTokenSecret};
use middleware::Logging;
use routes::configure_routes;

pub struct Service {
    data: AppData,
    addresses: Vec<SocketAddr>,
}

/// Shared handles every worker registers as application data.
#[derive(Clone)]
pub struct AppData {
    pub requests: AuthorizationRequestService,
    pub batch: Arc<BatchDriver>,
    pub members: Arc<dyn MemberDirectory>,
    pub drugs: Arc<dyn DrugCatalog>,
    pub secret: AccessTokenSecret,
}

impl Service {
    pub fn new(data: AppData) -> Self {
        Self {
            data,
            addresses: Vec::new(),
        }
    }

    pub fn listen<T: ToSocketAddrs>(mut self, addrs: T) -> Result<Self, Error> {
        for addr in addrs.to_socket_addrs()? {
            self.addresses.push(addr);
        }

        Ok(self)
    }

    pub fn run(self) -> Result<Server, Error> {
        let Self { data, addresses } = self;

        if !data.secret.is_enabled() {
            warn!(target: TARGET, "No access token secret configured, write routes are not protected!");
        }

        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logging)
                .configure(|cfg| data.configure(cfg))
        });

        for addr in addresses {
            server = server.bind(addr)?;
        }

        let server = server.shutdown_timeout(10).run();

        Ok(server)
    }
}

impl AppData {
    pub fn configure(&self, cfg: &mut ServiceConfig) {
        cfg.app_data(Data::new(self.requests.clone()))
            .app_data(Data::from(self.batch.clone()))
            .app_data(Data::new(self.members.clone()))
            .app_data(Data::new(self.drugs.clone()))
            .app_data(Data::new(self.secret.clone()));

        configure_routes(cfg);
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use std::time::Duration;

    use actix_web::{http::StatusCode, test};
    use chrono::Utc;
    use resources::primitives::Id;
    use serde_json::{json, Value};

    use crate::{
        authorization_requests::tests::BrokenStore,
        batch::{tests::CountingSubmitter, BatchConfig},
        generator::Generator,
        state::State,
        validation::tests::valid_payload,
    };

    fn app_data(state: &State, secret: Option<&str>) -> AppData {
        let batch = BatchDriver::new(
            Arc::new(state.clone()),
            Arc::new(CountingSubmitter::default()),
            Generator::from_seed(1),
            BatchConfig {
                pacing: Duration::from_millis(0),
            },
        );

        AppData {
            requests: AuthorizationRequestService::new(Arc::new(state.clone())),
            batch: Arc::new(batch),
            members: Arc::new(state.clone()),
            drugs: Arc::new(state.clone()),
            secret: AccessTokenSecret(secret.map(Into::into)),
        }
    }

    fn token(secret: &str) -> String {
        let token = AccessToken {
            id: Some(json!(1)),
            email: Some("pharmacist@example.com".into()),
            iat: Some(Utc::now()),
            exp: Some(Utc::now() + chrono::Duration::hours(1)),
        }
        .sign(secret)
        .unwrap();

        format!("Bearer {}", token)
    }

    macro_rules! init_app {
        ($data:expr) => {{
            let data = $data;

            test::init_service(
                App::new()
                    .wrap(Logging)
                    .configure(|cfg| data.configure(cfg)),
            )
            .await
        }};
    }

    #[actix_rt::test]
    async fn create_valid_request() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/authorization-requests")
            .set_json(&valid_payload())
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Authorization request saved successfully"));
        assert_eq!(body["data"]["memberId"], json!("TEST-PAYER-42"));
        assert!(body["data"]["id"].is_string());
    }

    #[actix_rt::test]
    async fn create_invalid_request() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let mut payload = valid_payload();
        payload["memberId"] = json!("BAD-ID");

        let req = test::TestRequest::post()
            .uri("/authorization-requests")
            .set_json(&payload)
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["error"],
            json!("Member ID must be in the format 'TEST-PAYER-' followed by digits")
        );
    }

    #[actix_rt::test]
    async fn create_with_malformed_json() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/authorization-requests")
            .header("Content-Type", "application/json")
            .set_payload("{ not json")
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Invalid JSON body"));
        assert!(body["details"].is_string());
    }

    #[actix_rt::test]
    async fn list_and_get() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/authorization-requests")
            .set_json(&valid_payload())
            .to_request();
        let created: Value = test::read_body_json(test::call_service(&mut app, req).await).await;
        let id = created["data"]["id"].as_str().unwrap().to_owned();

        let req = test::TestRequest::get().uri("/authorization-requests").to_request();
        let list: Value = test::read_body_json(test::call_service(&mut app, req).await).await;

        assert_eq!(list["data"], json!([created["data"].clone()]));

        let uri = format!("/authorization-requests/{}", id);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let one: Value = test::read_body_json(test::call_service(&mut app, req).await).await;

        assert_eq!(one["data"], created["data"]);
    }

    #[actix_rt::test]
    async fn get_unknown() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::get()
            .uri("/authorization-requests/does-not-exist")
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Authorization request not found"));
    }

    #[actix_rt::test]
    async fn fetch_failures_name_the_route() {
        let state = State::default();
        let mut data = app_data(&state, None);
        data.requests = AuthorizationRequestService::new(Arc::new(BrokenStore));

        let mut app = init_app!(data);

        let uri = format!("/authorization-requests/{}", Id::generate());
        let req = test::TestRequest::get().uri(&uri).to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Failed to fetch authorization request"));
        assert_eq!(body["details"], json!("Store is not available: disk full"));

        let req = test::TestRequest::get().uri("/authorization-requests").to_request();
        let body: Value = test::read_body_json(test::call_service(&mut app, req).await).await;
        assert_eq!(body["error"], json!("Failed to fetch authorization requests"));
    }

    #[actix_rt::test]
    async fn generate_without_members() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/authorization-requests/generate")
            .set_json(&json!({ "count": 3 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("No member records found"));
    }

    #[actix_rt::test]
    async fn generate_with_default_count() {
        let state = State::default();
        state.register(Some(1)).await.unwrap();

        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/authorization-requests/generate")
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["message"],
            json!("Successfully generated 5 authorization requests")
        );
    }

    #[actix_rt::test]
    async fn generate_requires_token() {
        let state = State::default();
        state.register(Some(1)).await.unwrap();

        let mut app = init_app!(app_data(&state, Some("secret")));

        let req = test::TestRequest::post()
            .uri("/authorization-requests/generate")
            .set_json(&json!({ "count": 2 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/authorization-requests/generate")
            .header("Authorization", token("other"))
            .set_json(&json!({ "count": 2 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Invalid or expired token"));

        let req = test::TestRequest::post()
            .uri("/authorization-requests/generate")
            .header("Authorization", token("secret"))
            .set_json(&json!({ "count": 2 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body["message"],
            json!("Successfully generated 2 authorization requests")
        );
    }

    #[actix_rt::test]
    async fn register_members() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/members")
            .set_json(&json!({ "id": 4 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/members")
            .set_json(&json!({ "id": 4 }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/members").to_request();
        let body: Value = test::read_body_json(test::call_service(&mut app, req).await).await;
        assert_eq!(body["data"], json!([{ "id": 4 }]));
    }

    #[actix_rt::test]
    async fn health() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::get().uri("/health").to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    fn drugs_body() -> Value {
        json!({
            "drugs": [
                {
                    "id": "1",
                    "ndc_drug_code": "0001-1234",
                    "trade_name": "Paracetamol 500",
                    "drug_list_id": "L1",
                    "start_date": "",
                    "dispensed_quantity": 20
                },
                {
                    "id": "2",
                    "ndc_drug_code": "0002-1234",
                    "trade_name": "Ibuprofen 400",
                    "drug_list_id": "L2"
                },
                {
                    "id": "3",
                    "ndc_drug_code": "0003-9999",
                    "trade_name": "Aspirin 100",
                    "drug_list_id": "L1"
                }
            ]
        })
    }

    #[actix_rt::test]
    async fn add_drugs() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&drugs_body())
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Drugs added successfully"));
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"][0]["start_date"], Value::Null);
        assert_eq!(body["data"][0]["dispensed_quantity"], json!(20));
    }

    #[actix_rt::test]
    async fn add_duplicate_drug() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&drugs_body())
            .to_request();
        test::call_service(&mut app, req).await;

        let body = json!({
            "drugs": [
                { "id": "4", "ndc_drug_code": "0004", "trade_name": "A", "drug_list_id": "L1" },
                { "id": "2", "ndc_drug_code": "0002", "trade_name": "B", "drug_list_id": "L1" }
            ]
        });
        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Drug with ID 2 already exists at index 1"));

        let req = test::TestRequest::get().uri("/drugs/4").to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn add_invalid_drugs() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&json!({ "drugs": [] }))
            .to_request();
        let res = test::call_service(&mut app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("Drugs must be a non-empty array"));
    }

    #[actix_rt::test]
    async fn filter_drugs() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&drugs_body())
            .to_request();
        test::call_service(&mut app, req).await;

        let req = test::TestRequest::get()
            .uri("/drugs?drug_list_id=L1&ndc_drug_code=1234")
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&mut app, req).await).await;

        let ids = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1"]);

        let req = test::TestRequest::get().uri("/drugs").to_request();
        let body: Value = test::read_body_json(test::call_service(&mut app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[actix_rt::test]
    async fn get_update_and_delete_drug() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::post()
            .uri("/drugs")
            .set_json(&drugs_body())
            .to_request();
        test::call_service(&mut app, req).await;

        let req = test::TestRequest::put()
            .uri("/drugs/2")
            .set_json(&json!({ "trade_name": "Ibuprofen 600", "manufacturer": "" }))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Drug updated successfully"));
        assert_eq!(body["data"]["trade_name"], json!("Ibuprofen 600"));

        let req = test::TestRequest::get().uri("/drugs/2").to_request();
        let body: Value = test::read_body_json(test::call_service(&mut app, req).await).await;
        assert_eq!(body["data"]["trade_name"], json!("Ibuprofen 600"));
        assert_eq!(body["data"]["ndc_drug_code"], json!("0002-1234"));

        let req = test::TestRequest::delete().uri("/drugs/2").to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Drug deleted successfully"));

        for req in vec![
            test::TestRequest::get().uri("/drugs/2").to_request(),
            test::TestRequest::delete().uri("/drugs/2").to_request(),
            test::TestRequest::put()
                .uri("/drugs/2")
                .set_json(&json!({}))
                .to_request(),
        ] {
            let res = test::call_service(&mut app, req).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND);

            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["error"], json!("Drug not found"));
        }
    }

    #[actix_rt::test]
    async fn check_auth() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, Some("secret")));

        let req = test::TestRequest::get().uri("/check-auth").to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/check-auth")
            .header("Authorization", token("other"))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/check-auth")
            .header("Authorization", token("secret"))
            .to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Authenticated as pharmacist@example.com"));
        assert_eq!(body["data"]["email"], json!("pharmacist@example.com"));
    }

    #[actix_rt::test]
    async fn check_auth_without_secret() {
        let state = State::default();
        let mut app = init_app!(app_data(&state, None));

        let req = test::TestRequest::get().uri("/check-auth").to_request();
        let res = test::call_service(&mut app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], json!("Authentication is disabled"));
    }
}
