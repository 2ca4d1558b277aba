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

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::{
    dev::{MessageBody, Service, ServiceRequest, ServiceResponse, Transform},
    error::Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::info;

/// Writes one access log line per handled request.
pub struct Logging;

pub struct LoggingMiddleware<S> {
    service: S,
}

impl<S, B> Transform<S> for Logging
where
    S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Request = ServiceRequest;
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(LoggingMiddleware { service })
    }
}

impl<S, B> Service for LoggingMiddleware<S>
where
    S: Service<Request = ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Request = ServiceRequest;
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let head = req.head();
        let line = match head.peer_addr {
            Some(peer_addr) => format!("{:?} {} - {} - {}", head.version, head.method, peer_addr, head.uri),
            None => format!("{:?} {} - {}", head.version, head.method, head.uri),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            info!(target: "access_log", "{} - {} - {}ms", line, res.status().as_u16(), start.elapsed().as_millis());

            Ok(res)
        })
    }
}
