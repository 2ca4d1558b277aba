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

use std::fmt::Display;

use actix_web::{
    dev::HttpResponseBuilder, error::ResponseError, http::StatusCode, HttpResponse,
};
use serde::Serialize;
use thiserror::Error;

use super::{
    misc::AccessTokenError,
    routes::{
        authorization_request::Error as AuthorizationRequestError, drug::Error as DrugError,
        member::Error as MemberError,
    },
};

/* RequestError */

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Access Token Error: {0}")]
    AccessTokenError(AccessTokenError),

    #[error("Authorization Request Error: {0}")]
    AuthorizationRequestError(AuthorizationRequestError),

    #[error("Member Error: {0}")]
    MemberError(MemberError),

    #[error("Drug Error: {0}")]
    DrugError(DrugError),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl RequestError {
    pub fn internal<T: Display>(message: T) -> Self {
        Self::Internal(message.to_string())
    }

    fn response(&self) -> ResponseBuilder {
        use AuthorizationRequestError as A;
        use DrugError as D;
        use MemberError as M;
        use RequestError as E;

        let res = ResponseBuilder::new();
        match self {
            E::AccessTokenError(AccessTokenError::Missing) => res
                .status(StatusCode::UNAUTHORIZED)
                .error("Access denied, no token provided")
                .header("WWW-Authenticate", "Bearer"),
            E::AccessTokenError(_) => res
                .status(StatusCode::FORBIDDEN)
                .error("Invalid or expired token"),
            E::AuthorizationRequestError(err) => match err {
                A::InvalidJson(details) => res
                    .status(StatusCode::BAD_REQUEST)
                    .error("Invalid JSON body")
                    .details(details),
                A::ValidationFailed(violations) => res
                    .status(StatusCode::BAD_REQUEST)
                    .error(violations.to_string()),
                A::NotFound(_) => res
                    .status(StatusCode::NOT_FOUND)
                    .error("Authorization request not found"),
                A::SaveFailed(details) => res
                    .error("Failed to save authorization request")
                    .details(details),
                A::FetchFailed(details) => res
                    .error("Failed to fetch authorization requests")
                    .details(details),
                A::FetchOneFailed(details) => res
                    .error("Failed to fetch authorization request")
                    .details(details),
                A::NoMembersFound => res
                    .status(StatusCode::NOT_FOUND)
                    .error("No member records found"),
                A::GenerateFailed(details) => res
                    .error("Failed to generate authorization requests")
                    .details(details),
            },
            E::MemberError(err) => match err {
                M::InvalidJson(details) => res
                    .status(StatusCode::BAD_REQUEST)
                    .error("Invalid JSON body")
                    .details(details),
                M::AlreadyExists(_) => res
                    .status(StatusCode::CONFLICT)
                    .error("Member already exists"),
                M::FetchFailed(details) => res
                    .error("Failed to fetch members")
                    .details(details),
                M::RegisterFailed(details) => res
                    .error("Failed to register member")
                    .details(details),
            },
            E::DrugError(err) => match err {
                D::InvalidJson(details) => res
                    .status(StatusCode::BAD_REQUEST)
                    .error("Invalid JSON body")
                    .details(details),
                D::ValidationFailed(violations) => res
                    .status(StatusCode::BAD_REQUEST)
                    .error(violations.to_string()),
                D::AlreadyExists { .. } => res
                    .status(StatusCode::BAD_REQUEST)
                    .error(err.to_string()),
                D::NotFound(_) => res.status(StatusCode::NOT_FOUND).error("Drug not found"),
                D::AddFailed(details) => res.error("Failed to add drugs").details(details),
                D::FetchAllFailed(details) => res.error("Failed to fetch drugs").details(details),
                D::FetchFailed(details) => res.error("Failed to fetch drug").details(details),
                D::UpdateFailed(details) => res.error("Failed to update drug").details(details),
                D::DeleteFailed(details) => res.error("Failed to delete drug").details(details),
            },
            E::Internal(details) => res.error("Internal server error").details(details),
        }
    }
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        self.response().status
    }

    fn error_response(&self) -> HttpResponse {
        self.response().build()
    }
}

impl<T> From<T> for RequestError
where
    T: AsReqErr,
{
    fn from(err: T) -> RequestError {
        err.as_req_err()
    }
}

/* AsReqErr */

pub trait AsReqErr {
    fn as_req_err(self) -> RequestError;
}

impl AsReqErr for AccessTokenError {
    fn as_req_err(self) -> RequestError {
        RequestError::AccessTokenError(self)
    }
}

impl AsReqErr for AuthorizationRequestError {
    fn as_req_err(self) -> RequestError {
        RequestError::AuthorizationRequestError(self)
    }
}

impl AsReqErr for MemberError {
    fn as_req_err(self) -> RequestError {
        RequestError::MemberError(self)
    }
}

impl AsReqErr for DrugError {
    fn as_req_err(self) -> RequestError {
        RequestError::DrugError(self)
    }
}

/* ResponseBuilder */

struct ResponseBuilder {
    status: StatusCode,
    error: String,
    details: Option<String>,
    header: Vec<(&'static str, &'static str)>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ResponseBuilder {
    fn new() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: String::new(),
            details: None,
            header: Vec::new(),
        }
    }

    fn status(mut self, status: StatusCode) -> Self {
        self.status = status;

        self
    }

    fn error<T: Into<String>>(mut self, error: T) -> Self {
        self.error = error.into();

        self
    }

    fn details(mut self, details: &str) -> Self {
        self.details = Some(details.into());

        self
    }

    fn header(mut self, key: &'static str, value: &'static str) -> Self {
        self.header.push((key, value));

        self
    }

    fn build(self) -> HttpResponse {
        let mut res = HttpResponseBuilder::new(self.status);
        for (name, value) in self.header {
            res.header(name, value);
        }

        res.json(ErrorBody {
            error: &self.error,
            details: self.details.as_deref(),
        })
    }
}
