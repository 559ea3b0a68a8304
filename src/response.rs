// SPDX-FileCopyrightText: 2025 Greenbone AG
//
// SPDX-License-Identifier: GPL-2.0-or-later

use serde::Serialize;

pub type Result = hyper::Response<hyper::Body>;

#[derive(Debug, Clone)]
pub struct Response {
    version: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
        }
    }
}

impl Response {
    fn default_response_builder(&self) -> hyper::http::response::Builder {
        hyper::Response::builder().header("app-version", &self.version)
    }

    /// Creates a HTML response with the given status code.
    pub fn html(&self, code: hyper::StatusCode, body: String) -> Result {
        match self
            .default_response_builder()
            .header("Content-Type", "text/html; charset=utf-8")
            .header("Content-Length", body.len())
            .status(code)
            .body(hyper::Body::from(body))
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("Error creating response: {}", e);
                hyper::Response::builder()
                    .status(hyper::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(hyper::Body::empty())
                    .unwrap()
            }
        }
    }

    pub fn ok_html(&self, body: String) -> Result {
        self.html(hyper::StatusCode::OK, body)
    }

    fn create<T>(&self, code: hyper::StatusCode, value: &T) -> Result
    where
        T: ?Sized + Serialize + std::fmt::Debug,
    {
        match serde_json::to_string(value) {
            Ok(json) => {
                match self
                    .default_response_builder()
                    .header("Content-Type", "application/json")
                    .header("Content-Length", json.len())
                    .status(code)
                    .body(hyper::Body::from(json))
                {
                    Ok(resp) => resp,
                    Err(e) => {
                        tracing::error!("Error creating response: {}", e);
                        hyper::Response::builder()
                            .status(hyper::StatusCode::INTERNAL_SERVER_ERROR)
                            .body(hyper::Body::empty())
                            .unwrap()
                    }
                }
            }
            Err(e) => {
                tracing::error!("Error serializing response: {}", e);
                self.default_response_builder()
                    .status(hyper::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(hyper::Body::empty())
                    .unwrap()
            }
        }
    }

    pub fn ok<T>(&self, value: &T) -> Result
    where
        T: ?Sized + Serialize + std::fmt::Debug,
    {
        self.create(hyper::StatusCode::OK, value)
    }

    pub fn empty(&self, code: hyper::StatusCode) -> Result {
        self.default_response_builder()
            .status(code)
            .body(hyper::Body::empty())
            .unwrap()
    }

    pub fn internal_server_error(&self, err: &dyn std::error::Error) -> Result {
        tracing::error!("Unexpected error: {}", err);
        self.html(
            hyper::StatusCode::INTERNAL_SERVER_ERROR,
            crate::templates::error("An unexpected error occurred."),
        )
    }

    pub fn bad_request(&self, message: &str) -> Result {
        self.html(
            hyper::StatusCode::BAD_REQUEST,
            crate::templates::error(message),
        )
    }
}
