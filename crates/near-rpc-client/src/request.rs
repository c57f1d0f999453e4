//! Provides a builder API for creating and sending NEAR JSON-RPC requests.
//!
//! The builder uses type states so that only valid operations are available at
//! each stage. Each stage is consumed to produce the next one and the final
//! stage sends the request.
//!
//!   1. [Method](stage::Method) where you select the JSON-RPC method.
//!   2. [Params](stage::Params) where you provide the method parameters.
//!   3. [Final](stage::Final) which sends the request and parses the reply.
use serde::Deserialize;
use serde_json::json;

use crate::error::{NodeError, RpcError};

/// Nearcore echoes the id but never interprets it.
const REQUEST_ID: &str = "dontcare";

/// A NEAR JSON-RPC request builder.
pub struct Request<'a, S: RequestState> {
    state: S,
    url: reqwest::Url,
    client: &'a reqwest::Client,
}

pub mod stage {
    /// Select the JSON-RPC method to call:
    /// - [block](super::Request::block)
    /// - [chunk](super::Request::chunk)
    /// - [tx](super::Request::tx)
    /// - [status](super::Request::status)
    pub struct Method;

    /// Specify the request parameters with [params](super::Request::params)
    /// or [no_params](super::Request::no_params).
    pub struct Params {
        pub method: &'static str,
    }

    /// Send the request with [send](super::Request::send).
    pub struct Final {
        pub method: &'static str,
        pub params: serde_json::Value,
    }

    impl super::RequestState for Method {}
    impl super::RequestState for Params {}
    impl super::RequestState for Final {}
}

impl<'a> Request<'a, stage::Method> {
    /// Initialize a [Request] builder.
    pub fn builder(client: &'a reqwest::Client, url: reqwest::Url) -> Self {
        Request {
            url,
            client,
            state: stage::Method,
        }
    }

    pub fn block(self) -> Request<'a, stage::Params> {
        self.method("block")
    }

    pub fn chunk(self) -> Request<'a, stage::Params> {
        self.method("chunk")
    }

    pub fn tx(self) -> Request<'a, stage::Params> {
        self.method("tx")
    }

    pub fn status(self) -> Request<'a, stage::Params> {
        self.method("status")
    }

    fn method(self, method: &'static str) -> Request<'a, stage::Params> {
        Request {
            url: self.url,
            client: self.client,
            state: stage::Params { method },
        }
    }
}

impl<'a> Request<'a, stage::Params> {
    pub fn params(self, params: serde_json::Value) -> Request<'a, stage::Final> {
        Request {
            url: self.url,
            client: self.client,
            state: stage::Final {
                method: self.state.method,
                params,
            },
        }
    }

    /// Nearcore expects an empty array rather than a missing field.
    pub fn no_params(self) -> Request<'a, stage::Final> {
        self.params(json!([]))
    }
}

impl Request<'_, stage::Final> {
    /// Posts the JSON-RPC envelope and parses the `result` into `T`.
    pub async fn send<T>(self) -> Result<T, RpcError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({
            "jsonrpc": "2.0",
            "id": REQUEST_ID,
            "method": self.state.method,
            "params": self.state.params,
        });

        tracing::trace!(url=%self.url, method=%self.state.method, "Sending NEAR RPC request");
        let response = self.client.post(self.url).json(&body).send().await?;
        parse::<T>(response).await
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<NodeError>,
}

async fn parse<T>(response: reqwest::Response) -> Result<T, RpcError>
where
    T: serde::de::DeserializeOwned,
{
    tracing::trace!(status=%response.status(), "Parsing NEAR RPC reply");

    // Nearcore reports some errors with a non-2xx status but still sends a
    // JSON-RPC error body, which is more informative than the status.
    let status_error = response.error_for_status_ref().err();
    let body = response.bytes().await?;

    match (serde_json::from_slice::<Envelope>(&body), status_error) {
        (Ok(Envelope { error: Some(e), .. }), _) => Err(RpcError::Node(e)),
        (_, Some(e)) => Err(RpcError::Transport(e)),
        (Ok(Envelope {
            result: Some(result),
            ..
        }), None) => serde_json::from_value(result).map_err(|e| {
            tracing::debug!(reason=%e, "Reply does not match the expected shape");
            RpcError::InvalidReply(e.to_string())
        }),
        (Ok(_), None) => Err(RpcError::InvalidReply(
            "reply contains neither result nor error".to_owned(),
        )),
        (Err(e), None) => Err(RpcError::InvalidReply(e.to_string())),
    }
}

pub trait RequestState {}
