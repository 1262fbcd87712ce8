//! Request construction for the posts API.
//!
//! [`ApiRoute`] maps an API operation to a fully specified
//! [`RequestDescriptor`]: method, target URL, and where its parameters go.
//! Nothing here performs I/O; [`super::HttpSource`] turns a descriptor into
//! an actual HTTP call.
//!
//! ## For contributors — adding a new endpoint
//!
//! 1. Add a variant to [`ApiRoute`].
//! 2. Give it a method, a path, and its parameters in the matching `match`
//!    arms below.
//!
//! The encoding rule in [`Encoding::for_method`] is shared by every route, so
//! a new non-GET endpoint gets a JSON body without further changes.

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Failure to build a request.  These are configuration problems, not
/// network errors, and are never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid API endpoint `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API endpoint `{0}` cannot be used as a base URL")]
    InvalidBase(String),
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),
}

/// Parse and validate the configured API base endpoint.
pub fn parse_base_url(raw: &str) -> Result<Url, BuildError> {
    let url = Url::parse(raw.trim()).map_err(|source| BuildError::InvalidEndpoint {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(BuildError::InvalidBase(url.to_string()));
    }
    Ok(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Where request parameters are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `?key=value` pairs appended to the URL.
    Query,
    /// A JSON object sent as the request body.
    JsonBody,
}

impl Encoding {
    /// GET carries its parameters in the query string; everything else
    /// sends a JSON body.
    pub fn for_method(method: Method) -> Self {
        match method {
            Method::Get => Encoding::Query,
            _ => Encoding::JsonBody,
        }
    }
}

/// A ready-to-send request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub encoding: Encoding,
    /// Present only for [`Encoding::JsonBody`].
    pub body: Option<Value>,
}

/// Operations the posts API supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    /// One page of articles, 1-based.
    GetNews { page: u32 },
}

impl ApiRoute {
    pub fn method(&self) -> Method {
        match self {
            ApiRoute::GetNews { .. } => Method::Get,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ApiRoute::GetNews { .. } => "posts",
        }
    }

    fn parameters(&self) -> Result<Map<String, Value>, BuildError> {
        let mut params = Map::new();
        match *self {
            ApiRoute::GetNews { page } => {
                if page == 0 {
                    return Err(BuildError::InvalidPage(page));
                }
                params.insert("page".into(), Value::from(page));
            }
        }
        Ok(params)
    }

    /// Build the request for this route against `base`.
    pub fn build(&self, base: &Url) -> Result<RequestDescriptor, BuildError> {
        let params = self.parameters()?;
        let method = self.method();
        let encoding = Encoding::for_method(method);

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| BuildError::InvalidBase(base.to_string()))?
            .pop_if_empty()
            .push(self.path());

        let body = match encoding {
            Encoding::Query => {
                {
                    let mut query = url.query_pairs_mut();
                    for (key, value) in &params {
                        match value {
                            Value::String(s) => query.append_pair(key, s),
                            other => query.append_pair(key, &other.to_string()),
                        };
                    }
                }
                None
            }
            Encoding::JsonBody => Some(Value::Object(params)),
        };

        Ok(RequestDescriptor {
            method,
            url,
            encoding,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
