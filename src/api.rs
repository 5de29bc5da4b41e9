//! JSON request handler for the leap-year engine.
//!
//! The handler is a pure function from a [`Request`] to a [`Response`] in the
//! shape of a serverless proxy integration: it does no socket I/O, so any
//! runtime can feed it an [`ApiGatewayEvent`] and send back what it returns.
//! Every response, successful or not, carries the CORS headers.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{error, info, warn};

use crate::config::ApiConfig;
use crate::consts::{
    ALLOWED_HEADERS, ALLOWED_METHODS, CONTENT_TYPE_JSON, HEADER_ALLOW_HEADERS,
    HEADER_ALLOW_METHODS, HEADER_ALLOW_ORIGIN, HEADER_CONTENT_TYPE, YEAR_QUERY_PARAM,
};
use crate::{LeapYearError, Year, YearRange};

const STATUS_OK: u16 = 200;
const STATUS_BAD_REQUEST: u16 = 400;
const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
const STATUS_INTERNAL_ERROR: u16 = 500;

/// An inbound request, tagged by HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Single-year lookup via `?year=`
    Get { query: HashMap<String, String> },
    /// Single-year or range lookup via a JSON body
    Post { body: Option<String> },
    /// CORS preflight
    Options,
    /// Anything else; answered with 405
    Other(String),
}

impl Request {
    /// Builds a request from a method name, matched case-insensitively.
    pub fn from_parts(
        method: &str,
        query: HashMap<String, String>,
        body: Option<String>,
    ) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Self::Get { query },
            "POST" => Self::Post { body },
            "OPTIONS" => Self::Options,
            _ => Self::Other(method.to_owned()),
        }
    }

    pub fn method(&self) -> &str {
        match self {
            Self::Get { .. } => "GET",
            Self::Post { .. } => "POST",
            Self::Options => "OPTIONS",
            Self::Other(method) => method,
        }
    }
}

/// Proxy-integration event as delivered by a serverless HTTP gateway.
/// Fields the handler does not use (path, headers, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

impl ApiGatewayEvent {
    /// Method from `httpMethod`, falling back to `requestContext.http.method`
    /// (payload format 2.0).
    pub fn method(&self) -> Option<&str> {
        self.http_method.as_deref().or_else(|| {
            self.request_context
                .as_ref()
                .and_then(|ctx| ctx.http.as_ref())
                .map(|http| http.method.as_str())
        })
    }
}

impl From<ApiGatewayEvent> for Request {
    fn from(event: ApiGatewayEvent) -> Self {
        let method = event.method().unwrap_or_default().to_owned();
        Self::from_parts(
            &method,
            event.query_string_parameters.unwrap_or_default(),
            event.body,
        )
    }
}

/// Proxy-integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers:     BTreeMap<String, String>,
    pub body:        String,
}

impl Response {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Body of a successful single-year lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReport {
    pub year:         Year,
    pub is_leap_year: bool,
    pub reason:       String,
}

impl YearReport {
    pub fn new(year: Year) -> Self {
        Self {
            year,
            is_leap_year: year.is_leap(),
            reason: year.explain(),
        }
    }
}

/// Body of a successful range lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    pub start_year: Year,
    pub end_year:   Year,
    pub leap_years: Vec<Year>,
    pub count:      usize,
}

impl RangeReport {
    pub fn new(range: YearRange) -> Self {
        let leap_years: Vec<Year> = range.leap_years().collect();
        Self {
            start_year: range.start(),
            end_year: range.end(),
            count: leap_years.len(),
            leap_years,
        }
    }
}

/// POST body. Either `year` or both `startYear` and `endYear` must be set;
/// a range takes precedence when both shapes are present. `null` counts as absent.
#[derive(Debug, Default)]
struct PostBody {
    year:       Option<Value>,
    start_year: Option<Value>,
    end_year:   Option<Value>,
}

impl PostBody {
    /// Parses a raw body. Only a JSON object is accepted; arrays and scalars
    /// are rejected rather than read positionally.
    fn parse(raw: &str) -> Result<Self, ApiError> {
        let mut fields: Map<String, Value> =
            serde_json::from_str(raw).map_err(ApiError::MalformedBody)?;
        let mut take = |key: &str| fields.remove(key).filter(|value| !value.is_null());
        Ok(Self {
            year:       take("year"),
            start_year: take("startYear"),
            end_year:   take("endYear"),
        })
    }
}

/// Errors surfaced to API clients as `{ "error": <message> }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The engine rejected a year or range.
    #[error(transparent)]
    Engine(#[from] LeapYearError),

    #[error("year must be specified as a query parameter (e.g. ?year=2024)")]
    MissingYearQuery,

    #[error("year or startYear/endYear must be specified")]
    MissingPostFields,

    #[error("request body must be valid JSON")]
    MalformedBody(#[source] serde_json::Error),

    #[error("year range must span at most {max} years (requested {span})")]
    RangeTooLarge { span: u64, max: u64 },

    #[error("Method Not Allowed")]
    MethodNotAllowed(String),

    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Engine(_)
            | Self::MissingYearQuery
            | Self::MissingPostFields
            | Self::MalformedBody(_)
            | Self::RangeTooLarge { .. } => STATUS_BAD_REQUEST,
            Self::MethodNotAllowed(_) => STATUS_METHOD_NOT_ALLOWED,
            Self::Serialize(_) => STATUS_INTERNAL_ERROR,
        }
    }
}

/// The leap-year API. Holds only immutable configuration, so one instance
/// can serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct LeapYearApi {
    config: ApiConfig,
}

impl LeapYearApi {
    pub const fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Dispatches a request on its method and never fails: errors become
    /// 4xx/5xx responses with an `{ "error": ... }` body.
    #[tracing::instrument(skip_all, fields(method = request.method()))]
    pub fn handle(&self, request: &Request) -> Response {
        let result = match request {
            Request::Get { query } => self.get(query),
            Request::Post { body } => self.post(body.as_deref()),
            Request::Options => Ok(self.respond(STATUS_OK, String::new())),
            Request::Other(method) => Err(ApiError::MethodNotAllowed(method.clone())),
        };

        match result {
            Ok(response) => {
                info!(status = response.status_code, "request handled");
                response
            }
            Err(err) => self.error_response(&err),
        }
    }

    pub fn handle_event(&self, event: ApiGatewayEvent) -> Response {
        self.handle(&Request::from(event))
    }

    fn get(&self, query: &HashMap<String, String>) -> Result<Response, ApiError> {
        let year = query
            .get(YEAR_QUERY_PARAM)
            .and_then(|raw| raw.trim().parse::<i128>().ok())
            .ok_or(ApiError::MissingYearQuery)?;
        let year = Year::try_from(year)?;
        self.json(STATUS_OK, &YearReport::new(year))
    }

    fn post(&self, body: Option<&str>) -> Result<Response, ApiError> {
        let body: PostBody = match body.map(str::trim) {
            None | Some("") => PostBody::default(),
            Some(raw) => PostBody::parse(raw)?,
        };

        if let (Some(start), Some(end)) = (&body.start_year, &body.end_year) {
            let start = year_field(start)?;
            let end = year_field(end)?;
            let range = YearRange::new(start, end)?;

            let span = range.span();
            let max = self.config.max_range_span;
            if span > max {
                return Err(ApiError::RangeTooLarge { span, max });
            }
            return self.json(STATUS_OK, &RangeReport::new(range));
        }

        if let Some(year) = &body.year {
            let year = year_field(year)?;
            return self.json(STATUS_OK, &YearReport::new(year));
        }

        Err(ApiError::MissingPostFields)
    }

    fn json<T: Serialize>(&self, status_code: u16, payload: &T) -> Result<Response, ApiError> {
        let body = serde_json::to_string(payload).map_err(ApiError::Serialize)?;
        Ok(self.respond(status_code, body))
    }

    fn error_response(&self, err: &ApiError) -> Response {
        let status = err.status_code();
        if status >= STATUS_INTERNAL_ERROR {
            error!(error = %err, status, "request failed");
        } else {
            warn!(error = %err, status, "request rejected");
        }
        self.respond(status, json!({ "error": err.to_string() }).to_string())
    }

    fn respond(&self, status_code: u16, body: String) -> Response {
        Response {
            status_code,
            headers: self.headers(),
            body,
        }
    }

    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (HEADER_CONTENT_TYPE.to_owned(), CONTENT_TYPE_JSON.to_owned()),
            (HEADER_ALLOW_ORIGIN.to_owned(), self.config.allow_origin.clone()),
            (HEADER_ALLOW_METHODS.to_owned(), ALLOWED_METHODS.to_owned()),
            (HEADER_ALLOW_HEADERS.to_owned(), ALLOWED_HEADERS.to_owned()),
        ])
    }
}

/// Reads a year from a POST body field. Numeric strings are accepted for
/// clients that post form values; other values go through engine validation.
fn year_field(value: &Value) -> Result<Year, LeapYearError> {
    match value {
        Value::String(raw) => raw
            .trim()
            .parse::<i128>()
            .map_err(|_| LeapYearError::InvalidType)
            .and_then(Year::try_from),
        other => Year::try_from(other),
    }
}
