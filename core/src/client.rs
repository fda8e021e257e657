//! Addon sub-clients and the `Client` facade.
//!
//! # Design
//! Retail and classic catalogs differ only in the query keys they use and in
//! how the two main UIs are looked up, so both are served by one
//! `AddonClient` parametrized by a `Flavor`. Each operation is split into a
//! pure request builder (`build_query`), a single `Transport::execute` call,
//! and a pure response parser (`decode`). The facade builds both sub-clients
//! once and they share the base URL and transport through an `Arc`; nothing
//! is mutated after construction, so a `Client` can be used from many threads
//! at once.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{Addon, UiAddon};

const ALL: &str = "all";
const UI_KEY: &str = "ui";
const TUKUI: &str = "tukui";
const ELVUI: &str = "elvui";
const CLASSIC_TUKUI_ID: i64 = 1;
const CLASSIC_ELVUI_ID: i64 = 2;

/// Which catalog a sub-client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Retail,
    Classic,
}

impl Flavor {
    /// Query key of the single-addon lookup.
    pub fn addon_key(self) -> &'static str {
        match self {
            Flavor::Retail => "addon",
            Flavor::Classic => "classic-addon",
        }
    }

    /// Query key of the full listing; its value is always `all`.
    pub fn addons_key(self) -> &'static str {
        match self {
            Flavor::Retail => "addons",
            Flavor::Classic => "classic-addons",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::Retail => f.write_str("retail"),
            Flavor::Classic => f.write_str("classic"),
        }
    }
}

/// A decoded payload together with the raw exchange it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub raw: HttpResponse,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            raw: self.raw,
        }
    }
}

struct Shared {
    base_url: String,
    user_agent: Option<String>,
    transport: Arc<dyn Transport>,
}

/// Read-only access to one catalog.
///
/// Obtained from `Client::retail` or `Client::classic`. Ids are sent as-is;
/// the server answers unknown ids with an empty body, which surfaces as
/// `ApiError::EmptyResponse`.
#[derive(Clone)]
pub struct AddonClient {
    flavor: Flavor,
    shared: Arc<Shared>,
}

impl fmt::Debug for AddonClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddonClient")
            .field("flavor", &self.flavor)
            .field("base_url", &self.shared.base_url)
            .finish_non_exhaustive()
    }
}

impl AddonClient {
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Fetch a single addon by id.
    pub fn get_addon(&self, id: i64) -> Result<ApiResponse<Addon>, ApiError> {
        self.fetch(self.flavor.addon_key(), &id.to_string())
    }

    /// Fetch every addon of the catalog.
    pub fn get_addons(&self) -> Result<ApiResponse<Vec<Addon>>, ApiError> {
        self.fetch(self.flavor.addons_key(), ALL)
    }

    /// Fetch the main TukUI entry.
    pub fn get_tukui(&self) -> Result<ApiResponse<Addon>, ApiError> {
        match self.flavor {
            Flavor::Retail => self.fetch_ui(TUKUI),
            Flavor::Classic => self.get_addon(CLASSIC_TUKUI_ID),
        }
    }

    /// Fetch the main ElvUI entry.
    pub fn get_elvui(&self) -> Result<ApiResponse<Addon>, ApiError> {
        match self.flavor {
            Flavor::Retail => self.fetch_ui(ELVUI),
            Flavor::Classic => self.get_addon(CLASSIC_ELVUI_ID),
        }
    }

    /// Build the GET request carrying the single `key=value` query pair.
    pub fn build_query(&self, key: &str, value: &str) -> Result<HttpRequest, ApiError> {
        let url = Url::parse_with_params(&self.shared.base_url, &[(key, value)]).map_err(|source| {
            ApiError::InvalidUrl {
                url: self.shared.base_url.clone(),
                source,
            }
        })?;

        let headers = self
            .shared
            .user_agent
            .iter()
            .map(|agent| ("user-agent".to_string(), agent.clone()))
            .collect();

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers,
        })
    }

    fn fetch_ui(&self, name: &str) -> Result<ApiResponse<Addon>, ApiError> {
        let ui = self.fetch::<UiAddon>(UI_KEY, name)?;
        Ok(ui.map(UiAddon::into_addon))
    }

    fn fetch<T: DeserializeOwned>(&self, key: &str, value: &str) -> Result<ApiResponse<T>, ApiError> {
        let request = self.build_query(key, value)?;
        debug!(
            flavor = %self.flavor,
            method = request.method.as_str(),
            key,
            value,
            url = %request.url,
            "querying addon api"
        );
        let response = self.shared.transport.execute(&request)?;
        decode(response)
    }
}

/// Parse a response body into `T`.
///
/// A zero content length is reported as `ApiError::EmptyResponse` without
/// attempting to parse. The status code is not inspected.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    if response.content_length() == 0 {
        return Err(ApiError::EmptyResponse { response });
    }
    match serde_json::from_str(&response.body) {
        Ok(data) => Ok(ApiResponse {
            data,
            raw: response,
        }),
        Err(source) => Err(ApiError::Deserialization { source, response }),
    }
}

/// Entry point of the library.
///
/// ```no_run
/// let client = tukui::Client::new();
/// let elvui = client.retail().get_elvui()?.into_data();
/// println!("{:?} {:?}", elvui.name, elvui.version);
/// # Ok::<(), tukui::ApiError>(())
/// ```
#[derive(Clone)]
pub struct Client {
    retail: AddonClient,
    classic: AddonClient,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Client for the public API over the default transport.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Like `new`, honouring `TUKUI_API_URL` and `TUKUI_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        ClientBuilder::from_config(ClientConfig::from_env()).build()
    }

    /// Client for the public API over a caller-supplied transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::builder().transport(transport).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.retail.shared.base_url
    }

    pub fn retail(&self) -> &AddonClient {
        &self.retail
    }

    pub fn classic(&self) -> &AddonClient {
        &self.classic
    }

    pub fn addons(&self, flavor: Flavor) -> &AddonClient {
        match flavor {
            Flavor::Retail => &self.retail,
            Flavor::Classic => &self.classic,
        }
    }
}

/// Builder for `Client`.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Timeout of the default transport. Ignored when a transport is supplied.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// `User-Agent` header value; `None` sends no header of our own.
    pub fn user_agent(mut self, agent: Option<String>) -> Self {
        self.config.user_agent = agent;
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Client {
        let ClientConfig {
            base_url,
            timeout,
            user_agent,
        } = self.config;
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(UreqTransport::with_timeout(timeout)));

        let shared = Arc::new(Shared {
            base_url,
            user_agent,
            transport,
        });

        Client {
            retail: AddonClient {
                flavor: Flavor::Retail,
                shared: Arc::clone(&shared),
            },
            classic: AddonClient {
                flavor: Flavor::Classic,
                shared,
            },
        }
    }
}
