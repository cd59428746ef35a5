//! Controller REST client

use crate::error::{Error, Result};
use crate::model::{
    ListResponse, LoginResponse, Profile, Site, Tenant, WanInterface, WanInterfaceLabel,
};
use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// Default controller base URL
pub const DEFAULT_CONTROLLER: &str = "https://api.elcapitan.cloudgenix.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the session or static token
pub const AUTH_HEADER: &str = "X-Auth-Token";

const LOGIN_PATH: &str = "/v2.0/api/login";
const LOGOUT_PATH: &str = "/v2.0/api/logout";
const PROFILE_PATH: &str = "/v2.1/api/profile";

/// Controller API client
pub struct ControllerClient {
    base_url: String,
    token: Option<String>,
    tenant_id: Option<String>,
    http: reqwest::Client,
}

impl ControllerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("cgx-wan-bfd/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            tenant_id: None,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn set_tenant_id(&mut self, tenant_id: impl Into<String>) {
        self.tenant_id = Some(tenant_id.into());
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Exchange email/password for a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        let resp: LoginResponse = self
            .request(Method::POST, LOGIN_PATH, Some(&Credentials { email, password }))
            .await?;
        resp.x_auth_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Auth("login response carried no token".into()))
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.get(PROFILE_PATH).await
    }

    pub async fn tenant(&self) -> Result<Tenant> {
        let path = format!("/v2.1/api/tenants/{}", self.require_tenant()?);
        self.get(&path).await
    }

    pub async fn wan_interface_labels(&self) -> Result<Vec<WanInterfaceLabel>> {
        let path = self.tenant_path("v2.0", "/waninterfacelabels")?;
        let list: ListResponse<WanInterfaceLabel> = self.get(&path).await?;
        Ok(list.items)
    }

    pub async fn sites(&self) -> Result<Vec<Site>> {
        let path = self.tenant_path("v4.7", "/sites")?;
        let list: ListResponse<Site> = self.get(&path).await?;
        Ok(list.items)
    }

    pub async fn wan_interfaces(&self, site_id: &str) -> Result<Vec<WanInterface>> {
        let path = self.tenant_path("v2.7", &format!("/sites/{}/waninterfaces", site_id))?;
        let list: ListResponse<WanInterface> = self.get(&path).await?;
        Ok(list.items)
    }

    /// Replace a WAN interface with `iface`, returning the stored object
    pub async fn put_wan_interface(
        &self,
        site_id: &str,
        iface: &WanInterface,
    ) -> Result<WanInterface> {
        let path = self.tenant_path(
            "v2.7",
            &format!("/sites/{}/waninterfaces/{}", site_id, iface.id),
        )?;
        self.request(Method::PUT, &path, Some(iface)).await
    }

    pub async fn logout(&self) -> Result<()> {
        let _: serde_json::Value = self.get(LOGOUT_PATH).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, path, "controller request");

        let mut req = self.http.request(method, &url);
        if let Some(token) = &self.token {
            req = req.header(AUTH_HEADER, token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path, "controller rejected request");
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        if bytes.is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn require_tenant(&self) -> Result<&str> {
        self.tenant_id
            .as_deref()
            .ok_or_else(|| Error::Auth("not authenticated to a tenant".into()))
    }

    fn tenant_path(&self, version: &str, path: &str) -> Result<String> {
        Ok(format!(
            "/{}/api/tenants/{}{}",
            version,
            self.require_tenant()?,
            path
        ))
    }
}

/// Pull a readable message out of an error body
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorResponse {
        #[serde(rename = "_error")]
        error: Vec<ErrorBody>,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(resp) if !resp.error.is_empty() => resp
            .error
            .into_iter()
            .map(|e| match (e.code, e.message) {
                (Some(code), Some(msg)) => format!("{}: {}", code, msg),
                (Some(code), None) => code,
                (None, Some(msg)) => msg,
                (None, None) => "unknown error".to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::from_utf8_lossy(body).trim().to_string(),
    }
}
