// Copyright (c) 2025 - Cowboy AI, Inc.

//! NetBox DCIM Repository Adapter
//!
//! Implements [`InventoryRepository`] against the NetBox REST API.
//!
//! # Architecture
//!
//! ```text
//! create_site          = POST /api/dcim/sites/
//! create_rack          = POST /api/dcim/racks/
//! create_device        = POST /api/dcim/devices/
//! find_site_by_slug    = GET  /api/dcim/sites/?slug=...
//! find_role_by_name    = GET  /api/dcim/device-roles/?name=...
//! find_device_type     = GET  /api/dcim/device-types/{id}/  |  ?slug=...
//! list_devices_by_site = GET  /api/dcim/devices/?site_id=...&ordering=id  (paged)
//! ```
//!
//! Every call is awaited before the next one starts. There are no retries;
//! the request timeout is the only bound on a slow NetBox.
//!
//! # Example
//!
//! ```rust,no_run
//! use netbox_site_provisioner::adapters::{NetBoxClient, NetBoxConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NetBoxConfig {
//!         base_url: "http://localhost:8000".to_string(),
//!         api_token: "your-token-here".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let client = NetBoxClient::new(config)?;
//!     client.health_check().await?;
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::{
    Device, DeviceRole, DeviceType, DeviceTypeRef, Manufacturer, NewDevice, NewRack, NewSite,
    Rack, Site, Status,
};
use crate::errors::{ProvisionError, ProvisionResult};
use crate::repository::InventoryRepository;

/// Configuration for NetBox connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetBoxConfig {
    /// NetBox base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// API token for authentication
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size when listing devices
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

impl Default for NetBoxConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: String::new(),
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl NetBoxConfig {
    /// Load configuration from `NETBOX_URL`, `NETBOX_API_TOKEN` and `NETBOX_TIMEOUT_SECS`
    ///
    /// A missing token is not an error here; [`NetBoxClient::new`] rejects it.
    pub fn from_env() -> ProvisionResult<Self> {
        let defaults = Self::default();

        let timeout_secs = match std::env::var("NETBOX_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|e| {
                ProvisionError::Configuration(format!("Invalid NETBOX_TIMEOUT_SECS {}: {}", raw, e))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            base_url: std::env::var("NETBOX_URL").unwrap_or(defaults.base_url),
            api_token: std::env::var("NETBOX_API_TOKEN").unwrap_or_default(),
            timeout_secs,
            page_size: defaults.page_size,
        })
    }

    /// Absolute URL for an API path such as `/api/dcim/sites/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
struct SiteRequest<'a> {
    name: &'a str,
    slug: &'a str,
    status: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct RackRequest<'a> {
    name: &'a str,
    slug: &'a str,
    site: u64,
    status: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct DeviceRequest<'a> {
    name: &'a str,
    device_type: u64,
    role: u64,
    site: u64,
    rack: u64,
    status: &'a str,
}

/// NetBox `{ "value": ..., "label": ... }` choice field
#[derive(Debug, Clone, Deserialize)]
struct ChoiceField {
    value: Status,
}

#[derive(Debug, Clone, Deserialize)]
struct NestedRef {
    id: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxManufacturer {
    id: u64,
    name: String,
    slug: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxDeviceType {
    id: u64,
    manufacturer: NetBoxManufacturer,
    model: String,
    slug: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxRole {
    id: u64,
    name: String,
    slug: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxSite {
    id: u64,
    name: String,
    slug: String,
    status: ChoiceField,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxRack {
    id: u64,
    name: String,
    site: NestedRef,
    status: ChoiceField,
}

#[derive(Debug, Clone, Deserialize)]
struct NetBoxDevice {
    id: u64,
    name: Option<String>,
    device_type: NetBoxDeviceType,
    /// NetBox < 4.0 calls this `device_role`
    #[serde(alias = "device_role")]
    role: NetBoxRole,
    site: NestedRef,
    rack: Option<NestedRef>,
    status: ChoiceField,
}

#[derive(Debug, Clone, Deserialize)]
struct Page<T> {
    next: Option<String>,
    results: Vec<T>,
}

impl From<NetBoxDeviceType> for DeviceType {
    fn from(t: NetBoxDeviceType) -> Self {
        DeviceType {
            id: t.id,
            manufacturer: Manufacturer {
                id: t.manufacturer.id,
                name: t.manufacturer.name,
                slug: t.manufacturer.slug,
            },
            model: t.model,
            slug: t.slug,
        }
    }
}

impl From<NetBoxRole> for DeviceRole {
    fn from(r: NetBoxRole) -> Self {
        DeviceRole {
            id: r.id,
            name: r.name,
            slug: r.slug,
        }
    }
}

impl From<NetBoxSite> for Site {
    fn from(s: NetBoxSite) -> Self {
        Site {
            id: s.id,
            name: s.name,
            slug: s.slug,
            status: s.status.value,
        }
    }
}

impl From<NetBoxDevice> for Device {
    fn from(d: NetBoxDevice) -> Self {
        Device {
            id: d.id,
            name: d.name.unwrap_or_default(),
            device_type: d.device_type.into(),
            site_id: d.site.id,
            rack_id: d.rack.map(|r| r.id),
            status: d.status.value,
            role: d.role.into(),
        }
    }
}

/// Map a non-success NetBox response to a provisioning error
///
/// NetBox answers validation failures (duplicate slug, unknown reference)
/// with 400; anything else unexpected counts as a host failure.
fn classify_failure(status: StatusCode, body: &str, what: &str) -> ProvisionError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
            ProvisionError::DuplicateOrInvalidName(format!("{} rejected by NetBox: {}", what, body))
        }
        _ => ProvisionError::HostCommunication(format!(
            "NetBox API returned {} for {}: {}",
            status, what, body
        )),
    }
}

/// NetBox REST client implementing the inventory repository
pub struct NetBoxClient {
    config: NetBoxConfig,
    client: Client,
}

impl NetBoxClient {
    /// Create a new NetBox client
    pub fn new(config: NetBoxConfig) -> ProvisionResult<Self> {
        if config.api_token.is_empty() {
            return Err(ProvisionError::Configuration(
                "NetBox API token is not set (NETBOX_API_TOKEN)".to_string(),
            ));
        }

        info!("Connecting to NetBox at {}", config.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Token {}", config.api_token).parse().map_err(|e| {
                        ProvisionError::Configuration(format!("Invalid API token: {}", e))
                    })?,
                );
                headers.insert(
                    reqwest::header::ACCEPT,
                    "application/json".parse().map_err(|e| {
                        ProvisionError::Configuration(format!("Invalid header: {}", e))
                    })?,
                );
                headers
            })
            .build()
            .map_err(|e| {
                ProvisionError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &NetBoxConfig {
        &self.config
    }

    /// Verify NetBox is reachable and the token is accepted
    pub async fn health_check(&self) -> ProvisionResult<()> {
        let url = self.config.api_url("/api/status/");
        let response = self.client.get(&url).send().await.map_err(|e| {
            ProvisionError::HostCommunication(format!("NetBox health check failed: {}", e))
        })?;

        if response.status().is_success() {
            debug!("NetBox health check passed");
            Ok(())
        } else {
            Err(ProvisionError::HostCommunication(format!(
                "NetBox returned status: {}",
                response.status()
            )))
        }
    }

    async fn get(&self, url: &str, what: &str) -> ProvisionResult<Response> {
        debug!("GET {}", url);
        self.client.get(url).send().await.map_err(|e| {
            ProvisionError::HostCommunication(format!("NetBox API error ({}): {}", what, e))
        })
    }

    async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
        what: &str,
    ) -> ProvisionResult<R> {
        let url = self.config.api_url(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            ProvisionError::HostCommunication(format!("NetBox API error ({}): {}", what, e))
        })?;
        Self::decode(response, what).await
    }

    async fn decode<R: DeserializeOwned>(response: Response, what: &str) -> ProvisionResult<R> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProvisionError::HostCommunication(format!("Failed to read NetBox response: {}", e))
        })?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(classify_failure(status, &body, what))
        }
    }
}

#[async_trait]
impl InventoryRepository for NetBoxClient {
    async fn create_site(&mut self, site: NewSite) -> ProvisionResult<Site> {
        let request = SiteRequest {
            name: &site.name,
            slug: &site.slug,
            status: site.status.as_str(),
        };
        let created: NetBoxSite = self
            .post("/api/dcim/sites/", &request, &format!("site {}", site.name))
            .await?;
        Ok(created.into())
    }

    async fn create_rack(&mut self, rack: NewRack) -> ProvisionResult<Rack> {
        let request = RackRequest {
            name: &rack.name,
            slug: &rack.slug,
            site: rack.site_id,
            status: rack.status.as_str(),
        };
        let created: NetBoxRack = self
            .post("/api/dcim/racks/", &request, &format!("rack {}", rack.name))
            .await?;
        Ok(Rack {
            id: created.id,
            name: created.name,
            slug: rack.slug,
            site_id: created.site.id,
            status: created.status.value,
        })
    }

    async fn create_device(&mut self, device: NewDevice) -> ProvisionResult<Device> {
        let request = DeviceRequest {
            name: &device.name,
            device_type: device.device_type.id,
            role: device.role.id,
            site: device.site_id,
            rack: device.rack_id,
            status: device.status.as_str(),
        };
        let created: NetBoxDevice = self
            .post("/api/dcim/devices/", &request, &format!("device {}", device.name))
            .await?;
        Ok(created.into())
    }

    async fn find_site_by_slug(&self, slug: &str) -> ProvisionResult<Option<Site>> {
        let url = self.config.api_url(&format!(
            "/api/dcim/sites/?slug={}",
            urlencoding::encode(slug)
        ));
        let response = self.get(&url, "site lookup").await?;
        let page: Page<NetBoxSite> = Self::decode(response, "site lookup").await?;

        Ok(page
            .results
            .into_iter()
            .find(|s| s.slug == slug)
            .map(Site::from))
    }

    async fn find_role_by_name(&self, name: &str) -> ProvisionResult<DeviceRole> {
        let url = self.config.api_url(&format!(
            "/api/dcim/device-roles/?name={}",
            urlencoding::encode(name)
        ));
        let response = self.get(&url, "device role lookup").await?;
        let page: Page<NetBoxRole> = Self::decode(response, "device role lookup").await?;

        page.results
            .into_iter()
            .find(|r| r.name == name)
            .map(DeviceRole::from)
            .ok_or_else(|| ProvisionError::MissingRole(name.to_string()))
    }

    async fn find_device_type(&self, reference: &DeviceTypeRef) -> ProvisionResult<DeviceType> {
        match reference {
            DeviceTypeRef::Id(id) => {
                let url = self.config.api_url(&format!("/api/dcim/device-types/{}/", id));
                let response = self.get(&url, "device type lookup").await?;
                if response.status() == StatusCode::NOT_FOUND {
                    return Err(ProvisionError::MissingDeviceType(reference.to_string()));
                }
                let device_type: NetBoxDeviceType =
                    Self::decode(response, "device type lookup").await?;
                Ok(device_type.into())
            }
            DeviceTypeRef::Slug(slug) => {
                let url = self.config.api_url(&format!(
                    "/api/dcim/device-types/?slug={}",
                    urlencoding::encode(slug)
                ));
                let response = self.get(&url, "device type lookup").await?;
                let page: Page<NetBoxDeviceType> =
                    Self::decode(response, "device type lookup").await?;
                page.results
                    .into_iter()
                    .find(|t| t.slug == *slug)
                    .map(DeviceType::from)
                    .ok_or_else(|| ProvisionError::MissingDeviceType(reference.to_string()))
            }
        }
    }

    async fn list_devices_by_site(&self, site_id: u64) -> ProvisionResult<Vec<Device>> {
        let mut devices = Vec::new();
        let mut next = Some(self.config.api_url(&format!(
            "/api/dcim/devices/?site_id={}&ordering=id&limit={}",
            site_id, self.config.page_size
        )));

        while let Some(url) = next {
            let response = self.get(&url, "device listing").await?;
            let page: Page<NetBoxDevice> = Self::decode(response, "device listing").await?;
            devices.extend(page.results.into_iter().map(Device::from));
            next = page.next;
        }

        if devices.iter().any(|d| d.name.is_empty()) {
            warn!("Site {} has unnamed devices", site_id);
        }
        Ok(devices)
    }

    fn name(&self) -> &str {
        "netbox"
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NetBoxClient {
        NetBoxClient::new(NetBoxConfig {
            base_url: server.uri(),
            api_token: "test-token".to_string(),
            timeout_secs: 5,
            page_size: 1,
        })
        .unwrap()
    }

    fn device_json(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "device_type": {
                "id": 3,
                "manufacturer": { "id": 1, "name": "Arista", "slug": "arista" },
                "model": "DCS-7050X3",
                "slug": "dcs-7050x3"
            },
            "role": { "id": 9, "name": "pe", "slug": "pe" },
            "site": { "id": 5 },
            "rack": { "id": 6 },
            "status": { "value": "planned", "label": "Planned" }
        })
    }

    fn page(results: Vec<Value>, next: Option<String>) -> Value {
        json!({
            "count": results.len(),
            "next": next,
            "previous": null,
            "results": results
        })
    }

    #[tokio::test]
    async fn test_create_site_posts_planned_site() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dcim/sites/"))
            .and(header("Authorization", "Token test-token"))
            .and(body_json(json!({
                "name": "foo12",
                "slug": "foo12",
                "status": "planned"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 5,
                "name": "foo12",
                "slug": "foo12",
                "status": { "value": "planned", "label": "Planned" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let site = client
            .create_site(NewSite {
                name: "foo12".to_string(),
                slug: "foo12".to_string(),
                status: Status::Planned,
            })
            .await
            .unwrap();

        assert_eq!(site.id, 5);
        assert_eq!(site.status, Status::Planned);
    }

    #[tokio::test]
    async fn test_rejected_post_is_duplicate_or_invalid_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dcim/sites/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "slug": ["site with this slug already exists."] })),
            )
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let err = client
            .create_site(NewSite {
                name: "foo12".to_string(),
                slug: "foo12".to_string(),
                status: Status::Planned,
            })
            .await
            .unwrap_err();

        match err {
            ProvisionError::DuplicateOrInvalidName(msg) => {
                assert!(msg.contains("already exists"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_host_communication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/dcim/racks/"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        let err = client
            .create_rack(NewRack {
                name: "foo12_a1".to_string(),
                slug: "foo12_a1".to_string(),
                site_id: 5,
                status: Status::Planned,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::HostCommunication(_)));
    }

    #[tokio::test]
    async fn test_list_devices_follows_next_link() {
        let server = MockServer::start().await;
        let next = format!(
            "{}/api/dcim/devices/?site_id=5&ordering=id&limit=1&offset=1",
            server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("offset", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page(vec![device_json(8, "pe1b1.foo12")], None)),
            )
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("site_id", "5"))
            .and(query_param("ordering", "id"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page(vec![device_json(7, "pe1a1.foo12")], Some(next))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let devices = client.list_devices_by_site(5).await.unwrap();

        let names: Vec<_> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["pe1a1.foo12", "pe1b1.foo12"]);
        assert_eq!(devices[0].device_type.manufacturer.name, "Arista");
    }

    #[tokio::test]
    async fn test_missing_role_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/device-roles/"))
            .and(query_param("name", "csvr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.find_role_by_name("csvr").await.unwrap_err();
        assert_eq!(err, ProvisionError::MissingRole("csvr".to_string()));
    }

    #[tokio::test]
    async fn test_role_lookup_requires_exact_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/device-roles/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                vec![json!({ "id": 2, "name": "PE", "slug": "pe" })],
                None,
            )))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.find_role_by_name("pe").await,
            Err(ProvisionError::MissingRole(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_device_type_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/device-types/42/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .find_device_type(&DeviceTypeRef::Id(42))
            .await
            .unwrap_err();
        assert_eq!(err, ProvisionError::MissingDeviceType("#42".to_string()));
    }

    #[tokio::test]
    async fn test_site_lookup_by_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/sites/"))
            .and(query_param("slug", "foo12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                vec![json!({
                    "id": 5,
                    "name": "foo12",
                    "slug": "foo12",
                    "status": { "value": "active", "label": "Active" }
                })],
                None,
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/sites/"))
            .and(query_param("slug", "bar34"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let found = client.find_site_by_slug("foo12").await.unwrap().unwrap();
        assert_eq!(found.status, Status::Active);
        assert!(client.find_site_by_slug("bar34").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dry_run_over_netbox_rejects_existing_site() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/sites/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                vec![json!({
                    "id": 5,
                    "name": "foo12",
                    "slug": "foo12",
                    "status": { "value": "active", "label": "Active" }
                })],
                None,
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut dry = crate::repository::DryRunRepository::new(client_for(&server));
        let err = dry
            .create_site(NewSite {
                name: "foo12".to_string(),
                slug: "foo12".to_string(),
                status: Status::Planned,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::DuplicateOrInvalidName(_)));
    }
}
