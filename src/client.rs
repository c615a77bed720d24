//! HTTPS client for the Vexata array management API

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use http_body_util::{BodyExt, Full};
use bytes::Bytes;
use hyper::body::Incoming;
use hyper::{Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::tls::build_tls_config;
use crate::types::*;

/// Storage array id; a management endpoint fronts a single array
pub const SA_ID: u64 = 0;
/// Node id used for hardware queries
pub const NODE_ID: u64 = 0;
/// The array insists on a `volSize` when snapshotting; its value is ignored
pub const DUMMY_SIZE: u64 = 1;

type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

/// Client for the management REST API of a Vexata storage array
///
/// Every operation performs exactly one HTTPS request with basic
/// authentication. Records come back as untyped JSON.
///
/// # Example
/// ```rust,no_run
/// use vexata_api::{Client, ClientConfig, TlsVerification};
///
/// #[tokio::main]
/// async fn main() -> Result<(), vexata_api::Error> {
///     // Default trust store, port 443
///     let client = Client::new("array.example.com", "admin", "secret")?;
///
///     // Self-signed array on a custom port
///     let client = Client::with_config(ClientConfig {
///         host: "10.0.0.5".to_string(),
///         port: Some(8443),
///         username: "admin".to_string(),
///         password: "secret".to_string(),
///         tls: TlsVerification::Disabled,
///         ..Default::default()
///     })?;
///
///     if client.test_connection().await? {
///         println!("{}", client.list_volumes().await?);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    authorization: HeaderValue,
    http_client: HttpClient<HttpsConnector, Full<Bytes>>,
}

impl Client {
    /// Create a client for `host` on the default port with default certificate verification
    ///
    /// # Errors
    /// Returns [`Error::Config`] if any argument is empty
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self> {
        let config = ClientConfig {
            host: host.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        // Validate host and port early
        let _: Uri = base_url(&config)
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid array address: {}", e)))?;

        let credentials = STANDARD.encode(format!("{}:{}", config.username, config.password));
        let mut authorization = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| Error::Config(format!("Invalid credentials: {}", e)))?;
        authorization.set_sensitive(true);

        let tls_config = build_tls_config(&config.tls)?;

        let https_connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_only()
            .enable_http1()
            .enable_http2()
            .build();

        let http_client = HttpClient::builder(TokioExecutor::new()).build(https_connector);

        Ok(Self {
            config: Arc::new(config),
            authorization,
            http_client,
        })
    }

    /// Get the connection descriptor
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an API path: `https://{host}[:{port}]{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", base_url(&self.config), path)
    }

    /// Internal request method.
    ///
    /// GET payloads become query parameters, POST/PUT payloads the JSON body.
    /// DELETE carries nothing.
    async fn request(
        &self,
        verb: Verb,
        path: &str,
        payload: Option<Value>,
    ) -> Result<Response<Incoming>> {
        let (url, body) = match (verb, payload) {
            (Verb::Get, Some(query)) => {
                let query = encode_query(&query)?;
                if query.is_empty() {
                    (self.url(path), None)
                } else {
                    (format!("{}?{}", self.url(path), query), None)
                }
            }
            (Verb::Delete, Some(_)) => {
                return Err(Error::InvalidArgument(format!(
                    "DELETE {} takes no payload",
                    path
                )));
            }
            (_, Some(payload)) => (self.url(path), Some(Bytes::from(serde_json::to_vec(&payload)?))),
            (_, None) => (self.url(path), None),
        };

        let uri: Uri = url
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("Invalid request URL: {}", e)))?;

        let mut builder = Request::builder()
            .method(verb.method())
            .uri(uri)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, "application/json");

        let req = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Full::new(body)),
            None => {
                builder = builder.header(http::header::CONTENT_LENGTH, 0);
                builder.body(Full::new(Bytes::new()))
            }
        };
        let req = req.map_err(request_error)?;

        debug!("Sending request: {} {}", verb.method(), path);

        let timeout = Duration::from_millis(self.config.timeout_ms);
        tokio::time::timeout(timeout, self.http_client.request(req))
            .await
            .map_err(|_| Error::Timeout(self.config.timeout_ms))?
            .map_err(|e| Error::Connection(format!("Request failed: {}", e)))
    }

    /// Read response body to bytes
    async fn read_body_to_bytes(&self, body: Incoming) -> Result<Bytes> {
        let timeout = Duration::from_millis(self.config.timeout_ms);
        let collected = tokio::time::timeout(timeout, body.collect())
            .await
            .map_err(|_| Error::Timeout(self.config.timeout_ms))?
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        Ok(collected.to_bytes())
    }

    /// Issue a GET/POST/PUT and check the status against `expected`.
    async fn call(
        &self,
        verb: Verb,
        path: &str,
        payload: Option<Value>,
        expected: Option<SuccessCode>,
    ) -> Result<Value> {
        let expected = expected.unwrap_or(verb.default_success());
        let response = self.request(verb, path, payload).await?;
        let status = response.status();

        if status != expected.status() {
            let body = self.read_body_to_bytes(response.into_body()).await?;
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(
                "{} {} returned {} (expected {}): {}",
                verb.method(),
                path,
                status.as_u16(),
                expected.status().as_u16(),
                body
            );
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                expected: expected.status().as_u16(),
                body,
            });
        }

        if expected == SuccessCode::PostNoContent {
            // No response body
            return Ok(Value::Object(Map::new()));
        }

        let body = self.read_body_to_bytes(response.into_body()).await?;
        parse_body(&body)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: Option<Value>,
        expected: Option<SuccessCode>,
    ) -> Result<Value> {
        self.call(Verb::Get, path, query, expected).await
    }

    pub(crate) async fn post<T: Serialize>(
        &self,
        path: &str,
        body: Option<&T>,
        expected: Option<SuccessCode>,
    ) -> Result<Value> {
        let payload = body.map(serde_json::to_value).transpose()?;
        self.call(Verb::Post, path, payload, expected).await
    }

    pub(crate) async fn put<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        expected: Option<SuccessCode>,
    ) -> Result<Value> {
        let payload = serde_json::to_value(body)?;
        self.call(Verb::Put, path, Some(payload), expected).await
    }

    /// `Ok(true)` iff the array answered with the expected status.
    /// Other statuses are logged and reported as `Ok(false)`.
    pub(crate) async fn delete(&self, path: &str, expected: Option<SuccessCode>) -> Result<bool> {
        let expected = expected.unwrap_or(Verb::Delete.default_success());
        let response = self.request(Verb::Delete, path, None).await?;
        let status = response.status();
        if status == expected.status() {
            return Ok(true);
        }

        let body = self.read_body_to_bytes(response.into_body()).await?;
        warn!(
            "DELETE {} returned {} (expected {}): {}",
            path,
            status.as_u16(),
            expected.status().as_u16(),
            String::from_utf8_lossy(&body)
        );
        Ok(false)
    }

    /// Check that the management endpoint answers
    ///
    /// # Returns
    /// true if `GET /api/mgmtping` answers 200, false for any other status.
    /// Transport failures are errors.
    ///
    /// # Example
    /// ```rust,no_run
    /// # use vexata_api::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), vexata_api::Error> {
    /// # let client = Client::new("array", "admin", "secret")?;
    /// if client.test_connection().await? {
    ///     println!("Array is reachable");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self.request(Verb::Get, "/api/mgmtping", None).await?;
        Ok(response.status() == SuccessCode::GetOk.status())
    }

    /// Drive groups of the node
    pub async fn drivegroups(&self) -> Result<Value> {
        self.get(&format!("/api/nodes/{}/drivegroups", NODE_ID), None, None).await
    }

    /// Node description
    pub async fn node(&self) -> Result<Value> {
        self.get(&format!("/api/nodes/{}", NODE_ID), None, None).await
    }

    /// IO controllers of the node
    pub async fn iocs(&self) -> Result<Value> {
        self.get(&format!("/api/nodes/{}/iocs", NODE_ID), None, None).await
    }

    /// Hardware sensors of the node
    pub async fn sensors(&self) -> Result<Value> {
        self.get(&format!("/api/nodes/{}/sensors", NODE_ID), None, None).await
    }

    /// Storage array information
    pub async fn sa_info(&self) -> Result<Value> {
        self.get(&format!("/api/storagearrays/{}", SA_ID), None, None).await
    }

    // ----- Volumes -----

    /// List all volumes
    pub async fn list_volumes(&self) -> Result<Value> {
        self.get(&volumes_path(), None, None).await
    }

    /// Look a volume up by uuid
    ///
    /// # Returns
    /// A list of volumes, ideally with a single entry
    pub async fn find_volume_by_uuid(&self, volume_uuid: &str) -> Result<Value> {
        let query = serde_json::json!({ "uuid": volume_uuid });
        self.get(&volumes_path(), Some(query), None).await
    }

    /// Create a volume
    ///
    /// # Arguments
    /// * `vol_name` - Volume name
    /// * `vol_desc` - Volume description
    /// * `vol_size_mib` - Size in MiB
    /// * `vol_uuid` - Optional uuid to assign
    ///
    /// # Returns
    /// The created volume record
    ///
    /// # Example
    /// ```rust,no_run
    /// # use vexata_api::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), vexata_api::Error> {
    /// # let client = Client::new("array", "admin", "secret")?;
    /// let volume = client.create_volume("db01", "database", 10240, None).await?;
    /// println!("Created volume {}", volume["id"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_volume(
        &self,
        vol_name: &str,
        vol_desc: &str,
        vol_size_mib: u64,
        vol_uuid: Option<&str>,
    ) -> Result<Value> {
        let body = VolumeCreate {
            name: vol_name,
            vol_size: vol_size_mib,
            description: vol_desc,
            voluuid: vol_uuid.filter(|u| !u.is_empty()),
        };
        self.post(&volumes_path(), Some(&body), None).await
    }

    /// Grow a volume to `new_size_mib`; name and description are sent back unchanged
    pub async fn grow_volume(
        &self,
        orig_vol_name: &str,
        orig_vol_desc: &str,
        orig_vol_id: u64,
        new_size_mib: u64,
    ) -> Result<Value> {
        let body = VolumeGrow {
            name: orig_vol_name,
            description: orig_vol_desc,
            vol_size: new_size_mib,
        };
        self.put(&volume_path(orig_vol_id), &body, None).await
    }

    /// Delete a volume
    pub async fn delete_volume(&self, vol_id: u64) -> Result<bool> {
        self.delete(&volume_path(vol_id), None).await
    }

    // ----- Volume snapshots & clones -----

    /// List the snapshots of a volume
    pub async fn list_volsnaps(&self, vol_id: u64) -> Result<Value> {
        self.get(&volsnaps_path(vol_id), None, None).await
    }

    /// Snapshots of `parent_vol_id` whose `voluuid` equals `snap_uuid`
    ///
    /// The array cannot filter snapshots by uuid, so the full list is fetched
    /// and filtered lazily.
    ///
    /// # Returns
    /// `None` if the array did not answer the list request with 200
    ///
    /// # Example
    /// ```rust,no_run
    /// # use vexata_api::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), vexata_api::Error> {
    /// # let client = Client::new("array", "admin", "secret")?;
    /// if let Some(mut matches) = client.find_volsnap_by_uuid(64, "6f1c...").await? {
    ///     if let Some(snap) = matches.next() {
    ///         println!("Snapshot id {}", snap["id"]);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_volsnap_by_uuid(
        &self,
        parent_vol_id: u64,
        snap_uuid: &str,
    ) -> Result<Option<SnapshotMatches>> {
        let snapshots = match self.get(&volsnaps_path(parent_vol_id), None, None).await {
            Ok(snapshots) => snapshots,
            Err(Error::UnexpectedStatus { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        match snapshots {
            Value::Array(snapshots) => Ok(Some(SnapshotMatches::new(snapshots, snap_uuid))),
            other => Err(Error::UnexpectedBody(format!(
                "snapshot list of volume {} is not an array: {}",
                parent_vol_id, other
            ))),
        }
    }

    /// Snapshot a volume
    pub async fn create_volsnap(
        &self,
        parent_vol_id: u64,
        snap_name: &str,
        snap_desc: &str,
        snap_uuid: Option<&str>,
    ) -> Result<Value> {
        let body = VolumeCreate {
            name: snap_name,
            vol_size: DUMMY_SIZE,
            description: snap_desc,
            voluuid: snap_uuid.filter(|u| !u.is_empty()),
        };
        self.post(&volsnaps_path(parent_vol_id), Some(&body), None).await
    }

    /// Delete a volume snapshot
    pub async fn delete_volsnap(&self, parent_vol_id: u64, snap_id: u64) -> Result<bool> {
        let path = format!("{}/{}", volsnaps_path(parent_vol_id), snap_id);
        self.delete(&path, None).await
    }

    /// Roll a volume back to one of its snapshots
    ///
    /// # Returns
    /// An empty object on success
    pub async fn restore_volume_from_volsnap(&self, parent_vol_id: u64, snap_id: u64) -> Result<Value> {
        let path = format!("{}/{}/restore", volsnaps_path(parent_vol_id), snap_id);
        self.post::<()>(&path, None, Some(SuccessCode::PostNoContent)).await
    }

    /// Clone a volume snapshot into a new volume
    pub async fn clone_volsnap_to_new_volume(
        &self,
        snap_id: u64,
        vol_name: &str,
        vol_desc: &str,
        vol_uuid: Option<&str>,
    ) -> Result<Value> {
        let path = format!("/api/storagearrays/{}/snapshots/{}/clones", SA_ID, snap_id);
        let body = NamedCreate {
            name: vol_name,
            description: vol_desc,
            voluuid: vol_uuid.filter(|u| !u.is_empty()),
        };
        self.post(&path, Some(&body), None).await
    }

    // ----- Initiators -----

    /// List host initiators known to the array
    pub async fn list_initiators(&self) -> Result<Value> {
        self.get(&initiators_path(), None, None).await
    }

    /// Register an initiator; `ini_addr` is a WWN in hex:colon notation
    pub async fn add_initiator(&self, ini_name: &str, ini_desc: &str, ini_addr: &str) -> Result<Value> {
        let body = InitiatorCreate {
            name: ini_name,
            description: ini_desc,
            member_id: ini_addr,
        };
        self.post(&initiators_path(), Some(&body), None).await
    }

    /// Remove an initiator
    pub async fn remove_initiator(&self, ini_id: u64) -> Result<bool> {
        self.delete(&format!("{}/{}", initiators_path(), ini_id), None).await
    }

    // ----- Array ports -----

    /// List the array's target ports
    pub async fn list_saports(&self) -> Result<Value> {
        self.get(&format!("/api/storagearrays/{}/storagearrayports", SA_ID), None, None)
            .await
    }

    // ----- Volume groups -----

    /// List volume groups
    pub async fn list_vgs(&self) -> Result<Value> {
        self.get(&vgs_path(), None, None).await
    }

    /// Fetch a single volume group
    pub async fn find_vg_by_id(&self, vg_id: u64) -> Result<Value> {
        self.get(&vg_path(vg_id), None, None).await
    }

    /// Create a volume group from existing volumes
    pub async fn create_vg(&self, vg_name: &str, vg_desc: &str, vol_ids: &[u64]) -> Result<Value> {
        let body = VolumeGroupChange {
            name: vg_name,
            description: vg_desc,
            add_volumes: vol_ids,
            delete_volumes: None,
        };
        self.post(&vgs_path(), Some(&body), None).await
    }

    /// Delete a volume group
    pub async fn delete_vg(&self, vg_id: u64) -> Result<bool> {
        self.delete(&vg_path(vg_id), None).await
    }

    /// Rename a volume group and add/remove member volumes
    pub async fn modify_vg(
        &self,
        vg_id: u64,
        vg_name: &str,
        vg_desc: &str,
        add_vol_ids: &[u64],
        rm_vol_ids: &[u64],
    ) -> Result<Value> {
        let body = VolumeGroupChange {
            name: vg_name,
            description: vg_desc,
            add_volumes: add_vol_ids,
            delete_volumes: Some(rm_vol_ids),
        };
        self.put(&vg_path(vg_id), &body, None).await
    }

    // ----- Volume group snapshots & clones -----

    /// List the snapshots of a volume group
    pub async fn list_vgsnaps(&self, vg_id: u64) -> Result<Value> {
        self.get(&vgsnaps_path(vg_id), None, None).await
    }

    /// Fetch a single volume group snapshot
    pub async fn find_vgsnap_by_id(&self, vg_id: u64, snap_id: u64) -> Result<Value> {
        self.get(&format!("{}/{}", vgsnaps_path(vg_id), snap_id), None, None).await
    }

    /// Snapshot a volume group
    pub async fn create_vgsnap(&self, vg_id: u64, snap_name: &str, snap_desc: &str) -> Result<Value> {
        let body = NamedCreate {
            name: snap_name,
            description: snap_desc,
            voluuid: None,
        };
        self.post(&vgsnaps_path(vg_id), Some(&body), None).await
    }

    /// Delete a volume group snapshot
    pub async fn delete_vgsnap(&self, vg_id: u64, snap_id: u64) -> Result<bool> {
        self.delete(&format!("{}/{}", vgsnaps_path(vg_id), snap_id), None).await
    }

    /// Roll a volume group back to one of its snapshots
    ///
    /// # Returns
    /// An empty object on success
    pub async fn restore_vg_from_vgsnap(&self, vg_id: u64, snap_id: u64) -> Result<Value> {
        let path = format!(
            "{}/snapshotgroups/{}/restorevolumegroup",
            vg_path(vg_id),
            snap_id
        );
        self.post::<()>(&path, None, Some(SuccessCode::PostNoContent)).await
    }

    /// Clone a volume group snapshot into a new volume group
    pub async fn clone_vgsnap_to_new_vg(&self, snap_id: u64, vg_name: &str, vg_desc: &str) -> Result<Value> {
        let path = format!("/api/storagearrays/{}/snapshotgroups/{}/clones", SA_ID, snap_id);
        let body = NamedCreate {
            name: vg_name,
            description: vg_desc,
            voluuid: None,
        };
        self.post(&path, Some(&body), None).await
    }

    // ----- Initiator groups -----

    /// List initiator groups
    pub async fn list_igs(&self) -> Result<Value> {
        self.get(&igs_path(), None, None).await
    }

    /// Create an initiator group, optionally with a host profile type
    pub async fn create_ig(
        &self,
        ig_name: &str,
        ig_desc: &str,
        ini_ids: &[u64],
        hostprofile: Option<&str>,
    ) -> Result<Value> {
        let body = InitiatorGroupChange {
            name: ig_name,
            description: ig_desc,
            add_initiators: ini_ids,
            delete_initiators: None,
            host_profile_type: hostprofile.filter(|p| !p.is_empty()),
        };
        self.post(&igs_path(), Some(&body), None).await
    }

    /// Delete an initiator group
    pub async fn delete_ig(&self, ig_id: u64) -> Result<bool> {
        self.delete(&format!("{}/{}", igs_path(), ig_id), None).await
    }

    /// Rename an initiator group and add/remove member initiators
    pub async fn modify_ig(
        &self,
        ig_id: u64,
        ig_name: &str,
        ig_desc: &str,
        add_ini_ids: &[u64],
        rm_ini_ids: &[u64],
    ) -> Result<Value> {
        let body = InitiatorGroupChange {
            name: ig_name,
            description: ig_desc,
            add_initiators: add_ini_ids,
            delete_initiators: Some(rm_ini_ids),
            host_profile_type: None,
        };
        self.put(&format!("{}/{}", igs_path(), ig_id), &body, None).await
    }

    // ----- Port groups -----

    /// List port groups
    pub async fn list_pgs(&self) -> Result<Value> {
        self.get(&pgs_path(), None, None).await
    }

    /// Create a port group from array ports
    pub async fn create_pg(&self, pg_name: &str, pg_desc: &str, saport_ids: &[u64]) -> Result<Value> {
        let body = PortGroupChange {
            name: pg_name,
            description: pg_desc,
            add_ports: saport_ids,
            delete_ports: None,
        };
        self.post(&pgs_path(), Some(&body), None).await
    }

    /// Delete a port group
    pub async fn delete_pg(&self, pg_id: u64) -> Result<bool> {
        self.delete(&format!("{}/{}", pgs_path(), pg_id), None).await
    }

    /// Rename a port group and add/remove member ports
    pub async fn modify_pg(
        &self,
        pg_id: u64,
        pg_name: &str,
        pg_desc: &str,
        add_port_ids: &[u64],
        rm_port_ids: &[u64],
    ) -> Result<Value> {
        let body = PortGroupChange {
            name: pg_name,
            description: pg_desc,
            add_ports: add_port_ids,
            delete_ports: Some(rm_port_ids),
        };
        self.put(&format!("{}/{}", pgs_path(), pg_id), &body, None).await
    }

    // ----- Export groups -----

    /// List export groups
    pub async fn list_egs(&self) -> Result<Value> {
        self.get(&egs_path(), None, None).await
    }

    /// Export a volume group to an initiator group through a port group
    ///
    /// # Arguments
    /// * `eg_tuple` - `[vg_id, ig_id, pg_id]`
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `eg_tuple` does not hold exactly three ids;
    /// nothing is sent in that case.
    pub async fn create_eg(&self, eg_name: &str, eg_desc: &str, eg_tuple: &[u64]) -> Result<Value> {
        let body = ExportGroupChange {
            name: eg_name,
            description: eg_desc,
            export_tuple: ExportTuple::try_from(eg_tuple)?,
        };
        self.post(&egs_path(), Some(&body), None).await
    }

    /// Delete an export group
    pub async fn delete_eg(&self, eg_id: u64) -> Result<bool> {
        self.delete(&format!("{}/{}", egs_path(), eg_id), None).await
    }

    /// Rename an export group and rebind it to another `[vg_id, ig_id, pg_id]`
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `eg_tuple` does not hold exactly three ids
    pub async fn modify_eg(
        &self,
        eg_id: u64,
        eg_name: &str,
        eg_desc: &str,
        eg_tuple: &[u64],
    ) -> Result<Value> {
        let body = ExportGroupChange {
            name: eg_name,
            description: eg_desc,
            export_tuple: ExportTuple::try_from(eg_tuple)?,
        };
        self.put(&format!("{}/{}", egs_path(), eg_id), &body, None).await
    }

    // ----- LUN mappings -----

    /// LUN mappings visible to an initiator through an array port
    pub async fn list_lun_mappings(&self, ini_id: u64, saport_id: u64) -> Result<Value> {
        let path = format!("{}/{}/ports/{}", initiators_path(), ini_id, saport_id);
        self.get(&path, None, None).await
    }
}

fn base_url(config: &ClientConfig) -> String {
    match config.port {
        Some(port) => format!("https://{}:{}", config.host, port),
        None => format!("https://{}", config.host),
    }
}

/// Query string for a GET payload; `null` fields are skipped.
fn encode_query(payload: &Value) -> Result<String> {
    let Value::Object(fields) = payload else {
        return Err(Error::InvalidArgument(format!(
            "GET payload must be a JSON object, got {}",
            payload
        )));
    };

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::String(s) => {
                serializer.append_pair(key, s);
            }
            other => {
                serializer.append_pair(key, &other.to_string());
            }
        }
    }
    Ok(serializer.finish())
}

fn request_error(e: http::Error) -> Error {
    Error::InvalidRequest(format!("Failed to build request: {}", e))
}

fn parse_body(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

fn volumes_path() -> String {
    format!("/api/storagearrays/{}/volumes", SA_ID)
}

fn volume_path(vol_id: u64) -> String {
    format!("{}/{}", volumes_path(), vol_id)
}

fn volsnaps_path(vol_id: u64) -> String {
    format!("{}/snapshots", volume_path(vol_id))
}

fn initiators_path() -> String {
    format!("/api/storagearrays/{}/initiators", SA_ID)
}

fn vgs_path() -> String {
    format!("/api/storagearrays/{}/volumegroups", SA_ID)
}

fn vg_path(vg_id: u64) -> String {
    format!("{}/{}", vgs_path(), vg_id)
}

fn vgsnaps_path(vg_id: u64) -> String {
    format!("{}/snapshots", vg_path(vg_id))
}

fn igs_path() -> String {
    format!("/api/storagearrays/{}/initiatorgroups", SA_ID)
}

fn pgs_path() -> String {
    format!("/api/storagearrays/{}/portgroups", SA_ID)
}

fn egs_path() -> String {
    format!("/api/storagearrays/{}/exportgroups", SA_ID)
}
