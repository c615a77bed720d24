//! Synchronous facade over [`crate::Client`]
//!
//! Each call blocks the current thread for one round-trip to the array. The
//! client owns a single-threaded tokio runtime, so it must not be used from
//! inside another async runtime.
//!
//! ```rust,no_run
//! use vexata_api::blocking::Client;
//!
//! fn main() -> Result<(), vexata_api::Error> {
//!     let client = Client::new("array.example.com", "admin", "secret")?;
//!     let deleted = client.delete_volume(64)?;
//!     println!("deleted: {}", deleted);
//!     Ok(())
//! }
//! ```

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::SnapshotMatches;

/// Blocking Vexata API client
pub struct Client {
    inner: crate::Client,
    runtime: Runtime,
}

impl Client {
    /// Create a blocking client; see [`crate::Client::new`]
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self> {
        let config = ClientConfig {
            host: host.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a blocking client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = crate::Client::with_config(config)?;
        Ok(Self { inner, runtime })
    }

    /// The async client this facade drives
    pub fn inner(&self) -> &crate::Client {
        &self.inner
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        self.inner.url(path)
    }
}

macro_rules! blocking_ops {
    ($( fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty; )*) => {
        impl Client {
            $(
                #[doc = concat!("Blocking form of [`crate::Client::", stringify!($name), "`]")]
                pub fn $name(&self $(, $arg: $ty)*) -> Result<$ret> {
                    self.runtime.block_on(self.inner.$name($($arg),*))
                }
            )*
        }
    };
}

blocking_ops! {
    fn test_connection(&self) -> bool;
    fn drivegroups(&self) -> Value;
    fn node(&self) -> Value;
    fn iocs(&self) -> Value;
    fn sensors(&self) -> Value;
    fn sa_info(&self) -> Value;

    fn list_volumes(&self) -> Value;
    fn find_volume_by_uuid(&self, volume_uuid: &str) -> Value;
    fn create_volume(&self, vol_name: &str, vol_desc: &str, vol_size_mib: u64, vol_uuid: Option<&str>) -> Value;
    fn grow_volume(&self, orig_vol_name: &str, orig_vol_desc: &str, orig_vol_id: u64, new_size_mib: u64) -> Value;
    fn delete_volume(&self, vol_id: u64) -> bool;

    fn list_volsnaps(&self, vol_id: u64) -> Value;
    fn find_volsnap_by_uuid(&self, parent_vol_id: u64, snap_uuid: &str) -> Option<SnapshotMatches>;
    fn create_volsnap(&self, parent_vol_id: u64, snap_name: &str, snap_desc: &str, snap_uuid: Option<&str>) -> Value;
    fn delete_volsnap(&self, parent_vol_id: u64, snap_id: u64) -> bool;
    fn restore_volume_from_volsnap(&self, parent_vol_id: u64, snap_id: u64) -> Value;
    fn clone_volsnap_to_new_volume(&self, snap_id: u64, vol_name: &str, vol_desc: &str, vol_uuid: Option<&str>) -> Value;

    fn list_initiators(&self) -> Value;
    fn add_initiator(&self, ini_name: &str, ini_desc: &str, ini_addr: &str) -> Value;
    fn remove_initiator(&self, ini_id: u64) -> bool;

    fn list_saports(&self) -> Value;

    fn list_vgs(&self) -> Value;
    fn find_vg_by_id(&self, vg_id: u64) -> Value;
    fn create_vg(&self, vg_name: &str, vg_desc: &str, vol_ids: &[u64]) -> Value;
    fn delete_vg(&self, vg_id: u64) -> bool;
    fn modify_vg(&self, vg_id: u64, vg_name: &str, vg_desc: &str, add_vol_ids: &[u64], rm_vol_ids: &[u64]) -> Value;

    fn list_vgsnaps(&self, vg_id: u64) -> Value;
    fn find_vgsnap_by_id(&self, vg_id: u64, snap_id: u64) -> Value;
    fn create_vgsnap(&self, vg_id: u64, snap_name: &str, snap_desc: &str) -> Value;
    fn delete_vgsnap(&self, vg_id: u64, snap_id: u64) -> bool;
    fn restore_vg_from_vgsnap(&self, vg_id: u64, snap_id: u64) -> Value;
    fn clone_vgsnap_to_new_vg(&self, snap_id: u64, vg_name: &str, vg_desc: &str) -> Value;

    fn list_igs(&self) -> Value;
    fn create_ig(&self, ig_name: &str, ig_desc: &str, ini_ids: &[u64], hostprofile: Option<&str>) -> Value;
    fn delete_ig(&self, ig_id: u64) -> bool;
    fn modify_ig(&self, ig_id: u64, ig_name: &str, ig_desc: &str, add_ini_ids: &[u64], rm_ini_ids: &[u64]) -> Value;

    fn list_pgs(&self) -> Value;
    fn create_pg(&self, pg_name: &str, pg_desc: &str, saport_ids: &[u64]) -> Value;
    fn delete_pg(&self, pg_id: u64) -> bool;
    fn modify_pg(&self, pg_id: u64, pg_name: &str, pg_desc: &str, add_port_ids: &[u64], rm_port_ids: &[u64]) -> Value;

    fn list_egs(&self) -> Value;
    fn create_eg(&self, eg_name: &str, eg_desc: &str, eg_tuple: &[u64]) -> Value;
    fn delete_eg(&self, eg_id: u64) -> bool;
    fn modify_eg(&self, eg_id: u64, eg_name: &str, eg_desc: &str, eg_tuple: &[u64]) -> Value;

    fn list_lun_mappings(&self, ini_id: u64, saport_id: u64) -> Value;
}
