//! Request payloads and response helpers for the Vexata REST API
//!
//! Records returned by the array stay untyped [`serde_json::Value`]s; the
//! array owns their schema. Request bodies are typed so that the fixed field
//! names the array expects are spelled in exactly one place.

use hyper::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// HTTP verbs the array API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Read a resource; payload goes to the query string
    Get,
    /// Create a resource or trigger an action; payload is the JSON body
    Post,
    /// Modify a resource; payload is the JSON body
    Put,
    /// Delete a resource; no payload
    Delete,
}

impl Verb {
    pub(crate) fn method(self) -> hyper::Method {
        match self {
            Verb::Get => hyper::Method::GET,
            Verb::Post => hyper::Method::POST,
            Verb::Put => hyper::Method::PUT,
            Verb::Delete => hyper::Method::DELETE,
        }
    }

    /// Status the array answers with when this verb succeeds
    pub fn default_success(self) -> SuccessCode {
        match self {
            Verb::Get => SuccessCode::GetOk,
            Verb::Post => SuccessCode::PostOk,
            Verb::Put => SuccessCode::PutOk,
            Verb::Delete => SuccessCode::DeleteOk,
        }
    }
}

/// Expected success statuses, passed per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCode {
    /// 200 for reads
    GetOk,
    /// 201 for creates
    PostOk,
    /// 204 for actions (restores) that answer without a body
    PostNoContent,
    /// 200 for modifications
    PutOk,
    /// 204 for deletes
    DeleteOk,
}

impl SuccessCode {
    /// The HTTP status this code stands for
    pub fn status(self) -> StatusCode {
        match self {
            SuccessCode::GetOk | SuccessCode::PutOk => StatusCode::OK,
            SuccessCode::PostOk => StatusCode::CREATED,
            SuccessCode::PostNoContent | SuccessCode::DeleteOk => StatusCode::NO_CONTENT,
        }
    }
}

/// The (volume group, initiator group, port group) triple of an export group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportTuple {
    /// Volume group id
    #[serde(rename = "vgId")]
    pub vg_id: u64,
    /// Initiator group id
    #[serde(rename = "igId")]
    pub ig_id: u64,
    /// Port group id
    #[serde(rename = "pgId")]
    pub pg_id: u64,
}

impl<'a> TryFrom<&'a [u64]> for ExportTuple {
    type Error = Error;

    fn try_from(ids: &'a [u64]) -> Result<Self> {
        match ids {
            [vg_id, ig_id, pg_id] => Ok(ExportTuple {
                vg_id: *vg_id,
                ig_id: *ig_id,
                pg_id: *pg_id,
            }),
            _ => Err(Error::InvalidArgument(format!(
                "export group tuple needs exactly 3 ids (vg, ig, pg), got {}",
                ids.len()
            ))),
        }
    }
}

/// Lazy, single-pass iterator over the snapshots of a volume whose
/// `voluuid` matches a given value. Order follows the fetched list.
#[derive(Debug)]
pub struct SnapshotMatches {
    snapshots: std::vec::IntoIter<Value>,
    voluuid: String,
}

impl SnapshotMatches {
    pub(crate) fn new(snapshots: Vec<Value>, voluuid: &str) -> Self {
        Self {
            snapshots: snapshots.into_iter(),
            voluuid: voluuid.to_string(),
        }
    }
}

impl Iterator for SnapshotMatches {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let voluuid = self.voluuid.as_str();
        self.snapshots
            .find(|snap| snap.get("voluuid").and_then(Value::as_str) == Some(voluuid))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.snapshots.size_hint().1)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VolumeCreate<'a> {
    pub name: &'a str,
    #[serde(rename = "volSize")]
    pub vol_size: u64,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voluuid: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VolumeGrow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "volSize")]
    pub vol_size: u64,
}

/// Clone targets and volume group snapshots only carry a name and description
#[derive(Debug, Serialize)]
pub(crate) struct NamedCreate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voluuid: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InitiatorCreate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "memberId")]
    pub member_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeGroupChange<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub add_volumes: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_volumes: Option<&'a [u64]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitiatorGroupChange<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub add_initiators: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_initiators: Option<&'a [u64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_profile_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PortGroupChange<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub add_ports: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_ports: Option<&'a [u64]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExportGroupChange<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "exportGroup3Tuple")]
    pub export_tuple: ExportTuple,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_codes() {
        assert_eq!(Verb::Get.default_success().status(), StatusCode::OK);
        assert_eq!(Verb::Post.default_success().status(), StatusCode::CREATED);
        assert_eq!(Verb::Put.default_success().status(), StatusCode::OK);
        assert_eq!(Verb::Delete.default_success().status(), StatusCode::NO_CONTENT);
        assert_eq!(SuccessCode::PostNoContent.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_export_tuple_arity() {
        let tuple = ExportTuple::try_from(&[1u64, 2, 3][..]).unwrap();
        assert_eq!(tuple, ExportTuple { vg_id: 1, ig_id: 2, pg_id: 3 });

        for ids in [&[][..], &[1][..], &[1, 2][..], &[1, 2, 3, 4][..]] {
            match ExportTuple::try_from(ids) {
                Err(Error::InvalidArgument(msg)) => assert!(msg.contains("exactly 3")),
                other => panic!("Expected InvalidArgument, got: {:?}", other),
            }
        }
    }

    #[test]
    fn test_export_group_wire_format() {
        let body = ExportGroupChange {
            name: "eg_1",
            description: "export",
            export_tuple: ExportTuple { vg_id: 4, ig_id: 5, pg_id: 6 },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "eg_1",
                "description": "export",
                "exportGroup3Tuple": {"vgId": 4, "igId": 5, "pgId": 6}
            })
        );
    }

    #[test]
    fn test_volume_create_omits_missing_uuid() {
        let body = VolumeCreate {
            name: "v1",
            vol_size: 1024,
            description: "data",
            voluuid: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"name": "v1", "volSize": 1024, "description": "data"})
        );

        let body = VolumeCreate { voluuid: Some("uuid-1"), ..body };
        assert_eq!(serde_json::to_value(&body).unwrap()["voluuid"], "uuid-1");
    }

    #[test]
    fn test_group_change_field_names() {
        let vg = VolumeGroupChange {
            name: "vg",
            description: "",
            add_volumes: &[64, 65],
            delete_volumes: Some(&[66]),
        };
        assert_eq!(
            serde_json::to_value(&vg).unwrap(),
            json!({"name": "vg", "description": "", "addVolumes": [64, 65], "deleteVolumes": [66]})
        );

        let ig = InitiatorGroupChange {
            name: "ig",
            description: "hosts",
            add_initiators: &[2, 3],
            delete_initiators: None,
            host_profile_type: Some("VMWARE"),
        };
        assert_eq!(
            serde_json::to_value(&ig).unwrap(),
            json!({"name": "ig", "description": "hosts", "addInitiators": [2, 3], "hostProfileType": "VMWARE"})
        );

        let pg = PortGroupChange {
            name: "pg",
            description: "",
            add_ports: &[],
            delete_ports: Some(&[10, 11]),
        };
        assert_eq!(
            serde_json::to_value(&pg).unwrap(),
            json!({"name": "pg", "description": "", "addPorts": [], "deletePorts": [10, 11]})
        );
    }

    #[test]
    fn test_snapshot_matches_filters_in_order() {
        let snaps = vec![
            json!({"id": 72, "voluuid": "a"}),
            json!({"id": 73, "voluuid": "b"}),
            json!({"id": 74}),
            json!({"id": 75, "voluuid": "a"}),
            json!({"id": 76, "voluuid": "A"}),
        ];
        let ids: Vec<_> = SnapshotMatches::new(snaps, "a")
            .map(|s| s["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![72, 75]);
    }

    #[test]
    fn test_snapshot_matches_single_pass() {
        let mut matches = SnapshotMatches::new(vec![json!({"voluuid": "x"})], "x");
        assert!(matches.next().is_some());
        assert!(matches.next().is_none());
        assert!(matches.next().is_none());
    }
}
