//! Frames exchanged with the companion service over `control.ashx`.

use serde::{Deserialize, Serialize};

/// Literal prefix the companion service puts in front of device-group ids.
pub const MESH_ID_PREFIX: &str = "mesh//";

/// Discovery request asking for every device group visible to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshesRequest {
    pub action: String,
    #[serde(rename = "responseid")]
    pub response_id: String,
}

impl MeshesRequest {
    #[must_use]
    pub fn new(response_id: &str) -> Self {
        Self {
            action: "meshes".to_string(),
            response_id: response_id.to_string(),
        }
    }
}

/// Any frame pushed by the server. Only `action == "meshes"` frames carry
/// device groups; everything else decodes with an empty list, and frames
/// without an `action` field decode with an empty action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshesFrame {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub meshes: Vec<MeshRecord>,
}

/// One device group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeshRecord {
    pub name: String,
    #[serde(rename = "_id")]
    pub id: String,
}
