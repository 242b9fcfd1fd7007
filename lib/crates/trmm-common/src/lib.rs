pub mod mesh;
pub mod types;

pub use mesh::{MESH_ID_PREFIX, MeshRecord, MeshesFrame, MeshesRequest};
pub use types::*;
