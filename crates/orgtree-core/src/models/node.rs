//! Organization node model.
//!
//! Cities, departments and employees share one record shape. The parent
//! references form a forest: cities at the roots, departments nested under
//! cities (or under other departments), employees at the leaves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primary key of an [`OrgNode`].
pub type NodeId = i64;

/// Kind of an organization node.
///
/// Stored and exchanged as the integer codes `1`, `2` and `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NodeKind {
    City,
    Department,
    Employee,
}

impl NodeKind {
    /// Wire code used by seed snapshots and storage backends.
    pub fn code(self) -> u8 {
        match self {
            Self::City => 1,
            Self::Department => 2,
            Self::Employee => 3,
        }
    }
}

impl TryFrom<u8> for NodeKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::City),
            2 => Ok(Self::Department),
            3 => Ok(Self::Employee),
            other => Err(format!("unknown node type code {other}")),
        }
    }
}

impl From<NodeKind> for u8 {
    fn from(kind: NodeKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::City => "city",
            Self::Department => "department",
            Self::Employee => "employee",
        };
        f.write_str(label)
    }
}

/// A city, department or employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: NodeId,
    /// Enclosing node. `None` only for roots.
    #[serde(rename = "ParentId")]
    pub parent_id: Option<NodeId>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: NodeKind,
    /// Nearest ancestor city of an employee. Always `None` for cities and
    /// departments. Populated by [`crate::resolver::resolve`].
    #[serde(rename = "CityId", default)]
    pub city_id: Option<NodeId>,
}

impl OrgNode {
    pub fn new(
        id: NodeId,
        parent_id: Option<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            kind,
            city_id: None,
        }
    }

    pub fn is_city(&self) -> bool {
        self.kind == NodeKind::City
    }

    pub fn is_employee(&self) -> bool {
        self.kind == NodeKind::Employee
    }
}
