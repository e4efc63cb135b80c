//! ROS 2 type descriptions and RIHS01 type hashes.
//!
//! The description of a record is derived from its introspection table, so
//! the hash always matches the fields the Rust struct actually carries.

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::{Error, Result};
use crate::introspection::MessageMembers;

/// Type ID constants of the RIHS01 numbering.
///
/// Collections add 48 (fixed array), 96 (bounded sequence) or 144
/// (unbounded sequence) to the base ID.
pub struct TypeId;

impl TypeId {
    pub const NESTED_TYPE: u8 = 1;
    pub const INT8: u8 = 2;
    pub const UINT8: u8 = 3;
    pub const INT16: u8 = 4;
    pub const UINT16: u8 = 5;
    pub const INT32: u8 = 6;
    pub const UINT32: u8 = 7;
    pub const INT64: u8 = 8;
    pub const UINT64: u8 = 9;
    pub const FLOAT32: u8 = 10;
    pub const FLOAT64: u8 = 11;
    pub const CHAR: u8 = 13;
    pub const BOOL: u8 = 15;
    pub const BYTE: u8 = 16;
    pub const STRING: u8 = 17;
    pub const BOUNDED_STRING: u8 = 21;
}

/// RIHS01 type hash (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHash(pub [u8; 32]);

impl TypeHash {
    pub fn to_rihs_string(&self) -> String {
        format!("RIHS01_{}", hex::encode(self.0))
    }

    pub fn from_rihs_string(s: &str) -> Result<Self> {
        let hex_part = s
            .strip_prefix("RIHS01_")
            .ok_or_else(|| Error::InvalidHash("must start with 'RIHS01_'".to_string()))?;

        let bytes = hex::decode(hex_part)
            .map_err(|e| Error::InvalidHash(format!("invalid hex encoding: {e}")))?;

        let hash: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidHash(format!("hash must be 32 bytes, got {}", bytes.len())))?;
        Ok(TypeHash(hash))
    }

    pub fn zero() -> Self {
        TypeHash([0u8; 32])
    }
}

impl std::fmt::Display for TypeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rihs_string())
    }
}

impl Default for TypeHash {
    fn default() -> Self {
        Self::zero()
    }
}

/// Matches `type_description_interfaces/msg/TypeDescription`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TypeDescriptionMsg {
    pub type_description: TypeDescription,
    /// Nested types, sorted by type name.
    pub referenced_type_descriptions: Vec<TypeDescription>,
}

/// Matches `type_description_interfaces/msg/IndividualTypeDescription`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TypeDescription {
    pub type_name: String,
    pub fields: Vec<FieldDescription>,
}

/// Matches `type_description_interfaces/msg/Field`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldTypeDescription,
    #[serde(default)]
    pub default_value: String,
}

/// Matches `type_description_interfaces/msg/FieldType`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FieldTypeDescription {
    pub type_id: u8,
    pub capacity: u64,
    pub string_capacity: u64,
    pub nested_type_name: String,
}

impl TypeDescription {
    pub fn from_members(members: &MessageMembers) -> Self {
        Self {
            type_name: members.type_name(),
            fields: members
                .members
                .iter()
                .map(|m| FieldDescription {
                    name: m.name.to_string(),
                    field_type: FieldTypeDescription {
                        type_id: m.type_id(),
                        capacity: m.collection.capacity(),
                        string_capacity: m.string_capacity(),
                        nested_type_name: m
                            .field_type
                            .nested()
                            .map(MessageMembers::type_name)
                            .unwrap_or_default(),
                    },
                    default_value: String::new(),
                })
                .collect(),
        }
    }
}

impl TypeDescriptionMsg {
    /// Full description of a record and everything it references.
    pub fn from_members(members: &MessageMembers) -> Self {
        Self {
            type_description: TypeDescription::from_members(members),
            referenced_type_descriptions: members
                .referenced_types()
                .into_iter()
                .map(TypeDescription::from_members)
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct FieldDescriptionForHash<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    field_type: &'a FieldTypeDescription,
}

#[derive(Serialize)]
struct TypeDescriptionForHash<'a> {
    type_name: &'a str,
    fields: Vec<FieldDescriptionForHash<'a>>,
}

#[derive(Serialize)]
struct TypeDescriptionMsgForHash<'a> {
    type_description: TypeDescriptionForHash<'a>,
    referenced_type_descriptions: Vec<TypeDescriptionForHash<'a>>,
}

fn for_hash(td: &TypeDescription) -> TypeDescriptionForHash<'_> {
    TypeDescriptionForHash {
        type_name: &td.type_name,
        fields: td
            .fields
            .iter()
            .map(|f| FieldDescriptionForHash {
                name: &f.name,
                field_type: &f.field_type,
            })
            .collect(),
    }
}

/// SHA-256 of the ROS-style JSON form of `msg`, without default values.
pub fn calculate_hash(msg: &TypeDescriptionMsg) -> Result<TypeHash> {
    let hash_version = TypeDescriptionMsgForHash {
        type_description: for_hash(&msg.type_description),
        referenced_type_descriptions: msg.referenced_type_descriptions.iter().map(for_hash).collect(),
    };
    let json = to_ros2_json(&hash_version)?;

    let mut hasher = sha2::Sha256::new();
    hasher.update(json.as_bytes());
    Ok(TypeHash(hasher.finalize().into()))
}

/// JSON with a space after every `:` and `,`, like Python's `json.dumps()`.
pub fn to_ros2_json<T: Serialize>(value: &T) -> Result<String> {
    let compact = serde_json::to_string(value)?;

    let mut result = String::with_capacity(compact.len() + 100);
    let mut chars = compact.chars().peekable();
    while let Some(c) = chars.next() {
        result.push(c);
        if (c == ':' || c == ',') && chars.peek().is_some_and(|next| *next != ' ') {
            result.push(' ');
        }
    }
    Ok(result)
}
