//! Static introspection tables.
//!
//! Every record carries a `MessageMembers` table describing its fields in
//! declaration order: name, ROS type, collection kind and the byte offset of
//! the field inside the Rust struct. Generic tools (the JSON view, the type
//! description builder, the `describe` command) walk these tables instead of
//! knowing the concrete types.

use std::fmt;

use crate::schema::TypeId;

/// ROS type of a single field element.
#[derive(Clone, Copy, strum::Display, strum::IntoStaticStr)]
pub enum FieldType {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "byte")]
    Byte,
    #[strum(serialize = "char")]
    Char,
    #[strum(serialize = "int8")]
    Int8,
    #[strum(serialize = "uint8")]
    UInt8,
    #[strum(serialize = "int16")]
    Int16,
    #[strum(serialize = "uint16")]
    UInt16,
    #[strum(serialize = "int32")]
    Int32,
    #[strum(serialize = "uint32")]
    UInt32,
    #[strum(serialize = "int64")]
    Int64,
    #[strum(serialize = "uint64")]
    UInt64,
    #[strum(serialize = "float32")]
    Float32,
    #[strum(serialize = "float64")]
    Float64,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "bounded string")]
    BoundedString(u64),
    /// Nested record; the function yields the nested table.
    #[strum(serialize = "message")]
    Message(fn() -> &'static MessageMembers),
}

impl FieldType {
    /// Type ID of a single element, per the RIHS01 numbering.
    pub fn base_type_id(&self) -> u8 {
        match self {
            FieldType::Message(_) => TypeId::NESTED_TYPE,
            FieldType::Int8 => TypeId::INT8,
            FieldType::UInt8 => TypeId::UINT8,
            FieldType::Int16 => TypeId::INT16,
            FieldType::UInt16 => TypeId::UINT16,
            FieldType::Int32 => TypeId::INT32,
            FieldType::UInt32 => TypeId::UINT32,
            FieldType::Int64 => TypeId::INT64,
            FieldType::UInt64 => TypeId::UINT64,
            FieldType::Float32 => TypeId::FLOAT32,
            FieldType::Float64 => TypeId::FLOAT64,
            FieldType::Char => TypeId::CHAR,
            FieldType::Bool => TypeId::BOOL,
            FieldType::Byte => TypeId::BYTE,
            FieldType::String => TypeId::STRING,
            FieldType::BoundedString(_) => TypeId::BOUNDED_STRING,
        }
    }

    pub fn nested(&self) -> Option<&'static MessageMembers> {
        match self {
            FieldType::Message(members) => Some(members()),
            _ => None,
        }
    }

    /// ROS IDL spelling, e.g. `int32`, `string<=64` or `builtin_interfaces/msg/Time`.
    pub fn idl_name(&self) -> String {
        match self {
            FieldType::BoundedString(max) => format!("string<={max}"),
            FieldType::Message(members) => members().type_name(),
            other => other.to_string(),
        }
    }

    fn is_fixed(&self) -> bool {
        match self {
            FieldType::String | FieldType::BoundedString(_) => false,
            FieldType::Message(members) => members().has_fixed_size(),
            _ => true,
        }
    }

    fn is_bounded(&self) -> bool {
        match self {
            FieldType::String => false,
            FieldType::Message(members) => members().has_bounded_size(),
            _ => true,
        }
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.idl_name())
    }
}

/// How many elements of `FieldType` a member holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Single,
    Array(u64),
    BoundedSequence(u64),
    Sequence,
}

impl Collection {
    /// Offset added to the base type ID for this collection kind.
    pub fn type_id_offset(&self) -> u8 {
        match self {
            Collection::Single => 0,
            Collection::Array(_) => 48,
            Collection::BoundedSequence(_) => 96,
            Collection::Sequence => 144,
        }
    }

    pub fn capacity(&self) -> u64 {
        match self {
            Collection::Array(n) | Collection::BoundedSequence(n) => *n,
            Collection::Single | Collection::Sequence => 0,
        }
    }
}

/// One field of a record.
#[derive(Debug, Clone, Copy)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub collection: Collection,
    /// Byte offset of the field inside the Rust struct.
    pub offset: usize,
}

impl MemberDescriptor {
    pub fn type_id(&self) -> u8 {
        self.field_type.base_type_id() + self.collection.type_id_offset()
    }

    pub fn string_capacity(&self) -> u64 {
        match self.field_type {
            FieldType::BoundedString(n) => n,
            _ => 0,
        }
    }

    pub fn has_fixed_size(&self) -> bool {
        match self.collection {
            Collection::Single | Collection::Array(_) => self.field_type.is_fixed(),
            Collection::BoundedSequence(_) | Collection::Sequence => false,
        }
    }

    pub fn has_bounded_size(&self) -> bool {
        match self.collection {
            Collection::Sequence => false,
            _ => self.field_type.is_bounded(),
        }
    }

    /// ROS IDL spelling of the whole member type, e.g. `float32[]`.
    pub fn idl_type(&self) -> String {
        let base = self.field_type.idl_name();
        match self.collection {
            Collection::Single => base,
            Collection::Array(n) => format!("{base}[{n}]"),
            Collection::BoundedSequence(n) => format!("{base}[<={n}]"),
            Collection::Sequence => format!("{base}[]"),
        }
    }
}

/// Field table of one record type.
#[derive(Debug)]
pub struct MessageMembers {
    pub package: &'static str,
    /// `msg`, `srv` or `action`.
    pub interface: &'static str,
    pub name: &'static str,
    pub size_of: usize,
    pub members: &'static [MemberDescriptor],
}

impl MessageMembers {
    /// `package/interface/Name`
    pub fn type_name(&self) -> String {
        format!("{}/{}/{}", self.package, self.interface, self.name)
    }

    /// `package::interface`
    pub fn namespace(&self) -> String {
        format!("{}::{}", self.package, self.interface)
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_fixed_size(&self) -> bool {
        self.members.iter().all(MemberDescriptor::has_fixed_size)
    }

    pub fn has_bounded_size(&self) -> bool {
        self.members.iter().all(MemberDescriptor::has_bounded_size)
    }

    /// All nested tables reachable from this one, without duplicates,
    /// sorted by type name.
    pub fn referenced_types(&self) -> Vec<&'static MessageMembers> {
        let mut found: Vec<&'static MessageMembers> = Vec::new();
        let mut pending: Vec<&'static MessageMembers> =
            self.members.iter().filter_map(|m| m.field_type.nested()).collect();

        while let Some(next) = pending.pop() {
            if found.iter().any(|f| std::ptr::eq(*f, next)) {
                continue;
            }
            found.push(next);
            pending.extend(next.members.iter().filter_map(|m| m.field_type.nested()));
        }

        found.sort_by_key(|m| m.type_name());
        found
    }

    /// Text listing in `.msg` style, one `type name` line per member.
    pub fn definition(&self) -> String {
        self.members
            .iter()
            .map(|m| format!("{} {}\n", m.idl_type(), m.name))
            .collect()
    }
}

/// Request/response tables of a service.
#[derive(Debug)]
pub struct ServiceMembers {
    pub package: &'static str,
    pub interface: &'static str,
    pub name: &'static str,
    pub request: &'static MessageMembers,
    pub response: &'static MessageMembers,
}

impl ServiceMembers {
    pub fn type_name(&self) -> String {
        format!("{}/{}/{}", self.package, self.interface, self.name)
    }
}

/// Tables of an action: the three user records plus the generated envelopes.
#[derive(Debug)]
pub struct ActionMembers {
    pub package: &'static str,
    pub name: &'static str,
    pub goal: &'static MessageMembers,
    pub result: &'static MessageMembers,
    pub feedback: &'static MessageMembers,
    pub send_goal: ServiceMembers,
    pub get_result: ServiceMembers,
    pub feedback_message: &'static MessageMembers,
}

impl ActionMembers {
    pub fn type_name(&self) -> String {
        format!("{}/action/{}", self.package, self.name)
    }

    /// Every record table belonging to this action.
    pub fn all_messages(&self) -> [&'static MessageMembers; 8] {
        [
            self.goal,
            self.result,
            self.feedback,
            self.send_goal.request,
            self.send_goal.response,
            self.get_result.request,
            self.get_result.response,
            self.feedback_message,
        ]
    }
}
