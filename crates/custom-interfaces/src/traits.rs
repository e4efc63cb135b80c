use std::fmt::Debug;
use std::marker::PhantomData;

use cdr::{CdrLe, Infinite};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::introspection::{MessageMembers, ServiceMembers};
use crate::schema::{TypeDescriptionMsg, TypeHash, calculate_hash};

/// Value contract shared by every record: default-construct, deep-copy,
/// field-wise equality. Destruction is `Drop`.
pub trait Record: Default + Clone + PartialEq + Debug {
    /// Record with every field at its default (zero, `false`, empty).
    fn init() -> Self {
        Self::default()
    }

    /// Deep copy of `self` into `dst`, reusing `dst`'s allocations.
    fn copy_into(&self, dst: &mut Self) {
        dst.clone_from(self);
    }

    fn are_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Default + Clone + PartialEq + Debug> Record for T {}

/// Compile-time metadata of a record type.
pub trait MessageTypeInfo {
    /// `package/interface/Name`
    const TYPE_NAME: &'static str;
    /// `package::interface::Name`
    const DATA_TYPE: &'static str;
    /// `package::interface::dds_::Name_`
    const DDS_TYPE_NAME: &'static str;

    fn members() -> &'static MessageMembers;

    fn type_name() -> &'static str {
        Self::TYPE_NAME
    }

    fn data_type() -> &'static str {
        Self::DATA_TYPE
    }

    fn dds_type_name() -> &'static str {
        Self::DDS_TYPE_NAME
    }

    fn has_fixed_size() -> bool {
        Self::members().has_fixed_size()
    }

    fn has_bounded_size() -> bool {
        Self::members().has_bounded_size()
    }

    fn type_description() -> TypeDescriptionMsg {
        TypeDescriptionMsg::from_members(Self::members())
    }

    fn type_hash() -> Result<TypeHash> {
        calculate_hash(&Self::type_description())
    }
}

/// A record that can travel over the wire.
pub trait RosMessage:
    MessageTypeInfo + Record + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn to_cdr(&self) -> Result<Vec<u8>> {
        CdrSerdes::<Self>::serialize(self)
    }

    fn from_cdr(bytes: &[u8]) -> Result<Self> {
        CdrSerdes::<Self>::deserialize(bytes)
    }
}

impl<T> RosMessage for T where
    T: MessageTypeInfo + Record + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Request/response pair of a service.
pub trait RosService: Send + Sync + 'static {
    type Request: RosMessage;
    type Response: RosMessage;

    /// `package/srv/Name`
    const TYPE_NAME: &'static str;

    fn members() -> &'static ServiceMembers;
}

/// CDR encapsulation header for little-endian encoding
pub const CDR_HEADER_LE: [u8; 4] = [0x00, 0x01, 0x00, 0x00];

pub struct CdrSerdes<T>(PhantomData<T>);

impl<T: Serialize> CdrSerdes<T> {
    pub fn serialize(input: &T) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::serialize_to_buf(input, &mut buffer)?;
        Ok(buffer)
    }

    /// Serialize into `buffer`, clearing it first and keeping its allocation.
    pub fn serialize_to_buf(input: &T, buffer: &mut Vec<u8>) -> Result<()> {
        buffer.clear();
        let encoded = cdr::serialize::<_, _, CdrLe>(input, Infinite)?;
        buffer.extend_from_slice(&encoded);
        Ok(())
    }
}

impl<T: DeserializeOwned> CdrSerdes<T> {
    pub fn deserialize(input: &[u8]) -> Result<T> {
        if input.len() < 4 {
            return Err(Error::TruncatedHeader(input.len()));
        }
        let representation_identifier = [input[0], input[1]];
        if representation_identifier != [CDR_HEADER_LE[0], CDR_HEADER_LE[1]] {
            return Err(Error::UnsupportedEncapsulation(representation_identifier));
        }
        Ok(cdr::deserialize::<T>(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct SimpleMessage {
        value: u32,
        text: String,
    }

    #[test]
    fn test_serialize_writes_le_header() {
        let msg = SimpleMessage {
            value: 42,
            text: "Hello".to_string(),
        };
        let bytes = CdrSerdes::serialize(&msg).unwrap();
        assert_eq!(&bytes[0..4], &CDR_HEADER_LE);
        assert_eq!(CdrSerdes::<SimpleMessage>::deserialize(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_serialize_to_buf_clears_previous_data() {
        let long = SimpleMessage {
            value: 1,
            text: "x".repeat(200),
        };
        let short = SimpleMessage {
            value: 2,
            text: "y".to_string(),
        };

        let mut buffer = Vec::new();
        CdrSerdes::serialize_to_buf(&long, &mut buffer).unwrap();
        let long_len = buffer.len();
        CdrSerdes::serialize_to_buf(&short, &mut buffer).unwrap();
        assert!(buffer.len() < long_len);
        assert_eq!(CdrSerdes::<SimpleMessage>::deserialize(&buffer).unwrap(), short);
    }

    #[test]
    fn test_deserialize_rejects_short_input() {
        let err = CdrSerdes::<SimpleMessage>::deserialize(&[0x00, 0x01]).unwrap_err();
        assert!(matches!(err, Error::TruncatedHeader(2)));
    }

    #[test]
    fn test_deserialize_rejects_big_endian() {
        let err = CdrSerdes::<SimpleMessage>::deserialize(&[0x00, 0x00, 0x00, 0x00, 1, 2, 3, 4])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncapsulation([0x00, 0x00])));
    }
}
