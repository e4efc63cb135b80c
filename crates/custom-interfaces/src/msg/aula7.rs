use serde::{Deserialize, Serialize};

use crate::introspection::FieldType;
use crate::{impl_message, staged_builder};

/// `custom_interfaces/msg/Aula7`: a counter value and the text printed with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aula7 {
    pub count: i32,
    pub message: String,
}

impl_message! {
    Aula7,
    package: "custom_interfaces",
    interface: "msg",
    name: "Aula7",
    fields: [
        count: FieldType::Int32,
        message: FieldType::String,
    ],
}

staged_builder!(Aula7, InitAula7Count => count: i32, InitAula7Message => message: String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MessageTypeInfo, Record};

    #[test]
    fn test_builder_sets_every_field() {
        let msg = Aula7::builder().count(3).message("hi".to_string());
        assert_eq!(
            msg,
            Aula7 {
                count: 3,
                message: "hi".to_string()
            }
        );
    }

    #[test]
    fn test_init_is_zeroed() {
        let msg = Aula7::init();
        assert_eq!(msg.count, 0);
        assert!(msg.message.is_empty());
    }

    #[test]
    fn test_not_fixed_size() {
        assert!(!Aula7::has_fixed_size());
        assert!(!Aula7::has_bounded_size());
    }
}
