/// Implement `MessageTypeInfo` for a record and build its introspection table.
///
/// Fields are listed in declaration order with their ROS element type and,
/// for arrays and sequences, their collection kind.
///
/// ```ignore
/// impl_message! {
///     Aula7,
///     package: "custom_interfaces",
///     interface: "msg",
///     name: "Aula7",
///     fields: [
///         count: FieldType::Int32,
///         message: FieldType::String,
///     ],
/// }
/// ```
#[macro_export]
macro_rules! impl_message {
    (@collection) => {
        $crate::introspection::Collection::Single
    };
    (@collection $collection:expr) => {
        $collection
    };
    (
        $ty:ty,
        package: $package:literal,
        interface: $interface:literal,
        name: $name:literal,
        fields: [ $( $field:ident : $field_type:expr $( => $collection:expr )? ),* $(,)? ] $(,)?
    ) => {
        impl $crate::traits::MessageTypeInfo for $ty {
            const TYPE_NAME: &'static str = concat!($package, "/", $interface, "/", $name);
            const DATA_TYPE: &'static str = concat!($package, "::", $interface, "::", $name);
            const DDS_TYPE_NAME: &'static str =
                concat!($package, "::", $interface, "::dds_::", $name, "_");

            fn members() -> &'static $crate::introspection::MessageMembers {
                static MEMBERS: $crate::introspection::MessageMembers =
                    $crate::introspection::MessageMembers {
                        package: $package,
                        interface: $interface,
                        name: $name,
                        size_of: ::std::mem::size_of::<$ty>(),
                        members: &[
                            $(
                                $crate::introspection::MemberDescriptor {
                                    name: stringify!($field),
                                    field_type: $field_type,
                                    collection: $crate::impl_message!(@collection $( $collection )?),
                                    offset: ::std::mem::offset_of!($ty, $field),
                                },
                            )*
                        ],
                    };
                &MEMBERS
            }
        }
    };
}

/// Staged builder: `Msg::builder().first(..).second(..)` yields `Msg` only once
/// every field has been set, in declaration order.
///
/// ```ignore
/// staged_builder!(Aula7, InitAula7Count => count: i32, InitAula7Message => message: String);
/// let msg = Aula7::builder().count(1).message("hi".to_string());
/// ```
#[macro_export]
macro_rules! staged_builder {
    (@stage $msg:ty; $stage:ident => $field:ident : $field_ty:ty) => {
        #[must_use]
        pub struct $stage {
            msg: $msg,
        }

        impl $stage {
            pub fn $field(mut self, arg: $field_ty) -> $msg {
                self.msg.$field = arg;
                self.msg
            }
        }
    };
    (@stage $msg:ty; $stage:ident => $field:ident : $field_ty:ty, $next:ident => $($rest:tt)+) => {
        #[must_use]
        pub struct $stage {
            msg: $msg,
        }

        impl $stage {
            pub fn $field(mut self, arg: $field_ty) -> $next {
                self.msg.$field = arg;
                $next { msg: self.msg }
            }
        }

        $crate::staged_builder!(@stage $msg; $next => $($rest)+);
    };
    ($msg:ty, $entry:ident => $($rest:tt)+) => {
        impl $msg {
            pub fn builder() -> $entry {
                $entry {
                    msg: <$msg as ::core::default::Default>::default(),
                }
            }
        }

        $crate::staged_builder!(@stage $msg; $entry => $($rest)+);
    };
}

/// Implement `RosService` for a marker type.
#[macro_export]
macro_rules! define_service {
    (
        $service:ident,
        package: $package:literal,
        name: $name:literal,
        Request: $request:ty,
        Response: $response:ty $(,)?
    ) => {
        impl $crate::traits::RosService for $service {
            type Request = $request;
            type Response = $response;

            const TYPE_NAME: &'static str = concat!($package, "/srv/", $name);

            fn members() -> &'static $crate::introspection::ServiceMembers {
                static MEMBERS: ::std::sync::LazyLock<$crate::introspection::ServiceMembers> =
                    ::std::sync::LazyLock::new(|| $crate::introspection::ServiceMembers {
                        package: $package,
                        interface: "srv",
                        name: $name,
                        request: <$request as $crate::traits::MessageTypeInfo>::members(),
                        response: <$response as $crate::traits::MessageTypeInfo>::members(),
                    });
                &MEMBERS
            }
        }
    };
}

/// Implement `RosAction` for a marker type, together with the metadata and
/// introspection tables of its generated envelopes.
///
/// ```ignore
/// pub struct Aula9;
///
/// define_action! {
///     Aula9,
///     package: "custom_interfaces",
///     name: "Aula9",
///     Goal: Aula9Goal,
///     Result: Aula9Result,
///     Feedback: Aula9Feedback,
/// }
/// ```
#[macro_export]
macro_rules! define_action {
    (@names $package:literal, $name:literal, $suffix:literal) => {
        $crate::action::WrapperNames {
            type_name: concat!($package, "/action/", $name, $suffix),
            data_type: concat!($package, "::action::", $name, $suffix),
            dds_type_name: concat!($package, "::action::dds_::", $name, $suffix, "_"),
        }
    };
    (
        $action:ident,
        package: $package:literal,
        name: $name:literal,
        Goal: $goal:ty,
        Result: $result:ty,
        Feedback: $feedback:ty $(,)?
    ) => {
        impl $crate::action::RosAction for $action {
            type Goal = $goal;
            type Result = $result;
            type Feedback = $feedback;

            const NAMES: $crate::action::ActionTypeNames = $crate::action::ActionTypeNames {
                action: concat!($package, "/action/", $name),
                send_goal: concat!($package, "/action/", $name, "_SendGoal"),
                get_result: concat!($package, "/action/", $name, "_GetResult"),
                send_goal_request: $crate::define_action!(@names $package, $name, "_SendGoal_Request"),
                send_goal_response: $crate::define_action!(@names $package, $name, "_SendGoal_Response"),
                get_result_request: $crate::define_action!(@names $package, $name, "_GetResult_Request"),
                get_result_response: $crate::define_action!(@names $package, $name, "_GetResult_Response"),
                feedback_message: $crate::define_action!(@names $package, $name, "_FeedbackMessage"),
            };

            fn members() -> &'static $crate::introspection::ActionMembers {
                use $crate::action::{
                    FeedbackMessage, GetResultRequest, GetResultResponse, SendGoalRequest,
                    SendGoalResponse,
                };
                use $crate::introspection::{
                    ActionMembers, Collection, FieldType, MemberDescriptor, MessageMembers,
                    ServiceMembers,
                };
                use $crate::traits::MessageTypeInfo;

                static SEND_GOAL_REQUEST: MessageMembers = MessageMembers {
                    package: $package,
                    interface: "action",
                    name: concat!($name, "_SendGoal_Request"),
                    size_of: ::std::mem::size_of::<SendGoalRequest<$action>>(),
                    members: &[
                        MemberDescriptor {
                            name: "goal_id",
                            field_type: FieldType::Message(
                                <$crate::unique_identifier_msgs::Uuid as MessageTypeInfo>::members,
                            ),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(SendGoalRequest<$action>, goal_id),
                        },
                        MemberDescriptor {
                            name: "goal",
                            field_type: FieldType::Message(<$goal as MessageTypeInfo>::members),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(SendGoalRequest<$action>, goal),
                        },
                    ],
                };

                static SEND_GOAL_RESPONSE: MessageMembers = MessageMembers {
                    package: $package,
                    interface: "action",
                    name: concat!($name, "_SendGoal_Response"),
                    size_of: ::std::mem::size_of::<SendGoalResponse<$action>>(),
                    members: &[
                        MemberDescriptor {
                            name: "accepted",
                            field_type: FieldType::Bool,
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(SendGoalResponse<$action>, accepted),
                        },
                        MemberDescriptor {
                            name: "stamp",
                            field_type: FieldType::Message(
                                <$crate::builtin_interfaces::Time as MessageTypeInfo>::members,
                            ),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(SendGoalResponse<$action>, stamp),
                        },
                    ],
                };

                static GET_RESULT_REQUEST: MessageMembers = MessageMembers {
                    package: $package,
                    interface: "action",
                    name: concat!($name, "_GetResult_Request"),
                    size_of: ::std::mem::size_of::<GetResultRequest<$action>>(),
                    members: &[MemberDescriptor {
                        name: "goal_id",
                        field_type: FieldType::Message(
                            <$crate::unique_identifier_msgs::Uuid as MessageTypeInfo>::members,
                        ),
                        collection: Collection::Single,
                        offset: ::std::mem::offset_of!(GetResultRequest<$action>, goal_id),
                    }],
                };

                static GET_RESULT_RESPONSE: MessageMembers = MessageMembers {
                    package: $package,
                    interface: "action",
                    name: concat!($name, "_GetResult_Response"),
                    size_of: ::std::mem::size_of::<GetResultResponse<$action>>(),
                    members: &[
                        MemberDescriptor {
                            name: "status",
                            field_type: FieldType::Int8,
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(GetResultResponse<$action>, status),
                        },
                        MemberDescriptor {
                            name: "result",
                            field_type: FieldType::Message(<$result as MessageTypeInfo>::members),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(GetResultResponse<$action>, result),
                        },
                    ],
                };

                static FEEDBACK_MESSAGE: MessageMembers = MessageMembers {
                    package: $package,
                    interface: "action",
                    name: concat!($name, "_FeedbackMessage"),
                    size_of: ::std::mem::size_of::<FeedbackMessage<$action>>(),
                    members: &[
                        MemberDescriptor {
                            name: "goal_id",
                            field_type: FieldType::Message(
                                <$crate::unique_identifier_msgs::Uuid as MessageTypeInfo>::members,
                            ),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(FeedbackMessage<$action>, goal_id),
                        },
                        MemberDescriptor {
                            name: "feedback",
                            field_type: FieldType::Message(<$feedback as MessageTypeInfo>::members),
                            collection: Collection::Single,
                            offset: ::std::mem::offset_of!(FeedbackMessage<$action>, feedback),
                        },
                    ],
                };

                static MEMBERS: ::std::sync::LazyLock<ActionMembers> =
                    ::std::sync::LazyLock::new(|| ActionMembers {
                        package: $package,
                        name: $name,
                        goal: <$goal as MessageTypeInfo>::members(),
                        result: <$result as MessageTypeInfo>::members(),
                        feedback: <$feedback as MessageTypeInfo>::members(),
                        send_goal: ServiceMembers {
                            package: $package,
                            interface: "action",
                            name: concat!($name, "_SendGoal"),
                            request: &SEND_GOAL_REQUEST,
                            response: &SEND_GOAL_RESPONSE,
                        },
                        get_result: ServiceMembers {
                            package: $package,
                            interface: "action",
                            name: concat!($name, "_GetResult"),
                            request: &GET_RESULT_REQUEST,
                            response: &GET_RESULT_RESPONSE,
                        },
                        feedback_message: &FEEDBACK_MESSAGE,
                    });
                &MEMBERS
            }
        }
    };
}
