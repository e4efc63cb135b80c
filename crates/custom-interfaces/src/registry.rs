//! Process-wide type-support registry.
//!
//! Maps ROS type names to their introspection tables, type hashes and
//! type-erased codecs. The registry is built on first access with every type
//! this crate bundles; further types can be added at any time. Concurrent
//! first access from several threads initializes it exactly once.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::action::{
    FeedbackMessage, GetResultRequest, GetResultResponse, RosAction, SendGoalRequest,
    SendGoalResponse,
};
use crate::error::{Error, Result};
use crate::introspection::{ActionMembers, MessageMembers, ServiceMembers};
use crate::schema::{TypeHash, calculate_hash};
use crate::traits::{RosMessage, RosService};

/// Interface kind encoded in the middle segment of a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InterfaceKind {
    Msg,
    Srv,
    Action,
}

/// Split `package/kind/Name` into its parts.
pub fn parse_type_name(type_name: &str) -> Result<(&str, InterfaceKind, &str)> {
    let invalid = || Error::InvalidTypeName(type_name.to_string());
    let mut parts = type_name.split('/');
    let (Some(package), Some(kind), Some(name), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if package.is_empty() || name.is_empty() {
        return Err(invalid());
    }
    let kind = kind.parse::<InterfaceKind>().map_err(|_| invalid())?;
    Ok((package, kind, name))
}

/// Type support of one record type.
pub struct MessageSupport {
    pub type_name: &'static str,
    pub members: &'static MessageMembers,
    type_hash: OnceLock<TypeHash>,
    decode_json: fn(&[u8]) -> Result<serde_json::Value>,
    default_cdr: fn() -> Result<Vec<u8>>,
}

impl MessageSupport {
    pub fn of<T: RosMessage>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            members: T::members(),
            type_hash: OnceLock::new(),
            decode_json: decode_json::<T>,
            default_cdr: default_cdr::<T>,
        }
    }

    /// RIHS01 hash, computed on first use.
    pub fn type_hash(&self) -> Result<TypeHash> {
        if let Some(hash) = self.type_hash.get() {
            return Ok(*hash);
        }
        let hash = calculate_hash(&crate::schema::TypeDescriptionMsg::from_members(self.members))?;
        Ok(*self.type_hash.get_or_init(|| hash))
    }

    /// Decode a CDR payload of this type into a JSON view.
    pub fn decode_json(&self, bytes: &[u8]) -> Result<serde_json::Value> {
        (self.decode_json)(bytes)
    }

    /// CDR encoding of the default-initialized record.
    pub fn default_cdr(&self) -> Result<Vec<u8>> {
        (self.default_cdr)()
    }
}

impl std::fmt::Debug for MessageSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSupport")
            .field("type_name", &self.type_name)
            .field("type_hash", &self.type_hash.get())
            .finish()
    }
}

fn decode_json<T: RosMessage>(bytes: &[u8]) -> Result<serde_json::Value> {
    let value = T::from_cdr(bytes)?;
    Ok(serde_json::to_value(&value)?)
}

fn default_cdr<T: RosMessage>() -> Result<Vec<u8>> {
    T::default().to_cdr()
}

#[derive(Debug)]
pub struct ServiceSupport {
    pub type_name: &'static str,
    pub members: &'static ServiceMembers,
    pub request: Arc<MessageSupport>,
    pub response: Arc<MessageSupport>,
}

#[derive(Debug)]
pub struct ActionSupport {
    pub type_name: &'static str,
    pub members: &'static ActionMembers,
    /// Goal, result, feedback and the five envelopes, in that order.
    pub messages: Vec<Arc<MessageSupport>>,
}

/// Registry of every known interface type.
#[derive(Default)]
pub struct TypeSupportRegistry {
    messages: HashMap<&'static str, Arc<MessageSupport>>,
    services: HashMap<&'static str, Arc<ServiceSupport>>,
    actions: HashMap<&'static str, Arc<ActionSupport>>,
}

impl TypeSupportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every type bundled with this crate.
    pub fn with_bundled_types() -> Self {
        let mut registry = Self::new();
        registry.register_message::<crate::builtin_interfaces::Time>();
        registry.register_message::<crate::unique_identifier_msgs::Uuid>();
        registry.register_message::<crate::action::GoalInfo>();
        registry.register_message::<crate::std_msgs::Header>();
        registry.register_message::<crate::geometry_msgs::Vector3>();
        registry.register_message::<crate::geometry_msgs::Twist>();
        registry.register_message::<crate::sensor_msgs::LaserScan>();
        registry.register_message::<crate::msg::Aula7>();
        registry.register_message::<crate::msg::Temperature>();
        registry.register_service::<crate::std_srvs::Empty>();
        registry.register_service::<crate::srv::Aula8>();
        registry.register_service::<crate::srv::CelsiusToFahrenheit>();
        registry.register_action::<crate::action::Aula9>();
        registry.register_action::<crate::action::Rotate>();
        registry
    }

    /// Get the global registry (lazy initialized).
    pub fn global() -> &'static RwLock<TypeSupportRegistry> {
        static REGISTRY: OnceLock<RwLock<TypeSupportRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let registry = TypeSupportRegistry::with_bundled_types();
            debug!(
                "[REG] Type support registry initialized with {} types",
                registry.len()
            );
            RwLock::new(registry)
        })
    }

    /// Register `T`; registering the same type again returns the existing entry.
    pub fn register_message<T: RosMessage>(&mut self) -> Arc<MessageSupport> {
        self.messages
            .entry(T::TYPE_NAME)
            .or_insert_with(|| Arc::new(MessageSupport::of::<T>()))
            .clone()
    }

    pub fn register_service<S: RosService>(&mut self) -> Arc<ServiceSupport> {
        if let Some(existing) = self.services.get(S::TYPE_NAME) {
            return existing.clone();
        }
        let support = Arc::new(ServiceSupport {
            type_name: S::TYPE_NAME,
            members: S::members(),
            request: self.register_message::<S::Request>(),
            response: self.register_message::<S::Response>(),
        });
        self.services.insert(S::TYPE_NAME, support.clone());
        support
    }

    pub fn register_action<A: RosAction>(&mut self) -> Arc<ActionSupport> {
        if let Some(existing) = self.actions.get(A::NAMES.action) {
            return existing.clone();
        }
        let messages = vec![
            self.register_message::<A::Goal>(),
            self.register_message::<A::Result>(),
            self.register_message::<A::Feedback>(),
            self.register_message::<SendGoalRequest<A>>(),
            self.register_message::<SendGoalResponse<A>>(),
            self.register_message::<GetResultRequest<A>>(),
            self.register_message::<GetResultResponse<A>>(),
            self.register_message::<FeedbackMessage<A>>(),
        ];
        let support = Arc::new(ActionSupport {
            type_name: A::NAMES.action,
            members: A::members(),
            messages,
        });
        self.actions.insert(A::NAMES.action, support.clone());
        support
    }

    pub fn message(&self, type_name: &str) -> Option<Arc<MessageSupport>> {
        self.messages.get(type_name).cloned()
    }

    pub fn service(&self, type_name: &str) -> Option<Arc<ServiceSupport>> {
        self.services.get(type_name).cloned()
    }

    pub fn action(&self, type_name: &str) -> Option<Arc<ActionSupport>> {
        self.actions.get(type_name).cloned()
    }

    /// Every registered name, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .messages
            .keys()
            .chain(self.services.keys())
            .chain(self.actions.keys())
            .copied()
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types of every kind.
    pub fn len(&self) -> usize {
        self.messages.len() + self.services.len() + self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Convenience functions for working with the global registry

pub fn lookup_message(type_name: &str) -> Result<Arc<MessageSupport>> {
    parse_type_name(type_name)?;
    TypeSupportRegistry::global()
        .read()
        .message(type_name)
        .ok_or_else(|| Error::UnknownType(type_name.to_string()))
}

pub fn lookup_service(type_name: &str) -> Result<Arc<ServiceSupport>> {
    parse_type_name(type_name)?;
    TypeSupportRegistry::global()
        .read()
        .service(type_name)
        .ok_or_else(|| Error::UnknownType(type_name.to_string()))
}

pub fn lookup_action(type_name: &str) -> Result<Arc<ActionSupport>> {
    parse_type_name(type_name)?;
    TypeSupportRegistry::global()
        .read()
        .action(type_name)
        .ok_or_else(|| Error::UnknownType(type_name.to_string()))
}

pub fn registered_types() -> Vec<&'static str> {
    TypeSupportRegistry::global().read().type_names()
}

/// Register `T` in the global registry.
pub fn register_message<T: RosMessage>() -> Arc<MessageSupport> {
    TypeSupportRegistry::global().write().register_message::<T>()
}

pub fn register_service<S: RosService>() -> Arc<ServiceSupport> {
    TypeSupportRegistry::global().write().register_service::<S>()
}

pub fn register_action<A: RosAction>() -> Arc<ActionSupport> {
    TypeSupportRegistry::global().write().register_action::<A>()
}
