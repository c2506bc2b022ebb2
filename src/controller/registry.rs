// Explicit name -> controller class registry.

use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

use super::class::CompiledClass;
use crate::route::{RouteInfo, RoutingError, RoutingResult};

/// Type-independent view of a compiled class.
pub trait ClassInfo: Send + Sync {
    fn name(&self) -> &str;
    fn ancestors(&self) -> &[String];
    fn route_table(&self) -> Vec<RouteInfo>;
}

impl<S: Send + Sync + 'static> ClassInfo for CompiledClass<S> {
    fn name(&self) -> &str {
        CompiledClass::name(self)
    }

    fn ancestors(&self) -> &[String] {
        CompiledClass::ancestors(self)
    }

    fn route_table(&self) -> Vec<RouteInfo> {
        CompiledClass::route_table(self)
    }
}

struct Entry {
    info: Arc<dyn ClassInfo>,
    class: Arc<dyn Any + Send + Sync>,
}

/// Classes registered by name, in registration order.
#[derive(Default)]
pub struct ControllerRegistry {
    classes: IndexMap<String, Entry>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Send + Sync + 'static>(&mut self, class: &Arc<CompiledClass<S>>) -> RoutingResult<()> {
        let name = class.name().to_string();
        if self.classes.contains_key(&name) {
            return Err(RoutingError::DuplicateController { name });
        }
        debug!(
            component = "registry",
            event = "registered",
            controller = %name,
            "controller class registered"
        );
        self.classes.insert(
            name,
            Entry {
                info: class.clone(),
                class: class.clone(),
            },
        );
        Ok(())
    }

    /// Typed lookup; `None` when the name is unknown or `S` does not match.
    pub fn get<S: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<CompiledClass<S>>> {
        self.classes
            .get(name)
            .and_then(|entry| entry.class.clone().downcast::<CompiledClass<S>>().ok())
    }

    pub fn info(&self, name: &str) -> Option<Arc<dyn ClassInfo>> {
        self.classes.get(name).map(|entry| entry.info.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered classes that inherit, directly or not, from `name`.
    pub fn subclasses_of(&self, name: &str) -> Vec<String> {
        self.classes
            .values()
            .filter(|entry| entry.info.ancestors().iter().any(|a| a == name))
            .map(|entry| entry.info.name().to_string())
            .collect()
    }

    /// Routes of every registered class.
    pub fn route_table(&self) -> IndexMap<String, Vec<RouteInfo>> {
        self.classes
            .iter()
            .map(|(name, entry)| (name.clone(), entry.info.route_table()))
            .collect()
    }
}
