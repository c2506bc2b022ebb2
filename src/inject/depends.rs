// Dependency provider container and the per-request resolution scope.

use axum::extract::Request;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::route::{DependencyRef, RoutingError, RoutingResult};

type Value = Arc<dyn Any + Send + Sync>;
type Provider = Arc<dyn Fn() -> Value + Send + Sync>;

/// Providers keyed by the type they yield.
///
/// Provided types are `Clone`: one resolved value is handed to the
/// constructor and to every `Dep<T>` of the same request. Wrap heavy values
/// in an `Arc`.
#[derive(Clone, Default)]
pub struct Depends {
    providers: HashMap<TypeId, (&'static str, Provider)>,
}

impl fmt::Debug for Depends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.providers.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_struct("Depends").field("providers", &names).finish()
    }
}

impl Depends {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` for `T`, replacing an earlier one.
    pub fn provide<T, F>(mut self, provider: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let dep = DependencyRef::of::<T>();
        self.providers.insert(
            dep.type_id,
            (dep.type_name, Arc::new(move || Arc::new(provider()) as Value)),
        );
        self
    }

    /// Registers a value that is cloned on every resolution.
    pub fn value<T>(self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.provide(move || value.clone())
    }

    pub fn contains(&self, dep: &DependencyRef) -> bool {
        self.providers.contains_key(&dep.type_id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolves `T` through its provider, outside of any request.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.resolve(&DependencyRef::of::<T>())
            .and_then(|value| value.downcast_ref::<T>().cloned())
    }

    fn resolve(&self, dep: &DependencyRef) -> Option<Value> {
        self.providers.get(&dep.type_id).map(|(_, provider)| provider())
    }

    /// Fails with the first dependency that has no provider.
    pub fn ensure(&self, controller: &str, deps: &[DependencyRef]) -> RoutingResult<()> {
        match deps.iter().find(|dep| !self.contains(dep)) {
            Some(dep) => Err(RoutingError::MissingDependency {
                controller: controller.to_string(),
                dependency: dep.type_name.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Resolves every dependency in `deps` for one constructor call.
    pub fn inject(&self, controller: &str, deps: &[DependencyRef]) -> RoutingResult<Injected> {
        Scope::new(Arc::new(self.clone())).inject(controller, deps)
    }
}

/// Dependencies resolved for one request.
///
/// Each provider runs at most once per scope; later lookups of the same type
/// get a clone of the first value.
#[derive(Clone)]
pub struct Scope {
    depends: Arc<Depends>,
    values: Arc<Mutex<HashMap<TypeId, Value>>>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("depends", &self.depends)
            .field("resolved", &self.lock().len())
            .finish()
    }
}

impl Scope {
    pub fn new(depends: Arc<Depends>) -> Self {
        Self {
            depends,
            values: Arc::default(),
        }
    }

    /// The scope of `request`, created on first use.
    ///
    /// A scope left by a router with other providers is replaced.
    pub fn of(request: &mut Request, depends: &Arc<Depends>) -> Self {
        if let Some(scope) = request.extensions().get::<Scope>() {
            if Arc::ptr_eq(&scope.depends, depends) {
                return scope.clone();
            }
        }
        let scope = Scope::new(depends.clone());
        request.extensions_mut().insert(scope.clone());
        scope
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TypeId, Value>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn resolve(&self, dep: &DependencyRef) -> Option<Value> {
        let mut values = self.lock();
        if let Some(value) = values.get(&dep.type_id) {
            return Some(value.clone());
        }
        let value = self.depends.resolve(dep)?;
        values.insert(dep.type_id, value.clone());
        Some(value)
    }

    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.resolve(&DependencyRef::of::<T>())
            .and_then(|value| value.downcast_ref::<T>().cloned())
    }

    /// Runs the providers of `deps` that have not run yet in this scope.
    pub fn load(&self, deps: &[DependencyRef]) {
        for dep in deps {
            self.resolve(dep);
        }
    }

    /// Number of dependencies resolved so far.
    pub fn resolved(&self) -> usize {
        self.lock().len()
    }

    pub fn inject(&self, controller: &str, deps: &[DependencyRef]) -> RoutingResult<Injected> {
        let mut values = HashMap::with_capacity(deps.len());
        for dep in deps {
            let value = self.resolve(dep).ok_or_else(|| RoutingError::MissingDependency {
                controller: controller.to_string(),
                dependency: dep.type_name.to_string(),
            })?;
            values.insert(dep.type_id, value);
        }
        Ok(Injected {
            controller: controller.to_string(),
            values,
        })
    }
}

/// Values resolved for one constructor call.
pub struct Injected {
    controller: String,
    values: HashMap<TypeId, Value>,
}

impl fmt::Debug for Injected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("controller", &self.controller)
            .field("values", &self.values.len())
            .finish()
    }
}

impl Injected {
    /// Takes the declared value of type `T`.
    ///
    /// Taking a type the class never declared, or taking it twice, is an error.
    /// Mounting only checks declared types, so an undeclared `take` fails on
    /// the first request; `Stateless::verified` catches it before serving.
    pub fn take<T: Clone + 'static>(&mut self) -> RoutingResult<T> {
        let dep = DependencyRef::of::<T>();
        self.values
            .remove(&dep.type_id)
            .and_then(|value| value.downcast_ref::<T>().cloned())
            .ok_or_else(|| RoutingError::MissingDependency {
                controller: self.controller.clone(),
                dependency: dep.type_name.to_string(),
            })
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
