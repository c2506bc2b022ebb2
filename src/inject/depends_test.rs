#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::inject::{Depends, Scope};
    use crate::route::{DependencyRef, RoutingError};

    #[derive(Debug, Clone, PartialEq)]
    struct Greeting(&'static str);

    #[derive(Debug, Clone, PartialEq)]
    struct Counter(usize);

    #[test]
    fn provider_runs_on_every_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let depends = Depends::new().provide(move || Counter(seen.fetch_add(1, Ordering::SeqCst)));

        assert_eq!(depends.get::<Counter>(), Some(Counter(0)));
        assert_eq!(depends.get::<Counter>(), Some(Counter(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(depends.get::<Greeting>(), None);
    }

    #[test]
    fn scope_runs_each_provider_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let depends = Arc::new(Depends::new().provide(move || Counter(seen.fetch_add(1, Ordering::SeqCst))));

        let scope = Scope::new(depends.clone());
        assert_eq!(scope.get::<Counter>(), Some(Counter(0)));
        assert_eq!(scope.get::<Counter>(), Some(Counter(0)));
        let mut injected = scope.inject("Ctrl", &[DependencyRef::of::<Counter>()]).unwrap();
        assert_eq!(injected.take::<Counter>().unwrap(), Counter(0));
        assert_eq!(scope.resolved(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let other = Scope::new(depends);
        assert_eq!(other.get::<Counter>(), Some(Counter(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn later_provider_replaces_earlier() {
        let depends = Depends::new()
            .value(Greeting("hi"))
            .value(Greeting("hello"));
        assert_eq!(depends.len(), 1);
        assert_eq!(depends.get::<Greeting>(), Some(Greeting("hello")));
    }

    #[test]
    fn inject_and_take() {
        let depends = Depends::new().value(Greeting("hi")).value(7u32);
        let deps = [DependencyRef::of::<Greeting>(), DependencyRef::of::<u32>()];
        let mut injected = depends.inject("Ctrl", &deps).unwrap();

        assert_eq!(injected.take::<u32>().unwrap(), 7);
        assert_eq!(injected.take::<Greeting>().unwrap(), Greeting("hi"));
        assert_eq!(injected.remaining(), 0);

        let err = injected.take::<u32>().unwrap_err();
        assert!(matches!(err, RoutingError::MissingDependency { ref controller, .. } if controller == "Ctrl"));
    }

    #[test]
    fn missing_provider_is_reported() {
        let depends = Depends::new().value(7u32);
        let deps = [DependencyRef::of::<u32>(), DependencyRef::of::<Greeting>()];

        let err = depends.ensure("Ctrl", &deps).unwrap_err();
        match err {
            RoutingError::MissingDependency { dependency, .. } => {
                assert!(dependency.ends_with("Greeting"), "{dependency}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(depends.inject("Ctrl", &deps).is_err());
        assert!(depends.ensure("Ctrl", &deps[..1]).is_ok());
    }
}
