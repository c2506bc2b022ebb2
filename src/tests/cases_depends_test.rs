#[cfg(test)]
mod tests {
    use axum::http::Method;

    use crate::controller::{ControllerClass, Stateless};
    use crate::inject::Depends;
    use crate::route::RoutingError;
    use crate::support::call;
    use crate::support::controllers::{create_app, depends, example_children, Db, Example};

    #[tokio::test]
    async fn test_attr_depends() {
        let app = create_app();

        let (status, body) = call(&app, Method::GET, "/children/example-routable-children/v1.0/attr-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");

        let (status, body) = call(&app, Method::GET, "/parent/example-routable-parent/v1.1/attr-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");
    }

    #[tokio::test]
    async fn test_init_depends() {
        let app = create_app();

        let (status, body) = call(&app, Method::GET, "/children/example-routable-children/v1.0/init-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");

        let (status, body) = call(&app, Method::GET, "/parent/example-routable-parent/v1.1/init-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");
    }

    #[tokio::test]
    async fn test_method_depends() {
        let app = create_app();

        let (status, body) = call(&app, Method::GET, "/parent/example-routable-parent/v1.1/method-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");

        let (status, body) = call(&app, Method::GET, "/children/example-routable-children/v1.0/method-depends").await;
        assert_eq!(status, 200);
        assert_eq!(body, "99");
    }

    #[tokio::test]
    async fn test_converter_is_checked_by_the_extractor() {
        let app = create_app();

        let (status, body) = call(&app, Method::GET, "/children/example-routable-children/v1.0/7").await;
        assert_eq!(status, 200);
        assert!(body.starts_with("Ok "));

        let (status, _) = call(&app, Method::GET, "/children/example-routable-children/v1.0/abc").await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn test_instance_is_built_per_request() {
        use std::sync::atomic::{AtomicI64, Ordering};
        use std::sync::Arc;

        let counter = Arc::new(AtomicI64::new(0));
        let provider = counter.clone();
        let depends = Depends::new().provide(move || Db(provider.fetch_add(1, Ordering::SeqCst) + 1));

        let router = example_children().routes(depends).unwrap();
        let uri = "/children/example-routable-children/v1.0/init-depends";
        assert_eq!(call(&router, Method::GET, uri).await.1, "1");
        assert_eq!(call(&router, Method::GET, uri).await.1, "2");
        assert!(counter.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_failing_constructor_answers_500() {
        let class = ControllerClass::<Example>::new("Failing")
            .depends::<Db>()
            .init(|deps| {
                deps.take::<Db>()?;
                Err(RoutingError::MissingConstructor {
                    controller: "Failing".into(),
                })
            })
            .endpoint("get", crate::route::get("", || async { "unreachable" }))
            .build()
            .unwrap();
        let stateless = Stateless::new(&class, depends()).unwrap();
        let (status, _) = call(&stateless.router(), Method::GET, "/failing/v1.0").await;
        assert_eq!(status, 500);
    }

    #[tokio::test]
    async fn test_one_resolution_per_request() {
        use axum::Json;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        use crate::inject::{Dep, This};

        #[derive(Clone)]
        struct Stamp(usize);

        struct Ledger {
            stamp: usize,
        }

        async fn both(This(ledger): This<Ledger>, Dep(stamp): Dep<Stamp>) -> Json<[usize; 2]> {
            Json([ledger.stamp, stamp.0])
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let provider = calls.clone();
        let depends = Depends::new().provide(move || Stamp(provider.fetch_add(1, Ordering::SeqCst)));

        let class = ControllerClass::<Ledger>::new("Ledger")
            .depends::<Stamp>()
            .init(|deps| Ok(Ledger { stamp: deps.take::<Stamp>()?.0 }))
            .endpoint("both", crate::route::get("both", both).dependency::<Stamp>())
            .build()
            .unwrap();
        let router = class.routes(depends).unwrap();

        let (status, body) = call(&router, Method::GET, "/ledger/v1.0/both").await;
        assert_eq!(status, 200);
        assert_eq!(body, "[0,0]");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let (_, body) = call(&router, Method::GET, "/ledger/v1.0/both").await;
        assert_eq!(body, "[1,1]");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_missing_provider_is_reported_at_mount() {
        let err = example_children().routes(Depends::new()).err().unwrap();
        assert!(matches!(
            err,
            RoutingError::MissingDependency { ref controller, .. } if controller == "ExampleRoutableChildren"
        ));
    }
}
