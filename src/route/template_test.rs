#[cfg(test)]
mod tests {
    use crate::route::endpoint::Segments;
    use crate::route::error::RoutingError;
    use crate::route::template::{
        resolve, scan, ModulePolicy, PathResolver, Piece, DEFAULT_BASE_TEMPLATE,
    };

    #[test]
    fn relative_path_elides_empty_module() {
        let resolved = resolve("{id}", "UserRoutes", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/user-routes/v1.0/{id}");
        assert_eq!(resolved.template_path, "/{controller}/v{version}/{id}");
        assert_eq!(
            resolved.expanded_template,
            "/{module}/{controller}/v{version}/{id}"
        );
    }

    #[test]
    fn relative_path_with_module() {
        let resolved = resolve(
            "{id}",
            "ExampleRoutableChildren",
            "TestView",
            "1.0",
            DEFAULT_BASE_TEMPLATE,
        )
        .unwrap();
        assert_eq!(
            resolved.final_path,
            "/test-view/example-routable-children/v1.0/{id}"
        );
        assert_eq!(
            resolved.template_path,
            "/{module}/{controller}/v{version}/{id}"
        );
    }

    #[test]
    fn absolute_paths_skip_the_base_template() {
        let resolved = resolve(
            "/{controller}/get",
            "ExampleRoutableParent",
            "test",
            "1.0",
            DEFAULT_BASE_TEMPLATE,
        )
        .unwrap();
        assert_eq!(resolved.final_path, "/example-routable-parent/get");

        let resolved = resolve("/{module}/get", "Anything", "test", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/test/get");
    }

    #[test]
    fn plain_templates_only_get_normalised() {
        let resolved = resolve("/plain/path/", "X", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/plain/path");
        assert_eq!(resolved.template_path, "/plain/path");

        let resolved = resolve("plain", "X", "", "1.0", "{user_path}").unwrap();
        assert_eq!(resolved.final_path, "/plain");

        let resolved = resolve("/", "X", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/");
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        let resolved = resolve("/a//", "X", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/a/");
    }

    #[test]
    fn empty_relative_path_points_at_the_controller_root() {
        let resolved = resolve("", "UserRoutes", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/user-routes/v1.0");
    }

    #[test]
    fn module_only_template_collapses_to_root() {
        let resolved = resolve("/{module}", "X", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/");
    }

    #[test]
    fn version_is_lowercased() {
        let resolved = resolve("items", "Shop", "", "2.0-BETA", DEFAULT_BASE_TEMPLATE).unwrap();
        assert_eq!(resolved.final_path, "/shop/v2.0-beta/items");
    }

    #[test]
    fn custom_separator() {
        let resolver = PathResolver::default().with_separator('_');
        let resolved = resolver
            .resolve("{id}", &Segments::new("TestView", "UserRoutes", "1.0"))
            .unwrap();
        assert_eq!(resolved.final_path, "/test_view/user_routes/v1.0/{id}");
    }

    #[test]
    fn reject_policy_fails_without_module() {
        let resolver = PathResolver::default().with_policy(ModulePolicy::Reject);
        let err = resolver
            .resolve("{id}", &Segments::new("", "UserRoutes", "1.0"))
            .unwrap_err();
        assert!(matches!(err, RoutingError::MissingModule { ref controller, .. } if controller == "UserRoutes"));

        // No module placeholder, nothing to reject.
        let resolved = resolver
            .resolve("/{controller}/ping", &Segments::new("", "UserRoutes", "1.0"))
            .unwrap();
        assert_eq!(resolved.final_path, "/user-routes/ping");
    }

    #[test]
    fn base_template_without_user_path() {
        let resolver = PathResolver::new("/{controller}/fixed");
        let err = resolver
            .resolve("{id}", &Segments::new("", "UserRoutes", "1.0"))
            .unwrap_err();
        assert!(matches!(err, RoutingError::MissingUserPath { .. }));

        let resolved = resolver
            .resolve("/absolute", &Segments::new("", "UserRoutes", "1.0"))
            .unwrap();
        assert_eq!(resolved.final_path, "/absolute");
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        for raw in ["/{id", "/id}", "/{a{b}", "/}{", "/{}"] {
            let err = resolve(raw, "X", "", "1.0", DEFAULT_BASE_TEMPLATE).unwrap_err();
            assert!(
                matches!(err, RoutingError::InvalidPath { .. }),
                "{raw} should be invalid, got {err:?}"
            );
        }
    }

    #[test]
    fn user_literals_matching_a_slug_are_kept() {
        let resolved = resolve(
            "user-routes/{controller}",
            "UserRoutes",
            "",
            "1.0",
            DEFAULT_BASE_TEMPLATE,
        )
        .unwrap();
        assert_eq!(resolved.final_path, "/user-routes/v1.0/user-routes/user-routes");
        assert_eq!(
            resolved.template_path,
            "/{controller}/v{version}/user-routes/{controller}"
        );
    }

    #[test]
    fn scan_splits_parameters() {
        let pieces = scan("/a/{id:int}/b").unwrap();
        assert_eq!(
            pieces,
            vec![
                Piece::Literal("/a/"),
                Piece::Param("id:int"),
                Piece::Literal("/b"),
            ]
        );
    }
}
