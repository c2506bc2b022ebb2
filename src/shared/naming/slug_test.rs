#[cfg(test)]
mod tests {
    use crate::naming::{slugify, slugify_with};

    #[test]
    fn test_pascal_case_names() {
        assert_eq!(slugify("UserRoutes"), "user-routes");
        assert_eq!(slugify("TestView"), "test-view");
        assert_eq!(slugify("ExampleRoutableChildren"), "example-routable-children");
        assert_eq!(slugify("Children"), "children");
    }

    #[test]
    fn test_underscored_class_names() {
        assert_eq!(slugify("CTagging_Default"), "c-tagging-default");
        assert_eq!(slugify("CTagging_Default2"), "c-tagging-default2");
        assert_eq!(
            slugify("ExampleRoutableParent1_TestGeneric"),
            "example-routable-parent1-test-generic"
        );
        assert_eq!(
            slugify("ExampleRoutableChildren_RoutesTest"),
            "example-routable-children-routes-test"
        );
    }

    #[test]
    fn test_leading_acronym() {
        assert_eq!(slugify("HTTPServer"), "http-server");
        assert_eq!(slugify("APIController"), "api-controller");
        assert_eq!(slugify("ID"), "id");
    }

    #[test]
    fn test_camel_case_and_digits() {
        assert_eq!(slugify("userId"), "user-id");
        assert_eq!(slugify("v2Api"), "v2-api");
    }

    #[test]
    fn test_empty_and_plain() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("books"), "books");
        assert_eq!(slugify("1.0"), "1.0");
    }

    #[test]
    fn test_idempotent() {
        let names = [
            "UserRoutes",
            "HTTPServer",
            "CTagging_Default2",
            "already-slugged",
            "snake_case_name",
            "",
            "ABCDef",
        ];
        for name in names {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "slugify is not idempotent for {name:?}");

            let once = slugify_with(name, '_');
            assert_eq!(slugify_with(&once, '_'), once, "snake slug is not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_underscore_separator() {
        assert_eq!(slugify_with("UserRoutes", '_'), "user_routes");
        assert_eq!(slugify_with("user-routes", '_'), "user_routes");
    }
}
