use super::{Api, Config, Logs, RoutableBox, Routing, Server};
use crate::route::template::{ModulePolicy, DEFAULT_BASE_TEMPLATE};
use std::time::Duration;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        routable: RoutableBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Some(Api {
                name: Some("routable:8091".to_string()),
                port: Some("8091".to_string()),
            }),
            server: Some(Server {
                request_timeout: Some(Duration::from_secs(5)),
                shutdown_timeout: Some(Duration::from_secs(2)),
            }),
            routing: Some(Routing {
                base_template: Some(DEFAULT_BASE_TEMPLATE.to_string()),
                default_version: Some("1.0".to_string()),
                on_missing_module: Some(ModulePolicy::Elide),
                separator: Some('-'),
            }),
        },
    }
}
