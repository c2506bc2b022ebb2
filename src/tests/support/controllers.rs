// Controller fixtures shared by the scenario tests.

use axum::{extract::Path, Json, Router};
use std::sync::Arc;

use crate::controller::{CompiledClass, ControllerClass};
use crate::inject::{Dep, Depends, Injected, This};
use crate::route::{delete, get, patch, post, put, Model, ResponseClass, RoutingResult};

pub const NAME_MODULE_CHILDREN: &str = "Children";
pub const NAME_MODULE_PARENT: &str = "Parent";

pub fn response(n: i64) -> String {
    format!("Ok {n}")
}

/// Database handle resolved through `Depends`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Db(pub i64);

pub fn get_db() -> Db {
    Db(99)
}

pub fn depends() -> Depends {
    Depends::new().provide(get_db)
}

/// Stateless example controller built per request.
pub struct Example {
    pub injected: i64,
    pub db_from_init: i64,
}

fn init_with(injected: i64) -> impl Fn(&mut Injected) -> RoutingResult<Example> + Send + Sync + 'static {
    move |deps| {
        Ok(Example {
            injected,
            db_from_init: deps.take::<Db>()?.0,
        })
    }
}

async fn example_get(This(this): This<Example>, Path(_id): Path<u64>) -> String {
    response(this.injected)
}

async fn example_add(This(this): This<Example>) -> String {
    response(this.injected)
}

async fn example_delete(This(this): This<Example>, Path(_id): Path<String>) -> String {
    response(this.injected)
}

async fn attr_depends(Dep(db): Dep<Db>) -> Json<i64> {
    Json(db.0)
}

async fn init_depends(This(this): This<Example>) -> Json<i64> {
    Json(this.db_from_init)
}

async fn method_depends(Dep(db): Dep<Db>) -> Json<i64> {
    Json(db.0)
}

async fn array() -> Json<Vec<i64>> {
    Json(vec![1, 2, 3])
}

async fn array_parent() -> Json<Vec<i64>> {
    Json(vec![1, 2, 3, 4])
}

pub fn example_children() -> Arc<CompiledClass<Example>> {
    ControllerClass::<Example>::new("ExampleRoutableChildren")
        .module(NAME_MODULE_CHILDREN)
        .depends::<Db>()
        .init(init_with(1))
        .endpoint(
            "get_",
            get("{id:int}", example_get).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "add",
            post("", example_add).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "put",
            put("", example_add).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "delete_",
            delete("{id}", example_delete).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "patch",
            patch("{id}", example_delete).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "get_class_attr_depends",
            get("attr-depends", attr_depends).response_model(Model::of::<i64>()),
        )
        .endpoint(
            "get_init_depends",
            get("init-depends", init_depends).response_model(Model::of::<i64>()),
        )
        .endpoint(
            "get_method_depends",
            get("method-depends", method_depends)
                .response_model(Model::of::<i64>())
                .dependency::<Db>(),
        )
        .endpoint(
            "get_array",
            get("array", array)
                .response_model(Model::of::<Vec<i64>>())
                .response_class(ResponseClass::Json),
        )
        .build()
        .expect("children class")
}

pub fn example_parent(children: &Arc<CompiledClass<Example>>) -> Arc<CompiledClass<Example>> {
    ControllerClass::<Example>::new("ExampleRoutableParent")
        .extends(children)
        .module(NAME_MODULE_PARENT)
        .version("1.1")
        .init(init_with(2))
        .override_method("get_array", array_parent)
        .build()
        .expect("parent class")
}

/// Both example classes mounted as stateless routers.
pub fn create_app() -> Router {
    let children = example_children();
    let parent = example_parent(&children);
    Router::new()
        .merge(children.routes(depends()).expect("children routes"))
        .merge(parent.routes(depends()).expect("parent routes"))
}

/// Instance-bound calculator controller.
pub struct Calc {
    pub injected: i64,
}

async fn calc_add(This(calc): This<Calc>, Path(x): Path<i64>) -> Json<i64> {
    Json(x + calc.injected)
}

async fn calc_sub(This(calc): This<Calc>, Path(x): Path<i64>) -> Json<i64> {
    Json(x - calc.injected)
}

async fn calc_async(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 1)
}

async fn calc_echo(This(calc): This<Calc>, Path(val): Path<String>) -> String {
    format!("{val} {}", calc.injected)
}

async fn calc_base_method(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 1)
}

async fn calc_override(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 2)
}

async fn calc_template1(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 100)
}

async fn calc_template2(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 101)
}

async fn calc_template3(This(calc): This<Calc>) -> Json<i64> {
    Json(calc.injected + 102)
}

pub fn calc_children() -> Arc<CompiledClass<Calc>> {
    ControllerClass::<Calc>::new("ExampleRoutableChildren")
        .endpoint("add", get("/add/{x}", calc_add))
        .endpoint("sub", post("/sub/{x}", calc_sub))
        .endpoint("do_async", get("/async", calc_async))
        .endpoint(
            "aecho",
            get("/aecho/{val}", calc_echo).response_class(ResponseClass::PlainText),
        )
        .endpoint(
            "overridable_method",
            get("/{version}/base-method", calc_base_method),
        )
        .build()
        .expect("calc children class")
}

pub fn calc_parent(children: &Arc<CompiledClass<Calc>>) -> Arc<CompiledClass<Calc>> {
    ControllerClass::<Calc>::new("ExampleRoutableParent")
        .extends(children)
        .module("Test")
        .endpoint(
            "overridable_method",
            get("/override-base-method", calc_override),
        )
        .endpoint("template1_method", get("get", calc_template1))
        .endpoint("template2_method", get("/{controller}/get", calc_template2))
        .endpoint("template3_method", get("/{module}/get", calc_template3))
        .build()
        .expect("calc parent class")
}
