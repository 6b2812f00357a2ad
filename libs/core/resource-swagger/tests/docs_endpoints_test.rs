//! HTTP tests for the documentation endpoints
//!
//! These tests drive the router returned by `Swagger::into_router` with
//! in-process requests and check the JSON documents it renders.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use http_body_util::BodyExt;
use resource_swagger::*;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, "docs.test")
        .body(Body::empty())
        .unwrap()
}

fn widget_view() -> ResourceView {
    let document = Arc::new(Document::new("Widget").field("name", Field::new(FieldKind::String)));
    ResourceView::new(
        Resource::new(document),
        [CrudMethod::List, CrudMethod::Fetch],
    )
}

fn widget_swagger(config: SwaggerConfig) -> Swagger {
    let mut swagger = Swagger::new(config);
    swagger.register(&widget_view(), RegisterOptions::new());
    swagger
}

#[tokio::test]
async fn test_resource_listing() {
    let app = widget_swagger(SwaggerConfig::new().api_version("0.1")).into_router();

    let response = app.oneshot(get("/api-docs.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "swaggerVersion": "1.1",
            "basePath": "http://docs.test",
            "apiVersion": "0.1",
            "apis": [
                {"path": "/api-docs.json/widget", "description": "Operations about Widget"}
            ]
        })
    );
}

#[tokio::test]
async fn test_widget_declaration() {
    let app = widget_swagger(SwaggerConfig::new()).into_router();

    let response = app.oneshot(get("/api-docs.json/widget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["resourcePath"], "/api-docs.json/widget");
    assert!(body.get("apiVersion").is_none());

    let paths: Vec<_> = body["apis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|api| api["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["/widget/", "/widget/{widget}/"]);

    assert_eq!(
        body["models"],
        json!({"Widget": {"id": "Widget", "properties": {"name": {"type": "string"}}}})
    );

    let list = &body["apis"][0]["operations"][0];
    assert_eq!(list["httpMethod"], "GET");
    assert_eq!(list["nickname"], "listWidget");
    assert_eq!(list["summary"], "List all widgets");
    let names: Vec<_> = list["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["_fields", "_limit", "_skip"]);
    assert_eq!(
        list["parameters"][1]["allowableValues"],
        json!({"valueType": "RANGE", "min": 1, "max": 1000})
    );

    let fetch = &body["apis"][1]["operations"][0];
    assert_eq!(fetch["nickname"], "fetchWidget");
    assert_eq!(
        fetch["errorResponses"],
        json!([
            {"code": 400, "reason": "Invalid widget ID"},
            {"code": 404, "reason": "Widget not found"}
        ])
    );
    let id = fetch["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "widget")
        .unwrap();
    assert_eq!(id["paramType"], "path");
    assert_eq!(id["required"], true);
}

#[tokio::test]
async fn test_unknown_group_returns_404() {
    let app = widget_swagger(SwaggerConfig::new()).into_router();

    let response = app.oneshot(get("/api-docs.json/gadget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_prefix_and_document_name() {
    let config = SwaggerConfig::new().url_prefix("/api").document_name("docs");
    let app = widget_swagger(config).into_router();

    let response = app.clone().oneshot(get("/api/docs.json")).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["basePath"], "http://docs.test/api");
    assert_eq!(body["apis"][0]["path"], "/docs.json/widget");

    let response = app.clone().oneshot(get("/api/docs.v1/widget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["resourcePath"], "/docs.v1/widget");

    let response = app.oneshot(get("/api-docs.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_every_listing_link_resolves() {
    let mut swagger = widget_swagger(SwaggerConfig::new().url_prefix("/api"));
    let gadget = Arc::new(Document::new("Gadget").field("size", Field::new(FieldKind::Int)));
    swagger.register(
        &ResourceView::new(Resource::new(gadget), [CrudMethod::List]),
        RegisterOptions::new(),
    );
    let app = swagger.into_router();

    let response = app.clone().oneshot(get("/api/api-docs.json")).await.unwrap();
    let listing = json_body(response.into_body()).await;
    let links: Vec<String> = listing["apis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|api| api["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(links.len(), 2);

    for link in links {
        let response = app.clone().oneshot(get(&format!("/api{link}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{link}");
        let body = json_body(response.into_body()).await;
        assert_eq!(body["resourcePath"], link);
    }
}

#[tokio::test]
async fn test_declaration_accepts_any_format() {
    let app = widget_swagger(SwaggerConfig::new()).into_router();

    for format in ["yaml", "xml", "json"] {
        let uri = format!("/api-docs.{format}/widget");
        let response = app.clone().oneshot(get(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = json_body(response.into_body()).await;
        assert_eq!(body["resourcePath"], uri);
    }
}

#[tokio::test]
async fn test_declaration_requires_document_name() {
    let app = widget_swagger(SwaggerConfig::new()).into_router();

    for uri in ["/swagger.json/widget", "/api-docs./widget", "/api-docs/widget"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn test_routed_converter_placeholders() {
    let mut swagger = Swagger::new(SwaggerConfig::new());
    swagger.route(
        "/items/<int:id>",
        axum::routing::get(|axum::extract::Path(id): axum::extract::Path<u32>| async move {
            id.to_string()
        }),
        RouteOptions::new().endpoint(Endpoint::new(
            "/items/<int:id>",
            "One item",
            vec![Operation::new(HttpMethod::Get, "item")],
        )),
    );
    let app = swagger.into_router();

    let response = app.clone().oneshot(get("/items/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"42");

    let response = app.oneshot(get("/api-docs.json/items_id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["apis"][0]["path"], "/items/{id}");
}

#[tokio::test]
async fn test_routed_function_is_mounted_and_documented() {
    let mut swagger = Swagger::new(SwaggerConfig::new().url_prefix("/api"));
    let token = Model::new(
        "Token",
        BTreeMap::from([(
            "token".to_string(),
            Property::new("string", Some("The token which comes back".into()), None),
        )]),
    );
    let login = Operation::new(HttpMethod::Post, "function")
        .summary("Log in")
        .response_class("Token")
        .with_parameters(BTreeMap::from([(
            "data".to_string(),
            Parameter::parse("body", "Input", "Credentials")
                .unwrap()
                .required(true),
        )]))
        .with_error_responses(BTreeMap::from([(401, "Invalid e-mail/password".to_string())]));
    swagger.route(
        "/login",
        post(|| async { "Thanks!" }),
        RouteOptions::new()
            .description("Authentication")
            .endpoint(Endpoint::new("/login/", "Log in", vec![login]))
            .model(token),
    );
    let app = swagger.into_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/api-docs.json/login")).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["apis"][0]["operations"][0]["responseClass"], "Token");
    assert_eq!(
        body["apis"][0]["operations"][0]["parameters"][0]["paramType"],
        "body"
    );
    assert!(body["models"]["Token"].is_object());
}

#[tokio::test]
async fn test_responses_allow_any_origin() {
    let app = widget_swagger(SwaggerConfig::new()).into_router();

    let request = Request::builder()
        .uri("/api-docs.json")
        .header(header::ORIGIN, "http://ui.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
