//! Demo service documenting a couple of CRUD resources and one plain route.
//!
//! `GET /api-docs.json` lists the groups, `GET /api-docs.json/widget`
//! returns the widget declaration.

pub mod config;
pub mod resources;
pub mod shutdown;

use axum::{Json, Router, routing::post};
use resource_swagger::{
    Endpoint, HttpMethod, Model, Operation, Parameter, Property, RegisterOptions, RouteOptions,
    Swagger, SwaggerConfig,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Build the router with every documented resource registered
pub fn app(swagger_config: SwaggerConfig) -> resource_swagger::Result<Router> {
    let mut swagger = Swagger::new(swagger_config);
    swagger
        .register(
            &resources::widget_view(),
            RegisterOptions::new().url("/widgets/"),
        )
        .register(&resources::user_view(), RegisterOptions::new())
        .route("/api-function", post(api_function), api_function_docs()?);

    Ok(swagger.into_router())
}

async fn api_function() -> Json<Value> {
    Json(json!({"token": "Thanks!"}))
}

fn api_function_docs() -> resource_swagger::Result<RouteOptions> {
    let login = Operation::new(HttpMethod::Post, "function")
        .summary("More description!")
        .response_class("Token")
        .with_parameters(BTreeMap::from([(
            "data".to_string(),
            Parameter::parse("body", "Input", "Whatever you need to pass in")?.required(true),
        )]))
        .with_error_responses(BTreeMap::from([(
            401,
            "Invalid e-mail/password".to_string(),
        )]));

    Ok(RouteOptions::new()
        .name("api_function")
        .description("The description of this API view")
        .endpoint(Endpoint::new(
            "/api-function/",
            "Exchange credentials for a token",
            vec![login],
        ))
        .model(Model::new(
            "Input",
            BTreeMap::from([(
                "input_string".to_string(),
                Property::new("string", Some("Input to the function".into()), None),
            )]),
        ))
        .model(Model::new(
            "Token",
            BTreeMap::from([(
                "token".to_string(),
                Property::new("string", Some("The token which comes back".into()), None),
            )]),
        )))
}
