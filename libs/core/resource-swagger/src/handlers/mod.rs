//! HTTP Handlers for resource-swagger
//!
//! Provides Axum handlers for serving the generated API declarations.

pub mod docs;

pub use docs::{Swagger, SwaggerApiDoc, SwaggerState, docs_router};
