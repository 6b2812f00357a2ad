//! Resource Swagger - API declarations for CRUD resources
//!
//! This library provides tools for:
//! - Describing CRUD resources, their document fields, filters and views
//! - Deriving Swagger 1.1 operations, parameters and models from them
//! - Adding documentation hints on resources or at registration time
//! - Serving the resource listing and per-group API declarations with Axum
//!
//! ```ignore
//! use resource_swagger::{
//!     CrudMethod, Document, Field, FieldKind, RegisterOptions, Resource, ResourceView,
//!     Swagger, SwaggerConfig,
//! };
//! use std::sync::Arc;
//!
//! let document = Arc::new(Document::new("Widget").field("name", Field::new(FieldKind::String)));
//! let view = ResourceView::new(Resource::new(document), [CrudMethod::List, CrudMethod::Fetch]);
//!
//! let mut swagger = Swagger::new(SwaggerConfig::default());
//! swagger.register(&view, RegisterOptions::new());
//! let router = swagger.into_router(); // GET /api-docs.json, GET /api-docs.json/widget
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod introspect;
pub mod registry;
pub mod resource;
pub mod schema;

pub use config::SwaggerConfig;
pub use error::{Result, SwaggerError};
pub use handlers::{Swagger, SwaggerState, docs_router};
pub use registry::{RegisterOptions, RouteOptions, SwaggerRegistry};
pub use resource::{
    CrudMethod, DocHints, Document, Field, FieldKind, Filter, Resource, ResourceView,
};
pub use schema::{
    AllowableValues, ApiGroup, Endpoint, ErrorResponse, HttpMethod, Model, Operation, ParamType,
    Parameter, Property,
};
