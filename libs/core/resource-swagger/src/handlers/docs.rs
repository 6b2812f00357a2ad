//! Documentation endpoint handlers
//!
//! Serves the resource listing at `/{document}.json` and one API
//! declaration per group at `/{document}.{format}/{group}`.

use crate::config::SwaggerConfig;
use crate::error::{Result, SwaggerError, SwaggerErrorResponse};
use crate::introspect::brace_placeholders;
use crate::registry::{RegisterOptions, RouteOptions, SwaggerRegistry};
use crate::resource::ResourceView;
use crate::schema::{Endpoint, Model};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, header},
    routing::{MethodRouter, get},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa::{OpenApi, ToSchema};

/// Read-only state shared by the documentation handlers
#[derive(Clone)]
pub struct SwaggerState {
    registry: Arc<SwaggerRegistry>,
    config: Arc<SwaggerConfig>,
}

impl SwaggerState {
    pub fn new(registry: SwaggerRegistry, config: SwaggerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> &SwaggerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SwaggerConfig {
        &self.config
    }

    /// Absolute URL of the API root
    fn base_path(&self, headers: &HeaderMap) -> String {
        let prefix = &self.config.url_prefix;
        if let Some(base_url) = &self.config.base_url {
            return format!("{base_url}{prefix}");
        }

        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("localhost");
        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("http");
        format!("{scheme}://{host}{prefix}")
    }

    fn base_payload(&self, headers: &HeaderMap) -> BasePayload {
        BasePayload {
            swagger_version: self.config.swagger_version.clone(),
            base_path: self.base_path(headers),
            api_version: self.config.api_version.clone(),
        }
    }

    /// Declaration path relative to the URL prefix
    fn declaration_path(&self, format: &str, name: &str) -> String {
        format!("/{}.{}/{}", self.config.document_name, format, name)
    }
}

/// Fields shared by the listing and every declaration
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasePayload {
    pub swagger_version: String,
    pub base_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Pointer to one group's declaration
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiReference {
    pub path: String,
    pub description: String,
}

/// Root document listing every registered group
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceListing {
    #[serde(flatten)]
    pub base: BasePayload,
    pub apis: Vec<ApiReference>,
}

/// Endpoints and models of a single group
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    #[serde(flatten)]
    pub base: BasePayload,
    pub resource_path: String,
    pub apis: Vec<Endpoint>,
    pub models: BTreeMap<String, Model>,
}

/// Create the documentation router.
///
/// The declaration route captures the whole `{document}.{format}` segment;
/// the handler checks the document name and accepts any format.
pub fn docs_router(state: SwaggerState) -> Router {
    let prefix = state.config.url_prefix.clone();
    let document = state.config.document_name.clone();

    let router = Router::new()
        .route(&format!("{prefix}/{document}.json"), get(api_docs))
        .route(&format!("{prefix}/{{document}}/{{*name}}"), get(api_declaration));

    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::HEAD]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /{document}.json - Resource listing
#[utoipa::path(
    get,
    path = "/api-docs.json",
    tag = "Swagger",
    responses(
        (status = 200, description = "Resource listing", body = ResourceListing),
    )
)]
async fn api_docs(State(state): State<SwaggerState>, headers: HeaderMap) -> Json<ResourceListing> {
    let apis = state
        .registry
        .groups()
        .iter()
        .map(|group| ApiReference {
            path: state.declaration_path("json", &group.name),
            description: group.description.clone(),
        })
        .collect::<Vec<_>>();
    debug!(groups = apis.len(), "Serving resource listing");

    Json(ResourceListing {
        base: state.base_payload(&headers),
        apis,
    })
}

/// GET /{document}.{format}/{name} - API declaration for one group
#[utoipa::path(
    get,
    path = "/api-docs.{format}/{name}",
    tag = "Swagger",
    params(
        ("format" = String, Path, description = "Document format, any value is accepted"),
        ("name" = String, Path, description = "Group name")
    ),
    responses(
        (status = 200, description = "API declaration", body = ApiDeclaration),
        (status = 404, description = "Unknown document or group", body = SwaggerErrorResponse),
    )
)]
async fn api_declaration(
    State(state): State<SwaggerState>,
    headers: HeaderMap,
    Path((document, name)): Path<(String, String)>,
) -> Result<Json<ApiDeclaration>> {
    let format = document
        .strip_prefix(state.config.document_name.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|format| !format.is_empty())
        .ok_or_else(|| SwaggerError::DocumentNotFound(document.clone()))?;
    let group = state
        .registry
        .get(&name)
        .ok_or_else(|| SwaggerError::GroupNotFound(name.clone()))?;
    debug!(group = %name, format = %format, "Serving API declaration");

    Ok(Json(ApiDeclaration {
        base: state.base_payload(&headers),
        resource_path: state.declaration_path(format, &name),
        apis: group.endpoints.clone(),
        models: group.models.clone(),
    }))
}

/// Registration facade for the host application.
///
/// Collects resource views and hand-written routes at start-up; the
/// registry is frozen when [`Swagger::into_router`] is called.
pub struct Swagger {
    config: SwaggerConfig,
    registry: SwaggerRegistry,
    routes: Vec<(String, MethodRouter)>,
}

impl Swagger {
    pub fn new(config: SwaggerConfig) -> Self {
        Self {
            config,
            registry: SwaggerRegistry::new(),
            routes: Vec::new(),
        }
    }

    /// Document a resource view
    pub fn register(&mut self, view: &ResourceView, options: RegisterOptions) -> &mut Self {
        self.registry.add_view(view, &options);
        self
    }

    /// Mount a hand-written handler under the URL prefix and document it.
    ///
    /// Flask-style `<converter:arg>` placeholders become `{arg}`, in the
    /// mounted path and in the documented endpoint paths. The group name
    /// defaults to the URL with slashes turned into underscores, e.g.
    /// `/auth/login` becomes `auth_login`.
    pub fn route(
        &mut self,
        url: &str,
        handler: MethodRouter,
        mut options: RouteOptions,
    ) -> &mut Self {
        let url = brace_placeholders(url);
        for endpoint in &mut options.endpoints {
            endpoint.path = brace_placeholders(&endpoint.path);
        }
        let name = options
            .name
            .clone()
            .unwrap_or_else(|| default_route_name(&url));
        self.routes
            .push((format!("{}{}", self.config.url_prefix, url), handler));
        self.registry.add_func(name, options);
        self
    }

    /// Record a group directly
    pub fn add_api(
        &mut self,
        name: impl Into<String>,
        endpoints: Vec<Endpoint>,
        models: BTreeMap<String, Model>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.registry.add_api(name, endpoints, models, description);
        self
    }

    pub fn registry(&self) -> &SwaggerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SwaggerConfig {
        &self.config
    }

    /// Freeze the registry and build the router serving the documentation
    /// together with every routed handler
    pub fn into_router(self) -> Router {
        info!(
            groups = self.registry.len(),
            document = %self.config.document_name,
            prefix = %self.config.url_prefix,
            "Serving Swagger documentation"
        );
        let routes = self
            .routes
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| {
                router.route(&path, handler)
            });
        docs_router(SwaggerState::new(self.registry, self.config)).merge(routes)
    }
}

fn default_route_name(url: &str) -> String {
    let name = url
        .trim_matches('/')
        .replace(['{', '}'], "")
        .replace('/', "_");
    if name.is_empty() { "root".to_string() } else { name }
}

/// OpenAPI documentation for the documentation endpoints
#[derive(OpenApi)]
#[openapi(
    paths(api_docs, api_declaration),
    components(schemas(
        BasePayload,
        ApiReference,
        ResourceListing,
        ApiDeclaration,
        SwaggerErrorResponse,
        crate::schema::Endpoint,
        crate::schema::Operation,
        crate::schema::Parameter,
        crate::schema::Model,
        crate::schema::Property,
    )),
    tags(
        (name = "Swagger", description = "Swagger 1.1 resource listing and API declarations")
    )
)]
pub struct SwaggerApiDoc;
