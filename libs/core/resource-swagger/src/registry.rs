//! Swagger Registry - in-memory storage for API groups
//!
//! Groups are filled once while the application registers its views and
//! routes, then handed to the serving layer as read-only state.

use crate::fallback::first_value;
use crate::introspect::{endpoints_from_view, models_from_view};
use crate::resource::{DocHints, ResourceView};
use crate::schema::{ApiGroup, Endpoint, Model};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Overrides accepted when registering a resource view
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Group name used only for the documentation
    pub swagger_name: Option<String>,
    /// URL the view is mounted at, e.g. `/widgets/`
    pub url: Option<String>,
    pub hints: DocHints,
}

impl RegisterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swagger_name(mut self, name: impl Into<String>) -> Self {
        self.swagger_name = Some(name.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn hints(mut self, hints: DocHints) -> Self {
        self.hints = hints;
        self
    }
}

/// Documentation for a hand-written route
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    pub name: Option<String>,
    pub description: String,
    pub endpoints: Vec<Endpoint>,
    pub models: BTreeMap<String, Model>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn model(mut self, model: Model) -> Self {
        self.models.insert(model.id.clone(), model);
        self
    }
}

/// Registered API groups in insertion order
#[derive(Debug, Clone, Default)]
pub struct SwaggerRegistry {
    groups: Vec<ApiGroup>,
    /// Index: group name -> position in `groups`
    index: HashMap<String, usize>,
}

impl SwaggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, or extend the existing group of the same name
    pub fn add_api(
        &mut self,
        name: impl Into<String>,
        endpoints: Vec<Endpoint>,
        models: BTreeMap<String, Model>,
        description: impl Into<String>,
    ) {
        let name = name.into();
        let group = ApiGroup::new(name.clone(), description, endpoints, models);

        match self.index.get(&name) {
            Some(&idx) => {
                debug!(group = %name, "Extending API group");
                self.groups[idx].extend(group);
            }
            None => {
                debug!(group = %name, "Adding API group");
                self.index.insert(name, self.groups.len());
                self.groups.push(group);
            }
        }
    }

    /// Introspect a resource view and record its endpoints and models
    pub fn add_view(&mut self, view: &ResourceView, options: &RegisterOptions) {
        let resource = &view.resource;
        let document_name = resource.document_name();
        let overrides = &options.hints;

        let name = first_value(
            [
                options.swagger_name.clone(),
                overrides.name.clone(),
                resource.hints.name.clone(),
            ],
            document_name.to_lowercase(),
        );
        let url = normalize_url(options.url.as_deref(), &name);
        let description = first_value(
            [
                overrides.description.clone(),
                resource.hints.description.clone(),
            ],
            format!("Operations about {document_name}"),
        );

        let endpoints = endpoints_from_view(view, &url, &description, overrides);
        let models = models_from_view(view);
        info!(
            group = %name,
            document = document_name,
            endpoints = endpoints.len(),
            models = models.len(),
            "Registered resource view"
        );
        self.add_api(name, endpoints, models, description);
    }

    /// Record a hand-written route's documentation under `name`
    pub fn add_func(&mut self, name: impl Into<String>, options: RouteOptions) {
        let name = name.into();
        info!(group = %name, endpoints = options.endpoints.len(), "Registered route");
        self.add_api(name, options.endpoints, options.models, options.description);
    }

    pub fn groups(&self) -> &[ApiGroup] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&ApiGroup> {
        self.index.get(name).map(|&idx| &self.groups[idx])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Relative view URL: no leading slash, always a trailing one
fn normalize_url(url: Option<&str>, name: &str) -> String {
    let url = url.map_or_else(|| format!("{name}/"), |u| u.trim_start_matches('/').to_string());
    if url.is_empty() || url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}
