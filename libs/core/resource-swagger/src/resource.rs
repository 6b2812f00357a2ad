//! Resource definitions consumed by the introspection layer
//!
//! The host CRUD framework describes each resource with the types in this
//! module: a document and its typed fields, the filters it accepts, the
//! views exposing it and the documentation hints attached to it.

use crate::schema::{HttpMethod, Parameter};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use strum::{Display, EnumIter};

/// Concrete type of a document field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    ObjectId,
    /// Homogeneous list; the element field is optional
    List(Option<Box<Field>>),
    /// String-keyed mapping; the value field is optional
    Dict(Option<Box<Field>>),
    /// Reference to another document by name
    Reference(String),
    /// Document stored inline
    Embedded(Arc<Document>),
    /// Anything else, carried by its textual representation
    Other(String),
}

/// A declared field with optional help text
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub kind: FieldKind,
    pub help_text: Option<String>,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            help_text: None,
        }
    }

    pub fn help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn list_of(field: Field) -> Self {
        Self::new(FieldKind::List(Some(Box::new(field))))
    }

    pub fn dict_of(field: Field) -> Self {
        Self::new(FieldKind::Dict(Some(Box::new(field))))
    }

    pub fn reference(document: impl Into<String>) -> Self {
        Self::new(FieldKind::Reference(document.into()))
    }

    pub fn embedded(document: Arc<Document>) -> Self {
        Self::new(FieldKind::Embedded(document))
    }
}

/// A document type and its fields, keyed by field name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub name: String,
    pub fields: BTreeMap<String, Field>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }
}

/// A query filter declared on a field; `op` is empty or `exact` for equality
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub op: String,
}

impl Filter {
    pub fn new(op: impl Into<String>) -> Self {
        Self { op: op.into() }
    }

    pub fn exact() -> Self {
        Self::default()
    }

    /// Suffix appended to the query key, if any
    pub fn suffix(&self) -> Option<&str> {
        match self.op.as_str() {
            "" | "exact" => None,
            op => Some(op),
        }
    }
}

/// CRUD methods a resource view can allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CrudMethod {
    List,
    Create,
    BulkUpdate,
    Update,
    Fetch,
    Delete,
}

impl CrudMethod {
    /// Methods served on the collection URL
    pub const LIST_METHODS: [CrudMethod; 3] =
        [CrudMethod::List, CrudMethod::Create, CrudMethod::BulkUpdate];

    /// Methods served on the single-item URL
    pub const DETAIL_METHODS: [CrudMethod; 3] =
        [CrudMethod::Update, CrudMethod::Fetch, CrudMethod::Delete];

    pub fn http_method(self) -> HttpMethod {
        match self {
            CrudMethod::List | CrudMethod::Fetch => HttpMethod::Get,
            CrudMethod::Create => HttpMethod::Post,
            CrudMethod::BulkUpdate | CrudMethod::Update => HttpMethod::Put,
            CrudMethod::Delete => HttpMethod::Delete,
        }
    }

    /// Lower-case name used in nicknames and hint keys
    pub fn name(self) -> &'static str {
        match self {
            CrudMethod::List => "list",
            CrudMethod::Create => "create",
            CrudMethod::BulkUpdate => "bulkupdate",
            CrudMethod::Update => "update",
            CrudMethod::Fetch => "fetch",
            CrudMethod::Delete => "delete",
        }
    }

    pub fn is_detail(self) -> bool {
        Self::DETAIL_METHODS.contains(&self)
    }

    /// Default summary; `%s` is replaced by the lower-case document name
    pub fn summary_template(self) -> &'static str {
        match self {
            CrudMethod::List => "List all %ss",
            CrudMethod::Create => "Create a new %s",
            CrudMethod::BulkUpdate => "Bulk update of %ss",
            CrudMethod::Update => "Update a single %s",
            CrudMethod::Fetch => "Get a single %s",
            CrudMethod::Delete => "Delete a %s",
        }
    }
}

/// Documentation hints, attached to a resource or passed at registration
#[derive(Debug, Clone, Default)]
pub struct DocHints {
    pub name: Option<String>,
    pub description: Option<String>,
    pub summaries: HashMap<CrudMethod, String>,
    pub notes: HashMap<CrudMethod, String>,
    /// Descriptions for generated query keys such as `name__gt`
    pub descriptions: HashMap<String, String>,
    pub parameters: BTreeMap<String, Parameter>,
    pub error_responses: BTreeMap<u16, String>,
}

impl DocHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn summary(mut self, method: CrudMethod, summary: impl Into<String>) -> Self {
        self.summaries.insert(method, summary.into());
        self
    }

    pub fn notes(mut self, method: CrudMethod, notes: impl Into<String>) -> Self {
        self.notes.insert(method, notes.into());
        self
    }

    pub fn key_description(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.descriptions.insert(key.into(), description.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    pub fn error_response(mut self, code: u16, reason: impl Into<String>) -> Self {
        self.error_responses.insert(code, reason.into());
        self
    }
}

/// A queryable document type as exposed by the CRUD framework
#[derive(Debug, Clone, Default)]
pub struct Resource {
    pub document: Arc<Document>,
    /// Fields exposed by the resource; empty means all document fields
    pub fields: Vec<String>,
    pub filters: BTreeMap<String, Vec<Filter>>,
    pub related_resources: Vec<Resource>,
    pub hints: DocHints,
}

impl Resource {
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, field: impl Into<String>, filters: Vec<Filter>) -> Self {
        self.filters.insert(field.into(), filters);
        self
    }

    pub fn related(mut self, resource: Resource) -> Self {
        self.related_resources.push(resource);
        self
    }

    pub fn hints(mut self, hints: DocHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn document_name(&self) -> &str {
        &self.document.name
    }
}

/// A view serving a resource with a set of allowed methods
#[derive(Debug, Clone)]
pub struct ResourceView {
    pub resource: Resource,
    pub methods: Vec<CrudMethod>,
    pub authentication_methods: Vec<String>,
}

impl ResourceView {
    pub fn new(resource: Resource, methods: impl IntoIterator<Item = CrudMethod>) -> Self {
        Self {
            resource,
            methods: methods.into_iter().collect(),
            authentication_methods: Vec::new(),
        }
    }

    pub fn authentication(mut self, method: impl Into<String>) -> Self {
        self.authentication_methods.push(method.into());
        self
    }

    pub fn allows(&self, method: CrudMethod) -> bool {
        self.methods.contains(&method)
    }
}
