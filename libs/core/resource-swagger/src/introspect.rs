//! Resource introspection
//!
//! Translates document fields into model properties and view methods into
//! operations, filling in the parameters and error responses that follow
//! from the resource definition.

use crate::fallback::{first_value, merge_in_priority};
use crate::resource::{CrudMethod, DocHints, Field, FieldKind, Resource, ResourceView};
use crate::schema::{Endpoint, HttpMethod, Model, Operation, ParamType, Parameter, Property};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{trace, warn};

/// `{name}` placeholders in a path template
static VIEW_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// Flask-style `<arg>` or `<converter:arg>` placeholders
static FLASK_ARGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:[^<>:]+:)?([^<>:]+)>").expect("converter pattern is valid")
});

/// Upper bound advertised for the `_limit` parameter
pub const MAX_LIMIT: i64 = 1000;

/// Rewrite `<arg>` and `<converter:arg>` placeholders to `{arg}`
pub fn brace_placeholders(url: &str) -> String {
    FLASK_ARGS.replace_all(url, "{$1}").into_owned()
}

impl Property {
    /// Build a property from a document field
    pub fn from_field(field: &Field) -> Self {
        let mut subtype = None;
        let type_name = match &field.kind {
            FieldKind::String | FieldKind::ObjectId => "string".to_string(),
            FieldKind::Int => "int".to_string(),
            FieldKind::Float => "float".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::DateTime => "Date".to_string(),
            FieldKind::List(item) => {
                subtype = item.as_deref().map(|f| Property::from_field(f).type_name);
                "List".to_string()
            }
            FieldKind::Dict(value) => {
                subtype = value.as_deref().map(|f| Property::from_field(f).type_name);
                "Object".to_string()
            }
            FieldKind::Reference(_) => "string".to_string(),
            FieldKind::Embedded(document) => document.name.clone(),
            FieldKind::Other(repr) => repr.clone(),
        };
        Property::new(type_name, field.help_text.clone(), subtype)
    }
}

impl Model {
    /// Build a model from the fields a resource exposes
    pub fn from_resource(resource: &Resource) -> Self {
        let document = &resource.document;
        let properties = if resource.fields.is_empty() {
            document
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), Property::from_field(field)))
                .collect()
        } else {
            resource
                .fields
                .iter()
                .filter_map(|name| {
                    document
                        .fields
                        .get(name)
                        .map(|field| (name.clone(), Property::from_field(field)))
                })
                .collect()
        };
        Model::new(document.name.clone(), properties)
    }
}

/// Models for a view's resource and every related resource
pub fn models_from_view(view: &ResourceView) -> BTreeMap<String, Model> {
    std::iter::once(&view.resource)
        .chain(&view.resource.related_resources)
        .map(Model::from_resource)
        .map(|model| (model.id.clone(), model))
        .collect()
}

/// Collection and single-item endpoints for a view.
///
/// `url` is relative (no leading slash); Flask-style `<arg>` placeholders
/// are rewritten to `{arg}`.
pub fn endpoints_from_view(
    view: &ResourceView,
    url: &str,
    description: &str,
    overrides: &DocHints,
) -> Vec<Endpoint> {
    let url = brace_placeholders(url);
    let document_lower = view.resource.document_name().to_lowercase();

    [
        (format!("/{url}"), CrudMethod::LIST_METHODS),
        (format!("/{url}{{{document_lower}}}/"), CrudMethod::DETAIL_METHODS),
    ]
    .into_iter()
    .map(|(path, methods)| {
        let operations = methods
            .into_iter()
            .filter(|method| view.allows(*method))
            .map(|method| operation_from_view_method(view, &path, method, overrides))
            .collect();
        Endpoint::new(path, description, operations)
    })
    .collect()
}

/// Synthesize the operation for one allowed method of a view
pub fn operation_from_view_method(
    view: &ResourceView,
    path: &str,
    method: CrudMethod,
    overrides: &DocHints,
) -> Operation {
    let resource = &view.resource;
    let document_name = resource.document_name();
    let document_lower = document_name.to_lowercase();

    let mut error_responses = BTreeMap::new();
    if !view.authentication_methods.is_empty() {
        error_responses.insert(401, "Invalid authentication".to_string());
    }
    if method.is_detail() {
        error_responses.insert(400, format!("Invalid {document_lower} ID"));
        error_responses.insert(404, format!("{document_name} not found"));
    }
    merge_in_priority(
        &mut error_responses,
        [
            Some(overrides.error_responses.clone()),
            Some(resource.hints.error_responses.clone()),
        ],
    );

    let mut parameters = BTreeMap::new();
    if method.http_method() == HttpMethod::Get {
        parameters.insert(
            "_fields".to_string(),
            Parameter::new(
                ParamType::Query,
                "string",
                "Comma-separated list of fields to return",
            ),
        );
    }
    if method == CrudMethod::List {
        parameters.insert(
            "_skip".to_string(),
            Parameter::new(ParamType::Query, "int", "The number of records to skip"),
        );
        parameters.insert(
            "_limit".to_string(),
            Parameter::new(
                ParamType::Query,
                "int",
                "The maximum number of records to return",
            )
            .range(1, MAX_LIMIT),
        );
        parameters.extend(filter_parameters(resource, overrides));
    }
    merge_in_priority(
        &mut parameters,
        [
            Some(overrides.parameters.clone()),
            Some(resource.hints.parameters.clone()),
        ],
    );

    for captures in VIEW_ARGS.captures_iter(path) {
        let arg = &captures[1];
        if parameters.contains_key(arg) {
            continue;
        }
        let description = if arg == document_lower {
            format!("The {arg} ID")
        } else {
            String::new()
        };
        parameters.insert(
            arg.to_string(),
            Parameter::new(ParamType::Path, "string", description),
        );
    }

    let default_summary = method.summary_template().replace("%s", &document_lower);
    let summary = first_value(
        [
            overrides.summaries.get(&method).map(String::as_str),
            resource.hints.summaries.get(&method).map(String::as_str),
        ],
        default_summary.as_str(),
    );
    let notes = first_value(
        [
            overrides.notes.get(&method).map(String::as_str),
            resource.hints.notes.get(&method).map(String::as_str),
        ],
        "",
    );

    trace!(
        path,
        method = %method,
        parameters = parameters.len(),
        "Synthesized operation"
    );

    Operation::new(
        method.http_method(),
        format!("{}{}", method.name(), document_name),
    )
    .summary(summary)
    .notes(notes)
    .response_class(document_name)
    .with_parameters(parameters)
    .with_error_responses(error_responses)
}

/// One query parameter per declared filter.
///
/// Filters on embedded documents expand to one key per subfield, joined
/// with `__`; non-equality operators append `__<op>`.
fn filter_parameters(resource: &Resource, overrides: &DocHints) -> BTreeMap<String, Parameter> {
    let mut parameters = BTreeMap::new();

    for (name, filters) in &resource.filters {
        let Some(field) = resource.document.fields.get(name) else {
            warn!(
                document = resource.document_name(),
                field = %name,
                "Filter declared on unknown field, skipping"
            );
            continue;
        };

        let keys: Vec<(String, Option<&str>)> = match &field.kind {
            FieldKind::Embedded(document) => document
                .fields
                .iter()
                .map(|(sub, subfield)| (format!("{name}__{sub}"), subfield.help_text.as_deref()))
                .collect(),
            _ => vec![(name.clone(), field.help_text.as_deref())],
        };

        for filter in filters {
            for (key, help_text) in &keys {
                let key = match filter.suffix() {
                    Some(op) => format!("{key}__{op}"),
                    None => key.clone(),
                };
                let fallback = title_case(key.rsplit("__").next().unwrap_or(key.as_str()));
                let description = first_value(
                    [
                        overrides.descriptions.get(&key).map(String::as_str),
                        resource.hints.descriptions.get(&key).map(String::as_str),
                        *help_text,
                    ],
                    fallback.as_str(),
                )
                .to_string();
                parameters.insert(key, Parameter::new(ParamType::Query, "string", description));
            }
        }
    }

    parameters
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            output.push(c);
            in_word = false;
        }
    }
    output
}
