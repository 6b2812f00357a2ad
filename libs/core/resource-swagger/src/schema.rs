//! Swagger 1.1 value records
//!
//! These types mirror the JSON shapes of a Swagger 1.1 API declaration.
//! They are built once at registration time and only read afterwards.

use crate::error::{Result, SwaggerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// HTTP method for an operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// Where a parameter is passed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamType {
    Path,
    Body,
    Query,
    Header,
}

impl ParamType {
    /// Parse a location tag, failing on anything outside path/body/query/header
    pub fn parse(tag: &str) -> Result<Self> {
        Self::from_str(tag).map_err(|_| SwaggerError::InvalidParamType(tag.to_string()))
    }
}

/// Constraint on the values a parameter accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "valueType")]
pub enum AllowableValues {
    #[serde(rename = "VALUES")]
    Values { values: Vec<String> },
    #[serde(rename = "RANGE")]
    Range { min: i64, max: i64 },
}

/// Something passed to an endpoint in the body, headers, path or query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Set from the map key when the parameter is attached to an operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub param_type: ParamType,
    pub data_type: String,
    pub description: String,
    pub required: bool,
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_values: Option<AllowableValues>,
}

impl Parameter {
    pub fn new(
        param_type: ParamType,
        data_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: String::new(),
            param_type,
            data_type: data_type.into(),
            description: description.into(),
            required: param_type == ParamType::Path,
            multiple: false,
            allowable_values: None,
        }
    }

    /// Build a parameter from a textual location tag.
    ///
    /// Fails with [`SwaggerError::InvalidParamType`] for unknown tags.
    pub fn parse(
        param_type: &str,
        data_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(ParamType::parse(param_type)?, data_type, description))
    }

    /// Path parameters stay required whatever is passed here
    pub fn required(mut self, required: bool) -> Self {
        self.required = required || self.param_type == ParamType::Path;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Enumerated values take precedence over a range
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.allowable_values = Some(AllowableValues::Values { values });
        }
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        if !matches!(self.allowable_values, Some(AllowableValues::Values { .. })) {
            self.allowable_values = Some(AllowableValues::Range { min, max });
        }
        self
    }
}

/// A possible error status for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub reason: String,
}

/// One HTTP method at a given endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: HttpMethod,
    pub nickname: String,
    pub summary: String,
    pub notes: String,
    pub response_class: String,
    pub parameters: Vec<Parameter>,
    pub error_responses: Vec<ErrorResponse>,
}

impl Operation {
    pub fn new(http_method: HttpMethod, nickname: impl Into<String>) -> Self {
        Self {
            http_method,
            nickname: nickname.into(),
            summary: String::new(),
            notes: String::new(),
            response_class: String::new(),
            parameters: Vec::new(),
            error_responses: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn response_class(mut self, response_class: impl Into<String>) -> Self {
        self.response_class = response_class.into();
        self
    }

    /// Attach parameters keyed by name; the result is ordered by name
    pub fn with_parameters(mut self, parameters: BTreeMap<String, Parameter>) -> Self {
        self.parameters = parameters
            .into_iter()
            .map(|(name, parameter)| Parameter { name, ..parameter })
            .collect();
        self
    }

    /// Attach error responses keyed by status; the result is ordered by code
    pub fn with_error_responses(mut self, error_responses: BTreeMap<u16, String>) -> Self {
        self.error_responses = error_responses
            .into_iter()
            .map(|(code, reason)| ErrorResponse { code, reason })
            .collect();
        self
    }
}

/// `{"$ref": "<type>"}` item reference for container properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemsRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// A single property of a [`Model`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Property {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemsRef>,
}

impl Property {
    /// Empty descriptions and subtypes are dropped
    pub fn new(
        type_name: impl Into<String>,
        description: Option<String>,
        subtype: Option<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.filter(|d| !d.is_empty()),
            items: subtype
                .filter(|s| !s.is_empty())
                .map(|reference| ItemsRef { reference }),
        }
    }
}

/// A named schema returned through the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Model {
    pub id: String,
    pub properties: BTreeMap<String, Property>,
}

impl Model {
    pub fn new(id: impl Into<String>, properties: BTreeMap<String, Property>) -> Self {
        Self {
            id: id.into(),
            properties,
        }
    }
}

/// One URL template plus the operations it allows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Endpoint {
    pub path: String,
    pub description: String,
    pub operations: Vec<Operation>,
    /// Models the operations refer to; folded into the owning group
    #[serde(skip)]
    pub models: BTreeMap<String, Model>,
}

impl Endpoint {
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        operations: Vec<Operation>,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            operations,
            models: BTreeMap::new(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.models.insert(model.id.clone(), model);
        self
    }
}

/// A named collection of endpoints sharing one declaration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiGroup {
    pub name: String,
    pub description: String,
    pub endpoints: Vec<Endpoint>,
    pub models: BTreeMap<String, Model>,
}

impl ApiGroup {
    /// Create a group; endpoint models are folded into `models`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        endpoints: Vec<Endpoint>,
        mut models: BTreeMap<String, Model>,
    ) -> Self {
        for endpoint in &endpoints {
            models.extend(endpoint.models.clone());
        }
        Self {
            name: name.into(),
            description: description.into(),
            endpoints,
            models,
        }
    }

    /// Append another group's endpoints and union its models, later ids winning
    pub fn extend(&mut self, other: ApiGroup) {
        self.endpoints.extend(other.endpoints);
        self.models.extend(other.models);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_type_rejects_unknown_tag() {
        let err = Parameter::parse("cookie", "string", "").unwrap_err();
        assert!(matches!(err, SwaggerError::InvalidParamType(ref tag) if tag == "cookie"));
        assert_eq!(ParamType::parse("header").unwrap(), ParamType::Header);
    }

    #[test]
    fn test_path_parameter_is_always_required() {
        let param = Parameter::new(ParamType::Path, "string", "").required(false);
        assert!(param.required);

        let param = Parameter::new(ParamType::Query, "string", "");
        assert!(!param.required);
    }

    #[test]
    fn test_values_take_precedence_over_range() {
        let param = Parameter::new(ParamType::Query, "string", "")
            .values(["a", "b"])
            .range(1, 10);
        assert_eq!(
            param.allowable_values,
            Some(AllowableValues::Values {
                values: vec!["a".into(), "b".into()]
            })
        );
    }

    #[test]
    fn test_parameter_json_shape() {
        let param = Parameter::new(ParamType::Query, "int", "The maximum").range(1, 1000);
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "paramType": "query",
                "dataType": "int",
                "description": "The maximum",
                "required": false,
                "multiple": false,
                "allowableValues": {"valueType": "RANGE", "min": 1, "max": 1000}
            })
        );
    }

    #[test]
    fn test_operation_sorts_parameters_and_errors() {
        let mut params = BTreeMap::new();
        params.insert("zeta".to_string(), Parameter::new(ParamType::Query, "string", ""));
        params.insert("alpha".to_string(), Parameter::new(ParamType::Query, "string", ""));
        params.insert("_skip".to_string(), Parameter::new(ParamType::Query, "int", ""));

        let mut errors = BTreeMap::new();
        errors.insert(404, "missing".to_string());
        errors.insert(400, "bad".to_string());
        errors.insert(401, "auth".to_string());

        let op = Operation::new(HttpMethod::Get, "listThing")
            .with_parameters(params)
            .with_error_responses(errors);

        let names: Vec<_> = op.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["_skip", "alpha", "zeta"]);
        let codes: Vec<_> = op.error_responses.iter().map(|e| e.code).collect();
        assert_eq!(codes, [400, 401, 404]);
    }

    #[test]
    fn test_property_json_shape() {
        let prop = Property::new("List", Some(String::new()), Some("string".into()));
        assert_eq!(
            serde_json::to_value(&prop).unwrap(),
            json!({"type": "List", "items": {"$ref": "string"}})
        );
    }

    #[test]
    fn test_group_extend_unions_models_later_wins() {
        let first = Model::new("Widget", BTreeMap::new());
        let mut props = BTreeMap::new();
        props.insert("name".to_string(), Property::new("string", None, None));
        let second = Model::new("Widget", props);

        let mut group = ApiGroup::new(
            "widget",
            "",
            vec![Endpoint::new("/widget/", "", vec![]).with_model(first)],
            BTreeMap::new(),
        );
        let mut extra = BTreeMap::new();
        extra.insert("Gear".to_string(), Model::new("Gear", BTreeMap::new()));
        extra.insert("Widget".to_string(), second.clone());
        group.extend(ApiGroup::new("widget", "", vec![], extra));

        assert_eq!(group.models.len(), 2);
        assert_eq!(group.models["Widget"], second);
        assert_eq!(group.endpoints.len(), 1);
    }

    #[test]
    fn test_endpoint_models_not_serialized() {
        let endpoint = Endpoint::new("/x/", "desc", vec![])
            .with_model(Model::new("X", BTreeMap::new()));
        let value = serde_json::to_value(&endpoint).unwrap();
        assert!(value.get("models").is_none());
    }
}
