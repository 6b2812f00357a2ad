//! Sample resources documented by the demo service.
//!
//! The CRUD handlers themselves belong to the host framework; only their
//! descriptions live here.

use resource_swagger::{
    CrudMethod, DocHints, Document, Field, FieldKind, Filter, ParamType, Parameter, Resource,
    ResourceView,
};
use std::sync::Arc;

pub fn dimensions_document() -> Arc<Document> {
    Arc::new(
        Document::new("Dimensions")
            .field("width", Field::new(FieldKind::Float).help("Width in mm"))
            .field("height", Field::new(FieldKind::Float).help("Height in mm")),
    )
}

pub fn user_document() -> Arc<Document> {
    Arc::new(
        Document::new("User")
            .field("id", Field::new(FieldKind::ObjectId))
            .field("email", Field::new(FieldKind::String).help("Login e-mail"))
            .field("active", Field::new(FieldKind::Boolean))
            .field("joined", Field::new(FieldKind::DateTime)),
    )
}

pub fn widget_document() -> Arc<Document> {
    Arc::new(
        Document::new("Widget")
            .field("id", Field::new(FieldKind::ObjectId))
            .field("name", Field::new(FieldKind::String).help("Display name"))
            .field("count", Field::new(FieldKind::Int).help("Units in stock"))
            .field("tags", Field::list_of(Field::new(FieldKind::String)))
            .field("attributes", Field::dict_of(Field::new(FieldKind::String)))
            .field("owner", Field::reference("User"))
            .field("dimensions", Field::embedded(dimensions_document()))
            .field("location", Field::new(FieldKind::Other("GeoPointField".into()))),
    )
}

pub fn user_resource() -> Resource {
    Resource::new(user_document())
        .fields(["id", "email", "active", "joined"])
        .filter("email", vec![Filter::exact(), Filter::new("icontains")])
        .hints(DocHints::new().description("Registered users"))
}

pub fn widget_resource() -> Resource {
    Resource::new(widget_document())
        .filter("name", vec![Filter::exact(), Filter::new("icontains")])
        .filter("count", vec![Filter::new("gt"), Filter::new("lt")])
        .filter("dimensions", vec![Filter::new("gte")])
        .related(user_resource())
        .hints(
            DocHints::new()
                .summary(CrudMethod::Fetch, "Look up one widget by ID")
                .notes(CrudMethod::List, "Results are ordered by name")
                .key_description("count__gt", "Only widgets with more units in stock")
                .parameter(
                    "_embed",
                    Parameter::new(ParamType::Query, "string", "Related documents to inline")
                        .values(["owner"]),
                )
                .error_response(409, "Widget name already taken"),
        )
}

pub fn widget_view() -> ResourceView {
    ResourceView::new(
        widget_resource(),
        [
            CrudMethod::List,
            CrudMethod::Create,
            CrudMethod::Fetch,
            CrudMethod::Update,
            CrudMethod::Delete,
        ],
    )
    .authentication("token")
}

pub fn user_view() -> ResourceView {
    ResourceView::new(user_resource(), [CrudMethod::List, CrudMethod::Fetch])
}
