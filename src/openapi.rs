//! OpenAPI document generated from the resolved resource model.

use crate::config::{ResolvedModel, ResolvedResource};
use utoipa::openapi::{
    path::{HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder},
    response::ResponseBuilder,
    InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder, Required,
};

const WATCHLIST_TAG: &str = "Watchlist";

pub fn build(model: &ResolvedModel) -> OpenApi {
    let mut paths = PathsBuilder::new();
    for resource in &model.resources {
        let prefix = resource.route_prefix();
        paths = paths
            .path(prefix.clone(), collection_item(resource))
            .path(format!("{}/{{id}}", prefix), member_item(resource));
    }

    let watchlist = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            operation(WATCHLIST_TAG, "Get watchlist", false, &[("200", "Watchlist entries")]),
        )
        .operation(
            HttpMethod::Post,
            operation(
                WATCHLIST_TAG,
                "Add a movie to the watchlist",
                false,
                &[
                    ("201", "Entry created"),
                    ("400", "movieId is required"),
                    ("500", "Failed to save watchlist"),
                ],
            ),
        )
        .build();
    paths = paths.path("/watchlist", watchlist);

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Movies API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(
                    "A RESTful API for managing movie collections and most popular movies.",
                ))
                .build(),
        )
        .paths(paths.build())
        .build()
}

fn collection_item(resource: &ResolvedResource) -> utoipa::openapi::PathItem {
    let m = &resource.messages;
    PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            operation(
                &resource.tag,
                &format!("Get all {}", resource.plural_label),
                false,
                &[("200", "Full collection"), ("500", m.list_failed.as_str())],
            ),
        )
        .operation(
            HttpMethod::Post,
            operation(
                &resource.tag,
                &format!("Create {}", resource.label.to_lowercase()),
                false,
                &[
                    ("201", m.created.as_str()),
                    ("400", "Missing required fields"),
                    ("500", m.create_failed.as_str()),
                ],
            ),
        )
        .build()
}

fn member_item(resource: &ResolvedResource) -> utoipa::openapi::PathItem {
    let m = &resource.messages;
    let singular = resource.label.to_lowercase();
    PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            operation(
                &resource.tag,
                &format!("Get single {} by ID", singular),
                true,
                &[("200", "Record"), ("404", m.not_found.as_str()), ("500", m.read_failed.as_str())],
            ),
        )
        .operation(
            HttpMethod::Put,
            operation(
                &resource.tag,
                &format!("Update {} by ID", singular),
                true,
                &[
                    ("204", "Updated"),
                    ("400", m.invalid_id.as_str()),
                    ("404", m.not_found.as_str()),
                    ("500", m.update_failed.as_str()),
                ],
            ),
        )
        .operation(
            HttpMethod::Delete,
            operation(
                &resource.tag,
                &format!("Delete {} by ID", singular),
                true,
                &[
                    ("204", "Deleted"),
                    ("400", m.invalid_id.as_str()),
                    ("404", m.not_found.as_str()),
                    ("500", m.delete_failed.as_str()),
                ],
            ),
        )
        .build()
}

fn operation(tag: &str, summary: &str, with_id: bool, responses: &[(&str, &str)]) -> Operation {
    let mut op = OperationBuilder::new().tag(tag).summary(Some(summary));
    if with_id {
        op = op.parameter(
            ParameterBuilder::new()
                .name("id")
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some("Document id: 24-hex ObjectId or legacy string key"))
                .build(),
        );
    }
    for (code, description) in responses {
        op = op.response(*code, ResponseBuilder::new().description(*description).build());
    }
    op.build()
}
