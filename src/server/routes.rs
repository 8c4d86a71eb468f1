use super::error::handle_rejection;
use super::handlers::{
    self, AddItemsRequest, CreateThemeRequest, MetadataRequest, RenameRequest, ReorderRequest,
    SlotQuery,
};
use super::ApiContext;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::{Filter, Reply};

/// Maximum accepted request body: 64 KB
pub(crate) const MAX_BODY_SIZE: u64 = 64 * 1024;

fn with_ctx(
    ctx: Arc<ApiContext>,
) -> impl Filter<Extract = (Arc<ApiContext>,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

fn slot_query() -> impl Filter<Extract = (SlotQuery,), Error = warp::Rejection> + Clone {
    warp::query::<SlotQuery>()
}

fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_SIZE).and(warp::body::json())
}

fn into_response<R: Reply>(reply: R) -> Response {
    reply.into_response()
}

/// Every `/api` route, without rejection handling.
///
/// Paths are matched before methods so an unknown path is a 404 rather than a
/// 405 borrowed from a sibling route.
pub fn api(
    ctx: Arc<ApiContext>,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let list_themes = warp::path!("api" / "themes")
        .and(warp::get())
        .and(slot_query())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::list_themes);

    let create_theme = warp::path!("api" / "themes")
        .and(warp::post())
        .and(slot_query())
        .and(json_body::<CreateThemeRequest>())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::create_theme);

    // Must precede the rename route, which would capture "reorder" as a name.
    let reorder_themes = warp::path!("api" / "themes" / "reorder")
        .and(warp::put())
        .and(slot_query())
        .and(json_body::<ReorderRequest>())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::reorder_themes);

    let rename_theme = warp::path!("api" / "themes" / String)
        .and(warp::put())
        .and(slot_query())
        .and(json_body::<RenameRequest>())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::rename_theme);

    let add_items = warp::path!("api" / "themes" / String / "items")
        .and(warp::post())
        .and(slot_query())
        .and(json_body::<AddItemsRequest>())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::add_items);

    let delete_item = warp::path!("api" / "themes" / String / "items" / String)
        .and(warp::delete())
        .and(slot_query())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::delete_item);

    let get_document = warp::path!("api" / "data" / String)
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::get_document);

    let update_metadata = warp::path!("api" / "data" / String / "metadata")
        .and(warp::put())
        .and(json_body::<MetadataRequest>())
        .and(with_ctx(ctx))
        .and_then(handlers::update_metadata);

    list_themes
        .or(create_theme)
        .unify()
        .or(reorder_themes)
        .unify()
        .or(rename_theme)
        .unify()
        .or(add_items)
        .unify()
        .or(delete_item)
        .unify()
        .or(get_document)
        .unify()
        .or(update_metadata)
        .unify()
}

fn cors_policy() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type"])
}

/// The full service: API routes, JSON rejection bodies and optional CORS.
pub fn routes(ctx: Arc<ApiContext>, cors: bool) -> BoxedFilter<(Response,)> {
    let service = api(ctx).recover(handle_rejection).map(into_response);
    if cors {
        service.with(cors_policy()).map(into_response).boxed()
    } else {
        service.boxed()
    }
}
