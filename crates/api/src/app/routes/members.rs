use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use rollcall_core::MemberId;
use rollcall_infra::ListOrder;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", axum::routing::post(register_member).get(list_members))
        .route("/count", get(count_members))
        .route("/email/:email", get(get_member_by_email))
        .route(
            "/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}

pub async fn register_member(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::MemberPayload>,
) -> axum::response::Response {
    match services.register(body.into_candidate()).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(dto::MemberResponse::from(&member)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListParams>,
) -> axum::response::Response {
    let order = if params.ordered {
        ListOrder::ByName
    } else {
        ListOrder::Unordered
    };

    match services.list(order).await {
        Ok(members) => {
            let items: Vec<dto::MemberResponse> =
                members.iter().map(dto::MemberResponse::from).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.member_by_id(id).await {
        Ok(member) => (StatusCode::OK, Json(dto::MemberResponse::from(&member))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_member_by_email(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
) -> axum::response::Response {
    match services.member_by_email(&email).await {
        Ok(member) => (StatusCode::OK, Json(dto::MemberResponse::from(&member))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::MemberPayload>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.update(id, body.into_candidate()).await {
        Ok(member) => (StatusCode::OK, Json(dto::MemberResponse::from(&member))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn count_members(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.count().await {
        Ok(count) => (StatusCode::OK, Json(serde_json::json!({ "count": count }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
