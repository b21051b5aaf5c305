use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome, IdPath, ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{MemberError, MemberResult};
use crate::models::{
    CreateMember, ListMembersParams, MemberId, MemberResponse, MemberResponses, UpdateCash,
    UpdateName,
};
use crate::repository::MemberRepository;
use crate::service::MemberService;

const TAG: &str = "members";

/// OpenAPI documentation for the Members API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_members,
        create_member,
        delete_all_members,
        get_member,
        delete_member,
        update_member_name,
        update_member_cash,
    ),
    components(
        schemas(CreateMember, UpdateName, UpdateCash, MemberResponse, MemberResponses),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Member management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the member router with all HTTP endpoints
pub fn router<R: MemberRepository + 'static>(service: MemberService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_members)
                .post(create_member)
                .delete(delete_all_members),
        )
        .route("/{id}", get(get_member).delete(delete_member))
        .route("/{id}/name", patch(update_member_name))
        .route("/{id}/cash", patch(update_member_cash))
        .with_state(shared_service)
}

fn parse_ids(raw: &str) -> MemberResult<Vec<MemberId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map(MemberId).map_err(|_| MemberError::InvalidId))
        .collect()
}

/// List members, optionally restricted to a comma-separated id sequence
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListMembersParams),
    responses(
        (status = 200, description = "Members in requested order", body = MemberResponses),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_members<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    Query(params): Query<ListMembersParams>,
) -> MemberResult<Json<MemberResponses>> {
    let members = match params.ids {
        Some(raw) => {
            let ids = parse_ids(&raw)?;
            service.find_all_by_id(&ids).await?
        }
        None => service.find_all().await?,
    };

    Ok(Json(members))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created successfully", body = MemberResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_member<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateMember>,
) -> MemberResult<impl IntoResponse> {
    let member = service.create_member(input).await?;

    // Audit log successful registration
    AuditEvent::new(
        None,
        "member.create",
        Some(format!("member:{}", member.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "member_name": member.name,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(member)))
}

/// Delete every member
#[utoipa::path(
    delete,
    path = "",
    tag = TAG,
    responses(
        (status = 204, description = "All members deleted"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_all_members<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    headers: HeaderMap,
) -> MemberResult<impl IntoResponse> {
    service.delete_all().await?;

    AuditEvent::new(None, "member.delete_all", None, AuditOutcome::Success)
        .with_ip(extract_ip_from_headers(&headers))
        .with_user_agent(extract_user_agent(&headers))
        .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Get a member by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_member<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    IdPath(id): IdPath,
) -> MemberResult<Json<MemberResponse>> {
    let member = service.find_member(MemberId(id)).await?;
    Ok(Json(member))
}

/// Delete a member by id
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member deleted successfully"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_member<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> MemberResult<impl IntoResponse> {
    service.delete_by_id(Some(MemberId(id))).await?;

    // Audit log successful deletion
    AuditEvent::new(
        None,
        "member.delete",
        Some(format!("member:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Replace a member's name
#[utoipa::path(
    patch,
    path = "/{id}/name",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = UpdateName,
    responses(
        (status = 200, description = "Name updated successfully", body = MemberResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_member_name<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateName>,
) -> MemberResult<Json<MemberResponse>> {
    let member = service.update_name(MemberId(id), input).await?;
    Ok(Json(member))
}

/// Replace a member's cash balance
#[utoipa::path(
    patch,
    path = "/{id}/cash",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = UpdateCash,
    responses(
        (status = 200, description = "Cash updated successfully", body = MemberResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_member_cash<R: MemberRepository>(
    State(service): State<Arc<MemberService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCash>,
) -> MemberResult<Json<MemberResponse>> {
    let member = service.update_cash(MemberId(id), input).await?;
    Ok(Json(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ids_accepts_comma_separated_sequence() {
        let ids = parse_ids("1,2,4").unwrap();
        assert_eq!(ids, vec![MemberId(1), MemberId(2), MemberId(4)]);
    }

    #[test]
    fn parse_ids_tolerates_whitespace_and_trailing_comma() {
        let ids = parse_ids(" 1, 2 ,4,").unwrap();
        assert_eq!(ids, vec![MemberId(1), MemberId(2), MemberId(4)]);
    }

    #[test]
    fn parse_ids_rejects_non_numeric_segments() {
        assert!(matches!(parse_ids("1,abc"), Err(MemberError::InvalidId)));
    }
}
