use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Pacer API",
        version = "0.1.0",
        description = "API for the peer-accountability fitness platform: member accounts and cash balances"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/members", api = domain_members::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
