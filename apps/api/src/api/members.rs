use axum::Router;
use domain_members::{MemberService, PgMemberRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgMemberRepository::new(state.db.clone());
    let service = MemberService::new(repository);
    handlers::router(service)
}
