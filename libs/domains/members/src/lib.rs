//! Members Domain
//!
//! Member lifecycle for the pacer backend: registration, lookup, name and
//! cash mutation, and deletion.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, value objects, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_members::{
//!     handlers,
//!     repository::InMemoryMemberRepository,
//!     service::MemberService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryMemberRepository::new();
//! let service = MemberService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{MemberError, MemberResult};
pub use models::{
    Cash, CreateMember, ListMembersParams, Member, MemberId, MemberResponse, MemberResponses,
    UpdateCash, UpdateName,
};
pub use postgres::PgMemberRepository;
pub use repository::{InMemoryMemberRepository, MemberRepository};
pub use service::MemberService;
