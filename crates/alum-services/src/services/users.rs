use std::sync::Arc;

use alum_core::entities::User;
use alum_core::enums::UserStatus;
use alum_core::errors::CoreError;
use alum_core::resource::Resource;
use alum_core::responses::{ApiResponse, ApiResult, PaginatedResponse};
use alum_http::{Endpoints, ListQuery};
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};
use crate::profile::{Jitter, Profile, map_profile};

/// Raw user CRUD plus the display-profile views.
#[derive(Clone)]
pub struct UsersService {
    backend: Backend,
    real: RealCollection<User>,
    jitter: Arc<dyn Jitter>,
}

impl UsersService {
    #[must_use]
    pub fn new(backend: Backend, jitter: Arc<dyn Jitter>) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::USERS);
        Self {
            backend,
            real,
            jitter,
        }
    }

    facade_crud!(User, users);

    fn profile(&self, user: &User) -> Profile {
        map_profile(user, self.jitter.as_ref())
    }

    pub async fn list_profiles(&self, query: &ListQuery) -> PaginatedResponse<Profile> {
        let page = self.list(query).await;
        PaginatedResponse {
            data: page.data.iter().map(|u| self.profile(u)).collect(),
            pagination: page.pagination,
            success: page.success,
            message: page.message,
            error: page.error,
        }
    }

    pub async fn get_profile(&self, id: &str) -> ApiResponse<Profile> {
        ApiResponse::from_result(self.try_get(id).await.map(|u| self.profile(&u)))
    }

    /// Move a user to `next`. The transition is checked against the
    /// current status before anything is written; illegal moves are 409.
    pub async fn update_status(&self, id: &str, next: UserStatus) -> ApiResponse<Profile> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.users.update_status(id, next), self.real_update_status(id, next))
            .await;
        ApiResponse::from_result_with_message(
            result.map(|u| self.profile(&u)),
            format!("User status set to {next}"),
        )
    }

    async fn real_update_status(&self, id: &str, next: UserStatus) -> ApiResult<User> {
        let current = self.real.get(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity: User::ENTITY.to_string(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        self.real.patch(id, &json!({ "status": next })).await
    }

    pub async fn verify(&self, id: &str) -> ApiResponse<Profile> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(
                mocks.users.verify(id),
                self.real.patch(id, &json!({ "verified": true })),
            )
            .await;
        ApiResponse::from_result_with_message(result.map(|u| self.profile(&u)), "User verified")
    }
}
