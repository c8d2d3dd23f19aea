use std::sync::Arc;

use alum_core::entities::User;
use alum_core::enums::UserStatus;
use alum_core::resource::Resource;
use alum_core::responses::ApiResult;

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct UsersMock {
    users: MockCollection<User>,
}

impl UsersMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            users: MockCollection::new(loader),
        }
    }

    crud_delegates!(users: User);

    /// # Errors
    ///
    /// 404 for unknown ids; 409 when `next` is not reachable from the
    /// current status.
    pub async fn update_status(&self, id: &str, next: UserStatus) -> ApiResult<User> {
        self.users
            .modify(id, |user| {
                if !user.status.can_transition_to(next) {
                    return Err(invalid_transition(User::ENTITY, id, user.status, next));
                }
                user.status = next;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn verify(&self, id: &str) -> ApiResult<User> {
        self.users
            .modify(id, |user| {
                user.verified = true;
                Ok(())
            })
            .await
    }
}
