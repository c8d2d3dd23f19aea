//! Per-domain mock APIs.
//!
//! Each one composes [`MockCollection`](crate::collection::MockCollection)s into the operations its facade
//! service exposes: CRUD, status actions, membership edits, bulk actions and
//! stats computed by scanning the collection.

use std::fmt::Display;
use std::sync::Arc;

use alum_core::errors::CoreError;
use alum_core::responses::ApiFailure;

use crate::loader::MockDataLoader;

/// CRUD pass-throughs to a domain's primary collection.
macro_rules! crud_delegates {
    ($field:ident: $record:ty) => {
        #[must_use]
        pub const fn records(&self) -> &$crate::collection::MockCollection<$record> {
            &self.$field
        }

        pub async fn list(
            &self,
            query: &::alum_http::ListQuery,
        ) -> ::alum_core::responses::Page<$record> {
            self.$field.list(query).await
        }

        /// # Errors
        ///
        /// 404 when the id is unknown.
        pub async fn get(&self, id: &str) -> ::alum_core::responses::ApiResult<$record> {
            self.$field.get(id).await
        }

        /// # Errors
        ///
        /// See [`MockCollection::create`](crate::collection::MockCollection::create).
        pub async fn create(&self, draft: $record) -> ::alum_core::responses::ApiResult<$record> {
            self.$field.create(draft).await
        }

        /// # Errors
        ///
        /// See [`MockCollection::update`](crate::collection::MockCollection::update).
        pub async fn update(
            &self,
            id: &str,
            record: $record,
        ) -> ::alum_core::responses::ApiResult<$record> {
            self.$field.update(id, record).await
        }

        /// # Errors
        ///
        /// See [`MockCollection::patch`](crate::collection::MockCollection::patch).
        pub async fn patch(
            &self,
            id: &str,
            patch: &::serde_json::Value,
        ) -> ::alum_core::responses::ApiResult<$record> {
            self.$field.patch(id, patch).await
        }

        /// # Errors
        ///
        /// 404 when the id is unknown.
        pub async fn delete(&self, id: &str) -> ::alum_core::responses::ApiResult<()> {
            self.$field.delete(id).await
        }
    };
}

pub(crate) use crud_delegates;

mod chapters;
mod events;
mod mentorship;
mod opportunities;
mod partners;
mod qa;
mod sponsors;
mod spotlights;
mod users;

pub use chapters::ChaptersMock;
pub use events::EventsMock;
pub use mentorship::{MentorshipMock, MentorshipRequest};
pub use opportunities::OpportunitiesMock;
pub use partners::PartnersMock;
pub use qa::QaMock;
pub use sponsors::SponsorsMock;
pub use spotlights::SpotlightsMock;
pub use users::UsersMock;

/// 409 for a lifecycle move the status machine does not allow.
pub(crate) fn invalid_transition(
    entity: &str,
    id: &str,
    from: impl Display,
    to: impl Display,
) -> ApiFailure {
    CoreError::InvalidTransition {
        entity: entity.to_string(),
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    }
    .into()
}

/// Every domain mock, sharing one loader and therefore one cache.
#[derive(Clone)]
pub struct MockApis {
    pub loader: Arc<MockDataLoader>,
    pub events: EventsMock,
    pub sponsors: SponsorsMock,
    pub partners: PartnersMock,
    pub chapters: ChaptersMock,
    pub mentorship: MentorshipMock,
    pub qa: QaMock,
    pub opportunities: OpportunitiesMock,
    pub spotlights: SpotlightsMock,
    pub users: UsersMock,
}

impl MockApis {
    #[must_use]
    pub fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            events: EventsMock::new(Arc::clone(&loader)),
            sponsors: SponsorsMock::new(Arc::clone(&loader)),
            partners: PartnersMock::new(Arc::clone(&loader)),
            chapters: ChaptersMock::new(Arc::clone(&loader)),
            mentorship: MentorshipMock::new(Arc::clone(&loader)),
            qa: QaMock::new(Arc::clone(&loader)),
            opportunities: OpportunitiesMock::new(Arc::clone(&loader)),
            spotlights: SpotlightsMock::new(Arc::clone(&loader)),
            users: UsersMock::new(Arc::clone(&loader)),
            loader,
        }
    }
}
