//! # alum-mock
//!
//! Mock backend for the alumni admin data layer.
//!
//! The [`MockDataLoader`] reads whole collections from a json-server style
//! document server and keeps them in a 30 second [`TtlCache`]. Typed
//! [`MockCollection`]s layer CRUD, filtering and pagination on top, and the
//! per-domain mocks in [`domains`] add status actions, membership edits,
//! bulk actions and stats.
//!
//! [`MockServer`] is a small in-process document server on `tiny_http`
//! that speaks the same protocol, used by the CLI `serve` command and by
//! tests.

pub mod cache;
mod collection;
pub mod domains;
mod error;
mod loader;
pub mod query;
mod server;
pub mod stub;

pub use cache::{Clock, CollectionCache, ManualClock, SystemClock, TtlCache};
pub use collection::MockCollection;
pub use domains::{
    ChaptersMock, EventsMock, MentorshipMock, MentorshipRequest, MockApis, OpportunitiesMock,
    PartnersMock, QaMock, SponsorsMock, SpotlightsMock, UsersMock,
};
pub use error::MockError;
pub use loader::{MockDataLoader, WarnCategory};
pub use server::MockServer;
