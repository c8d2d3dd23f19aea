//! # alum-services
//!
//! Per-entity facade services. Each call asks the mode resolver whether to
//! use the mock backend or the real one, then folds the outcome into a
//! response envelope (`PaginatedResponse`, `ApiResponse` or
//! `BulkOperationResult`) so callers never handle transport errors.
//!
//! [`ServiceContext`] wires configuration, persisted state, both backends and
//! every service together. Also here: display [`profile`] mapping, the
//! [`CacheManager`] and the [`HealthAggregator`].

mod cache_manager;
mod context;
mod error;
mod facade;
mod health;
pub mod profile;
pub mod services;

pub use cache_manager::{COLLECTIONS, CacheManager, CacheStats, WarmedCollection};
pub use context::{Backend, ServiceContext};
pub use error::ServiceError;
pub use facade::{RealCollection, bulk_from_result};
pub use health::{ComponentHealth, HealthAggregator, HealthReport, HealthStatus, aggregate};
pub use profile::{Jitter, NoJitter, Profile, RandomJitter, map_profile};
pub use services::{
    ChaptersService, EventsService, MentorshipService, OpportunitiesService, PartnersService,
    QaService, SponsorsService, SpotlightsService, UsersService,
};
