//! One facade per entity. Every method asks the [`Backend`] which side to
//! call and folds the outcome into a response envelope.
//!
//! [`Backend`]: crate::context::Backend

mod chapters;
mod events;
mod mentorship;
mod opportunities;
mod partners;
mod qa;
mod sponsors;
mod spotlights;
mod users;

pub use chapters::ChaptersService;
pub use events::EventsService;
pub use mentorship::MentorshipService;
pub use opportunities::OpportunitiesService;
pub use partners::PartnersService;
pub use qa::QaService;
pub use sponsors::{IMPORT_BATCH_SIZE, SponsorsService};
pub use spotlights::SpotlightsService;
pub use users::UsersService;
