//! Entity structs for every collection of the alumni platform.
//!
//! Records are flat: relationships are plain id fields (`chapterId`,
//! `questionId`, ...) resolved by scanning the related collection. Every
//! struct uses `#[serde(default)]` so records with missing fields hydrate
//! with sensible defaults instead of failing to decode.

mod chapter;
mod event;
mod mentorship;
mod opportunity;
mod partner;
mod question;
mod sponsor;
mod spotlight;
mod user;

pub use chapter::Chapter;
pub use event::Event;
pub use mentorship::{Mentorship, MentorshipSession};
pub use opportunity::Opportunity;
pub use partner::Partner;
pub use question::{Answer, Question};
pub use sponsor::Sponsor;
pub use spotlight::Spotlight;
pub use user::User;
