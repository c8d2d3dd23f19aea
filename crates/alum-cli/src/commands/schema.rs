use alum_core::entities::{
    Answer, Chapter, Event, Mentorship, MentorshipSession, Opportunity, Partner, Question, Sponsor,
    Spotlight, User,
};
use alum_services::Profile;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `alum schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.type_name), flags.format)
}

fn schema(kind: SchemaType) -> Schema {
    match kind {
        SchemaType::Event => schema_for!(Event),
        SchemaType::Sponsor => schema_for!(Sponsor),
        SchemaType::Partner => schema_for!(Partner),
        SchemaType::Chapter => schema_for!(Chapter),
        SchemaType::Mentorship => schema_for!(Mentorship),
        SchemaType::Session => schema_for!(MentorshipSession),
        SchemaType::Question => schema_for!(Question),
        SchemaType::Answer => schema_for!(Answer),
        SchemaType::Opportunity => schema_for!(Opportunity),
        SchemaType::Spotlight => schema_for!(Spotlight),
        SchemaType::User => schema_for!(User),
        SchemaType::Profile => schema_for!(Profile),
    }
}
