mod create;
mod update;

use af_core::entities::AudienceScope;
use af_core::enums::{DayOfWeek, EntityType};
use af_db::repos::recurring_event::EventFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl event`.
pub async fn handle(
    action: &EventCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        EventCommands::Create(args) => create::run(args, ctx, flags).await,
        EventCommands::List {
            routine,
            group,
            subgroup,
            day,
            course,
        } => {
            let filter = EventFilter {
                routine_id: routine.clone(),
                scope: list_scope(group.as_deref(), subgroup.as_deref())?,
                day_of_week: day
                    .as_deref()
                    .map(|value| parse_enum::<DayOfWeek>(value, "day"))
                    .transpose()?,
                course_id: course.clone(),
            };
            let limit = effective_limit(flags.limit, ctx.default_limit());
            let events = ctx.service.list_events(session, &filter, limit).await?;
            output(&events, flags.format)
        }
        EventCommands::Get { id } => {
            let event = ctx.service.get_event(session, id).await?;
            output(&event, flags.format)
        }
        EventCommands::Update(args) => update::run(args, ctx, flags).await,
        EventCommands::Delete { id } => {
            ctx.service.delete_event(session, id).await?;
            output(&deleted(EntityType::RecurringEvent, id), flags.format)
        }
    }
}

/// Listing filters on the exact audience an event is assigned to.
fn list_scope(group: Option<&str>, subgroup: Option<&str>) -> anyhow::Result<Option<AudienceScope>> {
    match (group, subgroup) {
        (Some(_), Some(_)) => anyhow::bail!("pass either --group or --subgroup, not both"),
        (Some(group), None) => Ok(Some(AudienceScope::group(group))),
        (None, Some(subgroup)) => Ok(Some(AudienceScope::subgroup(subgroup))),
        (None, None) => Ok(None),
    }
}
