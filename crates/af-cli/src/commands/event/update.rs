use af_core::enums::DayOfWeek;
use af_db::updates::event::{EventUpdate, EventUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventUpdateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &EventUpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session()?;
    let update = build_update(args)?;
    let event = ctx.service.update_event(session, &args.id, update).await?;
    output(&event, flags.format)
}

fn build_update(args: &EventUpdateArgs) -> anyhow::Result<EventUpdate> {
    let mut builder = EventUpdateBuilder::new();
    let mut changed = false;

    if let Some(title) = &args.title {
        builder = builder.title(title);
        changed = true;
    }
    if args.clear_course {
        builder = builder.course_id(None);
        changed = true;
    } else if let Some(course) = &args.course {
        builder = builder.course_id(Some(course.clone()));
        changed = true;
    }
    if let Some(slot) = &args.start_slot {
        builder = builder.start_slot_id(slot);
        changed = true;
    }
    if let Some(slot) = &args.end_slot {
        builder = builder.end_slot_id(slot);
        changed = true;
    }
    if let Some(day) = &args.day {
        builder = builder.day_of_week(parse_enum::<DayOfWeek>(day, "day")?);
        changed = true;
    }
    if let Some(weeks) = args.repeat_every {
        builder = builder.repeat_every(weeks);
        changed = true;
    }
    if let Some(week) = args.start_week {
        builder = builder.start_week(week);
        changed = true;
    }
    if let Some(flag) = args.reschedulable {
        builder = builder.is_reschedulable(flag);
        changed = true;
    }
    if args.clear_description {
        builder = builder.description(None);
        changed = true;
    } else if let Some(description) = &args.description {
        builder = builder.description(Some(description.clone()));
        changed = true;
    }

    if !changed {
        anyhow::bail!("nothing to update: pass at least one field flag");
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use af_core::enums::DayOfWeek;
    use pretty_assertions::assert_eq;

    use super::build_update;
    use crate::cli::subcommands::EventUpdateArgs;

    fn empty(id: &str) -> EventUpdateArgs {
        EventUpdateArgs {
            id: id.into(),
            title: None,
            course: None,
            clear_course: false,
            start_slot: None,
            end_slot: None,
            day: None,
            repeat_every: None,
            start_week: None,
            reschedulable: None,
            description: None,
            clear_description: false,
        }
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(build_update(&empty("evt-1")).is_err());
    }

    #[test]
    fn clear_flags_produce_explicit_nulls() {
        let mut args = empty("evt-1");
        args.clear_course = true;
        args.clear_description = true;
        let update = build_update(&args).expect("update");
        assert_eq!(update.course_id, Some(None));
        assert_eq!(update.description, Some(None));
        assert!(!update.moves_span());
    }

    #[test]
    fn day_change_moves_the_span() {
        let mut args = empty("evt-1");
        args.day = Some("thursday".into());
        let update = build_update(&args).expect("update");
        assert_eq!(update.day_of_week, Some(DayOfWeek::Thursday));
        assert!(update.moves_span());
    }
}
