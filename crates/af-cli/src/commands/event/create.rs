use af_core::enums::DayOfWeek;
use af_db::repos::timetable::ScheduleRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventCreateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Place an event through the grid: the start cell must be open in the
/// view of `--group`/`--subgroup`, and the event is assigned to that view.
pub async fn run(args: &EventCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session()?;
    let request = schedule_request(args)?;
    let event = ctx.service.schedule_event(session, &request).await?;
    output(&event, flags.format)
}

fn schedule_request(args: &EventCreateArgs) -> anyhow::Result<ScheduleRequest> {
    Ok(ScheduleRequest {
        routine_id: args.routine.clone(),
        group_id: Some(args.group.clone()),
        subgroup_id: args.subgroup.clone(),
        slot_id: args.slot.clone(),
        end_slot_id: args.end_slot.clone(),
        day: Some(parse_enum::<DayOfWeek>(&args.day, "day")?),
        title: args.title.clone(),
        course_id: args.course.clone(),
        description: args.description.clone(),
        repeat_every: args.repeat_every,
        start_week: args.start_week,
        is_reschedulable: args.reschedulable,
    })
}

#[cfg(test)]
mod tests {
    use af_core::enums::DayOfWeek;
    use pretty_assertions::assert_eq;

    use super::schedule_request;
    use crate::cli::subcommands::EventCreateArgs;

    fn args(day: &str) -> EventCreateArgs {
        EventCreateArgs {
            routine: "rtn-1".into(),
            slot: "slt-1".into(),
            end_slot: None,
            day: day.into(),
            group: "grp-1".into(),
            subgroup: Some("sgp-1".into()),
            title: "Lab".into(),
            course: None,
            description: None,
            repeat_every: Some(2),
            start_week: None,
            reschedulable: true,
        }
    }

    #[test]
    fn request_carries_view_and_cell() {
        let request = schedule_request(&args("Wednesday")).expect("request");
        assert_eq!(request.day, Some(DayOfWeek::Wednesday));
        assert_eq!(request.group_id.as_deref(), Some("grp-1"));
        assert_eq!(request.subgroup_id.as_deref(), Some("sgp-1"));
        assert_eq!(request.repeat_every, Some(2));
        assert!(request.is_reschedulable);
    }

    #[test]
    fn bad_day_is_rejected_before_the_store() {
        let err = schedule_request(&args("someday")).expect_err("should fail");
        assert!(err.to_string().contains("invalid day 'someday'"));
    }
}
