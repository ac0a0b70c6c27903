use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::grid::{GridView, render_grid_text};
use crate::output::{output, table_options};

pub async fn run(
    routine_id: &str,
    group: Option<&str>,
    subgroup: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    let routine = ctx.service.get_routine(session, routine_id).await?;
    let timetable = ctx
        .service
        .load_timetable(session, routine_id, group, subgroup)
        .await?;

    if flags.format == OutputFormat::Table {
        println!("{}", render_grid_text(&routine, &timetable, table_options()));
        return Ok(());
    }
    output(&GridView::new(&routine, &timetable), flags.format)
}
