use af_core::enums::EntityType;
use af_db::updates::slot::SlotUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SlotCommands;
use crate::commands::shared::deleted;
use crate::commands::shared::parse::parse_time;
use crate::context::AppContext;
use crate::output::output;

/// Handle `afl slot`.
pub async fn handle(
    action: &SlotCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = ctx.session()?;
    match action {
        SlotCommands::Create {
            operation,
            serial,
            name,
            start,
            end,
        } => {
            let start = parse_time(start, "start")?;
            let end = parse_time(end, "end")?;
            let slot = ctx
                .service
                .create_slot(session, operation, *serial, name, start, end)
                .await?;
            output(&slot, flags.format)
        }
        SlotCommands::List { operation } => {
            let slots = ctx.service.list_slots(session, operation).await?;
            output(&slots, flags.format)
        }
        SlotCommands::Get { id } => {
            let slot = ctx.service.get_slot(session, id).await?;
            output(&slot, flags.format)
        }
        SlotCommands::Update {
            id,
            serial,
            name,
            start,
            end,
        } => {
            if serial.is_none() && name.is_none() && start.is_none() && end.is_none() {
                anyhow::bail!("At least one of --serial, --name, --start, or --end must be provided");
            }
            let mut builder = SlotUpdateBuilder::new();
            if let Some(serial) = serial {
                builder = builder.serial_no(*serial);
            }
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(start) = start {
                builder = builder.start(parse_time(start, "start")?);
            }
            if let Some(end) = end {
                builder = builder.end(parse_time(end, "end")?);
            }
            let slot = ctx.service.update_slot(session, id, builder.build()).await?;
            output(&slot, flags.format)
        }
        SlotCommands::Delete { id } => {
            ctx.service.delete_slot(session, id).await?;
            output(&deleted(EntityType::Slot, id), flags.format)
        }
    }
}
