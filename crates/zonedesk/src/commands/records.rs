//! Record command handlers.
//!
//! Every subcommand selects the zone first, so record operations run
//! against the same active-zone slot the console fences responses with.

use zonedesk_core::{
    Command as CoreCommand, CommandResult, Console, RecordDraft, RecordForm, RecordId, RecordType,
};

use crate::cli::{GlobalOpts, RecordAddArgs, RecordEditArgs, RecordsArgs, RecordsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    console: &Console,
    args: RecordsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RecordsCommand::List { zone } => {
            select(console, &zone).await?;
        }

        RecordsCommand::Add(args) => {
            select(console, &args.zone).await?;
            let CommandResult::Form(form) = console.execute(CoreCommand::AddRecord).await? else {
                return Ok(());
            };
            let draft = fill_add_form(form, &args)?;
            console.execute(CoreCommand::SaveRecord(draft)).await?;
        }

        RecordsCommand::Edit(args) => {
            select(console, &args.zone).await?;
            let id = RecordId::new(args.id);
            let CommandResult::Form(form) = console.execute(CoreCommand::EditRecord(id)).await?
            else {
                return Ok(());
            };
            let draft = fill_edit_form(form, &args)?;
            console.execute(CoreCommand::SaveRecord(draft)).await?;
        }

        RecordsCommand::Delete { zone, id } => {
            select(console, &zone).await?;
            console
                .execute(CoreCommand::DeleteRecord(RecordId::new(id)))
                .await?;
        }
    }

    // The console re-listed after any mutation; show what the server has now.
    let table = console.store().table();
    let color = output::should_color(global.color);
    let out = output::render_record_table(global.output, &table, color)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn select(console: &Console, zone: &str) -> Result<(), CliError> {
    let zone = util::resolve_zone(console, zone)?;
    console.execute(CoreCommand::SelectZone(zone.id)).await?;
    Ok(())
}

fn parse_type(raw: &str) -> RecordType {
    RecordType::from(raw.trim())
}

fn fill_add_form(mut form: RecordForm, args: &RecordAddArgs) -> Result<RecordDraft, CliError> {
    if let Some(ref t) = args.record_type {
        form.set_type(parse_type(t))?;
    }
    let mut draft = form.draft;
    draft.name.clone_from(&args.name);
    draft.content.clone_from(&args.content);
    draft.ttl.clone_from(&args.ttl);
    draft.priority.clone_from(&args.priority);
    Ok(draft)
}

fn fill_edit_form(mut form: RecordForm, args: &RecordEditArgs) -> Result<RecordDraft, CliError> {
    if let Some(ref t) = args.record_type {
        let record_type = parse_type(t);
        if record_type != form.draft.record_type {
            form.set_type(record_type)?;
        }
    }
    let mut draft = form.draft;
    if let Some(ref name) = args.name {
        draft.name.clone_from(name);
    }
    if let Some(ref content) = args.content {
        draft.content.clone_from(content);
    }
    if let Some(ref ttl) = args.ttl {
        draft.ttl.clone_from(ttl);
    }
    if let Some(ref priority) = args.priority {
        draft.priority.clone_from(priority);
    }
    Ok(draft)
}
