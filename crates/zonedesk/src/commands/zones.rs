//! Zone command handlers.

use tabled::Tabled;

use zonedesk_core::{Command as CoreCommand, CommandResult, Console, Zone, ZoneDraft};

use crate::cli::{GlobalOpts, ZoneCreateArgs, ZonesArgs, ZonesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "SOA Email")]
    soa_email: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn zone_row(z: &Zone) -> ZoneRow {
    ZoneRow {
        id: z.id.to_string(),
        name: z.name.clone(),
        soa_email: z.soa_email.clone(),
        serial: z.serial.to_string(),
        owner: z.owner.clone().unwrap_or_default(),
        created: z
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

fn detail(z: &Zone) -> String {
    [
        format!("ID:          {}", z.id),
        format!("Name:        {}", z.name),
        format!("SOA Email:   {}", z.soa_email),
        format!("Primary NS:  {}", util::or_dash(z.soa_primary_ns.as_deref())),
        format!("Refresh:     {}", util::or_dash(z.soa_refresh)),
        format!("Retry:       {}", util::or_dash(z.soa_retry)),
        format!("Expire:      {}", util::or_dash(z.soa_expire)),
        format!("Minimum:     {}", util::or_dash(z.soa_minimum)),
        format!("Serial:      {}", z.serial),
        format!("Owner:       {}", util::or_dash(z.owner.as_deref())),
    ]
    .join("\n")
}

fn draft_from_args(args: ZoneCreateArgs) -> ZoneDraft {
    ZoneDraft {
        name: args.name,
        soa_email: args.email,
        soa_primary_ns: args.primary_ns,
        soa_refresh: args.refresh,
        soa_retry: args.retry,
        soa_expire: args.expire,
        soa_minimum: args.minimum,
        create_ns: args.create_ns,
        create_a: args.create_a,
        ip: args.ip,
    }
}

pub async fn handle(console: &Console, args: ZonesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ZonesCommand::List => {
            let zones = console.store().zones();
            let out = output::render_list(global.output, &zones, zone_row, |z| z.name.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ZonesCommand::Create(args) => {
            let draft = draft_from_args(args);
            let result = console.execute(CoreCommand::CreateZone(draft.clone())).await?;
            let CommandResult::Zones(zones) = result else {
                return Ok(());
            };
            let wanted = draft.name.trim();
            if let Some(zone) = zones.iter().find(|z| z.name.eq_ignore_ascii_case(wanted)) {
                let out = output::render_single(global.output, zone, detail, |z| z.id.to_string())?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        ZonesCommand::Delete { zone } => {
            let zone = util::resolve_zone(console, &zone)?;
            console.execute(CoreCommand::DeleteZone(zone.id)).await?;
            Ok(())
        }
    }
}
