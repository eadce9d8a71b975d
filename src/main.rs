use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use hamlog::{
    config::{AppConfig, DB_ENV_VAR},
    entry::{ManualEntry, build_draft, parse_entry_timestamp, parse_frequency, validate_grid_locator},
    export::{ExportOutcome, ExportScope, export_file_name, export_logbook, today_file_name},
    import::import_file,
    logging::init_logging,
    persist::{ContactStore, sqlite::SqliteContactStore},
    qso::{ContactRecord, StationConfig},
};

#[derive(Debug, Parser)]
#[command(name = "hamlog", version, about = "Personal radio-contact logbook with ADIF interchange")]
struct Cli {
    /// Config file (defaults to ./hamlog.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Logbook database file.
    #[arg(long, global = true, env = DB_ENV_VAR)]
    db: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `hamlog=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log a new contact.
    Add(AddArgs),
    /// List contacts, most recent first.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one contact.
    Show {
        /// Contact id.
        id: i64,
    },
    /// Import contacts from an ADIF file.
    Import {
        /// ADIF file, with extension.
        file: PathBuf,
    },
    /// Export the whole logbook to `<name>.adi`.
    Export {
        /// Base file name, without extension.
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Export contacts created today to `logbook_<date>.adi`.
    ExportToday,
    /// Show or edit the station profile.
    #[command(subcommand)]
    Station(StationCommand),
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Worked callsign.
    call: String,
    /// Frequency in MHz.
    freq: String,
    /// Mode (SSB, CW, FT8, ...).
    mode: String,
    /// UTC time, `YYYY-MM-DD HH:MM[:SS]`; now when omitted.
    #[arg(long, default_value = "")]
    time: String,
    #[arg(long, default_value = "")]
    rst_sent: String,
    #[arg(long, default_value = "")]
    rst_rcvd: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    qth: String,
    /// Worked station locator.
    #[arg(long, default_value = "")]
    grid: String,
    /// Comment; a thank-you note is generated from `--name` when omitted.
    #[arg(long, default_value = "")]
    comment: String,
    /// Power in watts; the station default when omitted.
    #[arg(long, default_value = "")]
    power: String,
}

#[derive(Debug, Subcommand)]
enum StationCommand {
    /// Print the active station profile.
    Show,
    /// Save a new station profile; omitted fields keep their current value.
    Set {
        #[arg(long)]
        call: Option<String>,
        #[arg(long)]
        power: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        grid: Option<String>,
        #[arg(long)]
        antenna: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_database_override(cli.db.clone());

    if let Err(err) = init_logging(cli.log_level.as_deref(), &config.log_level) {
        eprintln!("{err}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), db = %config.database_path.display(), "hamlog starting");

    let mut store = SqliteContactStore::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    run(cli.command, &mut store, &config)
}

fn run(command: Command, store: &mut SqliteContactStore, config: &AppConfig) -> Result<()> {
    match command {
        Command::Add(args) => add_contact(store, args),
        Command::List { json } => list_contacts(store, json),
        Command::Show { id } => show_contact(store, id),
        Command::Import { file } => {
            println!("Processing file: {}", file.display());
            let tally = import_file(store, &file)?;
            if tally.seen == 0 {
                println!("No records found to import");
            } else {
                println!("{tally}");
            }
            Ok(())
        }
        Command::Export { name } => {
            let path = config.export_dir.join(export_file_name(&name));
            match export_logbook(store, ExportScope::All, &path, &config.export_options())? {
                ExportOutcome::Written { count, path } => {
                    println!("Exported {count} contacts to {}", path.display());
                }
                ExportOutcome::Empty => println!("Nothing to export"),
            }
            Ok(())
        }
        Command::ExportToday => {
            let local_date = Local::now().date_naive();
            let path = config.export_dir.join(today_file_name(local_date));
            let scope = ExportScope::CreatedToday { local_date };
            match export_logbook(store, scope, &path, &config.export_options())? {
                ExportOutcome::Written { count, path } => {
                    println!("Exported {count} contacts created today.");
                    println!("File written: {}", path.display());
                }
                ExportOutcome::Empty => println!("No contacts created today to export."),
            }
            Ok(())
        }
        Command::Station(StationCommand::Show) => {
            print_station(&store.station_config()?);
            Ok(())
        }
        Command::Station(StationCommand::Set {
            call,
            power,
            location,
            grid,
            antenna,
            equipment,
        }) => {
            let mut station = store.station_config()?;
            if let Some(call) = call {
                station.my_call = call.trim().to_uppercase();
            }
            if let Some(power) = power {
                station.power = power.trim().to_string();
            }
            if let Some(location) = location {
                station.location = location.trim().to_string();
            }
            if let Some(grid) = grid {
                station.grid_locator = validate_grid_locator(&grid)?;
            }
            if let Some(antenna) = antenna {
                station.antenna = antenna.trim().to_string();
            }
            if let Some(equipment) = equipment {
                station.equipment = equipment.trim().to_string();
            }
            store.insert_station_config(&station)?;
            println!("Station configuration saved.");
            print_station(&station);
            Ok(())
        }
    }
}

fn add_contact(store: &mut SqliteContactStore, args: AddArgs) -> Result<()> {
    let station = store.station_config()?;
    let entry = ManualEntry {
        contact_call: args.call,
        frequency: parse_frequency(&args.freq)?,
        mode: args.mode,
        timestamp: Some(parse_entry_timestamp(&args.time)?),
        rst_sent: args.rst_sent,
        rst_received: args.rst_rcvd,
        name: args.name,
        qth: args.qth,
        grid_locator: args.grid,
        comment: args.comment,
        power: args.power,
    };
    let draft = build_draft(&entry, &station)?;
    if draft.contact_call.is_empty() || draft.mode.is_empty() {
        bail!("callsign and mode are required");
    }

    let id = store.insert_contact(&draft)?;
    println!("Band: {}", draft.band);
    println!("Contact {id} logged.");
    Ok(())
}

fn list_contacts(store: &SqliteContactStore, json: bool) -> Result<()> {
    let records = store.select_by_timestamp_desc()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let station = store.station_config()?;
    println!("Logbook of: {}", station.my_call);
    if records.is_empty() {
        println!("No contacts in the logbook.");
        return Ok(());
    }
    println!(
        "{:<6} {:<19} | {:<10} | {:<22} | {}",
        "ID", "Date/time", "Station", "Frequency/band/mode", "Comment"
    );
    for rec in &records {
        let freq = rec
            .frequency
            .map(|f| format!("{f} MHz"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<19} | {:<10} | {:<22} | {}",
            rec.id,
            rec.timestamp_text(),
            rec.contact_call,
            format!("{freq} ({}) {}", rec.band, rec.mode),
            rec.comment.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn show_contact(store: &SqliteContactStore, id: i64) -> Result<()> {
    let Some(rec) = store.get_contact(id)? else {
        bail!("contact {id} not found");
    };
    print_details(&rec);
    Ok(())
}

fn print_details(rec: &ContactRecord) {
    let rows = [
        ("Callsign", Some(rec.my_call.clone())),
        ("Contact", Some(rec.contact_call.clone())),
        ("Frequency", rec.frequency.map(|f| format!("{f} MHz"))),
        ("Band", Some(rec.band.clone())),
        ("Mode", Some(rec.mode.clone())),
        ("Date/time", Some(rec.timestamp_text())),
        ("RST sent", rec.rst_sent.clone()),
        ("RST received", rec.rst_received.clone()),
        ("Comment", rec.comment.clone()),
        ("QTH", rec.qth.clone()),
        ("Name", rec.name.clone()),
        ("Power", rec.power.map(|p| format!("{p} W"))),
        ("Grid locator", Some(rec.grid_locator.clone())),
    ];
    for (label, value) in rows {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("{label}: {value}");
        }
    }
}

fn print_station(station: &StationConfig) {
    println!("Callsign: {}", station.my_call);
    println!("Power: {}", station.power);
    println!("Location: {}", station.location);
    println!("Grid locator: {}", station.grid_locator);
    println!("Antenna: {}", station.antenna);
    println!("Equipment: {}", station.equipment);
}
