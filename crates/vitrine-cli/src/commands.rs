//! Command handlers

use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use vitrine_app::admin::AdminService;
use vitrine_app::booking::{BookingRequest, BookingService};
use vitrine_app::config::Config;
use vitrine_app::repository::{open_store, Store};
use vitrine_domain::model::{
    parse_features, parse_price, Item, ItemPatch, ReservationStatus, ResidenceDraft,
    SettingsPatch, VehicleDraft,
};
use vitrine_domain::repository::{CatalogRepository, ReservationLedger};
use vitrine_store::DocumentUpdated;
use vitrine_types::{Error, OutputFormat, Result};

use crate::cli::{Cli, Commands, ListFilter};
use crate::output::{
    output_booking, output_dashboard, output_item, output_items, output_reservations,
    output_settings,
};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(ref path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let logging = if cli.verbose {
        config.logging.clone().verbose()
    } else {
        config.logging.clone()
    };
    logging.init();

    // Config edits never touch the document
    if let Commands::Config {
        show,
        set_data_dir,
        set_output,
        set_log_level,
        set_quota,
        set_whatsapp,
        reset,
    } = cli.command
    {
        return cmd_config(
            config_path,
            ConfigChanges {
                show,
                set_data_dir,
                set_output,
                set_log_level,
                set_quota,
                set_whatsapp,
                reset,
            },
        );
    }

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let format = cli.format.unwrap_or(config.output_format);

    let store = open_store(&config)?;
    let _saved = store.subscribe(|event: &DocumentUpdated| {
        debug!(timestamp = %event.timestamp, "document saved");
    });

    match cli.command {
        Commands::List { filter } => {
            let items: Vec<Item> = match filter {
                ListFilter::All => store.list_all(),
                ListFilter::Sale => store.list_for_sale().into_iter().map(Item::from).collect(),
                ListFilter::Rent => store.list_for_rent().into_iter().map(Item::from).collect(),
                ListFilter::Residences => store
                    .list_residences()
                    .into_iter()
                    .map(Item::from)
                    .collect(),
            };
            output_items(format, &items)
        }

        Commands::Show { id } => {
            let item = store.find_by_id(id).ok_or(Error::ItemNotFound(id))?;
            output_item(format, &item)
        }

        Commands::AddVehicle {
            title,
            price,
            category,
            vehicle_type,
            description,
            image,
            features,
        } => {
            let draft = VehicleDraft {
                description,
                image_ref: image,
                features: parse_features(&features),
                vehicle_type,
                ..VehicleDraft::new(title, parse_price(&price), category)
            };
            let vehicle = store.add_vehicle(draft)?;
            announce(format, "Added vehicle", &Item::from(vehicle))
        }

        Commands::AddResidence {
            title,
            price,
            location,
            description,
            image,
            features,
        } => {
            let draft = ResidenceDraft {
                description,
                image_ref: image,
                features: parse_features(&features),
                ..ResidenceDraft::new(title, parse_price(&price), location)
            };
            let residence = store.add_residence(draft)?;
            announce(format, "Added residence", &Item::from(residence))
        }

        Commands::Update {
            id,
            title,
            price,
            category,
            vehicle_type,
            location,
            description,
            image,
            features,
            available,
        } => {
            let patch = ItemPatch {
                title,
                price: price.as_deref().map(parse_price),
                category,
                description,
                image_ref: image,
                features: features.as_deref().map(parse_features),
                available,
                vehicle_type,
                location,
            };
            cmd_update(&store, format, id, &patch)
        }

        Commands::Delete { id } => {
            if !store.delete_item(id)? {
                return Err(Error::ItemNotFound(id));
            }
            println!("Deleted item {}", id);
            Ok(())
        }

        Commands::Toggle { id } => {
            let available = store
                .toggle_available(id)?
                .ok_or(Error::ItemNotFound(id))?;
            println!(
                "Item {} is now {}",
                id,
                if available { "available" } else { "unavailable" }
            );
            Ok(())
        }

        Commands::Reserve {
            item,
            name,
            email,
            phone,
            date,
            message,
        } => {
            let service =
                BookingService::new(&store, &config.whatsapp_number, &config.business_name);
            let booking = service.book(
                BookingRequest {
                    item_id: item,
                    customer_name: name,
                    email,
                    phone,
                    requested_date: date,
                    message,
                },
                Local::now().date_naive(),
            )?;
            output_booking(format, &booking)
        }

        Commands::Reservations => output_reservations(format, &store.list()),

        Commands::Status { id, status } => {
            let status = ReservationStatus::from(status);
            if !store.set_status(id, status.clone())? {
                return Err(Error::ReservationNotFound(id));
            }
            println!("Reservation {} is now {}", id, status);
            Ok(())
        }

        Commands::Stats => output_dashboard(format, &AdminService::new(&store).dashboard()),

        Commands::Settings {
            name,
            description,
            phone,
            other_phones,
            email,
            weekday_hours,
            saturday_hours,
        } => {
            let patch = SettingsPatch {
                name,
                description,
                contact_phone: phone,
                other_phones: other_phones.as_deref().map(parse_features),
                contact_email: email,
                weekday_hours,
                saturday_hours,
            };
            let settings = if patch.is_empty() {
                store.settings()
            } else {
                store.update_settings(&patch)?
            };
            output_settings(format, &settings)
        }

        Commands::Export { output } => {
            let admin = AdminService::new(&store);
            let path = match output {
                Some(path) => {
                    admin.export_to_file(&path)?;
                    path
                }
                None => admin.export_to_dir(&std::env::current_dir()?, Local::now().date_naive())?,
            };
            println!("Exported to {}", path.display());
            Ok(())
        }

        Commands::Import { file, yes } => {
            confirm(yes, "import")?;
            AdminService::new(&store).import_from_file(&file)?;
            println!("Imported {}", file.display());
            Ok(())
        }

        Commands::Backup => {
            store.backup()?;
            println!("Backup saved");
            Ok(())
        }

        Commands::RestoreBackup { yes } => {
            confirm(yes, "restore-backup")?;
            if !store.restore_backup()? {
                return Err(Error::InvalidInput("no usable backup found".to_string()));
            }
            println!("Document restored from backup");
            Ok(())
        }

        Commands::Reset { yes } => {
            confirm(yes, "reset")?;
            store.reset()?;
            println!("Document reset to the sample catalog");
            Ok(())
        }

        Commands::Config { .. } => Ok(()),
    }
}

/// Destructive commands must be confirmed with `--yes`
fn confirm(yes: bool, command: &str) -> Result<()> {
    if yes {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "'{command}' replaces all current data; pass --yes to confirm"
        )))
    }
}

fn announce(format: OutputFormat, label: &str, item: &Item) -> Result<()> {
    if format == OutputFormat::Table {
        println!("{} {}", label, item.id());
    }
    output_item(format, item)
}

fn cmd_update(store: &Store, format: OutputFormat, id: u64, patch: &ItemPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(Error::InvalidInput("nothing to update".to_string()));
    }
    if !store.update_item(id, patch)? {
        return Err(Error::ItemNotFound(id));
    }
    let item = store.find_by_id(id).ok_or(Error::ItemNotFound(id))?;
    announce(format, "Updated item", &item)
}

struct ConfigChanges {
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_log_level: Option<String>,
    set_quota: Option<usize>,
    set_whatsapp: Option<String>,
    reset: bool,
}

fn cmd_config(path: PathBuf, changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save_to(&path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load_from(&path)?;
    let mut modified = false;

    if let Some(dir) = changes.set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = changes.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(level) = changes.set_log_level {
        config.logging.level = level;
        modified = true;
    }

    if let Some(quota) = changes.set_quota {
        config.storage_quota_bytes = (quota > 0).then_some(quota);
        modified = true;
    }

    if let Some(number) = changes.set_whatsapp {
        if !number.chars().any(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidInput(format!(
                "messaging number has no digits: {number}"
            )));
        }
        config.whatsapp_number = number;
        modified = true;
    }

    if modified {
        config.save_to(&path)?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
