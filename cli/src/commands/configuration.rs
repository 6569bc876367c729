use std::process::exit;

use inventory::config;

use crate::cli::{ConfigCommand, UpdateConfiguration};

fn list_and_exit() {
    println!(
        "Configuration file {}:\n",
        config::configuration_file().to_string_lossy()
    );

    match config::load().map(|cfg| config::application_config_to_string(&cfg)) {
        Ok(Ok(toml_as_string)) => {
            println!("{toml_as_string}");
        }
        Ok(Err(e)) => {
            eprintln!("ERROR: Unable to render the configuration: {e}");
            exit(4);
        }
        Err(e) => {
            eprintln!("ERROR: Unable to load the configuration: {e}");
            exit(4);
        }
    }
    exit(0);
}

fn update_and_exit(update: &UpdateConfiguration) {
    let mut app_config = match config::load() {
        Ok(ac) => ac,
        Err(e) => {
            eprintln!(
                "ERROR: Unable to load configuration file {}, reason:{}",
                config::configuration_file().to_string_lossy(),
                e
            );
            exit(4);
        }
    };
    if let Some(database) = &update.database {
        app_config.database.path = database.to_string_lossy().to_string();
    }
    if let Some(busy_timeout_ms) = update.busy_timeout_ms {
        app_config.database.busy_timeout_ms = busy_timeout_ms;
    }
    if let Some(page_size) = update.page_size {
        if page_size == 0 {
            eprintln!("ERROR: The page size must be at least 1");
            exit(4);
        }
        app_config.listing.page_size = page_size;
    }
    if let Err(e) = config::save(&app_config) {
        eprintln!("ERROR: Unable to save the application config: {e}");
        exit(4);
    }
    println!(
        "Configuration saved to {}",
        config::configuration_file().to_string_lossy()
    );
    exit(0);
}

pub fn execute(cmd: &ConfigCommand) {
    match cmd {
        // List current configuration
        ConfigCommand::List => list_and_exit(),
        // Add new values to the configuration
        ConfigCommand::Update(update) => update_and_exit(update),
        ConfigCommand::Remove => match config::remove() {
            Ok(()) => {
                println!(
                    "Configuration file {} removed",
                    config::configuration_file().to_string_lossy()
                );
            }
            Err(e) => {
                println!(
                    "ERROR:Unable to remove configuration file {} : {}",
                    config::configuration_file().to_string_lossy(),
                    e
                );
            }
        },
    }
}
