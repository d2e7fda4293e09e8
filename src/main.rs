use anyhow::Context;
use appliance_date::adapters::links::build_links;
use appliance_date::adapters::scan::{ManualEntry, ScanResponseSource};
use appliance_date::adapters::sheet::FileReadingSource;
use appliance_date::config::Command;
use appliance_date::core::{ConfigProvider, ReadingSource};
use appliance_date::utils::{logger, validation::Validate};
use appliance_date::{
    decode_manufacture_date, detect_manufacturer, BatchEngine, CliConfig, CsvBatchPipeline,
    LocalStorage, Lookup, LookupEngine, LookupError, TomlConfig,
};
use clap::Parser;

fn load_config(cli: &CliConfig) -> Result<TomlConfig, LookupError> {
    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };

    if let Command::Batch {
        output_path,
        formats,
        ..
    } = &cli.command
    {
        if let Some(path) = output_path {
            config.set_output_path(path.clone());
        }
        if let Some(formats) = formats {
            config.set_output_formats(formats.clone());
        }
    }

    config.validate()?;
    Ok(config)
}

fn print_lookup(lookup: &Lookup, config: &TomlConfig, as_json: bool) -> anyhow::Result<()> {
    let links = build_links(&config.link_catalog(), &lookup.model)?;

    if as_json {
        let body = serde_json::json!({ "lookup": lookup, "links": links });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Detected Manufacturer: {}", lookup.manufacturer);
    println!("Model: {}", lookup.model);
    println!("Serial: {}", lookup.serial);
    if lookup.determined {
        println!("Date of Manufacture: {}", lookup.date);
    } else {
        println!("{}", lookup.date);
    }

    if !links.is_empty() {
        println!();
        println!("Parts and Manuals");
        for link in &links {
            println!("  {}: {}", link.label, link.url);
        }
    }
    Ok(())
}

fn lookup_from(source: &dyn ReadingSource, config: &TomlConfig, as_json: bool) -> anyhow::Result<()> {
    let engine = LookupEngine::default();
    for reading in source.readings()? {
        let lookup = engine.lookup(&reading);
        print_lookup(&lookup, config, as_json)?;
    }
    Ok(())
}

fn run(cli: &CliConfig, config: &TomlConfig) -> anyhow::Result<()> {
    match &cli.command {
        Command::Lookup { model, serial } => {
            lookup_from(&ManualEntry::new(model.as_str(), serial.as_str()), config, cli.json)?;
        }
        Command::Detect { model } => {
            let manufacturer = detect_manufacturer(model);
            if cli.json {
                let body = serde_json::json!({ "model": model, "manufacturer": manufacturer });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", manufacturer);
            }
        }
        Command::Decode {
            manufacturer,
            serial,
        } => {
            let date = decode_manufacture_date(*manufacturer, serial);
            if cli.json {
                let body = serde_json::json!({
                    "manufacturer": manufacturer,
                    "serial": serial,
                    "date_of_manufacture": date,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", date);
            }
        }
        Command::Scan { response } => {
            let body = if response == "-" {
                std::io::read_to_string(std::io::stdin())
                    .context("Failed to read scan response from stdin")?
            } else {
                std::fs::read_to_string(response)
                    .map_err(LookupError::IoError)
                    .with_context(|| format!("Failed to read scan response '{}'", response))?
            };
            lookup_from(&ScanResponseSource::new(body), config, cli.json)?;
        }
        Command::Batch { input, .. } => {
            let source = FileReadingSource::new(LocalStorage::current_dir(), input.as_str());
            let storage = LocalStorage::new(config.output_path());
            let pipeline = CsvBatchPipeline::new(source, storage, config.clone());
            let summary = BatchEngine::new(pipeline).run()?;

            println!("✅ Processed {} model/serial pairs", summary.total);
            println!(
                "   {} dated, {} undeterminable",
                summary.determined, summary.undetermined
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Command::Links { model } => {
            let links = build_links(&config.link_catalog(), model)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for link in &links {
                    println!("{}: {}", link.label, link.url);
                }
            }
        }
    }
    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<LookupError>())
        .map(LookupError::exit_code)
        .unwrap_or(2)
}

fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if cli.json_logs {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli, &config) {
        tracing::error!("❌ {:#}", e);
        match e.chain().find_map(|cause| cause.downcast_ref::<LookupError>()) {
            Some(lookup_error) => {
                eprintln!("❌ {}", lookup_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", lookup_error.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(exit_code(&e));
    }
}
