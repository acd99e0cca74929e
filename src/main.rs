use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use vibenav::ui::cli::Commands;
use vibenav::core::logging::{init_logging, LogTarget};
use vibenav::{Cli, Config, Home, Result, VibeCard, VibeClient, VibeTui};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new(
        cli.api_url.clone(),
        cli.base_dir.as_deref().map(PathBuf::from),
        cli.timeout_secs,
    )?;
    let runtime = Runtime::new()?;

    match cli.command {
        None | Some(Commands::Tui) => handle_tui(config, &runtime),
        Some(Commands::Vibe { name, citations }) => {
            handle_vibe(&config, &runtime, &name.join(" "), citations)
        }
        Some(Commands::Tag { tag }) => handle_tag(&config, &runtime, &tag),
        Some(Commands::Locations) => handle_locations(&config, &runtime),
    }
}

fn handle_tui(config: Config, runtime: &Runtime) -> Result<()> {
    init_logging(&config, LogTarget::File)?;
    let mut tui = VibeTui::new(config, runtime.handle().clone())?;
    tui.run()
}

fn handle_vibe(config: &Config, runtime: &Runtime, name: &str, citations: bool) -> Result<()> {
    init_logging(config, LogTarget::Stderr)?;
    let client = VibeClient::new(config)?;
    let mut home = Home::new();

    let Some(ticket) = home.search_by_name(name) else {
        println!("Nothing to search for. Give a place name, e.g. vibenav vibe \"India Gate\"");
        return Ok(());
    };

    println!("Getting the vibe of \"{}\"...\n", home.searched_label());
    let outcome = runtime.block_on(client.execute(&ticket.request));
    home.resolve(ticket.seq, outcome);

    if let Some(result) = home.result() {
        let mut card = VibeCard::new(result.clone(), home.searched_label());
        if citations {
            card.toggle_citations();
        }
        println!("{}", card.plain_text());
    }

    Ok(())
}

fn handle_tag(config: &Config, runtime: &Runtime, tag: &str) -> Result<()> {
    init_logging(config, LogTarget::Stderr)?;
    let client = VibeClient::new(config)?;
    let mut home = Home::new();

    let ticket = home.search_by_tag(tag);
    let outcome = runtime.block_on(client.execute(&ticket.request));
    home.resolve(ticket.seq, outcome);

    if let Some(names) = home.suggestions() {
        println!("{}", home.searched_label());
        if names.is_empty() {
            println!("\nNo spots found for this vibe.");
        } else {
            println!();
            for (i, name) in names.iter().enumerate() {
                println!("{}. {}", i + 1, name);
            }
        }
    } else if let Some(result) = home.result() {
        println!("{}", VibeCard::new(result.clone(), home.searched_label()).plain_text());
    }

    Ok(())
}

fn handle_locations(config: &Config, runtime: &Runtime) -> Result<()> {
    init_logging(config, LogTarget::Stderr)?;
    let client = VibeClient::new(config)?;
    let mut home = Home::new();

    // A failed fetch leaves the list empty; it is logged, not fatal
    let ticket = home.initialize();
    let outcome = runtime.block_on(client.execute(&ticket.request));
    home.resolve(ticket.seq, outcome);

    let locations = home.all_locations();
    if locations.is_empty() {
        println!("No locations found.");
        return Ok(());
    }

    println!("Found {} locations:\n", locations.len());
    for location in locations {
        println!(
            "  {:<40} {:>9.4}, {:>9.4}",
            location.name,
            location.latitude(),
            location.longitude()
        );
    }

    Ok(())
}
