use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use safetynet_core::render::{self, empty};
use safetynet_core::{CoreConfig, CoverageAssignment, CoveragePatch, Locator, RecordStore, ViewBuilder};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "safetynet")]
#[command(about = "SafetyNet emergency alert lookups")]
struct Cli {
    /// Data file (overrides SAFETYNET_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Print views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// People covered by a fire station
    Station {
        /// Station number
        station: u32,
    },
    /// Residents of an address with medical details
    Fire {
        /// Street address
        address: String,
    },
    /// Households covered by stations
    Flood {
        /// Station numbers (comma-separated)
        #[arg(value_delimiter = ',', required = true)]
        stations: Vec<u32>,
    },
    /// Children living at an address
    ChildAlert {
        /// Street address
        address: String,
    },
    /// Phone numbers of residents covered by a station
    PhoneAlert {
        /// Station number
        station: u32,
    },
    /// Contact and medical details by last name
    PersonInfo {
        /// Last name
        last_name: String,
    },
    /// Email addresses of everyone in a city
    CommunityEmail {
        /// City name
        city: String,
    },
    /// Assign an address to a station
    AddCoverage {
        /// Street address
        address: String,
        /// Station number
        station: u32,
    },
    /// Move a coverage assignment to another station
    UpdateCoverage {
        /// Assignment id
        id: String,
        /// New station number
        station: u32,
    },
    /// Remove a coverage assignment
    DeleteCoverage {
        /// Assignment id
        id: String,
    },
    /// Remove a person by name
    DeletePerson {
        first_name: String,
        last_name: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safetynet_core=info".parse()?)
                .add_directive("safetynet=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CoreConfig::resolve(cli.data_file.clone())?;
    let mut store = RecordStore::open(config.data_file())
        .with_context(|| format!("failed to open {}", config.data_file().display()))?;

    match cli.command {
        Commands::Station { station } => {
            let coverage = ViewBuilder::new(&store).station_coverage(station)?;
            if cli.json {
                println!("{}", render::to_json(&coverage)?);
            } else {
                println!("{}", coverage);
            }
        }
        Commands::Fire { address } => {
            let alert = ViewBuilder::new(&store).fire_alert(&address)?;
            if cli.json {
                println!("{}", render::to_json(&alert)?);
            } else if alert.residents.is_empty() {
                println!("{}", empty::NO_RESIDENTS);
            } else {
                println!("{}", alert);
            }
        }
        Commands::Flood { stations } => {
            let stations: BTreeSet<u32> = stations.into_iter().collect();
            let households = ViewBuilder::new(&store).flood_stations(&stations)?;
            print_views(cli.json, &households, empty::NO_HOUSEHOLDS)?;
        }
        Commands::ChildAlert { address } => {
            let children = ViewBuilder::new(&store).child_alert(&address)?;
            print_views(cli.json, &children, empty::NO_CHILDREN)?;
        }
        Commands::PhoneAlert { station } => {
            let phones = ViewBuilder::new(&store).phone_alert(station);
            print_views(cli.json, &phones, empty::NO_PHONE_NUMBERS)?;
        }
        Commands::PersonInfo { last_name } => {
            let infos = ViewBuilder::new(&store).person_info(&last_name)?;
            print_views(cli.json, &infos, &empty::no_persons_with_last_name(&last_name))?;
        }
        Commands::CommunityEmail { city } => {
            let emails = ViewBuilder::new(&store).community_emails(&city);
            print_views(cli.json, &emails, empty::NO_EMAILS)?;
        }
        Commands::AddCoverage { address, station } => {
            if station == 0 {
                bail!("station number must be positive");
            }
            let assignment = CoverageAssignment::new(address, station);
            let id = assignment.id.clone();
            store.add_coverage(assignment)?;
            info!("Added coverage assignment {}", id);
            println!("{}", id);
        }
        Commands::UpdateCoverage { id, station } => {
            if station == 0 {
                bail!("station number must be positive");
            }
            let patch = CoveragePatch {
                address: None,
                station: Some(station),
            };
            if !store.update_coverage(&id, &patch)? {
                println!("No change to coverage assignment {}", id);
            }
        }
        Commands::DeleteCoverage { id } => {
            if !store.delete_coverage(&id)? {
                bail!("no coverage assignment with id {}", id);
            }
        }
        Commands::DeletePerson {
            first_name,
            last_name,
        } => {
            let locator = Locator::name(first_name, last_name);
            if !store.delete_person(&locator)? {
                bail!("no person named {}", locator);
            }
        }
    }

    Ok(())
}

/// Print a collection of views, or the placeholder message when it is empty.
fn print_views<'a, T, I>(json: bool, views: &'a I, empty_message: &str) -> Result<()>
where
    T: std::fmt::Display + 'a,
    &'a I: IntoIterator<Item = &'a T>,
    I: serde::Serialize + ?Sized,
{
    if json {
        println!("{}", render::to_json(views)?);
        return Ok(());
    }

    let text = render::render_all(views);
    if text.is_empty() {
        println!("{}", empty_message);
    } else {
        println!("{}", text);
    }
    Ok(())
}
