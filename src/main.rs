use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use trip_o_mat::config::Config;
use trip_o_mat::geo::{GeocodeQuery, NominatimGeocoder};
use trip_o_mat::history::{DeltaField, LocationHistory};
use trip_o_mat::render::{renderer, HistType, Histogram, OutputFormat};

#[derive(Parser)]
#[command(name = "trip-o-mat")]
#[command(about = "Travel distance histograms from a location history export")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Location history JSON (defaults to the Takeout download location)
    #[arg(long, global = true)]
    history: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    /// Number of histogram bins
    #[arg(long, global = true)]
    bins: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the years in the history with their sample counts
    Years,
    /// Histogram of driving-leg miles and speeds
    DistanceSpeed,
    /// Histogram of a driving-leg field, one series per year
    ByYear {
        #[arg(long, value_enum, default_value_t = DeltaField::Mph)]
        field: DeltaField,
    },
    /// Histogram of trips away from home in one year
    Trips {
        #[arg(long)]
        year: i32,
        /// Home address or "lat, lon" (overrides the config)
        #[arg(long)]
        home: Option<String>,
    },
    /// Histogram of daily driving distance in one year
    TripsByDay {
        #[arg(long)]
        year: i32,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(history) = cli.history {
        config.history = Some(history);
    }
    if let Some(format) = cli.format {
        config.render.format = format;
    }
    if let Some(bins) = cli.bins {
        config.render.bins = bins;
    }

    let history = LocationHistory::load(&config.history_path()?)?;

    let histogram = match cli.command {
        Commands::Years => {
            for range in history.years().ranges() {
                println!("{}: {} samples", range.year, range.len());
            }
            return Ok(());
        }
        Commands::DistanceSpeed => {
            let legs = history.driving_leg_deltas();
            Histogram::new("Driving legs")
                .series("miles", legs.iter().map(|d| d.miles).collect())
                .series("MPH", legs.iter().map(|d| d.mph).collect())
                .log(true)
                .style(HistType::Bar)
        }
        Commands::ByYear { field } => {
            let data = history.driving_leg_field_by_year(field);
            history
                .year_labels()
                .into_iter()
                .zip(data)
                .fold(
                    Histogram::new(format!("Driving legs, {}", field)),
                    |h, (label, values)| h.series(label, values),
                )
                .log(true)
                .style(HistType::Step)
        }
        Commands::Trips { year, home } => {
            let query = match home {
                Some(text) => GeocodeQuery::Text(text),
                None => config.home()?.clone(),
            };
            let geocoder = NominatimGeocoder::new(
                &config.geocoder.base_url,
                &config.geocoder.user_agent,
                config.geocoder.timeout,
            )?;
            let trips = history.home_trip_lengths_for(year, &query, &geocoder)?;
            Histogram::new(format!("Trip lengths in {}", year))
                .series("miles", trips)
                .log(true)
                .style(HistType::StepFilled)
        }
        Commands::TripsByDay { year } => {
            let trips = history.trips_by_day(year)?;
            Histogram::new(format!("Trip lengths in {}", year))
                .series("miles", trips)
                .log(true)
                .style(HistType::StepFilled)
        }
    };

    let output = renderer(config.render.format, config.render.bins);
    output.render(&histogram, &mut io::stdout().lock())?;
    Ok(())
}
