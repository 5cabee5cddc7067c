//! divider-calc - standard resistor networks for voltage dividers
//!
//! # Usage
//!
//! ```bash
//! divider-calc divider --vin 12 --vout 3.3 --tolerance 0.5 --series E96 --min 1k --max 100k
//! divider-calc divider --vin 5 --vout 1.8 --bound "P <= 1e-3" --bound "N < 4"
//! divider-calc ohm --voltage 12 --resistance 4k7
//! ```
//!
//! Set `RUST_LOG=divider_calc=debug` to follow the search phases on stderr.

extern crate divider_calc;

use std::process;

use clap::{Args, Parser, Subcommand};
use divider_calc::*;

/// Standard resistor combinations for voltage dividers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find divider networks closest to a target output voltage
    Divider(DividerArgs),
    /// Solve Ohm's law from two of voltage, current and resistance
    Ohm(OhmArgs),
}

#[derive(Args, Debug)]
struct DividerArgs {
    /// Input voltage in volts
    #[arg(long, default_value_t = 12.0)]
    vin: f64,

    /// Required output voltage in volts
    #[arg(long, default_value_t = 5.0)]
    vout: f64,

    /// Accepted output error in percent
    #[arg(short, long, default_value_t = 1.0)]
    tolerance: f64,

    /// Standard series to draw values from (E3 .. E192)
    #[arg(short, long, default_value = "E24")]
    series: Series,

    /// Smallest resistor allowed, e.g. 100, 4k7, 1M
    #[arg(long, default_value = "100", value_parser = parse_resistance)]
    min: f64,

    /// Largest resistor allowed
    #[arg(long, default_value = "1M", value_parser = parse_resistance)]
    max: f64,

    /// Number of matches to print
    #[arg(short = 'n', long, default_value_t = 100)]
    results: usize,

    /// Try every pair of values for four-resistor networks, even on wide ranges
    #[arg(long)]
    exhaustive: bool,

    /// Extra constraint such as "P <= 0.01" or "Rtot >= 10e3" (repeatable)
    #[arg(short, long = "bound", value_name = "EXPR")]
    bounds: Vec<String>,
}

#[derive(Args, Debug)]
struct OhmArgs {
    /// Voltage in volts
    #[arg(short, long)]
    voltage: Option<f64>,

    /// Current in amps
    #[arg(short, long)]
    current: Option<f64>,

    /// Resistance, e.g. 470, 4k7, 2.2M
    #[arg(short, long, value_parser = parse_resistance)]
    resistance: Option<f64>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Command::Divider(args) => run_divider(args),
        Command::Ohm(args) => run_ohm(args),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_divider(args: DividerArgs) -> Result<()> {
    let pruning = if args.exhaustive {
        Pruning::Exhaustive
    } else {
        Pruning::default()
    };
    let params = SearchParams::new(args.vin, args.vout)
        .with_tolerance(args.tolerance)
        .with_series(args.series)
        .with_range(args.min, args.max)
        .with_max_results(args.results)
        .with_pruning(pruning);

    let accept = args
        .bounds
        .iter()
        .try_fold(BoundBuilder::new(), |builder, expr| builder.bound(expr))?
        .finish();

    let found = search_with(&params, accept)?;
    if found.is_empty() {
        println!(
            "No {} combination between {} and {} within {}% of {}",
            params.series,
            format_resistance(params.min_resistance),
            format_resistance(params.max_resistance),
            params.tolerance_percent,
            format_voltage(params.v_out_required),
        );
        return Ok(());
    }

    print_table(&found);

    let best = &found[0];
    println!();
    println!(
        "Best match: {} over {} draws {} and dissipates {}",
        best.upper(),
        best.lower(),
        format_current(best.current()),
        format_power(best.power_dissipation()),
    );
    Ok(())
}

fn print_table(found: &[Network]) {
    println!(
        "{:>4}  {:>10}  {:>8}  {:<20}  {:<20}  {:>1}  {}",
        "#", "Vout", "Error", "Upper", "Lower", "N", "Type"
    );
    for (idx, network) in found.iter().enumerate() {
        println!(
            "{:>4}  {:>8.4} V  {:>7.3}%  {:<20}  {:<20}  {:>1}  {}",
            idx + 1,
            network.v_out_actual(),
            network.error_percent(),
            network.upper().to_string(),
            network.lower().to_string(),
            network.resistor_count(),
            network.schema_type(),
        );
    }
}

fn run_ohm(args: OhmArgs) -> Result<()> {
    let (v, i, r) = match (args.voltage, args.current, args.resistance) {
        (Some(v), Some(i), None) => (v, i, ohm::resistance(v, i)?),
        (Some(v), None, Some(r)) => (v, ohm::current(v, r)?, r),
        (None, Some(i), Some(r)) => (ohm::voltage(i, r), i, r),
        _ => {
            return Err(DividerError::invalid_parameter(
                "ohm",
                "give exactly two of --voltage, --current and --resistance",
            ))
        }
    };

    println!("V = {}", format_voltage(v));
    println!("I = {}", format_current(i));
    println!("R = {}", format_resistance(r));
    println!("P = {}", format_power(ohm::power(v, i)));
    Ok(())
}
