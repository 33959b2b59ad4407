//! Command-line front end for raw-SVI smile calibration.
//!
//! Takes two equal-length comma-separated numeric lists — log-moneyness and
//! total implied variance — calibrates the curve, and prints the fitted
//! parameters as `a,b,c,rho,eta` on a single line.  Malformed or
//! mismatched-length input is rejected here, before the core runs.

use std::process::ExitCode;

use clap::Parser;
use svi_calibration::{calibrate_default, MarketSample};
use svi_core::Real;

#[derive(Debug, Parser)]
#[command(
    name = "svi-calibrate",
    about = "Calibrate a raw-SVI total-variance curve to market quotes",
    version
)]
struct Args {
    /// Comma-separated log-moneyness values, e.g. "-0.15,-0.08,0.03"
    #[arg(short = 'k', long = "k-list", value_name = "LIST", allow_hyphen_values = true)]
    k_list: String,

    /// Comma-separated total implied variance values, same length as -k
    #[arg(short = 'v', long = "v-list", value_name = "LIST", allow_hyphen_values = true)]
    v_list: String,
}

/// Parse a comma-separated numeric list; surrounding brackets are tolerated.
fn parse_list(raw: &str) -> Result<Vec<Real>, String> {
    raw.split(',')
        .map(|s| s.trim().trim_matches(|ch| ch == '[' || ch == ']').trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Real>()
                .map_err(|e| format!("invalid number {s:?}: {e}"))
        })
        .collect()
}

fn run(args: &Args) -> Result<String, String> {
    let k = parse_list(&args.k_list)?;
    let v = parse_list(&args.v_list)?;
    if k.is_empty() || v.is_empty() {
        return Err("both -k and -v must contain at least one value".into());
    }
    if k.len() != v.len() {
        return Err(format!(
            "-k and -v must have the same length: {} vs {}",
            k.len(),
            v.len()
        ));
    }

    let sample = MarketSample::new(k, v).map_err(|e| e.to_string())?;
    let result = calibrate_default(&sample).map_err(|e| e.to_string())?;
    let p = result.params;
    Ok(format!("{},{},{},{},{}", p.a, p.b, p.c, p.rho, p.eta))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(2)
        }
    }
}
