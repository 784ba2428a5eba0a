//! # screen-calc
//!
//! Command-line front end of `screen_core`: reads the installation
//! parameters as flags, prints the designation, mass and numbered
//! calculation trail.
//!
//! **Usage:**
//! ```bash
//! screen-calc --width-code 10 --height-code 12 --grate-code 12 \
//!     --channel-width-mm 1050 --channel-height-mm 1000 --profile 777 --gap-mm 10
//! ```
//!
//! Exit status: 0 on success, 1 when the input is rejected, 2 on an internal
//! failure.

mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use screen_core::calculations::{CalcOptions, HydraulicInput, ScreenInput};
use screen_core::units::{CubicMetersPerSecond, LitersPerSecond, Meters, Millimeters};
use screen_core::{calculate_with_options, CalcError, FilterProfile};

/// Bar screen calculator
#[derive(Parser, Debug)]
#[command(name = "screen-calc", version)]
#[command(about = "Calculate the designation, mass and bill of materials of a bar screen")]
struct Args {
    /// Nominal width size code of the screen
    #[arg(long)]
    width_code: i32,

    /// Nominal height size code of the screen
    #[arg(long)]
    height_code: i32,

    /// Height size code of the grate (defaults to the screen height code)
    #[arg(long)]
    grate_code: Option<i32>,

    /// Channel width (mm)
    #[arg(long)]
    channel_width_mm: f64,

    /// Channel depth (mm)
    #[arg(long)]
    channel_height_mm: f64,

    /// Filter profile: narrow, medium, wide or a catalog token (6x30, 777, 3999)
    #[arg(long, default_value = "medium")]
    profile: String,

    /// Clear gap between bars (mm)
    #[arg(long)]
    gap_mm: f64,

    /// Use the heavy drive unit
    #[arg(long, env = "SCREEN_CALC_HEAVY_DRIVE")]
    heavy_drive: bool,

    /// Print the whole result as JSON
    #[arg(long)]
    json: bool,

    /// Print the bill of materials tree
    #[arg(long)]
    breakdown: bool,

    /// Design water flow (l/s); enables the hydraulic assessment
    #[arg(long, requires = "final_level_mm")]
    water_flow_lps: Option<f64>,

    /// Water level downstream of the screen (mm)
    #[arg(long, requires = "water_flow_lps")]
    final_level_mm: Option<f64>,

    /// Grate tilt from horizontal (deg)
    #[arg(long, requires = "water_flow_lps")]
    tilt_angle_deg: Option<f64>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn to_input(&self) -> Result<ScreenInput, CalcError> {
        let hydraulics = match (self.water_flow_lps, self.final_level_mm) {
            (Some(flow), Some(level)) => {
                let mut h = HydraulicInput::new(
                    CubicMetersPerSecond::from(LitersPerSecond(flow)).0,
                    mm_to_m(level),
                );
                if let Some(tilt) = self.tilt_angle_deg {
                    h.tilt_angle_deg = tilt;
                }
                Some(h)
            }
            _ => None,
        };

        Ok(ScreenInput {
            screen_width_code: self.width_code,
            screen_height_code: self.height_code,
            grate_height_code: self.grate_code.unwrap_or(self.height_code),
            channel_width_m: mm_to_m(self.channel_width_mm),
            channel_height_m: mm_to_m(self.channel_height_mm),
            filter_profile: self.profile.parse::<FilterProfile>()?,
            gap_m: mm_to_m(self.gap_mm),
            hydraulics,
        })
    }
}

fn mm_to_m(mm: f64) -> f64 {
    Meters::from(Millimeters(mm)).0
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = args.to_input()?;
    let options = CalcOptions {
        heavy_drive: args.heavy_drive,
    };
    debug!(?input, ?options, "parsed arguments");

    let result = calculate_with_options(&input, &options)?;

    if args.json {
        let json = result.to_json_pretty().context("failed to serialize result")?;
        println!("{}", json);
        return Ok(());
    }

    print!("{}", render::report(&result)?);
    if let Some(points) = &result.hydraulics {
        println!();
        println!("Hydraulics:");
        print!("{}", render::hydraulics(points)?);
    }
    if args.breakdown {
        println!();
        println!("Bill of materials:");
        print!("{}", render::breakdown(&result.breakdown)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let calc = err.downcast_ref::<CalcError>();
            if args.json {
                if let Some(json) = calc.and_then(|c| serde_json::to_string_pretty(c).ok()) {
                    println!("{}", json);
                }
            }
            match calc {
                Some(calc) if calc.is_validation() => {
                    eprintln!("{}", calc);
                    ExitCode::from(1)
                }
                _ => {
                    eprintln!("internal error: {:#}", err);
                    ExitCode::from(2)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "screen-calc",
            "--width-code",
            "10",
            "--height-code",
            "12",
            "--channel-width-mm",
            "1050",
            "--channel-height-mm",
            "1000",
            "--gap-mm",
            "10",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_map_to_input() {
        let input = parse(&["--profile", "777"]).to_input().unwrap();
        assert_eq!(input.grate_height_code, 12);
        assert!((input.channel_width_m - 1.05).abs() < 1e-12);
        assert!((input.gap_m - 0.01).abs() < 1e-12);
        assert_eq!(input.filter_profile, FilterProfile::Medium);
        assert!(input.hydraulics.is_none());
    }

    #[test]
    fn test_unknown_profile_is_validation_error() {
        let err = parse(&["--profile", "999"]).to_input().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_hydraulic_flags() {
        let input = parse(&["--water-flow-lps", "250", "--final-level-mm", "500"])
            .to_input()
            .unwrap();
        let h = input.hydraulics.unwrap();
        assert!((h.water_flow_m3s - 0.25).abs() < 1e-12);
        assert!((h.final_level_m - 0.5).abs() < 1e-12);

        let lone = Args::try_parse_from([
            "screen-calc", "--width-code", "10", "--height-code", "12",
            "--channel-width-mm", "1050", "--channel-height-mm", "1000",
            "--gap-mm", "10", "--water-flow-lps", "250",
        ]);
        assert!(lone.is_err());
    }

    #[test]
    fn test_gate_failure_surfaces_as_calc_error() {
        let args = parse(&["--grate-code", "16"]);
        let err = run(&args).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert!(calc.is_validation());
        assert!(calc.to_string().starts_with("Screen too tall for grate"));
    }
}
