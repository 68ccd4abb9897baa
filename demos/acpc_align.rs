//! Align a markups file to ACPC space
//!
//! Reads AC, PC and a midline point (in that order) from a Slicer markups
//! file or an XYZ/CSV list, prints the 4x4 patient-to-ACPC matrix and the
//! landmarks after hardening.

use std::path::PathBuf;
use std::process;

use acpc_align::{align_markups, AlignOptions, FrameConfig};
use acpc_io::read_landmarks;
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "acpc_align", about = "Compute the patient-to-ACPC rigid transform")]
struct Args {
    /// Markups file (.fcsv, .mrk.json, .xyz, .csv) holding AC, PC and a midline point
    markups: PathBuf,

    /// Print the transform without hardening it into the landmarks
    #[arg(long)]
    no_harden: bool,

    /// Shortest accepted AC-PC distance, in file units
    #[arg(long, default_value_t = FrameConfig::default().min_segment_length)]
    tolerance: f64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut markups = read_landmarks(&args.markups)
        .with_context(|| format!("reading {}", args.markups.display()))?;

    let options = AlignOptions {
        frame: FrameConfig {
            min_segment_length: args.tolerance,
            ..FrameConfig::default()
        },
        auto_harden: !args.no_harden,
    };
    let alignment = align_markups(&mut markups, &options)?;

    println!("Patient to ACPC transform:");
    print!("{}", alignment.transform);

    println!();
    let acpc = alignment.landmarks_in_acpc();
    for (point, p) in markups.iter().zip(acpc) {
        println!(
            "{:>12} -> ({:9.4}, {:9.4}, {:9.4})",
            point.label, p.x, p.y, p.z
        );
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
