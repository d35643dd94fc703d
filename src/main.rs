use std::env;
use std::path::PathBuf;

use swmm_reader::swmm::export;
use swmm_reader::swmm::report;
use swmm_reader::{DecodeOptions, SwmmOutput};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <path-to-out-file> [--strict] [--json <path>] [--tables <dir>] [--rpt <path>]",
            args[0]
        );
        std::process::exit(1);
    }

    let out_path = &args[1];
    let strict = args.iter().any(|arg| arg == "--strict");
    let json_path = flag_value(&args, "--json");
    let tables_dir = flag_value(&args, "--tables");
    let rpt_path = flag_value(&args, "--rpt");

    println!("Reading results file: {}", out_path);
    println!("{}", "=".repeat(60));

    let options = if strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };

    let output = match SwmmOutput::open_with(out_path, options) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("\nERROR: Failed to read results file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let summary = output.summary();
    println!("\nResults Information:");
    println!("  Version: {}", summary.version);
    println!("  Flow unit: {}", summary.flow_unit);
    println!("  Start: {}", summary.start_date);
    println!("  End: {}", summary.end_date);
    println!(
        "  Reporting: {} periods at {}s intervals",
        summary.n_periods, summary.report_interval_seconds
    );

    println!("\nModel Elements:");
    println!("  Subcatchments: {}", summary.n_subcatchments);
    println!("  Nodes: {}", summary.n_nodes);
    println!("  Links: {}", summary.n_links);
    println!("  Pollutants: {}", summary.n_pollutants);
    if !summary.pollutants.is_empty() {
        println!("  Pollutant names: {}", summary.pollutants.join(", "));
    }

    let diagnostics = output.diagnostics();
    if !diagnostics.is_clean() {
        println!("\nTolerated anomalies:");
        println!("  Short reads: {}", diagnostics.short_reads);
        println!("  Unknown codes: {}", diagnostics.unknown_codes);
        println!("  Invalid dates: {}", diagnostics.invalid_dates);
        if diagnostics.missing_footer {
            println!("  Footer missing; period count degraded to 0");
        }
    }

    if let Some(path) = json_path {
        if let Err(e) = export::json::write_json(&output, &path, true) {
            eprintln!("ERROR: JSON export failed: {}", e);
            std::process::exit(1);
        }
        println!("\nWrote JSON export: {}", path.display());
    }

    if let Some(dir) = tables_dir {
        if let Err(e) = export::table::write_tables(&output, &dir) {
            eprintln!("ERROR: table export failed: {}", e);
            std::process::exit(1);
        }
        println!("\nWrote CSV tables: {}", dir.display());
    }

    if let Some(path) = rpt_path {
        match report::parse_file(&path) {
            Ok(rpt) => {
                println!("\nReport Summary ({}):", path.display());
                if let Some(version) = &rpt.header.version {
                    println!("  Engine version: {}", version);
                }
                if let Some(title) = &rpt.header.title {
                    println!("  Title: {}", title);
                }
                println!("  Subcatchment runoff rows: {}", rpt.subcatchment_runoff.len());
                println!("  Node depth rows: {}", rpt.node_depth.len());
                println!("  Link flow rows: {}", rpt.link_flow.len());
                println!("  Errors: {}", rpt.errors.len());
                println!("  Warnings: {}", rpt.warnings.len());
            }
            Err(e) => {
                eprintln!("ERROR: Failed to read report file");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<PathBuf> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(PathBuf::from(value)),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}
