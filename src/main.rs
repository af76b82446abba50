//! Backtracking graph coloring with a complete search trace

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

use std::process;
use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use serde_json::json;

use backtrack_color::error::InputError;
use backtrack_color::search::backtracking::BacktrackingSolver;
use backtrack_color::util::{read_params, export_results, print_trace};


/**
reads an instance, solves it by backtracking, prints a summary and exports the results.
*/
pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), InputError> {
    println!("=========================================================");
    let params = read_params(main_args)?;
    println!("reading instance: {} ({})", params.inst_filename, params.instance_type);
    let solver = BacktrackingSolver::new(&params.graph)?;
    solver.display_statistics();
    if !params.config.is_unbounded() {
        println!("limits: {:?}", params.config);
    }
    println!("=======================");

    // solve it
    let t_start = Instant::now();
    let result = solver.solve_with(params.config.criterion());
    let duration = t_start.elapsed().as_secs_f32();
    if params.show_trace {
        print_trace(&result);
    }
    println!(
        "backtracking took {:.3} seconds. success: {} ({:?}), steps: {}, backtracks: {}",
        duration, result.success, result.outcome, result.total_steps, result.backtracks
    );
    if result.success {
        println!("nb colors used: {} / {}", result.colors.nb_colors(), params.graph.num_colors);
        println!("{:?}", result.colors.to_partition());
    }
    let stats = json!({
        "success": result.success,
        "outcome": result.outcome,
        "total_steps": result.total_steps,
        "backtracks": result.backtracks,
        "nb_colors": result.colors.nb_colors(),
        "time_searched": duration,
        "inst_name": params.inst_filename
    });

    // export results
    export_results(&result, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}
