use std::process;

use clap::{App, ArgMatches, load_yaml};

use backtrack_color::{
    color::{checker, CheckerResult},
    error::InputError,
    util::{parse_value, read_instance, read_result},
};

/** checks a result file (coloring and trace) against its instance */
pub fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
    // parse arguments
    let yaml = load_yaml!("coloring_checker.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    match run(&main_args) {
        Ok(true) => {},
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// returns true iff the result is valid
fn run(main_args:&ArgMatches) -> Result<bool, InputError> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| InputError::parameter("instance", "missing"))?;
    let sol_filename = main_args.value_of("solution")
        .ok_or_else(|| InputError::parameter("solution", "missing"))?;
    let instance_type = main_args.value_of("type").unwrap_or("json");
    // read files
    let graph = read_instance(inst_filename, instance_type, parse_value(main_args, "colors")?)?;
    let result = read_result(sol_filename)?;
    if !result.is_consistent() {
        println!("ERROR: trace does not match the reported counters or coloring");
        return Ok(false);
    }
    if !result.success {
        println!("no coloring ({:?} after {} steps)", result.outcome, result.total_steps);
        return Ok(true);
    }
    // call checker
    Ok(match checker(&graph, &result.colors) {
        CheckerResult::Ok(n) => {
            println!("{}", n);
            true
        },
        CheckerResult::VertexAddedTwice(v) => {
            println!("ERROR: node {} colored twice", v);
            false
        },
        CheckerResult::VertexNotColored(v) => {
            println!("ERROR: node {} not colored", v);
            false
        },
        CheckerResult::UnknownVertex(v) => {
            println!("ERROR: node {} is not in the instance", v);
            false
        },
        CheckerResult::ColorOutOfRange(v, c) => {
            println!("ERROR: node {} has color {} (palette: {})", v, c, graph.num_colors);
            false
        },
        CheckerResult::ConflictingEdge(a, b) => {
            println!("ERROR: nodes {} and {} are conflicting", a, b);
            false
        },
    })
}
