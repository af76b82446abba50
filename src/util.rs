use std::fs;
use std::str::FromStr;

use clap::ArgMatches;
use serde_json::Value;

use crate::{
    graph::GraphDescription,
    error::InputError,
    search::stopping::SearchConfig,
    search::trace::SolveResult,
};

/** parameters read from the command line */
#[derive(Debug, Clone)]
pub struct Params {
    /// instance file name
    pub inst_filename: String,
    /// instance format ("json" or "dimacs")
    pub instance_type: String,
    /// graph to color
    pub graph: GraphDescription,
    /// search limits
    pub config: SearchConfig,
    /// where to write the result (JSON)
    pub sol_file: Option<String>,
    /// where to write the statistics (JSON)
    pub perf_file: Option<String>,
    /// if true, print every step of the search
    pub show_trace: bool,
}

/// parses an optional command line value
pub fn parse_value<T:FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>, InputError> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| InputError::parameter(name, s)),
    }
}

/**
reads an instance. JSON instances carry their palette (overridden by `colors` if given),
DIMACS instances require `colors`.
*/
pub fn read_instance(filename:&str, instance_type:&str, colors:Option<usize>) -> Result<GraphDescription, InputError> {
    match instance_type {
        "json" => {
            let graph = GraphDescription::from_json_file(filename)?;
            Ok(match colors {
                None => graph,
                Some(k) => graph.with_colors(k),
            })
        },
        "dimacs" => {
            let k = colors.ok_or_else(|| InputError::parameter("colors", "required for DIMACS instances"))?;
            GraphDescription::from_dimacs_file(filename, k)
        },
        _ => Err(InputError::UnknownInstanceType(instance_type.to_string())),
    }
}

/** reads command line input and returns the instance and the search parameters */
pub fn read_params(main_args:&ArgMatches) -> Result<Params, InputError> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| InputError::parameter("instance", "missing"))?;
    let instance_type = main_args.value_of("type").unwrap_or("json");
    let colors:Option<usize> = parse_value(main_args, "colors")?;
    let time_limit:Option<f32> = parse_value(main_args, "time")?;
    if let Some(t) = time_limit {
        if !t.is_finite() || t < 0. {
            return Err(InputError::parameter("time", t.to_string()));
        }
    }
    let config = SearchConfig {
        max_steps: parse_value(main_args, "steps")?,
        time_limit,
    };
    let sol_file = main_args.value_of("solution").map(|e| {
        println!("printing solutions in: {}", e);
        e.to_string()
    });
    let perf_file = main_args.value_of("perf").map(|e| {
        println!("printing perfs in: {}\n", e);
        e.to_string()
    });
    let graph = read_instance(inst_filename, instance_type, colors)?;
    graph.validate()?;
    Ok(Params {
        inst_filename: inst_filename.to_string(),
        instance_type: instance_type.to_string(),
        graph,
        config,
        sol_file,
        perf_file,
        show_trace: main_args.is_present("trace"),
    })
}

/// prints the search trace, one step per line
pub fn print_trace(result:&SolveResult) {
    for (i,step) in result.steps.iter().enumerate() {
        println!("{:>8}  {}", i+1, step);
    }
}

/// exports search results to files
pub fn export_results(
    result:&SolveResult,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<(), InputError> {
    if let Some(filename) = perf_file {
        fs::write(filename, serde_json::to_string(stats)?)?;
    }
    if let Some(filename) = sol_file {
        fs::write(filename, serde_json::to_string(result)?)?;
    }
    Ok(())
}

/// reads a result previously written by [`export_results`]
pub fn read_result(filename:&str) -> Result<SolveResult, InputError> {
    let s = fs::read_to_string(filename)?;
    Ok(serde_json::from_str(&s)?)
}
