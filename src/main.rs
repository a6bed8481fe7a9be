use std::process;
use std::time::Duration;

use clap::{crate_version, App, Arg, ArgGroup, ArgMatches};
use env_logger::Env;
use log::{debug, LevelFilter};
use prettytable::{format, Cell, Row, Table};
use separator::Separatable;

use sokoban_search::config::{Algorithm, Heuristic, Model, SearchConfig, DEFAULT_MAX_DEPTH};
use sokoban_search::solver::{SearchResult, Solver};
use sokoban_search::LoadMap;

fn main() {
    let matches = App::new("sokoban-search")
        .author("martin-t")
        .version(crate_version!())
        .about("Runs uninformed and informed search algorithms on Sokoban levels and compares them")
        .arg(
            Arg::with_name("move")
                .long("move")
                .help("One successor per player step, cost is the number of moves"),
        )
        .arg(
            Arg::with_name("push")
                .long("push")
                .help("One successor per push, cost is the number of pushes (default)"),
        )
        .group(ArgGroup::with_name("model").arg("move").arg("push"))
        .arg(
            Arg::with_name("algorithm")
                .short("a")
                .long("algorithm")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("ALGORITHM")
                .help("bfs, dfs, iddfs, astar or greedy - can be repeated, all by default"),
        )
        .arg(
            Arg::with_name("heuristic")
                .short("H")
                .long("heuristic")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("HEURISTIC")
                .help(
                    "manhattan, boxes-out, player-box or assignment - used by astar and greedy, \
                     can be repeated, all by default",
                ),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .value_name("N")
                .help("Deepest limit tried by iddfs"),
        )
        .arg(
            Arg::with_name("solution")
                .long("solution")
                .help("Print the states of the first solution found"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help(
                    "Log debug messages to stderr - release builds only log up to info, \
                     use RUST_LOG for other filters",
                ),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .multiple(true)
                .value_name("FILE")
                .help("Level files, a level that fails to load is skipped"),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if matches.is_present("verbose") {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let configs = parse_configs(&matches).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    // required so there's always at least one
    let paths: Vec<&str> = matches.values_of("file").map(Iterator::collect).unwrap_or_default();
    let print_solution = matches.is_present("solution");

    let mut results = Vec::new();
    let mut failed = Vec::new();
    for &path in &paths {
        let map = match path.load_map() {
            Ok(map) => map,
            Err(err) => {
                eprintln!("Failed to load {}: {}", path, err);
                failed.push(path);
                continue;
            }
        };
        debug!("Loaded {:?}", map);

        if !results.is_empty() {
            println!();
        }
        println!("Solving {}...", path);
        let solver = Solver::new(&map);
        let mut level_results = Vec::new();
        for config in &configs {
            match solver.search(config) {
                Ok(result) => level_results.push(result),
                Err(err) => {
                    eprintln!("Invalid configuration {}: {}", config, err);
                    process::exit(1);
                }
            }
        }

        for result in &level_results {
            if let Some(cost) = result.cost {
                println!("{} ({}): {}", result.config, cost, result.solution);
            }
        }
        if print_solution {
            print_first_solution(&solver, &level_results);
        }

        results.extend(level_results.into_iter().map(|result| (path, result)));
    }

    if !results.is_empty() {
        println!();
        print!("{}", results_table(&results));
    }

    if !failed.is_empty() {
        eprintln!("Failed to load {} of {} levels", failed.len(), paths.len());
        process::exit(1);
    }
}

fn print_first_solution(solver: &Solver<'_>, results: &[SearchResult]) {
    match results.iter().find(|result| result.is_success()) {
        Some(result) => {
            println!();
            println!("Solution by {}:", result.config);
            let include_steps = result.config.model == Model::Move;
            print!("{}", solver.format_solution(result, include_steps));
        }
        None => println!("No solution"),
    }
}

fn parse_configs(matches: &ArgMatches<'_>) -> Result<Vec<SearchConfig>, String> {
    let model = if matches.is_present("move") {
        Model::Move
    } else {
        Model::Push
    };

    let algorithms = match matches.values_of("algorithm") {
        None => Algorithm::ALL.to_vec(),
        Some(values) => values
            .map(|value| value.parse::<Algorithm>())
            .collect::<Result<_, _>>()
            .map_err(|err| err.to_string())?,
    };
    let heuristics = match matches.values_of("heuristic") {
        None => Heuristic::ALL.to_vec(),
        Some(values) => values
            .map(|value| value.parse::<Heuristic>())
            .collect::<Result<_, _>>()
            .map_err(|err| err.to_string())?,
    };
    let max_depth = match matches.value_of("max-depth") {
        None => DEFAULT_MAX_DEPTH,
        Some(value) => value
            .parse()
            .map_err(|err| format!("Invalid max depth {}: {}", value, err))?,
    };

    let mut configs = Vec::new();
    for &algorithm in &algorithms {
        let config = SearchConfig::new(algorithm, model).with_max_depth(max_depth);
        if algorithm.is_informed() {
            for &heuristic in &heuristics {
                configs.push(config.with_heuristic(heuristic));
            }
        } else {
            configs.push(config);
        }
    }
    Ok(configs)
}

fn results_table(results: &[(&str, SearchResult)]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        [
            "level",
            "algorithm",
            "heuristic",
            "result",
            "cost",
            "expanded",
            "max frontier",
            "time",
        ]
        .iter()
        .map(|title| Cell::new(title))
        .collect(),
    ));

    for (level, result) in results {
        let heuristic = result
            .config
            .heuristic
            .map(|h| h.to_string())
            .unwrap_or_else(|| "-".to_owned());
        let cost = result
            .cost
            .map(|cost| cost.to_string())
            .unwrap_or_else(|| "-".to_owned());
        table.add_row(Row::new(vec![
            Cell::new(level),
            Cell::new(&result.config.algorithm.to_string()),
            Cell::new(&heuristic),
            Cell::new(&result.outcome.to_string()),
            Cell::new(&cost),
            Cell::new(&result.nodes_expanded().separated_string()),
            Cell::new(&(result.max_frontier() as u64).separated_string()),
            Cell::new(&format_duration(result.elapsed)),
        ]));
    }
    table
}

fn format_duration(elapsed: Duration) -> String {
    format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0)
}
