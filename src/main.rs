use area_pathfinding::config::RouteConfig;
use area_pathfinding::dataset::load_tables;
use area_pathfinding::{plan_route, RouteError, RouteRequest};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn print_help() {
    println!("area_pathfinding - shortest walk from home to the destination structure");
    println!();
    println!("USAGE:");
    println!("    area_pathfinding [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     Configuration file (default: area_pathfinding.toml)");
    println!("    -d, --data <DIR>        Directory with area_map.csv, area_struct.csv, area_category.csv");
    println!("    -o, --output <FILE>     Path CSV to write (default: home_to_cafe.csv)");
    println!("    -h, --help              Print help information");
    println!();
    println!("EXIT STATUS:");
    println!("    0 path written, 1 error, 2 destination unreachable");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args {
        config_path: None,
        data_dir: None,
        output: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .map(PathBuf::from)
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match flag {
            "--config" | "-c" => result.config_path = Some(value()?),
            "--data" | "-d" => result.data_dir = Some(value()?),
            "--output" | "-o" => result.output = Some(value()?),
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", flag)),
        }
        i += 1;
    }

    Ok(result)
}

fn run(args: Args) -> Result<bool, RouteError> {
    let mut config = match &args.config_path {
        Some(path) => RouteConfig::from_file(path)?,
        None => RouteConfig::discover(),
    };
    if let Some(dir) = args.data_dir {
        config.data.directory = dir;
    }
    if let Some(output) = args.output {
        config.output.path_file = output;
    }

    let tables = load_tables(&config.data.directory, &config.data.table_files())?;
    let plan = plan_route(&tables, &RouteRequest::from_config(&config))?;

    for s in plan.summary() {
        log::info!(
            "{:<16} count {:>3}, area {:?}, at {:?}",
            s.name.as_deref().unwrap_or("?"),
            s.count,
            s.area,
            s.locations
        );
    }
    log::debug!("Map:\n{}", plan.grid.render(plan.path.as_deref().unwrap_or_default()));

    match plan.distance() {
        Some(distance) => {
            log::info!("Shortest distance: {} moves", distance);
            plan.write_steps(&config.output.path_file)?;
            Ok(true)
        }
        None => {
            log::warn!("{} cannot reach {}, no path written", plan.start, plan.end);
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(1)
        }
    }
}
