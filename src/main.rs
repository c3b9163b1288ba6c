mod debug_report;

use autopick::{Options, PlayerContext, rule_file};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "AUTOPICK_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    init_tracing();

    if let Some(expression) = &config.expression {
        println!("{}", config.context.eval(expression));
        return;
    }

    let options = Options::default();
    let (source, lines) = match &config.input {
        Some(path) => (path.display().to_string(), rule_file::read_lines(path, &options)),
        None => ("<stdin>".to_string(), read_stdin_lines(&options)),
    };
    let lines = match lines {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    debug_report::print_run(&source, &lines, &config.context, config.color);
}

/// Diagnostics go to stderr so the report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr).with_target(true).with_filter(filter)).init();
}

struct CliConfig {
    input: Option<PathBuf>,
    expression: Option<String>,
    context: PlayerContext,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut expression: Option<String> = None;
    let mut context = PlayerContext::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| match inline.clone().or_else(|| args.next()) {
            Some(value) => Ok(value),
            None => Err(format!("error: {name} expects a value")),
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("autopick {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--race" => context.race = value("--race")?,
            "--class" => context.class = value("--class")?,
            "--realm1" => context.realm1 = value("--realm1")?,
            "--realm2" => context.realm2 = value("--realm2")?,
            "--name" => context.name = value("--name")?,
            "--level" => context.level = parse_number("--level", &value("--level")?)?,
            "--gold" => context.gold = parse_number("--gold", &value("--gold")?)?,
            "--expr" | "-e" => {
                if expression.is_some() {
                    return Err("error: expression provided multiple times".to_string());
                }
                expression = Some(value("--expr")?);
            }
            "--" => {
                if let Some(path) = args.next() {
                    set_input(&mut input, path)?;
                }
                break;
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            "-" => {}
            _ => set_input(&mut input, arg)?,
        }
    }

    Ok(CliConfig { input, expression, context, color })
}

fn set_input(input: &mut Option<PathBuf>, path: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(PathBuf::from(path));
    Ok(())
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value.trim().parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a number)"))
}

fn read_stdin_lines(options: &Options) -> Result<Vec<String>, autopick::Error> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| autopick::Error::Io { path: PathBuf::from("<stdin>"), source })?;
    rule_file::split_lines(&buffer, options)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "autopick {version}

Autopick rule file inspector.

Usage:
  autopick [OPTIONS] [FILE]
  autopick [OPTIONS] --expr <expression>

Reads a rule file (stdin when FILE is omitted or '-') and prints how each line
reads for the given character: rules with their canonical form, ?: conditions
with their value, and which lines are switched off.

Options:
  --race <name>              Character race.       Default: Human
  --class <name>             Character class.      Default: Warrior
  --level <n>                Character level.      Default: 1
  --realm1 <name>            First magic realm.
  --realm2 <name>            Second magic realm.
  --name <name>              Character name.
  --gold <n>                 Gold carried.
  -e, --expr <expression>    Evaluate one expression, print its value, exit.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}               Log filter for diagnostics on stderr. Default: warn

Exit codes:
  0  Success.
  1  The rule file could not be read.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
