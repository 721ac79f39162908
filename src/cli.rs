use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub log_level: Option<String>,
    pub load_log_out: Option<PathBuf>,
    pub design_out: Option<PathBuf>,
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
}

pub fn parse_args() -> Result<CliCommand, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliCommand, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut log_level = None;
    let mut load_log_out = None;
    let mut design_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--log-level" => {
                i += 1;
                let level = args.next_or_err(
                    i,
                    "missing value for --log-level (expected error, warn, info, debug, or trace)",
                )?;
                if log_level.replace(level.to_string()).is_some() {
                    return Err("--log-level provided more than once".to_string());
                }
            }
            "--load-log-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --load-log-out (expected a file path)")?;
                if load_log_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--load-log-out provided more than once".to_string());
                }
            }
            "--design-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --design-out (expected a file path)")?;
                if design_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--design-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => return Ok(CliCommand::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if scenario.is_none() && preset.is_none() {
        preset = Some("baseline".to_string());
    }

    Ok(CliCommand::Run(CliOptions {
        scenario,
        preset,
        log_level,
        load_log_out,
        design_out,
    }))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("bos-sim: offshore substation design and port loadout");
    eprintln!();
    eprintln!("Usage:");
    eprintln!(
        "  bos-sim [--scenario <path> | --preset <name>] [--log-level <level>]"
    );
    eprintln!("          [--load-log-out <path>] [--design-out <path>]");
    eprintln!();
    eprintln!("If neither --scenario nor --preset is given, the baseline preset is used.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_opts(list: &[&str]) -> CliOptions {
        match parse_args_from(&args(list)) {
            Ok(CliCommand::Run(opts)) => opts,
            other => panic!("expected run options, got {other:?}"),
        }
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = run_opts(&["--scenario", "project.toml"]);
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("project.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn defaults_to_baseline_preset() {
        let opts = run_opts(&[]);
        assert_eq!(opts.preset.as_deref(), Some("baseline"));
        assert!(opts.load_log_out.is_none());
        assert!(opts.design_out.is_none());
    }

    #[test]
    fn parses_log_level_and_output() {
        let opts = run_opts(&["--log-level", "debug", "--load-log-out", "log.csv"]);
        assert_eq!(opts.log_level.as_deref(), Some("debug"));
        assert_eq!(
            opts.load_log_out.as_deref().and_then(|p| p.to_str()),
            Some("log.csv")
        );
    }

    #[test]
    fn duplicate_flag_is_an_error() {
        let err = parse_args_from(&args(&["--design-out", "a.json", "--design-out", "b.json"]));
        assert!(matches!(err, Err(msg) if msg.contains("more than once")));
    }

    #[test]
    fn scenario_and_preset_are_exclusive() {
        let err = parse_args_from(&args(&["--scenario", "a.toml", "--preset", "baseline"]));
        assert!(err.is_err());
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse_args_from(&args(&["--preset"])).is_err());
    }

    #[test]
    fn help_flag() {
        assert!(matches!(
            parse_args_from(&args(&["-h"])),
            Ok(CliCommand::Help)
        ));
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let err = parse_args_from(&args(&["--bogus"]));
        assert!(matches!(err, Err(msg) if msg.contains("--bogus")));
    }
}
