use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use bmpkit_core::RotationDirection;

pub const USAGE: &str = "\
Usage:
  bmpkit info <input>
  bmpkit rotate (--cw | --ccw) <input> <output>
  bmpkit blur [--sigma <s>] <input> <output>
  bmpkit box-blur <input> <output>
  bmpkit all [--sigma <s>] [--out-dir <dir>] <input>

Options:
  --config <path>   Read settings from this TOML file
  -h, --help        Show this message

Set RUST_LOG=debug for detailed logging.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Info {
        input: PathBuf,
    },
    Rotate {
        direction: RotationDirection,
        input: PathBuf,
        output: PathBuf,
    },
    Blur {
        sigma: Option<f64>,
        input: PathBuf,
        output: PathBuf,
    },
    BoxBlur {
        input: PathBuf,
        output: PathBuf,
    },
    All {
        sigma: Option<f64>,
        out_dir: Option<PathBuf>,
        input: PathBuf,
    },
    Help,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub config: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let Some(name) = args.next() else {
        bail!("missing command\n\n{USAGE}");
    };
    let name = name.to_string_lossy().into_owned();

    let mut positional: Vec<PathBuf> = Vec::new();
    let mut direction = None;
    let mut sigma = None;
    let mut out_dir = None;
    let mut config = None;
    let mut help = matches!(name.as_str(), "-h" | "--help" | "help");

    while let Some(arg) = args.next() {
        match arg.to_str() {
            Some("--cw") => direction = Some(RotationDirection::Clockwise),
            Some("--ccw") => direction = Some(RotationDirection::CounterClockwise),
            Some("--sigma") => {
                let value = args.next().context("--sigma needs a value")?;
                let value = value.to_string_lossy();
                let parsed: f64 = value
                    .parse()
                    .with_context(|| format!("--sigma expects a number, got {value:?}"))?;
                sigma = Some(parsed);
            }
            Some("--out-dir") => {
                out_dir = Some(PathBuf::from(args.next().context("--out-dir needs a value")?));
            }
            Some("--config") => {
                config = Some(PathBuf::from(args.next().context("--config needs a value")?));
            }
            Some("-h" | "--help") => help = true,
            Some(flag) if flag.starts_with("--") => bail!("unknown option {flag}\n\n{USAGE}"),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    if help {
        return Ok(Invocation {
            command: Command::Help,
            config,
        });
    }

    let command = match name.as_str() {
        "info" => {
            let [input] = take_operands::<1>(positional, &name)?;
            Command::Info { input }
        }
        "rotate" => {
            let Some(direction) = direction else {
                bail!("rotate needs --cw or --ccw\n\n{USAGE}");
            };
            let [input, output] = take_operands::<2>(positional, &name)?;
            Command::Rotate {
                direction,
                input,
                output,
            }
        }
        "blur" => {
            let [input, output] = take_operands::<2>(positional, &name)?;
            Command::Blur {
                sigma,
                input,
                output,
            }
        }
        "box-blur" => {
            let [input, output] = take_operands::<2>(positional, &name)?;
            Command::BoxBlur { input, output }
        }
        "all" => {
            let [input] = take_operands::<1>(positional, &name)?;
            Command::All {
                sigma,
                out_dir,
                input,
            }
        }
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    };

    Ok(Invocation { command, config })
}

fn take_operands<const N: usize>(
    positional: Vec<PathBuf>,
    command: &str,
) -> anyhow::Result<[PathBuf; N]> {
    let count = positional.len();
    match <[PathBuf; N]>::try_from(positional) {
        Ok(operands) => Ok(operands),
        Err(_) => bail!("{command} expects {N} path(s), got {count}\n\n{USAGE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Invocation> {
        parse_args(args.iter().map(OsString::from))
    }

    #[test]
    fn test_rotate_clockwise() {
        let inv = parse(&["rotate", "--cw", "in.bmp", "out.bmp"]).unwrap();
        assert_eq!(
            inv.command,
            Command::Rotate {
                direction: RotationDirection::Clockwise,
                input: PathBuf::from("in.bmp"),
                output: PathBuf::from("out.bmp"),
            }
        );
    }

    #[test]
    fn test_rotate_requires_direction() {
        assert!(parse(&["rotate", "in.bmp", "out.bmp"]).is_err());
    }

    #[test]
    fn test_blur_with_sigma() {
        let inv = parse(&["blur", "in.bmp", "--sigma", "2.5", "out.bmp"]).unwrap();
        assert_eq!(
            inv.command,
            Command::Blur {
                sigma: Some(2.5),
                input: PathBuf::from("in.bmp"),
                output: PathBuf::from("out.bmp"),
            }
        );
    }

    #[test]
    fn test_sigma_must_be_numeric() {
        assert!(parse(&["blur", "--sigma", "wide", "a.bmp", "b.bmp"]).is_err());
        assert!(parse(&["blur", "a.bmp", "b.bmp", "--sigma"]).is_err());
    }

    #[test]
    fn test_all_with_options() {
        let inv = parse(&[
            "all",
            "--out-dir",
            "out",
            "--config",
            "my.toml",
            "photo.bmp",
        ])
        .unwrap();
        assert_eq!(inv.config, Some(PathBuf::from("my.toml")));
        assert_eq!(
            inv.command,
            Command::All {
                sigma: None,
                out_dir: Some(PathBuf::from("out")),
                input: PathBuf::from("photo.bmp"),
            }
        );
    }

    #[test]
    fn test_wrong_operand_count() {
        assert!(parse(&["info"]).is_err());
        assert!(parse(&["info", "a.bmp", "b.bmp"]).is_err());
        assert!(parse(&["box-blur", "a.bmp"]).is_err());
    }

    #[test]
    fn test_unknown_command_and_option() {
        assert!(parse(&["sharpen", "a.bmp"]).is_err());
        assert!(parse(&["info", "--verbose", "a.bmp"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
        assert_eq!(parse(&["blur", "-h"]).unwrap().command, Command::Help);
    }
}
