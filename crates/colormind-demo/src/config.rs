//! Command-line and environment configuration for the demo.

use std::path::PathBuf;

use clap::Parser;
use colormind_core::{CvdError, FilterKind, FilterRequest, TransformMode};

/// Apply a color-vision deficiency simulation or daltonization to an image.
#[derive(Debug, Clone, Parser)]
#[command(name = "colormind-demo", version)]
pub struct Cli {
    /// Image to read.
    pub input: PathBuf,
    /// Where to write the transformed image.
    pub output: PathBuf,
    /// Transform to run: simulate or daltonize.
    #[arg(long)]
    pub mode: Option<TransformMode>,
    /// Normal, Protanope, Deuteranope, Tritanope, Achromatope or Custom.
    #[arg(long)]
    pub kind: Option<FilterKind>,
    /// Effect strength in [0, 1].
    #[arg(long)]
    pub amount: Option<f64>,
    /// JSON filter config. Flags override its fields.
    #[arg(long, env = "COLORMIND_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Runtime configuration for one demo run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Image to read.
    pub input: PathBuf,
    /// Where to write the transformed image.
    pub output: PathBuf,
    /// Validated filter request.
    pub request: FilterRequest,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Filter(#[from] CvdError),
}

impl DemoConfig {
    /// Build from process arguments and `COLORMIND_CONFIG`. Usage errors
    /// and `--help` are reported by clap, which exits the process.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }

    /// Resolve parsed arguments. Flags override values from the config
    /// file, which overrides the defaults.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut request = match &cli.config {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                FilterRequest::parse_json(&json)?
            }
            None => FilterRequest::default(),
        };
        if let Some(mode) = cli.mode {
            request.mode = mode;
        }
        if let Some(kind) = cli.kind {
            request.config.kind = kind;
        }
        if let Some(amount) = cli.amount {
            request.config.amount = amount;
        }
        request.validate()?;

        Ok(Self {
            input: cli.input,
            output: cli.output,
            request,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("colormind-demo").chain(args.iter().copied()))
    }

    fn resolve(args: &[&str]) -> Result<DemoConfig, ConfigError> {
        let mut cli = parse(args).unwrap();
        if !args.contains(&"--config") {
            cli.config = None;
        }
        DemoConfig::from_cli(cli)
    }

    #[test]
    fn test_defaults_daltonize_normal() {
        let config = resolve(&["in.png", "out.png"]).unwrap();
        assert_eq!(config.input, PathBuf::from("in.png"));
        assert_eq!(config.request.mode, TransformMode::Daltonize);
        assert_eq!(config.request.config.kind, FilterKind::Normal);
    }

    #[test]
    fn test_flags_override() {
        let config = resolve(&[
            "--mode", "simulate", "a.png", "--kind", "tritanope", "--amount", "0.25", "b.png",
        ])
        .unwrap();
        assert_eq!(config.output, PathBuf::from("b.png"));
        assert_eq!(config.request.mode, TransformMode::Simulate);
        assert_eq!(config.request.config.kind, FilterKind::Tritanope);
        assert_eq!(config.request.config.amount, 0.25);
    }

    #[test]
    fn test_missing_output_is_usage_error() {
        let err = parse(&["in.png"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_kind_is_rejected_by_parser() {
        let err = parse(&["a.png", "b.png", "--kind", "Bluish"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_invalid_combination_rejected() {
        let err = resolve(&["a.png", "b.png", "--kind", "Achromatope"]).unwrap_err();
        assert!(matches!(err, ConfigError::Filter(CvdError::UnknownDeficiencyKind(_))));
    }

    #[test]
    fn test_amount_out_of_range_rejected() {
        let err = resolve(&["a.png", "b.png", "--amount", "1.5"]).unwrap_err();
        assert!(matches!(err, ConfigError::Filter(CvdError::InvalidAmount(_))));
    }

    #[test]
    fn test_missing_flag_value() {
        let err = parse(&["a.png", "b.png", "--amount"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_missing_config_file() {
        let err = resolve(&["a.png", "b.png", "--config", "/nonexistent/colormind.json"])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
