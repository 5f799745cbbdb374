use std::path::PathBuf;

use clap::Parser;

/// Estimate π using the Monte Carlo method.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Total number of samples (e.g. 1_000_000 or 1,000,000)
    #[arg(long, allow_hyphen_values = true)]
    pub samples: String,

    /// Samples drawn per batch; defaults to a size scaled to --samples
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch: Option<u64>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run without a window and print the result
    #[arg(long)]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn samples_is_kept_as_text() {
        let cli = Cli::try_parse_from(["pi-scope", "--samples", "1,000,000"]).unwrap();
        assert_eq!(cli.samples, "1,000,000");
        assert_eq!(cli.batch, None);
        assert!(!cli.headless);
    }

    #[test]
    fn negative_samples_reach_the_parser() {
        let cli = Cli::try_parse_from(["pi-scope", "--samples=-5"]).unwrap();
        assert_eq!(cli.samples, "-5");
        let cli = Cli::try_parse_from(["pi-scope", "--samples", "-5"]).unwrap();
        assert_eq!(cli.samples, "-5");
    }

    #[test]
    fn samples_is_required() {
        assert!(Cli::try_parse_from(["pi-scope"]).is_err());
    }

    #[test]
    fn zero_batch_is_rejected() {
        assert!(Cli::try_parse_from(["pi-scope", "--samples", "10", "--batch", "0"]).is_err());
        let cli =
            Cli::try_parse_from(["pi-scope", "--samples", "10", "--batch", "250"]).unwrap();
        assert_eq!(cli.batch, Some(250));
    }
}
