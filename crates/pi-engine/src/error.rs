use std::fmt;

/// Conditions reported to the user at the program boundary. Neither one
/// is raised while a well-formed run is in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// `--samples` was not a positive integer.
    InvalidSampleCount { input: String },
    /// An interrupt signal arrived while the run loop was active.
    UserInterrupt,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSampleCount { .. } => f.write_str("Invalid number of samples provided."),
            Error::UserInterrupt => f.write_str("Stopped by user."),
        }
    }
}

impl std::error::Error for Error {}

/// Parse a total sample count such as `1_000_000` or `1,000,000`.
///
/// Commas and underscores are digit-group separators and are stripped
/// anywhere in the input. The result must be a positive integer.
pub fn parse_sample_count(input: &str) -> Result<u64, Error> {
    let cleaned: String = input.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    match cleaned.trim().parse::<i128>() {
        Ok(n) if n > 0 => u64::try_from(n).map_err(|_| invalid(input)),
        _ => Err(invalid(input)),
    }
}

fn invalid(input: &str) -> Error {
    Error::InvalidSampleCount {
        input: input.to_string(),
    }
}
