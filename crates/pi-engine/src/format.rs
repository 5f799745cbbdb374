/// Significant digits shown for the π estimate.
pub const PI_DIGITS: usize = 15;

/// Format like C's `%.{precision}g`: fixed notation for moderate exponents,
/// scientific otherwise, trailing zeros removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits can bump the exponent (9.99.. -> 1.0e1),
    // so take the exponent from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Caption for the π estimate; empty until there is an estimate.
pub fn pi_text(estimate: Option<f64>) -> String {
    match estimate {
        Some(pi) => format!("Pi Estimate: {}", format_general(pi, PI_DIGITS)),
        None => String::new(),
    }
}

pub fn progress_text(done: u64, target: u64) -> String {
    format!(
        "Samples: {} / {}",
        group_thousands(done),
        group_thousands(target)
    )
}
