//! printf-style patterns for a single floating-point value.
//!
//! A pattern holds literal text around exactly one `%e`, `%f` or `%g` family
//! conversion, e.g. `"%.2f"`, `"x=%+8.3e"` or `"%g%%"`. Rendering matches C's
//! output for finite values.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::application::error::{ApplicationError, ApplicationResult};

/// Pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "%g";

/// Largest accepted field width or precision.
pub const MAX_FIELD: usize = 4096;

const CONVERSION_REGEX: &str = r"^%(?P<flags>[-+ #0]*)(?P<width>\*|[0-9]+)?(?:\.(?P<precision>\*|[0-9]*))?(?P<length>[hlLqjzt]*)(?P<conv>(?s:.))?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
}

impl Flags {
    fn parse(flags: &str) -> Self {
        let mut parsed = Self::default();
        for c in flags.chars() {
            match c {
                '-' => parsed.left = true,
                '+' => parsed.plus = true,
                ' ' => parsed.space = true,
                '0' => parsed.zero = true,
                '#' => parsed.alternate = true,
                _ => {}
            }
        }
        parsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Fixed,
    Exponent,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Conversion {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    style: Style,
    upper: bool,
}

impl Conversion {
    fn render(&self, value: f64) -> String {
        let abs = value.abs();
        let alt = self.flags.alternate;
        let body = if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            "inf".to_string()
        } else {
            match self.style {
                Style::Fixed => fixed(abs, self.precision.unwrap_or(6), alt),
                Style::Exponent => exponent(abs, self.precision.unwrap_or(6), alt),
                Style::General => general(abs, self.precision, alt),
            }
        };
        let body = if self.upper {
            body.to_uppercase()
        } else {
            body
        };

        let sign = if value.is_sign_negative() && !value.is_nan() {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.len();
        match self.width {
            Some(width) if width > len => {
                let fill = width - len;
                if self.flags.left {
                    format!("{sign}{body}{}", " ".repeat(fill))
                } else if self.flags.zero && value.is_finite() {
                    format!("{sign}{}{body}", "0".repeat(fill))
                } else {
                    format!("{}{sign}{body}", " ".repeat(fill))
                }
            }
            _ => format!("{sign}{body}"),
        }
    }
}

/// `%f`
fn fixed(abs: f64, precision: usize, alt: bool) -> String {
    let mut out = format!("{:.*}", precision, abs);
    if alt && precision == 0 {
        out.push('.');
    }
    out
}

/// `%e`: at least two exponent digits, always signed.
fn exponent(abs: f64, precision: usize, alt: bool) -> String {
    let (mantissa, exp) = split_exponent(abs, precision);
    let mut out = mantissa;
    if alt && precision == 0 {
        out.push('.');
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{out}e{sign}{:02}", exp.unsigned_abs())
}

/// `%g`: `%e` or `%f` depending on the decimal exponent, trailing zeros dropped.
fn general(abs: f64, precision: Option<usize>, alt: bool) -> String {
    let p = precision.unwrap_or(6).max(1);
    let (_, x) = split_exponent(abs, p - 1);
    let out = if x >= -4 && (x as i64) < p as i64 {
        fixed(abs, (p as i64 - 1 - x as i64) as usize, alt)
    } else {
        exponent(abs, p - 1, alt)
    };
    if alt {
        out
    } else {
        strip_trailing_zeros(&out)
    }
}

/// Rounded mantissa digits and decimal exponent of `abs`.
fn split_exponent(abs: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", precision, abs);
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    let (mantissa, exp) = match s.find('e') {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    format!("{mantissa}{exp}")
}

/// A parsed single-value format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickFormat {
    pattern: String,
    prefix: String,
    conversion: Conversion,
    suffix: String,
}

impl TickFormat {
    /// Parse a printf-style pattern with exactly one floating-point conversion.
    pub fn parse(pattern: &str) -> ApplicationResult<Self> {
        let re = Regex::new(CONVERSION_REGEX)
            .map_err(|e| ApplicationError::invalid_format(pattern, e.to_string()))?;

        let mut literal = String::new();
        let mut found: Option<(String, Conversion)> = None;
        let mut rest = pattern;

        while let Some(pos) = rest.find('%') {
            literal.push_str(&rest[..pos]);
            rest = &rest[pos..];
            if let Some(after) = rest.strip_prefix("%%") {
                literal.push('%');
                rest = after;
                continue;
            }

            let caps = re
                .captures(rest)
                .ok_or_else(|| ApplicationError::invalid_format(pattern, "malformed conversion"))?;
            let conversion = parse_conversion(pattern, &caps)?;
            if found.is_some() {
                return Err(ApplicationError::invalid_format(
                    pattern,
                    "more than one conversion",
                ));
            }
            found = Some((std::mem::take(&mut literal), conversion));
            rest = &rest[caps[0].len()..];
        }
        literal.push_str(rest);

        match found {
            Some((prefix, conversion)) => Ok(Self {
                pattern: pattern.to_string(),
                prefix,
                conversion,
                suffix: literal,
            }),
            None => Err(ApplicationError::invalid_format(
                pattern,
                "no floating-point conversion",
            )),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format one value.
    pub fn render(&self, value: f64) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            self.conversion.render(value),
            self.suffix
        )
    }
}

fn parse_conversion(pattern: &str, caps: &regex::Captures<'_>) -> ApplicationResult<Conversion> {
    let width = caps.name("width").map(|m| m.as_str());
    let precision = caps.name("precision").map(|m| m.as_str());
    if width == Some("*") || precision == Some("*") {
        return Err(ApplicationError::invalid_format(
            pattern,
            "'*' width and precision are not supported",
        ));
    }

    let length = caps.name("length").map_or("", |m| m.as_str());
    if !matches!(length, "" | "l" | "L") {
        return Err(ApplicationError::invalid_format(
            pattern,
            format!("length modifier '{length}' does not apply to floating-point values"),
        ));
    }

    let conv = caps
        .name("conv")
        .and_then(|m| m.as_str().chars().next())
        .ok_or_else(|| ApplicationError::invalid_format(pattern, "incomplete conversion"))?;
    let (style, upper) = match conv {
        'f' => (Style::Fixed, false),
        'F' => (Style::Fixed, true),
        'e' => (Style::Exponent, false),
        'E' => (Style::Exponent, true),
        'g' => (Style::General, false),
        'G' => (Style::General, true),
        'a' | 'A' => {
            return Err(ApplicationError::invalid_format(
                pattern,
                format!("hexadecimal conversion '%{conv}' is not supported"),
            ))
        }
        other => {
            return Err(ApplicationError::invalid_format(
                pattern,
                format!("conversion '%{other}' does not format a floating-point value"),
            ))
        }
    };

    let width = width
        .map(|w| parse_field(pattern, "field width", w))
        .transpose()?;
    let precision = precision
        .map(|p| if p.is_empty() { Ok(0) } else { parse_field(pattern, "precision", p) })
        .transpose()?;

    Ok(Conversion {
        flags: Flags::parse(caps.name("flags").map_or("", |m| m.as_str())),
        width,
        precision,
        style,
        upper,
    })
}

/// Width or precision, at most [`MAX_FIELD`].
fn parse_field(pattern: &str, what: &str, digits: &str) -> ApplicationResult<usize> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|&n| n <= MAX_FIELD)
        .ok_or_else(|| {
            ApplicationError::invalid_format(pattern, format!("{what} exceeds {MAX_FIELD}"))
        })
}

impl Default for TickFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            prefix: String::new(),
            conversion: Conversion {
                flags: Flags::default(),
                width: None,
                precision: None,
                style: Style::General,
                upper: false,
            },
            suffix: String::new(),
        }
    }
}

impl FromStr for TickFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(pattern: &str, value: f64) -> String {
        TickFormat::parse(pattern).unwrap().render(value)
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(TickFormat::default(), TickFormat::parse("%g").unwrap());
    }

    #[test]
    fn test_general_drops_trailing_zeros() {
        assert_eq!(render("%g", 20.0), "20");
        assert_eq!(render("%g", 0.0), "0");
        assert_eq!(render("%g", 0.6000000000000001), "0.6");
        assert_eq!(render("%g", 2.5), "2.5");
        assert_eq!(render("%g", -0.25), "-0.25");
    }

    #[test]
    fn test_general_switches_to_exponent() {
        assert_eq!(render("%g", 1e-5), "1e-05");
        assert_eq!(render("%g", 0.0001), "0.0001");
        assert_eq!(render("%g", 100000.0), "100000");
        assert_eq!(render("%g", 1e6), "1e+06");
        assert_eq!(render("%G", 1.5e-7), "1.5E-07");
        assert_eq!(render("%.3g", 1234.0), "1.23e+03");
    }

    #[test]
    fn test_general_rounding_carries_into_exponent() {
        assert_eq!(render("%g", 9.9999996), "10");
        assert_eq!(render("%.2g", 99.6), "1e+02");
    }

    #[test]
    fn test_general_alternate_keeps_zeros() {
        assert_eq!(render("%#g", 20.0), "20.0000");
        assert_eq!(render("%#.3g", 1.0), "1.00");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(render("%f", 1.5), "1.500000");
        assert_eq!(render("%.2f", 20.0), "20.00");
        assert_eq!(render("%.0f", 2.0), "2");
        assert_eq!(render("%#.0f", 2.0), "2.");
        assert_eq!(render("%.f", 7.0), "7");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(render("%e", 1234.5), "1.234500e+03");
        assert_eq!(render("%.2e", 0.00123), "1.23e-03");
        assert_eq!(render("%.1E", 0.0), "0.0E+00");
        assert_eq!(render("%.0e", 5e100), "5e+100");
    }

    #[test]
    fn test_width_and_flags() {
        assert_eq!(render("%8.2f", 3.14159), "    3.14");
        assert_eq!(render("%-8.2f|", 3.14159), "3.14    |");
        assert_eq!(render("%08.2f", -3.14159), "-0003.14");
        assert_eq!(render("%+.1f", 2.0), "+2.0");
        assert_eq!(render("% .1f", 2.0), " 2.0");
        assert_eq!(render("%2g", 100.0), "100");
    }

    #[test]
    fn test_literal_text_and_percent() {
        assert_eq!(render("x=%g;", 4.0), "x=4;");
        assert_eq!(render("%g%%", 40.0), "40%");
        assert_eq!(render("%%%.1f", 0.5), "%0.5");
    }

    #[test]
    fn test_length_modifier_is_ignored() {
        assert_eq!(render("%lf", 1.0), "1.000000");
        assert_eq!(render("%Lg", 1.0), "1");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(render("%f", f64::INFINITY), "inf");
        assert_eq!(render("%F", f64::NEG_INFINITY), "-INF");
        assert_eq!(render("%5g", f64::NAN), "  nan");
    }

    #[test]
    fn test_rejects_missing_conversion() {
        assert!(matches!(
            TickFormat::parse("ticks"),
            Err(ApplicationError::InvalidFormat { .. })
        ));
        assert!(TickFormat::parse("100%%").is_err());
        assert!(TickFormat::parse("").is_err());
    }

    #[test]
    fn test_rejects_second_conversion() {
        let err = TickFormat::parse("%g %g").unwrap_err();
        assert!(err.to_string().contains("more than one conversion"));
    }

    #[test]
    fn test_rejects_non_float_conversions() {
        for pattern in ["%d", "%s", "%x", "%a", "%*g", "%.*f", "%hf", "%", "%5"] {
            assert!(TickFormat::parse(pattern).is_err(), "{pattern} should be rejected");
        }
    }

    #[test]
    fn test_rejects_oversized_width_and_precision() {
        for pattern in ["%.70000f", "%.4097e", "%99999999999g", "%65536.2f", "%.99999999999999999999g"] {
            let err = TickFormat::parse(pattern).unwrap_err();
            assert!(
                matches!(err, ApplicationError::InvalidFormat { .. }),
                "{pattern}: {err}"
            );
            assert!(err.to_string().contains("exceeds 4096"), "{err}");
        }
    }

    #[test]
    fn test_largest_width_and_precision_render() {
        let out = render("%.4096f", 1.0);
        assert_eq!(out.len(), 2 + 4096);
        assert!(out.starts_with("1.000"));

        // 1e-4 under %g is fixed with precision + 3 digits
        assert_eq!(render("%#.4096g", 1e-4).len(), 2 + 4099);
        assert_eq!(render("%4096g", 1.0).len(), 4096);
    }

    #[test]
    fn test_display_round_trips_pattern() {
        let format: TickFormat = "[%.1f]".parse().unwrap();
        assert_eq!(format.to_string(), "[%.1f]");
        assert_eq!(format.pattern(), "[%.1f]");
    }
}
