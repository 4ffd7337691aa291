//! printf-style template formatting
//!
//! Templates follow the `%[index$][flags][width][.precision]conversion`
//! convention:
//! - `s`/`S`: any value (`S` upper-cases), precision truncates
//! - `d`: integers, `x`/`X`/`o`: hex and octal integers
//! - `f`: floats (default precision 6), `e`: scientific floats
//! - `b`/`B`: booleans (null is false, any other value is true)
//! - `c`: chars or integer code points
//! - `n`: newline, `%%`: a literal percent sign
//!
//! Flags are `-` (left justify), `0` (zero pad), `+` (always signed) and
//! ` ` (leading space for positive numbers). Signs only apply to `d`, `f`
//! and `e`. Width and precision are limited to [`MAX_WIDTH`]. Unused
//! trailing arguments are ignored. A `null` argument renders as `null`
//! for every conversion except `b`.

use super::arg::Arg;
use super::error::{LogglyError, Result};
use std::iter::Peekable;
use std::str::Chars;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest accepted width or precision
pub const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default)]
struct Spec {
    index: Option<usize>,
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Substitute `args` into `template`
///
/// # Errors
///
/// Returns [`LogglyError::Formatting`] when a specifier has no matching
/// argument, the argument kind does not fit the conversion, or the
/// template itself is malformed.
///
/// # Example
///
/// ```
/// use loggly_tree::core::format::format_template;
/// use loggly_tree::Arg;
///
/// let text = format_template("retry %d of %d", &[Arg::from(1), Arg::from(3)]).unwrap();
/// assert_eq!(text, "retry 1 of 3");
/// ```
pub fn format_template(template: &str, args: &[Arg]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = parse_spec(template, &mut chars)?;
        match spec.conversion {
            '%' => {
                out.push_str(&pad("%".to_string(), &spec));
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            _ => {}
        }

        let position = match spec.index {
            Some(index) => index - 1,
            None => {
                next_arg += 1;
                next_arg - 1
            }
        };

        let arg = args.get(position).ok_or_else(|| {
            LogglyError::formatting(
                template,
                format!(
                    "no argument for '%{}' at position {} ({} supplied)",
                    spec.conversion,
                    position + 1,
                    args.len()
                ),
            )
        })?;

        let rendered = render(template, &spec, arg)?;
        out.push_str(&rendered);
    }

    Ok(out)
}

fn read_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

fn parse_number(template: &str, digits: &str) -> Result<usize> {
    digits
        .parse()
        .map_err(|_| LogglyError::formatting(template, format!("number '{}' is out of range", digits)))
}

fn parse_bounded(template: &str, digits: &str, what: &str) -> Result<usize> {
    match digits.parse::<usize>() {
        Ok(value) if value <= MAX_WIDTH => Ok(value),
        _ => Err(LogglyError::formatting(template, format!("{} out of range", what))),
    }
}

fn parse_spec(template: &str, chars: &mut Peekable<Chars<'_>>) -> Result<Spec> {
    let mut spec = Spec::default();

    // Explicit argument index: digits followed by '$'
    let mut probe = chars.clone();
    let digits = read_digits(&mut probe);
    if !digits.is_empty() && probe.peek() == Some(&'$') {
        probe.next();
        let index = parse_number(template, &digits)?;
        if index == 0 {
            return Err(LogglyError::formatting(template, "argument index must start at 1"));
        }
        spec.index = Some(index);
        *chars = probe;
    }

    while let Some(&c) = chars.peek() {
        match c {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            _ => break,
        }
        chars.next();
    }

    let width = read_digits(chars);
    if !width.is_empty() {
        spec.width = Some(parse_bounded(template, &width, "width")?);
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let precision = read_digits(chars);
        if precision.is_empty() {
            return Err(LogglyError::formatting(template, "missing precision after '.'"));
        }
        spec.precision = Some(parse_bounded(template, &precision, "precision")?);
    }

    spec.conversion = chars.next().ok_or_else(|| {
        LogglyError::formatting(template, "incomplete format specifier at end of template")
    })?;

    Ok(spec)
}

fn render(template: &str, spec: &Spec, arg: &Arg) -> Result<String> {
    let mismatch = || {
        LogglyError::formatting(
            template,
            format!("'%{}' cannot format a {} argument", spec.conversion, arg.kind()),
        )
    };
    let no_precision = || -> Result<()> {
        if spec.precision.is_some() {
            return Err(LogglyError::formatting(
                template,
                format!("precision is not allowed for '%{}'", spec.conversion),
            ));
        }
        Ok(())
    };

    match spec.conversion {
        's' | 'S' => {
            let text = truncate(arg.to_string(), spec.precision);
            let text = if spec.conversion == 'S' { text.to_uppercase() } else { text };
            Ok(pad(text, spec))
        }
        'b' | 'B' => {
            let value = match arg {
                Arg::Bool(b) => *b,
                Arg::Null => false,
                _ => true,
            };
            let text = truncate(value.to_string(), spec.precision);
            let text = if spec.conversion == 'B' { text.to_uppercase() } else { text };
            Ok(pad(text, spec))
        }
        'c' => {
            no_precision()?;
            let text = match arg {
                Arg::Char(c) => c.to_string(),
                Arg::Int(i) => code_point(template, u32::try_from(*i).ok())?,
                Arg::UInt(u) => code_point(template, u32::try_from(*u).ok())?,
                Arg::Null => "null".to_string(),
                _ => return Err(mismatch()),
            };
            Ok(pad(text, spec))
        }
        'd' => {
            no_precision()?;
            match arg {
                Arg::Int(i) => Ok(signed(spec, *i < 0, i.unsigned_abs().to_string())),
                Arg::UInt(u) => Ok(signed(spec, false, u.to_string())),
                Arg::Null => Ok(pad("null".to_string(), spec)),
                _ => Err(mismatch()),
            }
        }
        'x' | 'X' | 'o' => {
            no_precision()?;
            if spec.plus || spec.space {
                return Err(LogglyError::formatting(
                    template,
                    format!("sign flags are not allowed for '%{}'", spec.conversion),
                ));
            }
            let digits = match (spec.conversion, arg) {
                ('o', Arg::Int(i)) => format!("{:o}", i),
                ('o', Arg::UInt(u)) => format!("{:o}", u),
                (_, Arg::Int(i)) => format!("{:x}", i),
                (_, Arg::UInt(u)) => format!("{:x}", u),
                (_, Arg::Null) => return Ok(pad("null".to_string(), spec)),
                _ => return Err(mismatch()),
            };
            let digits = if spec.conversion == 'X' { digits.to_uppercase() } else { digits };
            Ok(signed(spec, false, digits))
        }
        'f' | 'e' => match arg {
            Arg::Float(f) => {
                let precision = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
                if f.is_nan() {
                    return Ok(pad("NaN".to_string(), spec));
                }
                if f.is_infinite() {
                    return Ok(signed(spec, *f < 0.0, "Infinity".to_string()));
                }
                let magnitude = f.abs();
                let digits = if spec.conversion == 'f' {
                    format!("{:.*}", precision, magnitude)
                } else {
                    scientific(magnitude, precision)
                };
                Ok(signed(spec, f.is_sign_negative() && magnitude != 0.0, digits))
            }
            Arg::Null => Ok(pad("null".to_string(), spec)),
            _ => Err(mismatch()),
        },
        other => Err(LogglyError::formatting(
            template,
            format!("unknown format conversion '%{}'", other),
        )),
    }
}

fn code_point(template: &str, value: Option<u32>) -> Result<String> {
    value
        .and_then(char::from_u32)
        .map(|c| c.to_string())
        .ok_or_else(|| LogglyError::formatting(template, "argument is not a valid code point"))
}

/// `1.5e3` with two-digit signed exponent, as in `1.500000e+03`
fn scientific(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
        }
        None => raw,
    }
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
        _ => text,
    }
}

fn signed(spec: &Spec, negative: bool, digits: String) -> String {
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };

    let len = sign.len() + digits.chars().count();
    match spec.width {
        Some(width) if spec.zero && !spec.left && width > len => {
            format!("{}{}{}", sign, "0".repeat(width - len), digits)
        }
        _ => pad(format!("{}{}", sign, digits), spec),
    }
}

fn pad(text: String, spec: &Spec) -> String {
    let len = text.chars().count();
    match spec.width {
        Some(width) if width > len => {
            let fill = " ".repeat(width - len);
            if spec.left {
                text + &fill
            } else {
                fill + &text
            }
        }
        _ => text,
    }
}
