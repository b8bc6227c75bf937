//! Number formatting for data labels and tick labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Abbreviate a number with a thousands suffix: `1234567.0` becomes `"1.2M"`.
///
/// Magnitudes past the trillions stay in `T` (`1e15` is `"1000.0T"`).
pub fn readable_format(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut num = value;
    let mut magnitude = 0;
    while num.abs() >= 1000.0 && magnitude < SUFFIXES.len() - 1 {
        magnitude += 1;
        num /= 1000.0;
    }
    format!("{:.1}{}", num, SUFFIXES[magnitude])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    General,
    Fixed,
    Exponent,
    Percent,
}

/// A validated template with a single numeric placeholder, e.g. `"{:.0%}"` or `"${:,.2}"`.
///
/// Placeholders follow Rust's numeric syntax (`{}`, `{:.2}`, `{:.1e}`) with three additions:
/// `%` renders `value * 100` followed by a percent sign, `,` groups thousands and `+` forces a
/// sign. A trailing `f` is accepted as fixed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberFormat {
    template: String,
    prefix: String,
    suffix: String,
    sign: bool,
    grouping: bool,
    precision: Option<usize>,
    kind: Kind,
}

impl NumberFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let invalid = |reason: &str| ChartError::InvalidFormat {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<String> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if spec.is_some() { &mut suffix } else { &mut prefix };
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    if spec.is_some() {
                        return Err(invalid("more than one placeholder"));
                    }
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => inner.push(ch),
                            None => return Err(invalid("unclosed placeholder")),
                        }
                    }
                    spec = Some(inner);
                }
                '}' => return Err(invalid("unmatched '}'")),
                other => out.push(other),
            }
        }

        let spec = spec.ok_or_else(|| invalid("missing placeholder"))?;
        let body = spec.strip_prefix('0').unwrap_or(&spec);
        let body = match body {
            "" => "",
            s => s.strip_prefix(':').ok_or_else(|| invalid("expected ':' before the format spec"))?,
        };

        let mut rest = body;
        let sign = rest.starts_with('+');
        if sign {
            rest = &rest[1..];
        }
        let grouping = rest.starts_with(',');
        if grouping {
            rest = &rest[1..];
        }
        let mut precision = None;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits: String = after_dot.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return Err(invalid("precision needs digits after '.'"));
            }
            precision = Some(digits.parse().map_err(|_| invalid("precision out of range"))?);
            rest = &after_dot[digits.len()..];
        }
        let kind = match rest {
            "" => {
                if precision.is_some() {
                    Kind::Fixed
                } else {
                    Kind::General
                }
            }
            "f" => Kind::Fixed,
            "e" => Kind::Exponent,
            "%" => Kind::Percent,
            _ => return Err(invalid("unsupported format type")),
        };

        Ok(Self {
            template: template.to_string(),
            prefix,
            suffix,
            sign,
            grouping,
            precision,
            kind,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self, value: f64) -> String {
        let (number, unit) = match self.kind {
            Kind::Percent => (self.number(value * 100.0), "%"),
            _ => (self.number(value), ""),
        };
        let number = if self.grouping { group_thousands(&number) } else { number };
        let signed = if self.sign && !number.starts_with('-') {
            format!("+{number}")
        } else {
            number
        };
        format!("{}{}{}{}", self.prefix, signed, unit, self.suffix)
    }

    fn number(&self, v: f64) -> String {
        match (self.kind, self.precision) {
            (Kind::Exponent, Some(p)) => format!("{:.*e}", p, v),
            (Kind::Exponent, None) => format!("{:e}", v),
            (_, Some(p)) => format!("{:.*}", p, v),
            (_, None) => format!("{}", v),
        }
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (int_part, tail) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{tail}")
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl FromStr for NumberFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        NumberFormat::parse(s)
    }
}

impl TryFrom<String> for NumberFormat {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self> {
        NumberFormat::parse(&s)
    }
}

impl From<NumberFormat> for String {
    fn from(f: NumberFormat) -> Self {
        f.template
    }
}

/// How data labels on bars are written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LabelFormat {
    /// Thousands-suffix abbreviation, see [`readable_format`].
    #[default]
    Readable,
    Template(NumberFormat),
}

impl LabelFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            LabelFormat::Readable => readable_format(value),
            LabelFormat::Template(t) => t.format(value),
        }
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self> {
        match s.as_str() {
            "readable" | "1K" | "1M" | "1B" | "1T" => Ok(LabelFormat::Readable),
            _ => NumberFormat::parse(&s).map(LabelFormat::Template),
        }
    }
}

impl From<LabelFormat> for String {
    fn from(f: LabelFormat) -> Self {
        match f {
            LabelFormat::Readable => "readable".to_string(),
            LabelFormat::Template(t) => t.into(),
        }
    }
}
