//! Color values: "#rrggbb[aa]", HSV triples and (scheme) color names.

use super::values::{parse_double, AttrType};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8, a: Option<u8> },
    /// Hue, saturation and value, each in the range [0, 1].
    Hsv { h: f64, s: f64, v: f64 },
    /// A color name, such as "red" or "/accent3/1".
    Named { scheme: Option<String>, name: String },
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b, a: None }
    }

    pub fn named(name: &str) -> Self {
        Color::Named {
            scheme: None,
            name: name.to_string(),
        }
    }
}

fn parse_hex(text: &str) -> Result<Color, String> {
    let digits = &text[1..];
    if !(digits.len() == 6 || digits.len() == 8)
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err("expected '#' followed by 6 or 8 hex digits".to_string());
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    let conv = |r: Result<u8, _>| r.map_err(|_| "bad hex digits".to_string());
    let a = if digits.len() == 8 {
        Some(conv(byte(6))?)
    } else {
        None
    };
    Ok(Color::Rgb {
        r: conv(byte(0))?,
        g: conv(byte(2))?,
        b: conv(byte(4))?,
        a,
    })
}

fn parse_hsv(text: &str) -> Result<Color, String> {
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err("expected three HSV components".to_string());
    }
    let mut hsv = [0.0; 3];
    for (slot, part) in hsv.iter_mut().zip(parts.iter()) {
        let x = parse_double(part)?;
        if !(0.0..=1.0).contains(&x) {
            return Err("HSV components must be in the range [0, 1]".to_string());
        }
        *slot = x;
    }
    Ok(Color::Hsv {
        h: hsv[0],
        s: hsv[1],
        v: hsv[2],
    })
}

fn is_color_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_named(text: &str) -> Result<Color, String> {
    if let Some(rest) = text.strip_prefix('/') {
        // "/scheme/name", or "//name" for the default scheme.
        if let Some((scheme, name)) = rest.split_once('/') {
            if is_color_name(name) && (scheme.is_empty() || is_color_name(scheme)) {
                let scheme = if scheme.is_empty() {
                    None
                } else {
                    Some(scheme.to_string())
                };
                return Ok(Color::Named {
                    scheme,
                    name: name.to_string(),
                });
            }
        }
        return Err("expected \"/scheme/name\"".to_string());
    }
    if is_color_name(text) {
        return Ok(Color::named(text));
    }
    Err("not a color".to_string())
}

impl AttrType for Color {
    fn parse_attr(text: &str) -> Result<Self, String> {
        let text = text.trim();
        let first = text.chars().next();
        match first {
            None => Err("empty color".to_string()),
            Some('#') => parse_hex(text),
            // A bare number is an index into the current color scheme.
            Some(c) if c.is_ascii_digit() || c == '.' => parse_hsv(text)
                .or_else(|err| {
                    if text.contains(|c: char| c == ',' || c.is_whitespace()) {
                        Err(err)
                    } else {
                        parse_named(text)
                    }
                }),
            Some(_) => parse_named(text),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb { r, g, b, a } => {
                write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
                if let Some(a) = a {
                    write!(f, "{:02x}", a)?;
                }
                Ok(())
            }
            Color::Hsv { h, s, v } => write!(f, "{:.3} {:.3} {:.3}", h, s, v),
            Color::Named { scheme, name } => match scheme {
                Some(scheme) => write!(f, "/{}/{}", scheme, name),
                None => write!(f, "{}", name),
            },
        }
    }
}

/// One entry of a color list: a color and the optional fraction of the area
/// that it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedColor {
    pub color: Color,
    pub fraction: Option<f64>,
}

/// A ':' separated list of colors, as used for gradients and striped fills.
/// A single color is a list of one.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorList {
    pub colors: Vec<WeightedColor>,
}

impl ColorList {
    pub fn single(color: Color) -> Self {
        Self {
            colors: vec![WeightedColor {
                color,
                fraction: None,
            }],
        }
    }

    /// The first color of the list.
    pub fn first(&self) -> Option<&Color> {
        self.colors.first().map(|wc| &wc.color)
    }
}

impl AttrType for ColorList {
    fn parse_attr(text: &str) -> Result<Self, String> {
        let mut colors = Vec::new();
        for item in text.split(':') {
            let (color, fraction) = match item.split_once(';') {
                Some((c, frac)) => {
                    let frac = parse_double(frac)?;
                    if !(0.0..=1.0).contains(&frac) {
                        return Err("color fractions must be in the range [0, 1]"
                            .to_string());
                    }
                    (c, Some(frac))
                }
                None => (item, None),
            };
            colors.push(WeightedColor {
                color: Color::parse_attr(color)?,
                fraction,
            });
        }
        Ok(Self { colors })
    }
}

impl fmt::Display for ColorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, wc) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, ":")?;
            }
            write!(f, "{}", wc.color)?;
            if let Some(frac) = wc.fraction {
                write!(f, ";{}", frac)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors() {
        assert_eq!(Color::parse_attr("#FF0080"), Ok(Color::rgb(255, 0, 128)));
        assert_eq!(
            Color::parse_attr("#ff008040").unwrap().to_string(),
            "#ff008040"
        );
        assert!(Color::parse_attr("#ff00").is_err());
        assert!(Color::parse_attr("#gg0000").is_err());

        let hsv = Color::parse_attr("0.5, 1,.25").unwrap();
        assert_eq!(hsv.to_string(), "0.500 1.000 0.250");
        assert_eq!(Color::parse_attr(&hsv.to_string()), Ok(hsv));
        assert!(Color::parse_attr("0.5 2 1").is_err());

        assert_eq!(Color::parse_attr("red"), Ok(Color::named("red")));
        let scheme = Color::parse_attr("/accent3/1").unwrap();
        assert_eq!(scheme.to_string(), "/accent3/1");
        assert!(Color::parse_attr("/accent3").is_err());
        assert!(Color::parse_attr("red green").is_err());
        assert!(Color::parse_attr("").is_err());
    }

    #[test]
    fn scheme_indices() {
        assert_eq!(Color::parse_attr("3"), Ok(Color::named("3")));
        assert_eq!(Color::parse_attr("/bugn9/7").unwrap().to_string(), "/bugn9/7");
        let list = ColorList::parse_attr("1:2").unwrap();
        assert_eq!(list.colors.len(), 2);
        assert_eq!(list.first(), Some(&Color::named("1")));
        assert!(Color::parse_attr("0.5").is_err());
        assert!(Color::parse_attr("1 2").is_err());
    }

    #[test]
    fn color_lists() {
        let list = ColorList::parse_attr("red;0.3:#0000ff").unwrap();
        assert_eq!(list.colors.len(), 2);
        assert_eq!(list.colors[0].fraction, Some(0.3));
        assert_eq!(list.first(), Some(&Color::named("red")));
        assert_eq!(list.to_string(), "red;0.3:#0000ff");
        assert!(ColorList::parse_attr("red;1.5").is_err());
        assert!(ColorList::parse_attr("red:").is_err());
        assert_eq!(
            ColorList::single(Color::named("blue")).to_string(),
            "blue"
        );
    }
}
