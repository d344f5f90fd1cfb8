//! Keyword and scalar attribute types.

use std::fmt;

/// A type that attribute text can be converted to and from. `Display` must
/// produce the canonical text, which parses back to an equal value.
pub trait AttrType: Sized + fmt::Display {
    /// Parses \p text, or returns the reason why it is not a valid value.
    fn parse_attr(text: &str) -> Result<Self, String>;
}

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl AttrType for $name {
            fn parse_attr(text: &str) -> Result<Self, String> {
                match text {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("expected one of {}", Self::NAMES.join(", "))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

keyword_enum!(
    /// The layout engine that should render the graph.
    Layout {
        Dot => "dot",
        Neato => "neato",
        Fdp => "fdp",
        Sfdp => "sfdp",
        Twopi => "twopi",
        Circo => "circo",
        Osage => "osage",
        Patchwork => "patchwork",
    }
);

keyword_enum!(
    /// The direction in which ranks are placed.
    Rankdir {
        TopToBottom => "TB",
        LeftToRight => "LR",
        BottomToTop => "BT",
        RightToLeft => "RL",
    }
);

keyword_enum!(
    /// Where arrowheads are drawn on an edge.
    DirType {
        Forward => "forward",
        Back => "back",
        Both => "both",
        None => "none",
    }
);

keyword_enum!(
    OutputMode {
        BreadthFirst => "breadthfirst",
        NodesFirst => "nodesfirst",
        EdgesFirst => "edgesfirst",
    }
);

keyword_enum!(
    ClusterMode {
        Local => "local",
        Global => "global",
        None => "none",
    }
);

keyword_enum!(
    /// Rank constraints of the nodes in a subgraph.
    RankType {
        Same => "same",
        Min => "min",
        Source => "source",
        Max => "max",
        Sink => "sink",
    }
);

/// Parses a DOT boolean: "true"/"yes", "false"/"no" (in any case), or an
/// integer where anything but zero is true.
fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        other => other.parse::<i64>().ok().map(|x| x != 0),
    }
}

impl AttrType for bool {
    fn parse_attr(text: &str) -> Result<Self, String> {
        parse_bool(text).ok_or_else(|| "expected a boolean".to_string())
    }
}

/// The value of 'fixedsize', which is a boolean or the keyword "shape".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedSize {
    False,
    True,
    Shape,
}

impl AttrType for FixedSize {
    fn parse_attr(text: &str) -> Result<Self, String> {
        if text == "shape" {
            return Ok(FixedSize::Shape);
        }
        match parse_bool(text) {
            Some(true) => Ok(FixedSize::True),
            Some(false) => Ok(FixedSize::False),
            None => Err("expected a boolean or \"shape\"".to_string()),
        }
    }
}

impl fmt::Display for FixedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FixedSize::False => "false",
            FixedSize::True => "true",
            FixedSize::Shape => "shape",
        };
        write!(f, "{}", s)
    }
}

/// Parses a finite floating point number.
pub fn parse_double(text: &str) -> Result<f64, String> {
    match text.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err("expected a number".to_string()),
    }
}

impl AttrType for f64 {
    fn parse_attr(text: &str) -> Result<Self, String> {
        parse_double(text)
    }
}

impl AttrType for i32 {
    fn parse_attr(text: &str) -> Result<Self, String> {
        text.trim()
            .parse::<i32>()
            .map_err(|_| "expected an integer".to_string())
    }
}

/// Free text attributes, such as labels, are kept as they are.
impl AttrType for String {
    fn parse_attr(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

/// Parses \p text as a number that is at least \p min.
pub fn parse_bounded<T>(text: &str, min: T) -> Result<T, String>
where
    T: AttrType + PartialOrd + Copy,
{
    let val = T::parse_attr(text)?;
    if val < min {
        return Err(format!("must be at least {}", min));
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(Layout::parse_attr("circo"), Ok(Layout::Circo));
        assert_eq!(Rankdir::parse_attr("LR"), Ok(Rankdir::LeftToRight));
        assert_eq!(RankType::parse_attr("sink"), Ok(RankType::Sink));
        assert!(Rankdir::parse_attr("lr").is_err());
        let err = Layout::parse_attr("cool").unwrap_err();
        assert!(err.starts_with("expected one of dot, neato"));
        assert_eq!(DirType::Both.to_string(), "both");
    }

    #[test]
    fn booleans() {
        assert_eq!(bool::parse_attr("TRUE"), Ok(true));
        assert_eq!(bool::parse_attr("no"), Ok(false));
        assert_eq!(bool::parse_attr("2"), Ok(true));
        assert_eq!(bool::parse_attr("0"), Ok(false));
        assert!(bool::parse_attr("maybe").is_err());
        assert_eq!(FixedSize::parse_attr("shape"), Ok(FixedSize::Shape));
        assert_eq!(FixedSize::parse_attr("yes"), Ok(FixedSize::True));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_bounded("3.4", 0.02), Ok(3.4));
        assert_eq!(parse_bounded(".5", 0.0), Ok(0.5));
        assert!(parse_bounded("0.001", 0.02).is_err());
        assert!(parse_double("inf").is_err());
        assert!(parse_double("abc").is_err());
        assert_eq!(parse_bounded("5", 3), Ok(5));
        assert_eq!(parse_bounded("2", 3), Err("must be at least 3".to_string()));
        assert_eq!(1.0f64.to_string(), "1");
        assert_eq!(3.4f64.to_string(), "3.4");
    }
}
