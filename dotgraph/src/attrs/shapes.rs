//! Node shapes, styles, arrow types and port positions.

use super::values::AttrType;
use std::fmt;

const POLYGON_SHAPES: &[&str] = &[
    "box", "polygon", "ellipse", "oval", "circle", "point", "egg",
    "triangle", "plaintext", "plain", "diamond", "trapezium",
    "parallelogram", "house", "pentagon", "hexagon", "septagon", "octagon",
    "doublecircle", "doubleoctagon", "tripleoctagon", "invtriangle",
    "invtrapezium", "invhouse", "Mdiamond", "Msquare", "Mcircle", "rect",
    "rectangle", "square", "star", "none", "underline", "cylinder", "note",
    "tab", "folder", "box3d", "component", "promoter", "cds", "terminator",
    "utr", "primersite", "restrictionsite", "fivepoverhang",
    "threepoverhang", "noverhang", "assembly", "signature", "insulator",
    "ribosite", "rnastab", "proteasesite", "proteinstab", "rpromoter",
    "rarrow", "larrow", "lpromoter",
];

/// The 'shape' of a node. Names that are not built-in shapes are kept as
/// custom shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Polygon(String),
    Record,
    MRecord,
    Custom(String),
}

impl AttrType for Shape {
    fn parse_attr(text: &str) -> Result<Self, String> {
        match text {
            "" => Err("empty shape".to_string()),
            "record" => Ok(Shape::Record),
            "Mrecord" => Ok(Shape::MRecord),
            _ if POLYGON_SHAPES.contains(&text) => {
                Ok(Shape::Polygon(text.to_string()))
            }
            _ => Ok(Shape::Custom(text.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Polygon(name) | Shape::Custom(name) => write!(f, "{}", name),
            Shape::Record => write!(f, "record"),
            Shape::MRecord => write!(f, "Mrecord"),
        }
    }
}

/// One entry of a 'style' list, such as "filled" or "setlinewidth(2)".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleItem {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub items: Vec<StyleItem>,
}

impl Style {
    pub fn has(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }
}

fn parse_style_item(text: &str) -> Result<StyleItem, String> {
    let text = text.trim();
    let (name, args) = match text.find('(') {
        Some(idx) => {
            let args = text[idx + 1..]
                .strip_suffix(')')
                .ok_or_else(|| "expected ')'".to_string())?;
            let args = args.split(',').map(|a| a.trim().to_string()).collect();
            (&text[..idx], args)
        }
        None => (text, Vec::new()),
    };
    let name = name.trim();
    if name.is_empty()
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(format!("bad style name \"{}\"", name));
    }
    Ok(StyleItem {
        name: name.to_string(),
        args,
    })
}

impl AttrType for Style {
    fn parse_attr(text: &str) -> Result<Self, String> {
        // Split on the commas that are not inside of parentheses.
        let mut items = Vec::new();
        let mut depth = 0;
        let mut start = 0;
        for (i, c) in text.char_indices() {
            match c {
                '(' => depth += 1,
                ')' if depth == 0 => return Err("unbalanced ')'".to_string()),
                ')' => depth -= 1,
                ',' if depth == 0 => {
                    items.push(parse_style_item(&text[start..i])?);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err("expected ')'".to_string());
        }
        items.push(parse_style_item(&text[start..])?);
        Ok(Self { items })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", item.name)?;
            if !item.args.is_empty() {
                write!(f, "({})", item.args.join(","))?;
            }
        }
        Ok(())
    }
}

const ARROW_SHAPES: &[&str] = &[
    "box", "crow", "curve", "icurve", "diamond", "dot", "inv", "none",
    "normal", "tee", "vee",
];

const DEPRECATED_ARROWS: &[&str] =
    &["ediamond", "open", "halfopen", "empty", "invempty"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowSide {
    Left,
    Right,
}

/// A primitive arrow shape with its modifiers, as in "olnormal".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowShape {
    pub open: bool,
    pub side: Option<ArrowSide>,
    pub name: String,
}

/// The value of 'arrowhead' and 'arrowtail': one to four arrow shapes, or
/// one of the deprecated arrow names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowType {
    Shapes(Vec<ArrowShape>),
    Deprecated(String),
}

impl AttrType for ArrowType {
    fn parse_attr(text: &str) -> Result<Self, String> {
        if DEPRECATED_ARROWS.contains(&text) {
            return Ok(ArrowType::Deprecated(text.to_string()));
        }
        let mut shapes = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let mut shape = ArrowShape {
                open: false,
                side: None,
                name: String::new(),
            };
            if let Some(r) = rest.strip_prefix('o') {
                shape.open = true;
                rest = r;
            }
            if let Some(r) = rest.strip_prefix('l') {
                shape.side = Some(ArrowSide::Left);
                rest = r;
            } else if let Some(r) = rest.strip_prefix('r') {
                shape.side = Some(ArrowSide::Right);
                rest = r;
            }
            let name = ARROW_SHAPES
                .iter()
                .find(|name| rest.starts_with(*name))
                .ok_or_else(|| format!("unknown arrow shape \"{}\"", rest))?;
            shape.name = name.to_string();
            rest = &rest[name.len()..];
            shapes.push(shape);
        }
        if shapes.is_empty() || shapes.len() > 4 {
            return Err("expected one to four arrow shapes".to_string());
        }
        Ok(ArrowType::Shapes(shapes))
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrowType::Deprecated(name) => write!(f, "{}", name),
            ArrowType::Shapes(shapes) => {
                for shape in shapes {
                    if shape.open {
                        write!(f, "o")?;
                    }
                    match shape.side {
                        Some(ArrowSide::Left) => write!(f, "l")?,
                        Some(ArrowSide::Right) => write!(f, "r")?,
                        None => {}
                    }
                    write!(f, "{}", shape.name)?;
                }
                Ok(())
            }
        }
    }
}

/// The compass points that may follow a port name. `Center` is "c" and
/// `Any` is "_".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Center,
    Any,
}

impl CompassPoint {
    pub fn from_str(s: &str) -> Option<Self> {
        let cp = match s {
            "n" => CompassPoint::North,
            "ne" => CompassPoint::NorthEast,
            "e" => CompassPoint::East,
            "se" => CompassPoint::SouthEast,
            "s" => CompassPoint::South,
            "sw" => CompassPoint::SouthWest,
            "w" => CompassPoint::West,
            "nw" => CompassPoint::NorthWest,
            "c" => CompassPoint::Center,
            "_" => CompassPoint::Any,
            _ => return None,
        };
        Some(cp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::North => "n",
            CompassPoint::NorthEast => "ne",
            CompassPoint::East => "e",
            CompassPoint::SouthEast => "se",
            CompassPoint::South => "s",
            CompassPoint::SouthWest => "sw",
            CompassPoint::West => "w",
            CompassPoint::NorthWest => "nw",
            CompassPoint::Center => "c",
            CompassPoint::Any => "_",
        }
    }
}

/// The value of 'headport' and 'tailport': "port", "port:compass" or
/// "compass".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPos {
    pub port: Option<String>,
    pub compass: Option<CompassPoint>,
}

impl AttrType for PortPos {
    fn parse_attr(text: &str) -> Result<Self, String> {
        if text.is_empty() {
            return Err("empty port".to_string());
        }
        if let Some((port, cp)) = text.rsplit_once(':') {
            let compass = CompassPoint::from_str(cp)
                .ok_or_else(|| format!("unknown compass point \"{}\"", cp))?;
            if port.is_empty() {
                return Err("empty port name".to_string());
            }
            return Ok(PortPos {
                port: Some(port.to_string()),
                compass: Some(compass),
            });
        }
        // A lone compass point name is a compass point, not a port.
        match CompassPoint::from_str(text) {
            Some(cp) => Ok(PortPos {
                port: None,
                compass: Some(cp),
            }),
            None => Ok(PortPos {
                port: Some(text.to_string()),
                compass: None,
            }),
        }
    }
}

impl fmt::Display for PortPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.port, self.compass) {
            (Some(port), Some(cp)) => write!(f, "{}:{}", port, cp.as_str()),
            (Some(port), None) => write!(f, "{}", port),
            (None, Some(cp)) => write!(f, "{}", cp.as_str()),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(Shape::parse_attr("box"), Ok(Shape::Polygon("box".into())));
        assert_eq!(Shape::parse_attr("Mrecord"), Ok(Shape::MRecord));
        assert_eq!(
            Shape::parse_attr("my_shape"),
            Ok(Shape::Custom("my_shape".into()))
        );
        assert!(Shape::parse_attr("").is_err());
    }

    #[test]
    fn styles() {
        let style = Style::parse_attr("filled, setlinewidth(2),dashed").unwrap();
        assert_eq!(style.items.len(), 3);
        assert!(style.has("filled"));
        assert_eq!(style.items[1].args, vec!["2".to_string()]);
        assert_eq!(style.to_string(), "filled,setlinewidth(2),dashed");
        assert!(Style::parse_attr("filled(").is_err());
        assert!(Style::parse_attr("a,,b").is_err());
    }

    #[test]
    fn arrows() {
        let arrow = ArrowType::parse_attr("lteeoldiamond").unwrap();
        match &arrow {
            ArrowType::Shapes(shapes) => {
                assert_eq!(shapes.len(), 2);
                assert_eq!(shapes[0].side, Some(ArrowSide::Left));
                assert_eq!(shapes[0].name, "tee");
                assert!(shapes[1].open);
                assert_eq!(shapes[1].name, "diamond");
            }
            _ => panic!("expected arrow shapes"),
        }
        assert_eq!(arrow.to_string(), "lteeoldiamond");
        assert_eq!(
            ArrowType::parse_attr("open"),
            Ok(ArrowType::Deprecated("open".into()))
        );
        assert!(ArrowType::parse_attr("normalnormalnormalnormalnormal").is_err());
        assert!(ArrowType::parse_attr("square").is_err());
        assert!(ArrowType::parse_attr("").is_err());
    }

    #[test]
    fn ports() {
        let p = PortPos::parse_attr("f0:ne").unwrap();
        assert_eq!(p.port.as_deref(), Some("f0"));
        assert_eq!(p.compass, Some(CompassPoint::NorthEast));
        assert_eq!(p.to_string(), "f0:ne");

        let c = PortPos::parse_attr("_").unwrap();
        assert_eq!(c.port, None);
        assert_eq!(c.compass, Some(CompassPoint::Any));

        let named = PortPos::parse_attr("here").unwrap();
        assert_eq!(named.port.as_deref(), Some("here"));
        assert!(PortPos::parse_attr("a:b").is_err());
    }
}
