//! Typed access to DOT attributes.
//!
//! Attribute values are stored as text. This module knows the grammar of the
//! attributes that GraphViz defines, converts between the text and typed
//! values, and validates the attributes of imported graphs. Attributes that
//! are not in the schema are never validated.

pub mod color;
pub mod geometry;
pub mod shapes;
pub mod values;

use crate::error::AttributeError;
use crate::model::{AttrValue, Attributes};

pub use color::{Color, ColorList, WeightedColor};
pub use geometry::{Point, Spline, SplineList};
pub use shapes::{
    ArrowShape, ArrowSide, ArrowType, CompassPoint, PortPos, Shape, Style,
    StyleItem,
};
pub use values::{
    AttrType, ClusterMode, DirType, FixedSize, Layout, OutputMode, RankType,
    Rankdir,
};

/// The kind of element that an attribute is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// The root graph, subgraphs and clusters.
    Graph,
    Node,
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Layout,
    Rankdir,
    Dir,
    OutputOrder,
    ClusterRank,
    Rank,
    Bool,
    FixedSize,
    Double(f64),
    RankSep,
    Int(i32),
    Color,
    ColorList,
    Point,
    SplineList,
    Arrow,
    Port,
    Shape,
    Style,
}

/// \returns the kind of the attribute \p name in the context \p ctx, or
/// None if the attribute is not in the schema.
fn schema(ctx: Context, name: &str) -> Option<Kind> {
    use Context::*;
    let kind = match (name, ctx) {
        ("layout", Graph) => Kind::Layout,
        ("rankdir", Graph) => Kind::Rankdir,
        ("dir", Edge) => Kind::Dir,
        ("outputorder", Graph) => Kind::OutputOrder,
        ("clusterrank", Graph) => Kind::ClusterRank,
        ("rank", Graph) => Kind::Rank,
        ("forcelabels", Graph)
        | ("center", Graph)
        | ("compound", Graph)
        | ("newrank", Graph)
        | ("regular", Node)
        | ("constraint", Edge)
        | ("decorate", Edge)
        | ("headclip", Edge)
        | ("tailclip", Edge) => Kind::Bool,
        ("fixedsize", Node) => Kind::FixedSize,
        ("height", Node) => Kind::Double(0.02),
        ("width", Node) => Kind::Double(0.01),
        ("arrowsize", Edge) => Kind::Double(0.0),
        ("fontsize", _) => Kind::Double(1.0),
        ("labelfontsize", Edge) => Kind::Double(1.0),
        ("penwidth", _) => Kind::Double(0.0),
        ("distortion", Node) | ("skew", Node) => Kind::Double(-100.0),
        ("weight", Edge) => Kind::Double(0.0),
        ("nodesep", Graph) => Kind::Double(0.02),
        ("ranksep", Graph) => Kind::RankSep,
        ("sides", Node) => Kind::Int(3),
        ("peripheries", Node) | ("peripheries", Graph) => Kind::Int(0),
        ("color", _) | ("fillcolor", Node) | ("fillcolor", Graph) => {
            Kind::ColorList
        }
        ("bgcolor", Graph) => Kind::ColorList,
        ("fontcolor", _) | ("labelfontcolor", Edge) | ("pencolor", Graph) => {
            Kind::Color
        }
        ("pos", Node) => Kind::Point,
        ("pos", Edge) => Kind::SplineList,
        ("lp", Graph) | ("lp", Edge) | ("xlp", Node) | ("xlp", Edge) => {
            Kind::Point
        }
        ("head_lp", Edge) | ("tail_lp", Edge) => Kind::Point,
        ("arrowhead", Edge) | ("arrowtail", Edge) => Kind::Arrow,
        ("headport", Edge) | ("tailport", Edge) => Kind::Port,
        ("shape", Node) => Kind::Shape,
        ("style", _) => Kind::Style,
        _ => return None,
    };
    Some(kind)
}

fn check<T: AttrType>(text: &str) -> Result<(), String> {
    T::parse_attr(text).map(|_| ())
}

/// 'ranksep' is a number that may be followed by "equally".
fn parse_ranksep(text: &str) -> Result<f64, String> {
    let number = text.trim().trim_end_matches("equally");
    values::parse_bounded(number, 0.02)
}

impl Kind {
    fn check(&self, text: &str) -> Result<(), String> {
        match *self {
            Kind::Layout => check::<Layout>(text),
            Kind::Rankdir => check::<Rankdir>(text),
            Kind::Dir => check::<DirType>(text),
            Kind::OutputOrder => check::<OutputMode>(text),
            Kind::ClusterRank => check::<ClusterMode>(text),
            Kind::Rank => check::<RankType>(text),
            Kind::Bool => check::<bool>(text),
            Kind::FixedSize => check::<FixedSize>(text),
            Kind::Double(min) => values::parse_bounded(text, min).map(|_| ()),
            Kind::RankSep => parse_ranksep(text).map(|_| ()),
            Kind::Int(min) => values::parse_bounded(text, min).map(|_| ()),
            Kind::Color => check::<Color>(text),
            Kind::ColorList => check::<ColorList>(text),
            Kind::Point => check::<Point>(text),
            Kind::SplineList => check::<SplineList>(text),
            Kind::Arrow => check::<ArrowType>(text),
            Kind::Port => check::<PortPos>(text),
            Kind::Shape => check::<Shape>(text),
            Kind::Style => check::<Style>(text),
        }
    }
}

/// \returns True if \p name has a known grammar in the context \p ctx.
pub fn is_known(ctx: Context, name: &str) -> bool {
    schema(ctx, name).is_some()
}

/// Checks that \p value matches the grammar of the attribute \p name. HTML
/// strings and attributes that are not in the schema are accepted as is. An
/// empty value clears the attribute, so it is always accepted.
pub fn validate(
    ctx: Context,
    name: &str,
    value: &AttrValue,
) -> Result<(), AttributeError> {
    if value.is_html() || value.value.is_empty() {
        return Ok(());
    }
    match schema(ctx, name) {
        Some(kind) => kind
            .check(&value.value)
            .map_err(|reason| AttributeError::new(name, &value.value, &reason)),
        None => Ok(()),
    }
}

// Generates a typed getter and setter for an attribute.
macro_rules! typed_attr {
    ($(#[$meta:meta])* $get:ident, $set:ident, $key:expr, $ty:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Result<Option<$ty>, AttributeError> {
            self.get_typed::<$ty>($key)
        }

        pub fn $set(&mut self, value: $ty) {
            self.set_typed($key, &value);
        }
    };
    ($(#[$meta:meta])* $get:ident, $set:ident, $key:expr, $ty:ty, min = $min:expr) => {
        $(#[$meta])*
        pub fn $get(&self) -> Result<Option<$ty>, AttributeError> {
            self.get_bounded::<$ty>($key, $min)
        }

        /// The caller must pass a finite value that is at least the
        /// minimum of the attribute.
        pub fn $set(&mut self, value: $ty) {
            debug_assert!(
                values::parse_bounded::<$ty>(&value.to_string(), $min).is_ok(),
                "invalid value {} for attribute '{}'",
                value,
                $key
            );
            self.set_typed($key, &value);
        }
    };
}

impl Attributes {
    /// Parses the attribute \p name as a value of type `T`. \returns None if
    /// the attribute is not set or empty.
    pub fn get_typed<T: AttrType>(
        &self,
        name: &str,
    ) -> Result<Option<T>, AttributeError> {
        match self.get(name).filter(|v| !v.value.is_empty()) {
            Some(v) => T::parse_attr(&v.value)
                .map(Some)
                .map_err(|reason| AttributeError::new(name, &v.value, &reason)),
            None => Ok(None),
        }
    }

    fn get_bounded<T>(
        &self,
        name: &str,
        min: T,
    ) -> Result<Option<T>, AttributeError>
    where
        T: AttrType + PartialOrd + Copy,
    {
        match self.get(name).filter(|v| !v.value.is_empty()) {
            Some(v) => values::parse_bounded(&v.value, min)
                .map(Some)
                .map_err(|reason| AttributeError::new(name, &v.value, &reason)),
            None => Ok(None),
        }
    }

    /// Stores the canonical text of \p value under \p name.
    pub fn set_typed<T: AttrType>(&mut self, name: &str, value: &T) {
        self.set_str(name, &value.to_string());
    }

    typed_attr!(layout, set_layout, "layout", Layout);
    typed_attr!(rankdir, set_rankdir, "rankdir", Rankdir);
    typed_attr!(dir, set_dir, "dir", DirType);
    typed_attr!(outputorder, set_outputorder, "outputorder", OutputMode);
    typed_attr!(clusterrank, set_clusterrank, "clusterrank", ClusterMode);
    typed_attr!(rank, set_rank, "rank", RankType);

    typed_attr!(forcelabels, set_forcelabels, "forcelabels", bool);
    typed_attr!(compound, set_compound, "compound", bool);
    typed_attr!(newrank, set_newrank, "newrank", bool);
    typed_attr!(center, set_center, "center", bool);
    typed_attr!(regular, set_regular, "regular", bool);
    typed_attr!(fixedsize, set_fixedsize, "fixedsize", FixedSize);
    typed_attr!(constraint, set_constraint, "constraint", bool);
    typed_attr!(decorate, set_decorate, "decorate", bool);
    typed_attr!(headclip, set_headclip, "headclip", bool);
    typed_attr!(tailclip, set_tailclip, "tailclip", bool);

    typed_attr!(
        /// The height of a node, in inches.
        height, set_height, "height", f64, min = 0.02
    );
    typed_attr!(
        /// The width of a node, in inches.
        width, set_width, "width", f64, min = 0.01
    );
    typed_attr!(arrowsize, set_arrowsize, "arrowsize", f64, min = 0.0);
    typed_attr!(fontsize, set_fontsize, "fontsize", f64, min = 1.0);
    typed_attr!(
        labelfontsize, set_labelfontsize, "labelfontsize", f64, min = 1.0
    );
    typed_attr!(penwidth, set_penwidth, "penwidth", f64, min = 0.0);
    typed_attr!(distortion, set_distortion, "distortion", f64, min = -100.0);
    typed_attr!(skew, set_skew, "skew", f64, min = -100.0);
    typed_attr!(weight, set_weight, "weight", f64, min = 0.0);
    typed_attr!(nodesep, set_nodesep, "nodesep", f64, min = 0.02);
    typed_attr!(sides, set_sides, "sides", i32, min = 3);
    typed_attr!(peripheries, set_peripheries, "peripheries", i32, min = 0);

    typed_attr!(color, set_color, "color", ColorList);
    typed_attr!(fillcolor, set_fillcolor, "fillcolor", ColorList);
    typed_attr!(bgcolor, set_bgcolor, "bgcolor", ColorList);
    typed_attr!(fontcolor, set_fontcolor, "fontcolor", Color);
    typed_attr!(labelfontcolor, set_labelfontcolor, "labelfontcolor", Color);
    typed_attr!(pencolor, set_pencolor, "pencolor", Color);

    typed_attr!(
        /// The position of a node.
        pos, set_pos, "pos", Point
    );
    typed_attr!(
        /// The route of an edge, which is stored in 'pos' as well.
        edge_pos, set_edge_pos, "pos", SplineList
    );
    typed_attr!(lp, set_lp, "lp", Point);
    typed_attr!(xlp, set_xlp, "xlp", Point);
    typed_attr!(head_lp, set_head_lp, "head_lp", Point);
    typed_attr!(tail_lp, set_tail_lp, "tail_lp", Point);

    typed_attr!(arrowhead, set_arrowhead, "arrowhead", ArrowType);
    typed_attr!(arrowtail, set_arrowtail, "arrowtail", ArrowType);
    typed_attr!(headport, set_headport, "headport", PortPos);
    typed_attr!(tailport, set_tailport, "tailport", PortPos);
    typed_attr!(shape, set_shape, "shape", Shape);
    typed_attr!(style, set_style, "style", Style);

    /// 'ranksep' may carry the "equally" suffix, which the typed value drops.
    pub fn ranksep(&self) -> Result<Option<f64>, AttributeError> {
        match self.get("ranksep").filter(|v| !v.value.is_empty()) {
            Some(v) => parse_ranksep(&v.value)
                .map(Some)
                .map_err(|reason| AttributeError::new("ranksep", &v.value, &reason)),
            None => Ok(None),
        }
    }

    pub fn set_ranksep(&mut self, value: f64) {
        self.set_typed("ranksep", &value);
    }

    /// The text of the label. HTML labels are returned without the angle
    /// brackets.
    pub fn label(&self) -> Option<&str> {
        self.get_str("label")
    }

    pub fn set_label(&mut self, label: &str) {
        self.set_str("label", label);
    }

    pub fn set_html_label(&mut self, label: &str) {
        self.insert("label", AttrValue::html(label));
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.get_str("xlabel")
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.set_str("xlabel", label);
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn set_id(&mut self, id: &str) {
        self.set_str("id", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_round_trip() {
        let mut attrs = Attributes::new();
        attrs.set_height(3.4);
        assert_eq!(attrs.get_str("height"), Some("3.4"));
        assert_eq!(attrs.height(), Ok(Some(3.4)));
        let h = attrs.height().unwrap().unwrap();
        attrs.set_height(h);
        assert_eq!(attrs.get_str("height"), Some("3.4"));

        attrs.set_width(1.0);
        assert_eq!(attrs.get_str("width"), Some("1"));

        attrs.set_layout(Layout::Circo);
        assert_eq!(attrs.layout(), Ok(Some(Layout::Circo)));
        attrs.set_rankdir(Rankdir::LeftToRight);
        assert_eq!(attrs.get_str("rankdir"), Some("LR"));

        attrs.set_fontcolor(Color::rgb(0, 128, 255));
        assert_eq!(attrs.get_str("fontcolor"), Some("#0080ff"));

        attrs.set_pos(Point::new(1.5, -2.0));
        assert_eq!(attrs.get("pos"), Some(&AttrValue::quoted("1.5,-2")));
        assert_eq!(attrs.pos(), Ok(Some(Point::new(1.5, -2.0))));

        assert_eq!(attrs.dir(), Ok(None));
    }

    #[test]
    fn typed_errors() {
        let mut attrs = Attributes::new();
        attrs.set_str("layout", "cool");
        let err = attrs.layout().unwrap_err();
        assert_eq!(err.name, "layout");
        assert_eq!(err.value, "cool");

        attrs.set_str("height", "0.001");
        assert!(attrs.height().is_err());
        attrs.set_str("sides", "2");
        assert!(attrs.sides().is_err());
    }

    #[test]
    fn empty_values_clear() {
        let empty = AttrValue::quoted("");
        assert!(validate(Context::Node, "style", &empty).is_ok());
        assert!(validate(Context::Node, "color", &empty).is_ok());
        assert!(validate(Context::Edge, "dir", &empty).is_ok());

        let mut attrs = Attributes::new();
        attrs.insert("style", empty.clone());
        attrs.insert("height", empty.clone());
        attrs.insert("ranksep", empty);
        assert_eq!(attrs.style(), Ok(None));
        assert_eq!(attrs.height(), Ok(None));
        assert_eq!(attrs.ranksep(), Ok(None));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn setter_rejects_nan() {
        Attributes::new().set_height(f64::NAN);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn setter_rejects_below_minimum() {
        Attributes::new().set_sides(2);
    }

    #[test]
    fn labels() {
        let mut attrs = Attributes::new();
        attrs.set_label("hello world");
        assert_eq!(attrs.label(), Some("hello world"));
        attrs.set_html_label("<b>x</b>");
        assert_eq!(attrs.label(), Some("<b>x</b>"));
        assert!(attrs.get("label").map_or(false, |v| v.is_html()));
    }

    #[test]
    fn ranksep_suffix() {
        let mut attrs = Attributes::new();
        attrs.set_str("ranksep", "1.2 equally");
        assert_eq!(attrs.ranksep(), Ok(Some(1.2)));
        assert!(validate(Context::Graph, "ranksep", attrs.get("ranksep").unwrap()).is_ok());
    }

    #[test]
    fn schema_validation() {
        let plain = AttrValue::plain;
        assert!(validate(Context::Graph, "layout", &plain("dot")).is_ok());
        assert!(validate(Context::Graph, "layout", &plain("cool")).is_err());
        // Unknown attributes are not validated.
        assert!(validate(Context::Graph, "my_attr", &plain("cool")).is_ok());
        // 'layout' is a graph attribute.
        assert!(validate(Context::Node, "layout", &plain("cool")).is_ok());
        assert!(validate(Context::Node, "pos", &AttrValue::quoted("1,2")).is_ok());
        assert!(validate(Context::Edge, "pos", &AttrValue::quoted("1,2")).is_err());
        assert!(validate(Context::Edge, "headport", &plain("ne")).is_ok());
        assert!(validate(Context::Node, "shape", &AttrValue::html("x")).is_ok());
        assert!(is_known(Context::Edge, "arrowhead"));
        assert!(!is_known(Context::Node, "arrowhead"));

        let err = validate(Context::Node, "width", &plain("-1")).unwrap_err();
        assert_eq!(err.reason, "must be at least 0.01");
    }
}
