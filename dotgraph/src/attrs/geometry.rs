//! Positions: points and the spline lists that describe edge routes.

use super::values::{parse_double, AttrType};
use std::fmt;

/// A point "x,y[,z][!]". The '!' marks a position that must not change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub fixed: bool,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            fixed: false,
        }
    }
}

impl AttrType for Point {
    fn parse_attr(text: &str) -> Result<Self, String> {
        let text = text.trim();
        let (body, fixed) = match text.strip_suffix('!') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let coords: Vec<&str> = body.split(',').collect();
        if coords.len() != 2 && coords.len() != 3 {
            return Err("expected \"x,y\" or \"x,y,z\"".to_string());
        }
        let z = match coords.get(2) {
            Some(z) => Some(parse_double(z)?),
            None => None,
        };
        Ok(Point {
            x: parse_double(coords[0])?,
            y: parse_double(coords[1])?,
            z,
            fixed,
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)?;
        if let Some(z) = self.z {
            write!(f, ",{}", z)?;
        }
        if self.fixed {
            write!(f, "!")?;
        }
        Ok(())
    }
}

/// One B-spline of an edge route, with optional arrow end points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub end: Option<Point>,
    pub start: Option<Point>,
    /// The control points; there are 3n+1 of them.
    pub points: Vec<Point>,
}

impl AttrType for Spline {
    fn parse_attr(text: &str) -> Result<Self, String> {
        let mut spline = Spline {
            end: None,
            start: None,
            points: Vec::new(),
        };
        for item in text.split_whitespace() {
            if let Some(p) = item.strip_prefix("e,") {
                if spline.end.is_some() || !spline.points.is_empty() {
                    return Err("misplaced end point".to_string());
                }
                spline.end = Some(Point::parse_attr(p)?);
            } else if let Some(p) = item.strip_prefix("s,") {
                if spline.start.is_some() || !spline.points.is_empty() {
                    return Err("misplaced start point".to_string());
                }
                spline.start = Some(Point::parse_attr(p)?);
            } else {
                spline.points.push(Point::parse_attr(item)?);
            }
        }
        let n = spline.points.len();
        if n < 4 || (n - 1) % 3 != 0 {
            return Err("a spline needs 3n+1 control points".to_string());
        }
        Ok(spline)
    }
}

impl fmt::Display for Spline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = Vec::new();
        if let Some(e) = &self.end {
            items.push(format!("e,{}", e));
        }
        if let Some(s) = &self.start {
            items.push(format!("s,{}", s));
        }
        items.extend(self.points.iter().map(|p| p.to_string()));
        write!(f, "{}", items.join(" "))
    }
}

/// A ';' separated list of splines: the 'pos' of an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineList {
    pub splines: Vec<Spline>,
}

impl AttrType for SplineList {
    fn parse_attr(text: &str) -> Result<Self, String> {
        let splines = text
            .split(';')
            .map(Spline::parse_attr)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { splines })
    }
}

impl fmt::Display for SplineList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list: Vec<String> = self.splines.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", list.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points() {
        assert_eq!(Point::parse_attr("1,2.5"), Ok(Point::new(1.0, 2.5)));
        let p = Point::parse_attr("1,2,3!").unwrap();
        assert_eq!(p.z, Some(3.0));
        assert!(p.fixed);
        assert_eq!(p.to_string(), "1,2,3!");
        assert!(Point::parse_attr("1").is_err());
        assert!(Point::parse_attr("1,a").is_err());
    }

    #[test]
    fn splines() {
        let text = "e,10,20 0,0 1,1 2,2 3,3;s,5,5 4,4 5,5 6,6 7,7";
        let list = SplineList::parse_attr(text).unwrap();
        assert_eq!(list.splines.len(), 2);
        assert_eq!(list.splines[0].end, Some(Point::new(10.0, 20.0)));
        assert_eq!(list.splines[1].start, Some(Point::new(5.0, 5.0)));
        assert_eq!(list.splines[1].points.len(), 4);
        assert_eq!(list.to_string(), text);

        assert!(SplineList::parse_attr("0,0 1,1").is_err());
        assert!(SplineList::parse_attr("0,0 e,1,1 2,2 3,3 4,4").is_err());
    }
}
