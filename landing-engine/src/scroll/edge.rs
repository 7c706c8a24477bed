// edge.rs - Scroll edge notation
//
// "<trigger> <viewport>": the scroll offset where the given point of the
// trigger element meets the given line of the viewport. Each point is
// top | center | bottom | Npx | N% | N.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LandingError, Result};

/// Document geometry a range is resolved against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub viewport_height: f64,
    /// Trigger top edge, in document coordinates.
    pub trigger_top: f64,
    pub trigger_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    Px(f64),
    Percent(f64),
}

impl Anchor {
    fn parse(token: &str) -> Option<Anchor> {
        let anchor = match token {
            "top" => Anchor::Top,
            "center" => Anchor::Center,
            "bottom" => Anchor::Bottom,
            t if t.ends_with('%') => Anchor::Percent(t[..t.len() - 1].parse().ok()?),
            t if t.ends_with("px") => Anchor::Px(t[..t.len() - 2].parse().ok()?),
            t => Anchor::Px(t.parse().ok()?),
        };
        match anchor {
            Anchor::Px(v) | Anchor::Percent(v) if !v.is_finite() => None,
            a => Some(a),
        }
    }

    /// Distance from the top of a box of height `extent`.
    #[inline]
    pub fn offset(self, extent: f64) -> f64 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => extent * 0.5,
            Anchor::Bottom => extent,
            Anchor::Px(px) => px,
            Anchor::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => f.write_str("top"),
            Anchor::Center => f.write_str("center"),
            Anchor::Bottom => f.write_str("bottom"),
            Anchor::Px(px) => write!(f, "{px}px"),
            Anchor::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edge {
    pub trigger: Anchor,
    pub viewport: Anchor,
}

impl Edge {
    pub fn new(trigger: Anchor, viewport: Anchor) -> Self {
        Self { trigger, viewport }
    }

    /// Scroll offset at which this edge is reached.
    #[inline]
    pub fn resolve(&self, layout: &Layout) -> f64 {
        layout.trigger_top + self.trigger.offset(layout.trigger_height)
            - self.viewport.offset(layout.viewport_height)
    }
}

impl FromStr for Edge {
    type Err = LandingError;

    fn from_str(s: &str) -> Result<Edge> {
        let invalid = || LandingError::InvalidEdge(s.to_string());
        let mut tokens = s.split_whitespace();
        let trigger = tokens.next().and_then(Anchor::parse).ok_or_else(invalid)?;
        let viewport = match tokens.next() {
            Some(t) => Anchor::parse(t).ok_or_else(invalid)?,
            None => Anchor::Top,
        };
        if tokens.next().is_some() {
            return Err(invalid());
        }
        Ok(Edge { trigger, viewport })
    }
}

impl TryFrom<String> for Edge {
    type Error = LandingError;

    fn try_from(s: String) -> Result<Edge> {
        s.parse()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.trigger, self.viewport)
    }
}

impl From<Edge> for String {
    fn from(edge: Edge) -> String {
        edge.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: Layout = Layout {
        viewport_height: 800.0,
        trigger_top: 1200.0,
        trigger_height: 600.0,
    };

    fn edge(s: &str) -> Edge {
        s.parse().unwrap()
    }

    #[test]
    fn parses_keywords_and_units() {
        assert_eq!(edge("top top"), Edge::new(Anchor::Top, Anchor::Top));
        assert_eq!(edge("100px top"), Edge::new(Anchor::Px(100.0), Anchor::Top));
        assert_eq!(edge("top 80%"), Edge::new(Anchor::Top, Anchor::Percent(80.0)));
        assert_eq!(edge("bottom center"), Edge::new(Anchor::Bottom, Anchor::Center));
        assert_eq!(edge("-40 top"), Edge::new(Anchor::Px(-40.0), Anchor::Top));
        assert_eq!(edge("center"), Edge::new(Anchor::Center, Anchor::Top));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "middle top", "top top top", "px top", "top NaN%", "inf top"] {
            assert!(bad.parse::<Edge>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn resolves_against_layout() {
        assert_eq!(edge("top top").resolve(&PAGE), 1200.0);
        assert_eq!(edge("100px top").resolve(&PAGE), 1300.0);
        assert_eq!(edge("top 80%").resolve(&PAGE), 1200.0 - 640.0);
        assert_eq!(edge("bottom top").resolve(&PAGE), 1800.0);
        assert_eq!(edge("top center").resolve(&PAGE), 800.0);
        assert_eq!(edge("50% bottom").resolve(&PAGE), 1200.0 + 300.0 - 800.0);
    }

    #[test]
    fn serde_uses_text_form() {
        let e: Edge = serde_json::from_str(r#""top 80%""#).unwrap();
        assert_eq!(e, edge("top 80%"));
        assert_eq!(serde_json::to_string(&e).unwrap(), r#""top 80%""#);
        assert!(serde_json::from_str::<Edge>(r#""sideways""#).is_err());
    }
}
