use std::fmt;
use std::str::FromStr;

/// Decides whether a line end point shared by `count` line components lies
/// in the boundary of a lineal geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryNodeRule {
    /// Boundary if an odd number of components end there (OGC SFS).
    #[default]
    Mod2,
    /// Every end point is in the boundary.
    EndPoint,
    /// Boundary if more than one component ends there.
    MultivalentEndPoint,
    /// Boundary if exactly one component ends there.
    MonovalentEndPoint,
}

impl BoundaryNodeRule {
    pub fn is_in_boundary(self, count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => count % 2 == 1,
            BoundaryNodeRule::EndPoint => count > 0,
            BoundaryNodeRule::MultivalentEndPoint => count > 1,
            BoundaryNodeRule::MonovalentEndPoint => count == 1,
        }
    }
}

impl fmt::Display for BoundaryNodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryNodeRule::Mod2 => "mod2",
            BoundaryNodeRule::EndPoint => "endpoint",
            BoundaryNodeRule::MultivalentEndPoint => "multivalent",
            BoundaryNodeRule::MonovalentEndPoint => "monovalent",
        };
        f.write_str(name)
    }
}

impl FromStr for BoundaryNodeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mod2" | "ogc" => Ok(BoundaryNodeRule::Mod2),
            "endpoint" => Ok(BoundaryNodeRule::EndPoint),
            "multivalent" => Ok(BoundaryNodeRule::MultivalentEndPoint),
            "monovalent" => Ok(BoundaryNodeRule::MonovalentEndPoint),
            other => Err(format!("unknown boundary node rule '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_count_end_points() {
        let counts = [0, 1, 2, 3];
        let mod2: Vec<bool> = counts.iter().map(|&c| BoundaryNodeRule::Mod2.is_in_boundary(c)).collect();
        assert_eq!(mod2, [false, true, false, true]);
        assert!(BoundaryNodeRule::EndPoint.is_in_boundary(2));
        assert!(!BoundaryNodeRule::MultivalentEndPoint.is_in_boundary(1));
        assert!(!BoundaryNodeRule::MonovalentEndPoint.is_in_boundary(2));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Mod2".parse::<BoundaryNodeRule>(), Ok(BoundaryNodeRule::Mod2));
        assert_eq!("monovalent".parse::<BoundaryNodeRule>(), Ok(BoundaryNodeRule::MonovalentEndPoint));
        assert!("nope".parse::<BoundaryNodeRule>().is_err());
    }
}
