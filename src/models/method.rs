//! Method identity and per-run method selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six apportionment methods.
///
/// Variant order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Method {
    /// Largest remainder.
    Hamilton,
    /// Divisor search, rounding down.
    Jefferson,
    /// Divisor search, rounding up.
    Adam,
    /// Divisor search, rounding to nearest.
    Webster,
    /// Rank index with geometric-mean cutoff.
    HuntingtonGeometric,
    /// Rank index with arithmetic cutoff.
    HuntingtonArithmetic,
}

impl Method {
    /// All methods in canonical order.
    pub const ALL: [Method; 6] = [
        Method::Hamilton,
        Method::Jefferson,
        Method::Adam,
        Method::Webster,
        Method::HuntingtonGeometric,
        Method::HuntingtonArithmetic,
    ];

    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Method::Hamilton => "Hamilton",
            Method::Jefferson => "Jefferson",
            Method::Adam => "Adam",
            Method::Webster => "Webster",
            Method::HuntingtonGeometric => "Huntington (computed with geometric mean)",
            Method::HuntingtonArithmetic => "Huntington (computed with arithmetic mean)",
        }
    }

    /// Short key accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            Method::Hamilton => "hamilton",
            Method::Jefferson => "jefferson",
            Method::Adam => "adam",
            Method::Webster => "webster",
            Method::HuntingtonGeometric => "huntington",
            Method::HuntingtonArithmetic => "huntington-arithmetic",
        }
    }

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized method key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown apportionment method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Method::ALL
            .into_iter()
            .find(|m| m.key() == key)
            .or(match key.as_str() {
                "huntington-geometric" | "huntington-hill" => Some(Method::HuntingtonGeometric),
                _ => None,
            })
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Which methods to run: six independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSelection {
    flags: [bool; 6],
}

impl MethodSelection {
    /// Selects every method.
    pub fn all() -> Self {
        Self { flags: [true; 6] }
    }

    /// Selects nothing.
    pub fn none() -> Self {
        Self { flags: [false; 6] }
    }

    /// Builds a selection from flags in canonical order.
    pub fn from_flags(
        hamilton: bool,
        jefferson: bool,
        adam: bool,
        webster: bool,
        huntington: bool,
        huntington_arithmetic: bool,
    ) -> Self {
        Self {
            flags: [
                hamilton,
                jefferson,
                adam,
                webster,
                huntington,
                huntington_arithmetic,
            ],
        }
    }

    /// Adds a method.
    pub fn with(mut self, method: Method) -> Self {
        self.flags[method.index()] = true;
        self
    }

    /// Removes a method.
    pub fn without(mut self, method: Method) -> Self {
        self.flags[method.index()] = false;
        self
    }

    /// Whether `method` is selected.
    pub fn contains(&self, method: Method) -> bool {
        self.flags[method.index()]
    }

    /// Selected methods in canonical order.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl Default for MethodSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Method> for MethodSelection {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MethodSelection::none(), |sel, m| sel.with(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = Method::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names[0], "Hamilton");
        assert_eq!(names[3], "Webster");
        assert_eq!(names[5], "Huntington (computed with arithmetic mean)");
        for (i, m) in Method::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn test_parse_keys() {
        for m in Method::ALL {
            assert_eq!(m.key().parse::<Method>().unwrap(), m);
        }
        assert_eq!(" Webster ".parse::<Method>().unwrap(), Method::Webster);
        assert_eq!(
            "huntington-hill".parse::<Method>().unwrap(),
            Method::HuntingtonGeometric
        );
        assert!("dhondt".parse::<Method>().is_err());
    }

    #[test]
    fn test_selection_builders() {
        let sel = MethodSelection::none()
            .with(Method::Adam)
            .with(Method::Hamilton);
        assert!(sel.contains(Method::Adam));
        assert!(!sel.contains(Method::Webster));
        let methods: Vec<Method> = sel.methods().collect();
        assert_eq!(methods, vec![Method::Hamilton, Method::Adam]);

        let sel = MethodSelection::all().without(Method::Jefferson);
        assert_eq!(sel.methods().count(), 5);
    }

    #[test]
    fn test_selection_from_flags_and_iter() {
        let flags = MethodSelection::from_flags(true, false, false, true, false, false);
        let collected: MethodSelection = [Method::Webster, Method::Hamilton].into_iter().collect();
        assert_eq!(flags, collected);
    }
}
