//! The closed set of recognized lab directive kinds.

use std::fmt;
use std::str::FromStr;

/// Kind of a lab directive block.
///
/// Each kind corresponds to a marker pair
/// `<!-- lab:<name> ... -->` / `<!-- /lab:<name> -->`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Fillable data table (`lab:data-table`).
    DataTable,
    /// Object selection fields (`lab:object-selection`).
    ObjectSelection,
    /// Measurement feasibility section (`lab:measurement-feasibility`).
    MeasurementFeasibility,
    /// Free-form reflection section (`lab:reflection`).
    Reflection,
    /// Show-your-work calculation section (`lab:calculation`).
    Calculation,
}

impl DirectiveKind {
    /// All kinds, in the order they are scanned.
    pub const ALL: [Self; 5] = [
        Self::DataTable,
        Self::ObjectSelection,
        Self::MeasurementFeasibility,
        Self::Reflection,
        Self::Calculation,
    ];

    /// Marker name used after the `lab:` prefix.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DataTable => "data-table",
            Self::ObjectSelection => "object-selection",
            Self::MeasurementFeasibility => "measurement-feasibility",
            Self::Reflection => "reflection",
            Self::Calculation => "calculation",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown lab directive: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for kind in DirectiveKind::ALL {
            assert_eq!(kind.name().parse::<DirectiveKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "tabs".parse::<DirectiveKind>().unwrap_err();
        assert!(err.contains("tabs"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DirectiveKind::MeasurementFeasibility.to_string(),
            "measurement-feasibility"
        );
    }
}
