use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Purpose a dashboard section plays, declared by the industry profile.
///
/// The role is never inferred from the data: the same shape renders
/// differently as a KPI block than as a totals block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticRole {
    KpiSet,
    Totals,
    Trend,
    Ranking,
    NarrativeList,
    Generic,
}

impl SemanticRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::KpiSet => "kpi-set",
            SemanticRole::Totals => "totals",
            SemanticRole::Trend => "trend",
            SemanticRole::Ranking => "ranking",
            SemanticRole::NarrativeList => "narrative-list",
            SemanticRole::Generic => "generic",
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "kpi-set" | "kpis" => Ok(Self::KpiSet),
            "totals" => Ok(Self::Totals),
            "trend" | "trends" => Ok(Self::Trend),
            "ranking" => Ok(Self::Ranking),
            "narrative-list" => Ok(Self::NarrativeList),
            "generic" => Ok(Self::Generic),
            _ => Err(format!("Unknown semantic role: {}", s)),
        }
    }
}
