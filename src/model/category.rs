//! Closed set of part categories. Must stay in sync with the CHECK constraint in `schema/components.sql`.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Motherboard,
    Memory,
    Storage,
    Gpu,
    PowerSupply,
    Case,
    Cooler,
    Monitor,
    ExpansionCard,
    Peripherals,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Memory,
        Category::Storage,
        Category::Gpu,
        Category::PowerSupply,
        Category::Case,
        Category::Cooler,
        Category::Monitor,
        Category::ExpansionCard,
        Category::Peripherals,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::Gpu => "gpu",
            Category::PowerSupply => "powersupply",
            Category::Case => "case",
            Category::Cooler => "cooler",
            Category::Monitor => "monitor",
            Category::ExpansionCard => "expansioncard",
            Category::Peripherals => "peripherals",
            Category::Other => "other",
        }
    }

    /// True iff `tag` is exactly one of the category tags (case-sensitive, no trimming).
    pub fn is_valid(tag: &str) -> bool {
        Self::ALL.iter().any(|c| c.as_str() == tag)
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
