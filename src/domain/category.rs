//! Closed two-level taxonomy used to classify transactions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level classification for ledger activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MainCategory {
    Essential,
    Discretionary,
    Incidental,
    Gift,
}

/// Second-level classification; each value belongs to exactly one
/// [`MainCategory`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubCategory {
    Housing,
    Transportation,
    Insurance,
    Entertainment,
    Dining,
    Travel,
    Fitness,
    Copay,
    Repairs,
    Deductibles,
    Charity,
    Tithes,
    Personal,
}

impl MainCategory {
    /// Returns the fixed set of subcategories owned by this category.
    pub fn subcategories(self) -> &'static [SubCategory] {
        match self {
            MainCategory::Essential => &[
                SubCategory::Housing,
                SubCategory::Transportation,
                SubCategory::Insurance,
            ],
            MainCategory::Discretionary => &[
                SubCategory::Entertainment,
                SubCategory::Dining,
                SubCategory::Travel,
                SubCategory::Fitness,
            ],
            MainCategory::Incidental => &[
                SubCategory::Copay,
                SubCategory::Repairs,
                SubCategory::Deductibles,
            ],
            MainCategory::Gift => &[
                SubCategory::Charity,
                SubCategory::Tithes,
                SubCategory::Personal,
            ],
        }
    }

    /// Returns `true` when `sub` belongs to this category's allowed set.
    pub fn allows(self, sub: SubCategory) -> bool {
        self.subcategories().contains(&sub)
    }
}

impl SubCategory {
    /// Returns the owning main category.
    pub fn main_category(self) -> MainCategory {
        match self {
            SubCategory::Housing | SubCategory::Transportation | SubCategory::Insurance => {
                MainCategory::Essential
            }
            SubCategory::Entertainment
            | SubCategory::Dining
            | SubCategory::Travel
            | SubCategory::Fitness => MainCategory::Discretionary,
            SubCategory::Copay | SubCategory::Repairs | SubCategory::Deductibles => {
                MainCategory::Incidental
            }
            SubCategory::Charity | SubCategory::Tithes | SubCategory::Personal => {
                MainCategory::Gift
            }
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainCategory::Essential => "Essential",
            MainCategory::Discretionary => "Discretionary",
            MainCategory::Incidental => "Incidental",
            MainCategory::Gift => "Gift",
        };
        f.write_str(label)
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubCategory::Housing => "Housing",
            SubCategory::Transportation => "Transportation",
            SubCategory::Insurance => "Insurance",
            SubCategory::Entertainment => "Entertainment",
            SubCategory::Dining => "Dining",
            SubCategory::Travel => "Travel",
            SubCategory::Fitness => "Fitness",
            SubCategory::Copay => "Copay",
            SubCategory::Repairs => "Repairs",
            SubCategory::Deductibles => "Deductibles",
            SubCategory::Charity => "Charity",
            SubCategory::Tithes => "Tithes",
            SubCategory::Personal => "Personal",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MAIN: [MainCategory; 4] = [
        MainCategory::Essential,
        MainCategory::Discretionary,
        MainCategory::Incidental,
        MainCategory::Gift,
    ];

    #[test]
    fn every_subcategory_maps_back_to_its_owner() {
        for main in ALL_MAIN {
            for sub in main.subcategories() {
                assert_eq!(sub.main_category(), main);
                assert!(main.allows(*sub));
            }
        }
    }

    #[test]
    fn foreign_subcategories_are_rejected() {
        assert!(!MainCategory::Essential.allows(SubCategory::Dining));
        assert!(!MainCategory::Gift.allows(SubCategory::Housing));
        assert!(!MainCategory::Incidental.allows(SubCategory::Travel));
    }
}
