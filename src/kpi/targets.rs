use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::kpi::category::ProductCategory;

struct RawTargets {
    year: i32,
    cargo_yearly: i64,
    cargo_monthly: [i64; 12],
    hull_yearly: i64,
    hull_monthly: [i64; 12],
}

const BUILTIN: &[RawTargets] = &[
    RawTargets {
        year: 2024,
        cargo_yearly: 54_994_500,
        cargo_monthly: [
            4_875_100, 4_428_400, 4_640_350, 4_477_800, 4_744_300, 4_271_200,
            4_170_800, 4_374_950, 4_578_975, 4_810_400, 4_679_700, 4_942_525,
        ],
        hull_yearly: 19_129_980,
        hull_monthly: [
            1_677_450, 1_547_590, 1_625_830, 1_536_600, 1_657_780, 1_496_300,
            1_453_150, 1_520_760, 1_594_900, 1_669_200, 1_627_860, 1_722_560,
        ],
    },
    RawTargets {
        year: 2025,
        cargo_yearly: 60_494_000,
        cargo_monthly: [
            5_362_614, 4_871_250, 5_104_380, 4_925_600, 5_218_745, 4_698_310,
            4_587_920, 4_812_450, 5_036_870, 5_291_440, 5_147_660, 5_436_761,
        ],
        hull_yearly: 21_043_010,
        hull_monthly: [
            1_845_200, 1_702_350, 1_788_410, 1_690_275, 1_823_560, 1_645_930,
            1_598_470, 1_672_840, 1_754_390, 1_836_120, 1_790_650, 1_894_815,
        ],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTarget {
    pub yearly: Decimal,
    pub monthly: [Decimal; 12],
}

impl CategoryTarget {
    fn from_raw(yearly: i64, monthly: &[i64; 12]) -> Self {
        CategoryTarget {
            yearly: Decimal::from(yearly),
            monthly: (*monthly).map(Decimal::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearTargets {
    pub year: i32,
    pub cargo: CategoryTarget,
    pub hull: CategoryTarget,
}

impl YearTargets {
    pub fn category(&self, category: ProductCategory) -> &CategoryTarget {
        match category {
            ProductCategory::Cargo => &self.cargo,
            ProductCategory::Hull => &self.hull,
        }
    }
}

/// Premium production targets per known year.
#[derive(Debug, Clone)]
pub struct TargetTable {
    years: BTreeMap<i32, YearTargets>,
    default_year: i32,
}

impl TargetTable {
    /// Built-in table. Falls back to the first known year if `default_year`
    /// has no entry.
    pub fn builtin(default_year: i32) -> Self {
        let years: BTreeMap<i32, YearTargets> = BUILTIN
            .iter()
            .map(|raw| {
                let targets = YearTargets {
                    year: raw.year,
                    cargo: CategoryTarget::from_raw(raw.cargo_yearly, &raw.cargo_monthly),
                    hull: CategoryTarget::from_raw(raw.hull_yearly, &raw.hull_monthly),
                };
                (raw.year, targets)
            })
            .collect();
        let default_year = if years.contains_key(&default_year) {
            default_year
        } else {
            *years.keys().next_back().unwrap_or(&default_year)
        };
        TargetTable { years, default_year }
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn known_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    /// Targets for `year`, or the default year's when `year` is unknown.
    pub fn resolve(&self, year: i32) -> &YearTargets {
        self.years
            .get(&year)
            .or_else(|| self.years.get(&self.default_year))
            .unwrap_or_else(|| unreachable!("default year is always present"))
    }
}
