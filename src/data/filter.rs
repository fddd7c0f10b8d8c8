use std::collections::BTreeSet;

use super::model::{RecordRef, Table, Universe};

// ---------------------------------------------------------------------------
// Categorical dimensions
// ---------------------------------------------------------------------------

/// The string-valued columns a user selects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    State,
    Sector,
    Employment,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::State, Dimension::Sector, Dimension::Employment];

    /// Column name in the input file.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::State => "state",
            Dimension::Sector => "sector",
            Dimension::Employment => "employed",
        }
    }

    /// Human-readable label for filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::State => "States",
            Dimension::Sector => "Sectors",
            Dimension::Employment => "Employment status",
        }
    }

    fn value<'a>(self, row: &RecordRef<'a>) -> &'a str {
        match self {
            Dimension::State => row.state,
            Dimension::Sector => row.sector,
            Dimension::Employment => row.employed,
        }
    }
}

impl Universe {
    /// Distinct values of a categorical dimension.
    pub fn values(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::State => &self.states,
            Dimension::Sector => &self.sectors,
            Dimension::Employment => &self.employment_statuses,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// Inclusive salary interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Self {
        SalaryRange { min, max }
    }

    pub fn contains(&self, salary: f64) -> bool {
        self.min <= salary && salary <= self.max
    }
}

/// User-selected constraints. Every set is an allow-list: an empty set
/// selects nothing. `FilterSpec::default()` therefore excludes every record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    pub states: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub employment_statuses: BTreeSet<String>,
    pub salary_range: SalaryRange,
    pub admission_years: BTreeSet<i32>,
}

impl FilterSpec {
    /// Everything selected: every distinct value and the full salary span.
    pub fn full(universe: &Universe) -> Self {
        let (min, max) = universe.salary_bounds.unwrap_or((0.0, 0.0));
        FilterSpec {
            states: universe.states.clone(),
            sectors: universe.sectors.clone(),
            employment_statuses: universe.employment_statuses.clone(),
            salary_range: SalaryRange::new(min, max),
            admission_years: universe.admission_years.clone(),
        }
    }

    pub fn selection(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::State => &self.states,
            Dimension::Sector => &self.sectors,
            Dimension::Employment => &self.employment_statuses,
        }
    }

    pub fn selection_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::State => &mut self.states,
            Dimension::Sector => &mut self.sectors,
            Dimension::Employment => &mut self.employment_statuses,
        }
    }

    /// A row passes only when all five predicates hold.
    pub fn matches(&self, row: &RecordRef<'_>) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.selection(dim).contains(dim.value(row)))
            && self.salary_range.contains(row.salary)
            && self.admission_years.contains(&row.admission_year)
    }
}

/// Return indices of rows that pass every predicate of `spec`, in table order.
pub fn filtered_indices(table: &Table, spec: &FilterSpec) -> Vec<usize> {
    table
        .rows()
        .enumerate()
        .filter(|(_, row)| spec.matches(row))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn table() -> Table {
        let rows = [
            ("SP", "Tecnologia", "Sim", 5000.0, 2020),
            ("SP", "Saúde", "Não", 0.0, 2021),
            ("RJ", "Tecnologia", "Sim", 3200.0, 2019),
            ("MG", "Educação", "Sim", 2500.0, 2020),
        ];
        rows.iter()
            .map(|&(state, sector, employed, salary, year)| Record {
                state: state.into(),
                sector: sector.into(),
                employed: employed.into(),
                salary,
                admission_year: year,
            })
            .collect()
    }

    #[test]
    fn full_spec_keeps_everything() {
        let t = table();
        let spec = FilterSpec::full(&t.universe());
        assert_eq!(filtered_indices(&t, &spec), vec![0, 1, 2, 3]);
    }

    #[test]
    fn default_spec_keeps_nothing() {
        assert!(filtered_indices(&table(), &FilterSpec::default()).is_empty());
    }

    #[test]
    fn empty_selection_in_one_dimension_excludes_all() {
        let t = table();
        for dim in Dimension::ALL {
            let mut spec = FilterSpec::full(&t.universe());
            spec.selection_mut(dim).clear();
            assert!(filtered_indices(&t, &spec).is_empty(), "{dim:?}");
        }
        let mut spec = FilterSpec::full(&t.universe());
        spec.admission_years.clear();
        assert!(filtered_indices(&t, &spec).is_empty());
    }

    #[test]
    fn predicates_are_combined_with_and() {
        let t = table();
        let mut spec = FilterSpec::full(&t.universe());
        spec.states = ["SP".to_string()].into();
        spec.sectors = ["Tecnologia".to_string()].into();
        assert_eq!(filtered_indices(&t, &spec), vec![0]);
    }

    #[test]
    fn salary_range_is_inclusive_on_both_ends() {
        let t = table();
        let mut spec = FilterSpec::full(&t.universe());
        spec.salary_range = SalaryRange::new(2500.0, 3200.0);
        assert_eq!(filtered_indices(&t, &spec), vec![2, 3]);

        spec.salary_range = SalaryRange::new(0.0, 0.0);
        assert_eq!(filtered_indices(&t, &spec), vec![1]);
    }

    #[test]
    fn full_spec_of_empty_universe_is_a_zero_range() {
        let spec = FilterSpec::full(&Universe::default());
        assert_eq!(spec.salary_range, SalaryRange::new(0.0, 0.0));
        assert!(spec.states.is_empty());
    }
}
