use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The only `employed` value counted as "employed" by the rate computations.
pub const EMPLOYED: &str = "Sim";

/// Column names every input file must provide (order is free).
pub const REQUIRED_COLUMNS: &[&str] = &["state", "sector", "employed", "salary", "admission_year"];

// ---------------------------------------------------------------------------
// Record – one graduate
// ---------------------------------------------------------------------------

/// One graduate's row, as read from (or written to) a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub state: String,
    pub sector: String,
    /// `"Sim"` / `"Não"` in the cleaned data set.
    pub employed: String,
    pub salary: f64,
    pub admission_year: i32,
}

/// Borrowed view of one row of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordRef<'a> {
    pub state: &'a str,
    pub sector: &'a str,
    pub employed: &'a str,
    pub salary: f64,
    pub admission_year: i32,
}

impl RecordRef<'_> {
    pub fn is_employed(&self) -> bool {
        self.employed == EMPLOYED
    }

    pub fn to_record(&self) -> Record {
        Record {
            state: self.state.to_string(),
            sector: self.sector.to_string(),
            employed: self.employed.to_string(),
            salary: self.salary,
            admission_year: self.admission_year,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded record set, stored column by column
// ---------------------------------------------------------------------------

/// Columnar, read-only record set. All columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    state: Vec<String>,
    sector: Vec<String>,
    employed: Vec<String>,
    salary: Vec<f64>,
    admission_year: Vec<i32>,
}

impl Table {
    /// Build a table from owned records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records = records.into_iter();
        let mut table = Table::with_capacity(records.size_hint().0);
        for rec in records {
            table.state.push(rec.state);
            table.sector.push(rec.sector);
            table.employed.push(rec.employed);
            table.salary.push(rec.salary);
            table.admission_year.push(rec.admission_year);
        }
        table
    }

    fn with_capacity(n: usize) -> Self {
        Table {
            state: Vec::with_capacity(n),
            sector: Vec::with_capacity(n),
            employed: Vec::with_capacity(n),
            salary: Vec::with_capacity(n),
            admission_year: Vec::with_capacity(n),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.salary.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.salary.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<RecordRef<'_>> {
        if i >= self.len() {
            return None;
        }
        Some(RecordRef {
            state: &self.state[i],
            sector: &self.sector[i],
            employed: &self.employed[i],
            salary: self.salary[i],
            admission_year: self.admission_year[i],
        })
    }

    /// Iterate over all rows in load order.
    pub fn rows(&self) -> impl Iterator<Item = RecordRef<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    pub fn states(&self) -> &[String] {
        &self.state
    }

    pub fn sectors(&self) -> &[String] {
        &self.sector
    }

    pub fn employment_statuses(&self) -> &[String] {
        &self.employed
    }

    pub fn salaries(&self) -> &[f64] {
        &self.salary
    }

    pub fn admission_years(&self) -> &[i32] {
        &self.admission_year
    }

    /// New table holding the rows at `indices`, in the given order.
    /// Out-of-range indices are skipped.
    pub fn take(&self, indices: &[usize]) -> Table {
        let mut out = Table::with_capacity(indices.len());
        for &i in indices {
            if i >= self.len() {
                continue;
            }
            out.state.push(self.state[i].clone());
            out.sector.push(self.sector[i].clone());
            out.employed.push(self.employed[i].clone());
            out.salary.push(self.salary[i]);
            out.admission_year.push(self.admission_year[i]);
        }
        out
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> Table {
        let indices: Vec<usize> = (0..n.min(self.len())).collect();
        self.take(&indices)
    }

    /// Copy every row back out as an owned [`Record`].
    pub fn to_records(&self) -> Vec<Record> {
        self.rows().map(|r| r.to_record()).collect()
    }

    /// Distinct values of every filterable column.
    pub fn universe(&self) -> Universe {
        let mut universe = Universe::default();
        for row in self.rows() {
            universe.states.insert(row.state.to_string());
            universe.sectors.insert(row.sector.to_string());
            universe.employment_statuses.insert(row.employed.to_string());
            universe.admission_years.insert(row.admission_year);
            universe.salary_bounds = Some(match universe.salary_bounds {
                Some((lo, hi)) => (lo.min(row.salary), hi.max(row.salary)),
                None => (row.salary, row.salary),
            });
        }
        universe
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Table::from_records(iter)
    }
}

// ---------------------------------------------------------------------------
// Universe – everything a filter can select
// ---------------------------------------------------------------------------

/// Sorted distinct values per column, used to offer filter options and to
/// build the "everything selected" filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Universe {
    pub states: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub employment_statuses: BTreeSet<String>,
    pub admission_years: BTreeSet<i32>,
    /// `(min, max)` salary, `None` for an empty table.
    pub salary_bounds: Option<(f64, f64)>,
}
