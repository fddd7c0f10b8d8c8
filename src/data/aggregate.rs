//! Filter-aggregate engine: narrows a [`Table`] with a [`FilterSpec`] and
//! computes the KPI scalars and the four chart series over the subset.
//!
//! Everything here is a pure function of its inputs. An empty subset is a
//! valid result: KPIs become `None` and every series is empty.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::filter::{FilterSpec, filtered_indices};
use super::model::Table;

/// Number of equal-width bins in the salary histogram.
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The three headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiSet {
    pub total_count: usize,
    /// `None` when the subset is empty.
    pub mean_salary: Option<f64>,
    /// Percentage in `[0, 100]`; `None` when the subset is empty.
    pub employment_rate: Option<f64>,
}

/// One histogram bucket. `lower` is inclusive; `upper` is exclusive except
/// for the last bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Chart-ready series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesSet {
    /// Mean salary per sector, highest first.
    pub salary_by_sector: Vec<(String, f64)>,
    /// Share of employed records per state, highest first.
    pub employment_rate_by_state: Vec<(String, f64)>,
    pub salary_distribution: Vec<HistogramBin>,
    /// Records per admission year, oldest year first.
    pub admissions_by_year: Vec<(i32, usize)>,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.salary_by_sector.is_empty()
            && self.employment_rate_by_state.is_empty()
            && self.salary_distribution.is_empty()
            && self.admissions_by_year.is_empty()
    }
}

/// Everything one render cycle needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregates {
    pub subset: Table,
    pub kpis: KpiSet,
    pub series: SeriesSet,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Filter `table` with `spec` and aggregate the surviving records.
pub fn apply(table: &Table, spec: &FilterSpec) -> Aggregates {
    let indices = filtered_indices(table, spec);
    let subset = table.take(&indices);
    let kpis = compute_kpis(&subset);
    let series = compute_series(&subset);
    log::debug!(
        "filtered {} of {} records",
        subset.len(),
        table.len()
    );
    Aggregates {
        subset,
        kpis,
        series,
    }
}

pub fn compute_kpis(subset: &Table) -> KpiSet {
    let total_count = subset.len();
    if total_count == 0 {
        return KpiSet::default();
    }
    let salary_sum: f64 = subset.salaries().iter().sum();
    let employed = subset.rows().filter(|r| r.is_employed()).count();
    KpiSet {
        total_count,
        mean_salary: Some(salary_sum / total_count as f64),
        employment_rate: Some(percentage(employed, total_count)),
    }
}

pub fn compute_series(subset: &Table) -> SeriesSet {
    if subset.is_empty() {
        return SeriesSet::default();
    }
    SeriesSet {
        salary_by_sector: salary_by_sector(subset),
        employment_rate_by_state: employment_rate_by_state(subset),
        salary_distribution: salary_histogram(subset.salaries(), HISTOGRAM_BINS),
        admissions_by_year: admissions_by_year(subset),
    }
}

/// Mean salary per sector, sorted by mean descending, then sector ascending.
pub fn salary_by_sector(subset: &Table) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in subset.rows() {
        let entry = groups.entry(row.sector).or_insert((0.0, 0));
        entry.0 += row.salary;
        entry.1 += 1;
    }
    let series = groups
        .into_iter()
        .map(|(sector, (sum, n))| (sector.to_string(), sum / n as f64))
        .collect();
    sort_descending(series)
}

/// Employed share per state, sorted by rate descending, then state ascending.
/// The denominator is the number of records of that state in `subset`.
pub fn employment_rate_by_state(subset: &Table) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for row in subset.rows() {
        let entry = groups.entry(row.state).or_insert((0, 0));
        if row.is_employed() {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
    let series = groups
        .into_iter()
        .map(|(state, (employed, n))| (state.to_string(), percentage(employed, n)))
        .collect();
    sort_descending(series)
}

/// Record count per admission year, ascending by year.
pub fn admissions_by_year(subset: &Table) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &year in subset.admission_years() {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Split `[min, max]` of `values` into `bins` equal-width buckets.
///
/// Returns an empty vector for empty input or `bins == 0`. When every value
/// is identical the width is zero and all values land in the first bucket.
pub fn salary_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &v in values {
        // Place by the stored edges so a value equal to a bin's `lower`
        // always lands in that bin.
        let idx = if width > 0.0 {
            histogram.partition_point(|b| b.lower <= v).saturating_sub(1)
        } else {
            0
        };
        histogram[idx].count += 1;
    }
    histogram
}

fn percentage(part: usize, whole: usize) -> f64 {
    100.0 * part as f64 / whole as f64
}

/// Stable sort by value descending. Input arrives in key order, so equal
/// values stay ordered by key ascending.
fn sort_descending(mut series: Vec<(String, f64)>) -> Vec<(String, f64)> {
    series.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(state: &str, sector: &str, employed: &str, salary: f64, year: i32) -> Record {
        Record {
            state: state.into(),
            sector: sector.into(),
            employed: employed.into(),
            salary,
            admission_year: year,
        }
    }

    #[test]
    fn histogram_spans_min_to_max_in_ten_bins() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let h = salary_histogram(&values, HISTOGRAM_BINS);
        assert_eq!(h.len(), 10);
        assert_eq!(h[0].lower, 0.0);
        assert_eq!(h[9].upper, 100.0);
        assert_eq!(h.iter().map(|b| b.count).sum::<usize>(), 101);
        // 0..=9 in the first bin, 90..=100 (max included) in the last.
        assert_eq!(h[0].count, 10);
        assert_eq!(h[9].count, 11);
    }

    #[test]
    fn value_on_a_computed_edge_lands_in_the_bin_it_opens() {
        let values = [1320.0, 1612.3, 2050.75];
        let h = salary_histogram(&values, HISTOGRAM_BINS);
        assert_eq!(h[4].lower, 1612.3);
        assert_eq!(h[4].count, 1);
        assert_eq!(h[3].count, 0);

        for &v in &values {
            let owners: Vec<usize> = (0..h.len())
                .filter(|&i| h[i].lower <= v && (v < h[i].upper || i + 1 == h.len()))
                .collect();
            assert_eq!(owners.len(), 1, "{v} owned by {owners:?}");
            assert!(h[owners[0]].count > 0);
        }
    }

    #[test]
    fn every_value_sits_inside_its_bin_edges() {
        for step in 1..200 {
            let lo = 1000.0 + step as f64 * 3.7;
            let hi = lo + step as f64 * 13.1;
            let values: Vec<f64> = (0..=20).map(|k| lo + (hi - lo) * k as f64 / 20.0).collect();
            let h = salary_histogram(&values, HISTOGRAM_BINS);
            assert_eq!(h.iter().map(|b| b.count).sum::<usize>(), values.len());

            let mut expected = vec![0; h.len()];
            for &v in &values {
                let i = (0..h.len())
                    .find(|&i| h[i].lower <= v && (v < h[i].upper || i + 1 == h.len()))
                    .unwrap();
                expected[i] += 1;
            }
            let counts: Vec<usize> = h.iter().map(|b| b.count).collect();
            assert_eq!(counts, expected, "range {lo}..{hi}");
        }
    }

    #[test]
    fn histogram_of_identical_values_uses_first_bin() {
        let h = salary_histogram(&[2500.0, 2500.0, 2500.0], HISTOGRAM_BINS);
        assert_eq!(h.len(), 10);
        assert_eq!(h[0].count, 3);
        assert!(h[1..].iter().all(|b| b.count == 0));
        assert!(h.iter().all(|b| b.lower == 2500.0 && b.upper == 2500.0));
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(salary_histogram(&[], HISTOGRAM_BINS).is_empty());
        assert!(salary_histogram(&[1.0], 0).is_empty());
    }

    #[test]
    fn equal_means_are_ordered_by_sector_name() {
        let t = Table::from_records(vec![
            rec("SP", "Saúde", "Sim", 3000.0, 2020),
            rec("SP", "Comércio", "Sim", 3000.0, 2020),
            rec("SP", "Tecnologia", "Sim", 6000.0, 2020),
        ]);
        let series = salary_by_sector(&t);
        let keys: Vec<&str> = series.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Tecnologia", "Comércio", "Saúde"]);
    }

    #[test]
    fn kpis_of_empty_subset_are_not_available() {
        let kpis = compute_kpis(&Table::default());
        assert_eq!(kpis.total_count, 0);
        assert_eq!(kpis.mean_salary, None);
        assert_eq!(kpis.employment_rate, None);
        assert!(compute_series(&Table::default()).is_empty());
    }

    #[test]
    fn only_sim_counts_as_employed() {
        let t = Table::from_records(vec![
            rec("SP", "Saúde", "Sim", 1.0, 2020),
            rec("SP", "Saúde", "sim", 1.0, 2020),
            rec("SP", "Saúde", "Não", 1.0, 2020),
            rec("SP", "Saúde", "Yes", 1.0, 2020),
        ]);
        assert_eq!(compute_kpis(&t).employment_rate, Some(25.0));
    }
}
