//! Graduate employability dashboard core.
//!
//! [`data::loader`] reads the record file into a [`data::model::Table`],
//! [`data::aggregate::apply`] narrows it with a [`data::filter::FilterSpec`]
//! and produces the KPIs and chart series. [`cache::DatasetCache`] memoizes
//! loads for callers that re-read the same file, and [`state`] holds the
//! UI-independent dashboard state driven by the egui front-end.

pub mod cache;
pub mod config;
pub mod data;
pub mod state;
