use serde::Serialize;

use crate::aggregate::{group_average, group_count, round1, unique_values};
use crate::filter::apply_filters;
use crate::model::{Field, Filters, Insight, Measure, SeriesPoint};

/// Headline statistics over the filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_records: usize,
    pub avg_intensity: f64,
    pub avg_likelihood: f64,
    pub avg_relevance: f64,
}

/// Distinct values per filterable field, computed from the unfiltered
/// collection so the option lists stay stable while the user narrows in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub end_year: Vec<String>,
    pub topic: Vec<String>,
    pub sector: Vec<String>,
    pub region: Vec<String>,
    pub pestle: Vec<String>,
    pub source: Vec<String>,
    pub country: Vec<String>,
}

/// Everything the dashboard renders for one filter selection: the summary,
/// one series per chart, and the filter option lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: Summary,
    pub intensity_by_sector: Vec<SeriesPoint>,
    pub top_topics: Vec<SeriesPoint>,
    pub relevance_by_region: Vec<SeriesPoint>,
    pub likelihood_by_pestle: Vec<SeriesPoint>,
    pub top_countries: Vec<SeriesPoint>,
    pub top_sources: Vec<SeriesPoint>,
    pub filter_options: FilterOptions,
}

/// Mean of each score over the collection, rounded to one decimal place.
/// The empty collection yields zeros.
pub fn summarize(records: &[Insight]) -> Summary {
    let total = records.len();
    let mean = |measure: Measure| -> f64 {
        if total == 0 {
            return 0.0;
        }
        let sum: f64 = records.iter().map(|r| measure.get(r)).sum();
        round1(sum / total as f64)
    };
    Summary {
        total_records: total,
        avg_intensity: mean(Measure::Intensity),
        avg_likelihood: mean(Measure::Likelihood),
        avg_relevance: mean(Measure::Relevance),
    }
}

pub fn filter_options(records: &[Insight]) -> FilterOptions {
    FilterOptions {
        end_year: unique_values(records, Field::EndYear),
        topic: unique_values(records, Field::Topic),
        sector: unique_values(records, Field::Sector),
        region: unique_values(records, Field::Region),
        pestle: unique_values(records, Field::Pestle),
        source: unique_values(records, Field::Source),
        country: unique_values(records, Field::Country),
    }
}

/// Apply the selection and compute every chart series in one pass over the
/// dashboard's layout. Option lists come from the unfiltered input.
pub fn build_report(records: &[Insight], filters: &Filters) -> DashboardReport {
    let filtered = apply_filters(records, filters);
    DashboardReport {
        summary: summarize(&filtered),
        intensity_by_sector: group_average(&filtered, Field::Sector, Measure::Intensity),
        top_topics: group_count(&filtered, Field::Topic),
        relevance_by_region: group_average(&filtered, Field::Region, Measure::Relevance),
        likelihood_by_pestle: group_average(&filtered, Field::Pestle, Measure::Likelihood),
        top_countries: group_count(&filtered, Field::Country),
        top_sources: group_count(&filtered, Field::Source),
        filter_options: filter_options(records),
    }
}
