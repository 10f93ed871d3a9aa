use insightboard::model::{Field, Filters, Measure};
use insightboard::report::build_report;
use insightboard::source::read_json;
use insightboard::{apply_filters, group_average, group_count, unique_values, Insight};

const DATASET: &str = r#"[
    {"end_year": "", "intensity": 6, "sector": "Energy", "topic": "gas",
     "insight": "Annual Energy Outlook", "url": "http://example.com/a",
     "region": "Northern America", "start_year": "", "impact": "",
     "added": "January, 20 2017", "published": "January, 09 2017",
     "country": "United States of America", "relevance": 2,
     "pestle": "Industries", "source": "EIA", "title": "U.S. natural gas", "likelihood": 3},
    {"end_year": 2018, "intensity": 9, "sector": "Energy", "topic": "oil",
     "insight": "Oil production outlook", "url": "http://example.com/b",
     "region": "Northern America", "start_year": 2017, "impact": "",
     "added": "January, 20 2017", "published": "January, 09 2017",
     "country": "United States of America", "relevance": 4,
     "pestle": "Economic", "source": "EIA", "title": "U.S. crude oil", "likelihood": 2},
    {"end_year": "", "intensity": 3, "sector": "Government", "topic": "oil",
     "insight": "Policy brief", "url": "http://example.com/c",
     "region": "World", "start_year": "", "impact": "",
     "added": "January, 20 2017", "published": "January, 09 2017",
     "country": "", "relevance": 1,
     "pestle": "Political", "source": "sustainablebrands.com",
     "title": "Policy outlook", "likelihood": 1},
    {"end_year": "", "intensity": "", "sector": "", "topic": "gas",
     "insight": "Blank sector entry", "url": "", "region": "World",
     "start_year": "", "impact": "", "added": "", "published": "",
     "country": "", "relevance": null, "pestle": "Industries",
     "source": "EIA", "title": "Unattributed", "likelihood": 2}
]"#;

fn load_dataset() -> Vec<Insight> {
    read_json(DATASET.as_bytes()).expect("fixture parses")
}

#[test]
fn test_load_filter_aggregate_pipeline() {
    let records = load_dataset();
    assert_eq!(records.len(), 4);

    let filters = Filters {
        sector: "Energy".to_string(),
        ..Filters::default()
    };
    let filtered = apply_filters(&records, &filters);
    assert_eq!(filtered.len(), 2);

    let series = group_average(&filtered, Field::Topic, Measure::Intensity);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].name, "oil");
    assert_eq!(series[0].value, 9.0);
    assert_eq!(series[1].name, "gas");
    assert_eq!(series[1].value, 6.0);
}

#[test]
fn test_empty_selection_is_identity() {
    let records = load_dataset();
    assert_eq!(apply_filters(&records, &Filters::default()), records);
}

#[test]
fn test_blank_bucket_records_are_invisible() {
    let records = load_dataset();
    // The fourth record has a blank sector; it must not appear in sector
    // aggregations under any label.
    let averages = group_average(&records, Field::Sector, Measure::Intensity);
    let counts = group_count(&records, Field::Sector);
    assert!(averages.iter().all(|p| p.name == "Energy" || p.name == "Government"));
    assert!(counts.iter().all(|p| p.name == "Energy" || p.name == "Government"));
    assert_eq!(counts.iter().map(|p| p.value as usize).sum::<usize>(), 3);
}

#[test]
fn test_unique_values_for_filter_options() {
    let records = load_dataset();
    assert_eq!(unique_values(&records, Field::Topic), vec!["gas", "oil"]);
    assert_eq!(unique_values(&records, Field::EndYear), vec!["2018"]);
    assert_eq!(
        unique_values(&records, Field::Source),
        vec!["EIA", "sustainablebrands.com"]
    );
}

#[test]
fn test_full_report_shape() {
    let records = load_dataset();
    let report = build_report(&records, &Filters::default());

    assert_eq!(report.summary.total_records, 4);
    // (6 + 9 + 3 + 0) / 4 = 4.5
    assert_eq!(report.summary.avg_intensity, 4.5);
    assert_eq!(report.summary.avg_likelihood, 2.0);

    assert!(report.intensity_by_sector.len() <= 15);
    assert!(report.top_topics.len() <= 10);
    assert_eq!(report.top_topics[0].value, 2.0);

    // Averaging series carry counts, counting series do not
    assert!(report.intensity_by_sector.iter().all(|p| p.count.is_some()));
    assert!(report.top_countries.iter().all(|p| p.count.is_none()));
}

#[test]
fn test_filtered_report_keeps_unfiltered_options() {
    let records = load_dataset();
    let filters = Filters {
        pestle: "Political".to_string(),
        ..Filters::default()
    };
    let report = build_report(&records, &filters);
    assert_eq!(report.summary.total_records, 1);
    assert_eq!(
        report.filter_options.pestle,
        vec!["Economic", "Industries", "Political"]
    );
}

#[test]
fn test_unmatched_filter_value_yields_empty_report() {
    let records = load_dataset();
    let filters = Filters {
        country: "Atlantis".to_string(),
        ..Filters::default()
    };
    let report = build_report(&records, &filters);
    assert_eq!(report.summary.total_records, 0);
    assert_eq!(report.summary.avg_intensity, 0.0);
    assert!(report.intensity_by_sector.is_empty());
    assert!(report.top_topics.is_empty());
    // Options still reflect the full dataset
    assert!(!report.filter_options.topic.is_empty());
}

#[test]
fn test_empty_dataset_never_faults() {
    let records = read_json("[]".as_bytes()).unwrap();
    assert!(records.is_empty());
    let report = build_report(&records, &Filters::default());
    assert_eq!(report.summary.total_records, 0);
    assert!(report.top_sources.is_empty());
    assert!(report.filter_options.country.is_empty());
}
