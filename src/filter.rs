use crate::model::{Filters, Insight};

/// Apply the selection to the full collection and return the surviving
/// records, in their original relative order.
///
/// Each non-empty key is an exact, case-sensitive equality constraint on the
/// corresponding record field; a record must pass every active constraint.
/// The reserved `city` key has no record counterpart and never excludes
/// anything. The input is never mutated.
pub fn apply_filters(records: &[Insight], filters: &Filters) -> Vec<Insight> {
    records
        .iter()
        .filter(|r| matches_filters(r, filters))
        .cloned()
        .collect()
}

fn matches_filters(record: &Insight, filters: &Filters) -> bool {
    if !filters.end_year.is_empty() && record.end_year != filters.end_year {
        return false;
    }
    if !filters.topic.is_empty() && record.topic != filters.topic {
        return false;
    }
    if !filters.sector.is_empty() && record.sector != filters.sector {
        return false;
    }
    if !filters.region.is_empty() && record.region != filters.region {
        return false;
    }
    if !filters.pestle.is_empty() && record.pestle != filters.pestle {
        return false;
    }
    if !filters.source.is_empty() && record.source != filters.source {
        return false;
    }
    if !filters.country.is_empty() && record.country != filters.country {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_records() -> Vec<Insight> {
        let mut a = Insight::default();
        a.id = 1;
        a.sector = "Energy".to_string();
        a.region = "World".to_string();
        a.topic = "oil".to_string();

        let mut b = Insight::default();
        b.id = 2;
        b.sector = "Energy".to_string();
        b.region = "Northern America".to_string();
        b.topic = "gas".to_string();

        let mut c = Insight::default();
        c.id = 3;
        c.sector = "Government".to_string();
        c.region = "World".to_string();
        c.topic = "oil".to_string();

        vec![a, b, c]
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let records = make_records();
        let out = apply_filters(&records, &Filters::default());
        assert_eq!(out, records);
    }

    #[test]
    fn test_single_constraint() {
        let records = make_records();
        let filters = Filters {
            sector: "Energy".to_string(),
            ..Filters::default()
        };
        let out = apply_filters(&records, &filters);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.sector == "Energy"));
    }

    #[test]
    fn test_constraints_combine_with_and() {
        let records = make_records();
        let filters = Filters {
            sector: "Energy".to_string(),
            region: "World".to_string(),
            ..Filters::default()
        };
        let out = apply_filters(&records, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn test_unmatched_value_empties_result() {
        let records = make_records();
        let filters = Filters {
            topic: "coal".to_string(),
            ..Filters::default()
        };
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let records = make_records();
        let filters = Filters {
            sector: "energy".to_string(),
            ..Filters::default()
        };
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let records = make_records();
        let filters = Filters {
            topic: "oil".to_string(),
            ..Filters::default()
        };
        let ids: Vec<i64> = apply_filters(&records, &filters).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_city_slot_is_inert() {
        let records = make_records();
        let filters = Filters {
            city: "Oslo".to_string(),
            ..Filters::default()
        };
        assert_eq!(apply_filters(&records, &filters).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let filters = Filters {
            sector: "Energy".to_string(),
            ..Filters::default()
        };
        assert!(apply_filters(&[], &filters).is_empty());
    }
}
