//! Embedding input assembly.
//!
//! A record's embedding input is its selected field values, in selector
//! order, skipping absent and empty values, joined by single spaces. The
//! same assembly feeds every record at index build time; query text is
//! embedded verbatim, never assembled.

use crate::model::types::{FieldSelector, Record};

/// Build the composite text for one record.
///
/// An all-absent or all-empty selection yields the empty string, which is
/// still a valid embedding input; the backend decides what vector it gets.
pub fn composite_text(record: &Record, selector: &FieldSelector) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(selector.names().len());
    for name in selector.names() {
        if let Some(value) = record.get(name)
            && !value.is_empty()
        {
            parts.push(value);
        }
    }
    parts.join(" ")
}

/// Composite texts for a whole corpus, in record order.
pub fn composite_texts(records: &[Record], selector: &FieldSelector) -> Vec<String> {
    records
        .iter()
        .map(|record| composite_text(record, selector))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn joins_selected_values_in_selector_order() {
        let r = record(&[("year", "1889"), ("title", "The Starry Night")]);
        let selector = FieldSelector::new(["title", "year"]);
        assert_eq!(composite_text(&r, &selector), "The Starry Night 1889");
    }

    #[test]
    fn skips_missing_fields() {
        let r = record(&[("title", "Sunflowers")]);
        let selector = FieldSelector::new(["title", "year", "hue"]);
        assert_eq!(composite_text(&r, &selector), "Sunflowers");
    }

    #[test]
    fn skips_empty_values() {
        let r = record(&[("title", "Sunflowers"), ("year", ""), ("hue", "yellow")]);
        let selector = FieldSelector::new(["title", "year", "hue"]);
        assert_eq!(composite_text(&r, &selector), "Sunflowers yellow");
    }

    #[test]
    fn all_missing_yields_empty_string() {
        let r = record(&[("width", "92"), ("height", "73")]);
        let selector = FieldSelector::new(["title", "year"]);
        assert_eq!(composite_text(&r, &selector), "");
    }

    #[test]
    fn empty_selector_yields_empty_string() {
        let r = record(&[("title", "Sunflowers")]);
        let selector = FieldSelector::new(Vec::<String>::new());
        assert_eq!(composite_text(&r, &selector), "");
    }

    #[test]
    fn values_kept_verbatim() {
        // internal whitespace and punctuation pass through untouched
        let r = record(&[("title", "Wheatfield  with Crows"), ("place", "Auvers-sur-Oise")]);
        let selector = FieldSelector::new(["title", "place"]);
        assert_eq!(
            composite_text(&r, &selector),
            "Wheatfield  with Crows Auvers-sur-Oise"
        );
    }

    #[test]
    fn corpus_texts_in_record_order() {
        let records = vec![
            record(&[("title", "Sunflowers"), ("year", "1888")]),
            record(&[("title", "Irises"), ("year", "1889")]),
        ];
        let selector = FieldSelector::new(["title", "year"]);
        assert_eq!(
            composite_texts(&records, &selector),
            vec!["Sunflowers 1888", "Irises 1889"]
        );
    }
}
