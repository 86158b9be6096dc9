//! CSV rendering of filtered interaction sets.
//!
//! One output row per (interaction, effect) pair; an interaction with no
//! effects still contributes exactly one row with an empty effect field.
//! The `row` column is a 1-based counter across the whole file.

use crate::db::entities::decode_list;
use crate::db::InteractionRecord;
use crate::errors::{AppError, Result};

pub const CSV_HEADER: [&str; 6] = ["row", "plant", "compound", "effect", "article", "model"];

pub fn interactions_to_csv(records: &[InteractionRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    let mut row = 0u64;
    for record in records {
        let compound = record.compound_name.as_deref().unwrap_or("");
        let effects = decode_list(&record.effects);

        if effects.is_empty() {
            row += 1;
            let row_label = row.to_string();
            writer.write_record([
                row_label.as_str(),
                record.plant_name.as_str(),
                compound,
                "",
                record.article_url.as_str(),
                record.model_name.as_str(),
            ])?;
        } else {
            for effect in &effects {
                row += 1;
                let row_label = row.to_string();
                writer.write_record([
                    row_label.as_str(),
                    record.plant_name.as_str(),
                    compound,
                    effect.as_str(),
                    record.article_url.as_str(),
                    record.model_name.as_str(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| AppError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::encode_list;

    fn record(plant: &str, compound: Option<&str>, effects: &[&str]) -> InteractionRecord {
        let effects: Vec<String> = effects.iter().map(|s| s.to_string()).collect();
        InteractionRecord {
            id: 1,
            plant_name: plant.to_string(),
            compound_name: compound.map(str::to_string),
            effects: encode_list(&effects),
            plant_parts: None,
            model_name: "gemini-2.5-flash".to_string(),
            article_title: "T".to_string(),
            article_url: "http://x".to_string(),
        }
    }

    #[test]
    fn header_is_fixed_literal() {
        let csv = interactions_to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "row,plant,compound,effect,article,model");
    }

    #[test]
    fn one_row_per_effect_with_global_counter() {
        let records = vec![
            record("Curcuma longa", Some("curcumin"), &["anti-inflammatory", "antioxidant"]),
            record("Ginkgo biloba", Some("ginkgolide"), &["neuroprotective"]),
        ];
        let csv = interactions_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,Curcuma longa,curcumin,anti-inflammatory"));
        assert!(lines[2].starts_with("2,Curcuma longa,curcumin,antioxidant"));
        // counter keeps running across interactions
        assert!(lines[3].starts_with("3,Ginkgo biloba,ginkgolide,neuroprotective"));
    }

    #[test]
    fn zero_effects_emits_one_row_with_empty_effect() {
        let csv = interactions_to_csv(&[record("Salix alba", Some("salicin"), &[])]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1,Salix alba,salicin,,http://x,gemini-2.5-flash");
    }

    #[test]
    fn missing_compound_renders_empty_field() {
        let csv = interactions_to_csv(&[record("Salix alba", None, &["analgesic"])]).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("Salix alba,,analgesic"));
    }

    #[test]
    fn values_with_delimiters_round_trip() {
        let tricky = ["contains, comma", "has \"quotes\"", "line\nbreak"];
        let csv = interactions_to_csv(&[record("Plant, the \"odd\" one", Some("a\nb"), &tricky)])
            .unwrap();

        // read it back with a standard CSV reader
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "Plant, the \"odd\" one");
        assert_eq!(&rows[0][2], "a\nb");
        assert_eq!(&rows[0][3], "contains, comma");
        assert_eq!(&rows[1][3], "has \"quotes\"");
        assert_eq!(&rows[2][3], "line\nbreak");
    }
}
