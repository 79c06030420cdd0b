use crate::evaluation::{clamp_weight, parse_number, ElementLevel, MeasureEntry, ScoringInput};
use crate::rubric::{ElementKey, MslRating, StandardId, MAX_MEASURES, MIN_MEASURES};
use std::collections::HashMap;
use std::io::Read;

/// One CSV row reduced to engine input.
#[derive(Debug)]
pub(crate) struct BatchRecord {
    pub(crate) evaluation_id: String,
    pub(crate) input: ScoringInput,
}

pub(crate) fn weight_column(standard: StandardId) -> String {
    format!("pp_weight_{}", standard.code())
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<(Vec<String>, Vec<BatchRecord>), csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.to_ascii_lowercase())
        .collect();

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let cells: HashMap<&str, &str> = headers
            .iter()
            .map(String::as_str)
            .zip(row.iter())
            .filter(|(_, value)| !value.is_empty())
            .collect();
        records.push(record_from_cells(index + 1, &cells));
    }

    Ok((headers, records))
}

fn record_from_cells(row_number: usize, cells: &HashMap<&str, &str>) -> BatchRecord {
    let evaluation_id = cells
        .get("evaluation_id")
        .map(|id| id.to_string())
        .unwrap_or_else(|| format!("row-{row_number}"));

    let mut input = ScoringInput::default();
    for standard in StandardId::ordered() {
        let weight = cells
            .get(weight_column(standard).as_str())
            .map(|raw| clamp_weight(parse_number(raw)))
            .unwrap_or(0.0);
        input.pp_weights[standard.index()] = weight;
    }

    for key in ElementKey::all() {
        let level = cells
            .get(key.to_string().as_str())
            .and_then(|raw| ElementLevel::parse(raw));
        if let Some(level) = level {
            input.element_levels.insert(key, level);
        }
    }

    for slot in 1..=MAX_MEASURES {
        let weight = cells.get(format!("msl_weight_{slot}").as_str()).copied();
        let rating = cells.get(format!("msl_rating_{slot}").as_str()).copied();
        if weight.is_none() && rating.is_none() {
            continue;
        }

        input.measures.push(MeasureEntry::new(
            weight.map(|raw| clamp_weight(parse_number(raw))).unwrap_or(0.0),
            rating.and_then(|raw| raw.parse::<MslRating>().ok()),
        ));
    }
    while input.measures.len() < MIN_MEASURES {
        input.measures.push(MeasureEntry::default());
    }

    BatchRecord {
        evaluation_id,
        input,
    }
}
