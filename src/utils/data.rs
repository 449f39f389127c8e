use crate::models::MatchRecord;
use anyhow::{Context, Result};

/// Save the scraped matches as a JSON array
pub fn save_records_to_json(records: &[MatchRecord], output_file: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize match data")?;
    std::fs::write(output_file, json).context("Failed to write output file")?;
    Ok(())
}

/// Load matches from a previous scrape
pub fn load_records_from_json(output_file: &str) -> Result<Vec<MatchRecord>> {
    let json = std::fs::read_to_string(output_file).context("Failed to read output file")?;
    let records: Vec<MatchRecord> =
        serde_json::from_str(&json).context("Failed to deserialize match data")?;
    Ok(records)
}

/// Save the scraped matches to CSV, one row per match
pub fn save_records_to_csv(records: &[MatchRecord], filename: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename).context("Failed to create CSV file")?;
    for record in records {
        writer.serialize(record).context("Failed to write CSV row")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player1: &str, player2: &str) -> MatchRecord {
        MatchRecord {
            event_date: "2024-06-01 14:15".to_string(),
            event_name: format!("{} vs {}", player1, player2),
            player1: player1.to_string(),
            player2: player2.to_string(),
            player1_odds: "1.85".to_string(),
            player2_odds: "1.95".to_string(),
            tournament: "ATP Halle".to_string(),
            last_update: "2024-06-01 10:00".to_string(),
        }
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_json_output_is_array_of_flat_objects() {
        let path = temp_path("tennis_odds_output_test.json");
        let records = vec![record("A", "B"), record("C", "D")];
        save_records_to_json(&records, &path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let array = raw.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["eventName"], "C vs D");
        assert_eq!(array[0]["lastUpdate"], "2024-06-01 10:00");

        assert_eq!(load_records_from_json(&path).unwrap(), records);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_result_writes_empty_array() {
        let path = temp_path("tennis_odds_empty_test.json");
        save_records_to_json(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_csv_uses_json_field_names_as_header() {
        let path = temp_path("tennis_odds_output_test.csv");
        save_records_to_csv(&[record("A", "B")], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("eventDate,eventName,player1,player2,player1_odds,player2_odds,tournament,lastUpdate")
        );
        assert_eq!(
            lines.next(),
            Some("2024-06-01 14:15,A vs B,A,B,1.85,1.95,ATP Halle,2024-06-01 10:00")
        );
        std::fs::remove_file(&path).ok();
    }
}
