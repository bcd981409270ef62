//! In-memory state of the displayed city list.

use weather_core::WeatherRecord;

/// Ordered list of weather records as shown to the user.
///
/// A search result replaces the existing entry for the same city (matched
/// case-insensitively) in place, otherwise it is prepended. A failed call
/// never touches the board; the caller decides how to surface the error.
#[derive(Debug, Default)]
pub struct Dashboard {
    records: Vec<WeatherRecord>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a fresh batch, e.g. the default-cities refresh.
    pub fn replace_all(&mut self, records: Vec<WeatherRecord>) {
        self.records = records;
    }

    /// Replace-if-present, else prepend.
    pub fn upsert(&mut self, record: WeatherRecord) {
        match self
            .records
            .iter()
            .position(|r| r.city.eq_ignore_ascii_case(&record.city))
        {
            Some(index) => self.records[index] = record,
            None => self.records.insert(0, record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::Coordinates;

    fn record(city: &str, temperature: i32) -> WeatherRecord {
        WeatherRecord {
            id: 1,
            city: city.to_string(),
            country: "XX".to_string(),
            temperature,
            feels_like: temperature,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            humidity: 50,
            wind_speed: 1.0,
            pressure: 1013,
            visibility: None,
            coordinates: Coordinates { lat: 0.0, lon: 0.0 },
        }
    }

    #[test]
    fn upsert_replaces_existing_city_in_place() {
        let mut board = Dashboard::new();
        board.replace_all(vec![record("London", 18), record("Tokyo", 24)]);

        board.upsert(record("london", 11));

        assert_eq!(board.records().len(), 2);
        assert_eq!(board.records()[0].city, "london");
        assert_eq!(board.records()[0].temperature, 11);
        assert_eq!(board.records()[1].city, "Tokyo");
    }

    #[test]
    fn upsert_prepends_unknown_city() {
        let mut board = Dashboard::new();
        board.replace_all(vec![record("London", 18)]);

        board.upsert(record("Berlin", 15));

        let cities: Vec<_> = board.records().iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Berlin", "London"]);
    }

    #[test]
    fn repeated_search_for_the_same_city_does_not_duplicate() {
        let mut board = Dashboard::new();
        board.upsert(record("London", 18));
        board.upsert(record("London", 19));

        assert_eq!(board.records().len(), 1);
        assert_eq!(board.records()[0].temperature, 19);
    }

    #[test]
    fn replace_all_swaps_the_whole_board() {
        let mut board = Dashboard::new();
        board.replace_all(vec![record("London", 18)]);
        board.replace_all(vec![record("Paris", 21), record("Dubai", 35)]);

        assert_eq!(board.records().len(), 2);
        assert_eq!(board.records()[0].city, "Paris");
    }
}
