use super::CurrencyError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

const BUNDLED_CPI: &str = include_str!("../../data/cpi.csv");

/// Annual consumer price index, keyed by calendar year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpiSeries {
    index_by_year: BTreeMap<i32, f64>,
}

#[derive(Debug, Deserialize)]
struct CpiRow {
    year: i32,
    index: f64,
}

impl CpiSeries {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CurrencyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CurrencyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut index_by_year = BTreeMap::new();

        for row in csv_reader.deserialize::<CpiRow>() {
            let row = row?;
            index_by_year.insert(row.year, row.index);
        }

        Ok(Self { index_by_year })
    }

    pub fn bundled() -> Result<Self, CurrencyError> {
        Self::from_reader(BUNDLED_CPI.as_bytes())
    }

    pub fn index(&self, year: i32) -> Option<f64> {
        self.index_by_year.get(&year).copied()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.index_by_year.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_and_skips_comments() {
        let series = CpiSeries::from_reader(Cursor::new(
            "# sample\nyear,index\n2011, 95.9\n2020,103.3\n",
        ))
        .expect("series parses");
        assert_eq!(series.index(2011), Some(95.9));
        assert_eq!(series.index(2020), Some(103.3));
        assert_eq!(series.index(2005), None);
        assert_eq!(series.years().collect::<Vec<_>>(), vec![2011, 2020]);
    }

    #[test]
    fn malformed_index_is_a_csv_error() {
        let error = CpiSeries::from_reader(Cursor::new("year,index\n2011,high\n"))
            .expect_err("non numeric index");
        assert!(matches!(error, CurrencyError::CpiSeries(_)));
    }
}
