use crate::data::{Cell, Dataset};
use crate::ir::ChartDatum;

/// Project every row onto a `{label, value}` pair.
///
/// The label cell is coerced to text and the value cell to a number (NaN
/// when it is not numeric). A column a row does not have reads as
/// `Cell::Missing`, so the output always has one datum per row.
pub fn map_chart_data(dataset: &Dataset, label_column: &str, value_column: &str) -> Vec<ChartDatum> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            let label = row.get(label_column).unwrap_or(&Cell::Missing).to_label();
            let value = row.get(value_column).unwrap_or(&Cell::Missing).to_number();
            ChartDatum { label, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::read_dataset;

    fn dataset(content: &str) -> Dataset {
        read_dataset(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_maps_every_row() {
        let data = dataset("region,sales,year\nNorth,10,2020\nSouth,5.5,2021\nEast,7,2022\n");
        let mapped = map_chart_data(&data, "region", "sales");
        assert_eq!(mapped.len(), data.len());
        assert_eq!(
            mapped,
            vec![
                ChartDatum::new("North", 10.0),
                ChartDatum::new("South", 5.5),
                ChartDatum::new("East", 7.0),
            ]
        );
    }

    #[test]
    fn test_numeric_label_is_stringified() {
        let data = dataset("year,sales\n2020,10\n2021,12.5\n");
        let mapped = map_chart_data(&data, "year", "sales");
        assert_eq!(mapped[0].label, "2020");
        assert_eq!(mapped[1].label, "2021");
    }

    #[test]
    fn test_text_value_becomes_nan() {
        let data = dataset("name,score\na,ten\nb,3\n");
        let mapped = map_chart_data(&data, "name", "score");
        assert!(mapped[0].value.is_nan());
        assert_eq!(mapped[1].value, 3.0);
    }

    #[test]
    fn test_missing_cells() {
        let data = dataset("name,score\n,4\nb\n");
        let mapped = map_chart_data(&data, "name", "score");
        assert_eq!(mapped[0].label, "");
        assert_eq!(mapped[0].value, 4.0);
        assert_eq!(mapped[1].label, "b");
        assert!(mapped[1].value.is_nan());
    }

    #[test]
    fn test_long_ids_keep_every_digit() {
        let data = dataset("id,v\n12345678901234567890,1\n12345678901234567891,2\n");
        let mapped = map_chart_data(&data, "id", "v");
        assert_eq!(mapped[0].label, "12345678901234567890");
        assert_eq!(mapped[1].label, "12345678901234567891");
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"[{"id":"12345678901234567890","v":1},{"id":"12345678901234567891","v":2}]"#
        );
    }

    #[test]
    fn test_same_column_for_label_and_value() {
        let data = dataset("n\n1\n2\n");
        let mapped = map_chart_data(&data, "n", "n");
        assert_eq!(mapped, vec![ChartDatum::new("1", 1.0), ChartDatum::new("2", 2.0)]);
    }
}
