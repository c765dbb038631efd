//! Dataset loader
//!
//! Reads the retail transaction export into a [`TransactionTable`]. The
//! existence check runs before the reader is opened so that a missing
//! dataset is reported as such and never as a parse failure.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::{PipelineError, PipelineResult};
use crate::models::{RawTransaction, TransactionTable};

/// Header naming the category column
const COUNTRY_COLUMN: &str = "Country";

/// Load the transaction table from a CSV file
///
/// # Errors
///
/// - [`PipelineError::DatasetNotFound`] if `path` does not exist
/// - [`PipelineError::Csv`] if the file or its header cannot be read
pub fn load_transactions(path: &Path) -> PipelineResult<TransactionTable> {
    if !path.exists() {
        return Err(PipelineError::dataset_not_found(path));
    }

    let file = std::fs::File::open(path).map_err(|e| {
        PipelineError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let table = read_transactions(file)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        skipped = table.skipped_records,
        "Loaded transaction table"
    );
    Ok(table)
}

/// Read a transaction table from any CSV source
///
/// Cells that are blank or do not parse into their field type become `None`.
/// Records the reader cannot decode at all are skipped and counted.
pub fn read_transactions<R: Read>(source: R) -> PipelineResult<TransactionTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let has_country_column = reader
        .headers()?
        .iter()
        .any(|header| header == COUNTRY_COLUMN);

    let mut rows = Vec::new();
    let mut skipped_records = 0;
    for (idx, result) in reader.deserialize::<RawTransaction>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!(row = idx, error = %e, "Skipping undecodable record");
                skipped_records += 1;
            }
        }
    }

    Ok(TransactionTable {
        rows,
        has_country_column,
        skipped_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country
536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850,United Kingdom
C536379,D,Discount,-1,12/1/2010 9:41,27.50,14527,United Kingdom
536370,22728,ALARM CLOCK BAKELIKE PINK,24,12/1/2010 8:45,3.75,12583,France
";

    #[test]
    fn test_read_sample() {
        let table = read_transactions(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.has_country_column);
        assert_eq!(table.skipped_records, 0);

        let first = &table.rows[0];
        assert_eq!(first.invoice_no.as_deref(), Some("536365"));
        assert_eq!(first.quantity, Some(6));
        assert_eq!(first.unit_price, Some(2.55));
        assert_eq!(table.rows[1].quantity, Some(-1));
        assert_eq!(table.rows[2].country.as_deref(), Some("France"));
    }

    #[test]
    fn test_blank_and_invalid_cells_become_none() {
        let data = "\
InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice
536365,85123A,,six,12/1/2010 8:26,
";
        let table = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);

        let row = &table.rows[0];
        assert_eq!(row.description, None);
        assert_eq!(row.quantity, None);
        assert_eq!(row.unit_price, None);
        assert!(!table.has_country_column);
        assert_eq!(row.country, None);
    }

    #[test]
    fn test_float_formatted_quantity() {
        let data = "\
InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,Country
536365,85123A,HOLDER,6.0,12/1/2010 8:26,2.55,United Kingdom
536366,85123A,HOLDER,2.5,12/1/2010 8:28,2.55,United Kingdom
";
        let table = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].quantity, Some(6));
        assert_eq!(table.rows[1].quantity, None);

        let series = crate::services::clean_and_aggregate(&table, Some("United Kingdom")).unwrap();
        assert_eq!(series.len(), 1);
        assert!((series.values()[0] - 15.3).abs() < 1e-9);
    }

    #[test]
    fn test_short_rows_are_kept() {
        let data = "\
InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,Country
536365,85123A,HOLDER,6
";
        let table = read_transactions(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].quantity, Some(6));
        assert_eq!(table.rows[0].invoice_date, None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Online Retail.csv");

        let err = load_transactions(&path).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("retail.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let table = load_transactions(&path).unwrap();
        assert_eq!(table.len(), 3);
    }
}
