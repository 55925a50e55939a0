//! Projects a cleaned table onto the three fields of the report.
use crate::spreadsheet::{Table, Value};
use thiserror::Error;

pub const NAME_COLUMN: &str = "NOME";
pub const TAX_ID_COLUMN: &str = "CPF";
pub const NET_AMOUNT_COLUMN: &str = "LIQUIDO";

#[derive(Error, Debug)]
pub enum SelectError {
    /// Expected columns are absent after normalization
    #[error("Missing column(s) {} (available columns: {})", .missing.join(", "), .available.join(", "))]
    MissingColumn {
        missing: Vec<&'static str>,
        available: Vec<String>,
    },
}

/// One payroll line of the report.
#[derive(Clone, Debug, PartialEq)]
pub struct PayrollRecord {
    pub name: Value,
    pub tax_id: Value,
    pub net_amount: Value,
}

/// Extracts `NOME`, `CPF` and `LIQUIDO` from every row, in row order.
///
/// # Errors
///
/// Returns [`SelectError::MissingColumn`] if any of the three columns does not exist.
pub fn select(table: &Table) -> Result<Vec<PayrollRecord>, SelectError> {
    let wanted = [NAME_COLUMN, TAX_ID_COLUMN, NET_AMOUNT_COLUMN];
    let indexes: Vec<Option<usize>> = wanted.iter().map(|name| table.column_index(name)).collect();

    let missing: Vec<&'static str> = wanted
        .iter()
        .zip(indexes.iter())
        .filter(|(_, index)| index.is_none())
        .map(|(name, _)| *name)
        .collect();
    let (name, tax_id, net_amount) = match indexes.as_slice() {
        [Some(name), Some(tax_id), Some(net_amount)] => (*name, *tax_id, *net_amount),
        _ => {
            return Err(SelectError::MissingColumn {
                missing,
                available: table.column_names().into_iter().map(str::to_owned).collect(),
            })
        }
    };

    let records: Vec<PayrollRecord> = table
        .rows()
        .iter()
        .map(|row| PayrollRecord {
            name: row[name].clone(),
            tax_id: row[tax_id].clone(),
            net_amount: row[net_amount].clone(),
        })
        .collect();

    tracing::info!("Columns selected: {:?}", wanted);
    Ok(records)
}
