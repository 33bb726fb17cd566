//! Writers for the collected records: JSON, `|`-delimited table, XLSX.
//!
//! The flat formats have no list type, so the two research lists are
//! joined with `" :: "` there; JSON keeps them as arrays.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::LabRecord;

pub const COL_HEADERS: [&str; 12] = [
    "number",
    "certdate",
    "org_name",
    "org_address",
    "lab_name",
    "lab_address",
    "phone",
    "cellphone",
    "email",
    "www",
    "research_fields",
    "research_objects",
];

const LIST_DELIMITER: &str = " :: ";

#[derive(Serialize, Deserialize)]
struct LabFile {
    labs: Vec<LabRecord>,
}

/// One record as a flat row in header-column order.
fn flat_row(record: &LabRecord) -> [String; 12] {
    [
        record.number.clone(),
        record.certdate.clone(),
        record.org_name.clone(),
        record.org_address.clone(),
        record.lab_name.clone(),
        record.lab_address.clone(),
        record.phone.clone(),
        record.cellphone.clone(),
        record.email.clone(),
        record.www.clone(),
        record.research_fields.join(LIST_DELIMITER),
        record.research_objects.join(LIST_DELIMITER),
    ]
}

/// JSON document with the record array under the single key "labs".
pub fn write_json(records: &[LabRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer(
        file,
        &LabFile {
            labs: records.to_vec(),
        },
    )?;
    Ok(())
}

/// Load records previously written by [`write_json`].
pub fn load_json(path: &Path) -> Result<Vec<LabRecord>> {
    let file = File::open(path)?;
    let parsed: LabFile = serde_json::from_reader(file)?;
    Ok(parsed.labs)
}

/// `|`-delimited table with a fixed header row.
pub fn write_table(records: &[LabRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'|').from_path(path)?;
    writer.write_record(COL_HEADERS)?;
    for record in records {
        writer.write_record(flat_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Workbook with one "labs" sheet: header row plus one row per record.
pub fn write_sheet(records: &[LabRecord], path: &Path) -> Result<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("labs")?;
    for (col, header) in COL_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in flat_row(record).iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, value.as_str())?;
        }
    }
    workbook.save(path)?;
    Ok(())
}
