use serde::{Deserialize, Serialize};

/// One accredited research laboratory, as extracted from its registry page.
///
/// Field order matches the export column order. Contact fields hold `""`
/// when the page lists no value; the list fields default to empty when
/// their section is missing from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRecord {
    /// Canonical accreditation number, e.g. "AB 445" (zero-padded below 1000).
    pub number: String,
    /// First certification date, reordered to YYYY-MM-DD.
    pub certdate: String,
    pub org_name: String,
    pub org_address: String,
    pub lab_name: String,
    pub lab_address: String,
    pub phone: String,
    pub cellphone: String,
    pub email: String,
    pub www: String,
    pub research_fields: Vec<String>,
    pub research_objects: Vec<String>,
}

/// Result of scanning one registry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page describes a laboratory with a currently valid certificate.
    Record(Box<LabRecord>),
    /// No usable record: unissued number, or the certificate is expired or
    /// its expiry field is unparsable. Callers skip these silently.
    Absent,
    /// The page passed the accreditation gate but a mandatory field was
    /// never captured. Indicates layout drift; must be surfaced, not dropped.
    Failed(String),
}
