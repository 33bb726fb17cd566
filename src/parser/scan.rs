//! Single-pass scan of one registry page.
//!
//! Name, address and contact values sit on the line *after* their label, so
//! the loop carries one pending expectation across each line boundary. The
//! mobile number is the exception: the registry prints it on the label's
//! own line, and that asymmetry is kept as-is.

use chrono::NaiveDate;

use crate::model::{LabRecord, Outcome};

use super::fields::{
    extract_certdate, extract_contact, extract_expiry, is_empty_value, list_item, paragraph_text,
    validate_expiry, EMAIL_RE, PHONE_RE, WWW_RE,
};
use super::{labels, markup};

/// What the next line is expected to hold, if anything. One value instead
/// of a flag per field, so two expectations can never be armed at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    OrgName,
    OrgAddress,
    LabName,
    LabAddress,
    Phone,
    Email,
    Website,
    FieldsList,
    ObjectsList,
}

#[derive(Default)]
struct Draft {
    certdate: Option<String>,
    org_name: Option<String>,
    org_address: Option<String>,
    lab_name: Option<String>,
    lab_address: Option<String>,
    phone: Option<String>,
    cellphone: Option<String>,
    email: Option<String>,
    www: Option<String>,
    research_fields: Option<Vec<String>>,
    research_objects: Option<Vec<String>>,
}

impl Draft {
    /// Promote to a record once every mandatory field has been assigned.
    /// Contact fields may hold `""` but must have been visited; the list
    /// sections are optional and default to empty.
    fn finish(self, number: String) -> Option<LabRecord> {
        Some(LabRecord {
            number,
            certdate: self.certdate?,
            org_name: self.org_name?,
            org_address: self.org_address?,
            lab_name: self.lab_name?,
            lab_address: self.lab_address?,
            phone: self.phone?,
            cellphone: self.cellphone?,
            email: self.email?,
            www: self.www?,
            research_fields: self.research_fields.unwrap_or_default(),
            research_objects: self.research_objects.unwrap_or_default(),
        })
    }
}

/// Scan a page's full text into exactly one [`Outcome`].
///
/// `today` anchors the expiry gate; the collector passes the current date.
/// The loop tests each trimmed line against an ordered trigger chain,
/// first match wins, no backtracking.
pub fn scan_page(number: &str, contents: &str, today: NaiveDate) -> Outcome {
    let mut draft = Draft::default();
    let mut pending = Pending::Idle;

    for line in contents.lines() {
        let line = line.trim();

        if line.contains(labels::ACCREDITATION) {
            // Unissued numbers still render the page template, with an
            // empty accreditation field.
            if is_empty_value(line, labels::ACCREDITATION) {
                return Outcome::Absent;
            }
        } else if line.contains(labels::EXPIRY) {
            // Unparsable or missing expiry means "no usable record", the
            // same terminal state as an expired certificate.
            let valid = extract_expiry(line, labels::EXPIRY)
                .ok()
                .and_then(|raw| NaiveDate::parse_from_str(&raw, "%d-%m-%Y").ok())
                .is_some_and(|date| validate_expiry(date, today));
            if !valid {
                return Outcome::Absent;
            }
        } else if line.contains(labels::CERT_START) {
            // Past the expiry gate the page is substantive, so a bad date
            // here is layout drift, not an unissued number.
            match extract_certdate(line, labels::CERT_START) {
                Ok(date) => draft.certdate = Some(date),
                Err(e) => return Outcome::Failed(e.to_string()),
            }
        } else if line.contains(labels::ORGANIZATION) {
            pending = Pending::OrgName;
        } else if pending == Pending::OrgName {
            match paragraph_text(line) {
                Ok(text) => draft.org_name = Some(text),
                Err(e) => return Outcome::Failed(e.to_string()),
            }
            pending = Pending::OrgAddress;
        } else if pending == Pending::OrgAddress {
            match paragraph_text(line) {
                Ok(text) => draft.org_address = Some(text),
                Err(e) => return Outcome::Failed(e.to_string()),
            }
            pending = Pending::Idle;
        } else if line.contains(labels::LABORATORY) {
            pending = Pending::LabName;
        } else if pending == Pending::LabName {
            match paragraph_text(line) {
                Ok(text) => draft.lab_name = Some(text),
                Err(e) => return Outcome::Failed(e.to_string()),
            }
            pending = Pending::LabAddress;
        } else if pending == Pending::LabAddress {
            match paragraph_text(line) {
                Ok(text) => draft.lab_address = Some(text),
                Err(e) => return Outcome::Failed(e.to_string()),
            }
            pending = Pending::Idle;
        } else if line.contains(labels::MOBILE) {
            // Same number shape as the landline, but printed on the label
            // line itself rather than the next one.
            draft.cellphone = Some(extract_contact(line, &PHONE_RE));
        } else if line.contains(labels::LANDLINE) {
            pending = Pending::Phone;
        } else if pending == Pending::Phone {
            draft.phone = Some(extract_contact(line, &PHONE_RE));
            pending = Pending::Idle;
        } else if line.contains(labels::EMAIL) {
            pending = Pending::Email;
        } else if pending == Pending::Email {
            draft.email = Some(extract_contact(line, &EMAIL_RE));
            pending = Pending::Idle;
        } else if line.contains(labels::WEBSITE) {
            pending = Pending::Website;
        } else if pending == Pending::Website {
            draft.www = Some(extract_contact(line, &WWW_RE));
            pending = Pending::Idle;
        } else if line.contains(labels::RESEARCH_FIELDS) {
            draft.research_fields = Some(Vec::new());
            pending = Pending::FieldsList;
        } else if line.contains(labels::RESEARCH_OBJECTS) {
            draft.research_objects = Some(Vec::new());
            pending = Pending::ObjectsList;
        } else if pending == Pending::FieldsList {
            if let (Some(item), Some(list)) = (list_item(line), draft.research_fields.as_mut()) {
                list.push(item);
            }
        } else if pending == Pending::ObjectsList {
            if let (Some(item), Some(list)) = (list_item(line), draft.research_objects.as_mut()) {
                list.push(item);
            } else if line.contains(markup::LIST_CLOSE) {
                // Everything after the closing marker is boilerplate.
                break;
            }
        }
    }

    match draft.finish(number.to_string()) {
        Some(record) => Outcome::Record(Box::new(record)),
        None => Outcome::Failed("page not parsable".to_string()),
    }
}
