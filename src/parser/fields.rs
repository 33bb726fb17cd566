//! Stateless extractors for single lines of registry markup.
//!
//! Each function takes one already-located line (the scan loop has matched
//! its label or is holding a lookahead flag for it) and either produces a
//! typed value or signals absence. None of them keep state between calls.

use std::sync::LazyLock;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use regex::Regex;

use super::markup;

/// Nine digits with optional separators, optional +NN country code,
/// optionally parenthesized area code. Shared by landline and mobile.
pub static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{2}[ .-]?)?\(?\d{2,3}\)?(?:[ .-]?\d{2,3}){2,3}").unwrap()
});

/// Simplified mailbox@domain shape; intentionally not full RFC grammar.
pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// Bare domain name: label(s) + dot + 2+ letter suffix.
pub static WWW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}").unwrap());

fn after_label<'a>(line: &'a str, label: &str) -> Result<&'a str> {
    line.split_once(label)
        .map(|(_, rest)| rest)
        .ok_or_else(|| anyhow!("label {label:?} not found in line"))
}

/// True when the label is followed by nothing but markup wrappers, i.e.
/// the field is present on the page but carries no value.
pub fn is_empty_value(line: &str, label: &str) -> bool {
    match after_label(line, label) {
        Ok(rest) => strip_markup(rest).is_empty(),
        Err(_) => false,
    }
}

/// Text following `label`, with markup wrappers removed and whitespace
/// trimmed. The caller must have matched the label already.
pub fn label_value(line: &str, label: &str) -> Result<String> {
    Ok(strip_markup(after_label(line, label)?))
}

fn strip_markup(text: &str) -> String {
    let mut s = text.to_string();
    for token in [
        markup::BOLD_CLOSE,
        markup::BOLD_OPEN,
        markup::PARA_CLOSE,
        markup::PARA_OPEN,
    ] {
        s = s.replace(token, "");
    }
    s.trim().to_string()
}

/// Expiry date in its on-page DD-MM-YYYY form. Present-but-empty and
/// malformed values are both extraction errors, never empty strings.
pub fn extract_expiry(line: &str, label: &str) -> Result<String> {
    let (raw, _) = extract_date(line, label)?;
    Ok(raw)
}

/// First-certification date, reordered to YYYY-MM-DD for output.
pub fn extract_certdate(line: &str, label: &str) -> Result<String> {
    let (_, date) = extract_date(line, label)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn extract_date(line: &str, label: &str) -> Result<(String, NaiveDate)> {
    if is_empty_value(line, label) {
        bail!("no date given for {label:?}");
    }
    let raw = label_value(line, label)?;
    let date = NaiveDate::parse_from_str(&raw, "%d-%m-%Y")
        .map_err(|e| anyhow!("malformed date {raw:?} for {label:?}: {e}"))?;
    Ok((raw, date))
}

/// A certificate is valid strictly after today; one expiring today is
/// already treated as expired.
pub fn validate_expiry(expiry: NaiveDate, today: NaiveDate) -> bool {
    expiry > today
}

/// Trimmed interior of a `<p>…</p>` line. Used for all four name/address
/// fields, which share this shape and differ only by the triggering label.
pub fn paragraph_text(line: &str) -> Result<String> {
    let inner = after_label(line, markup::PARA_OPEN)?;
    let inner = inner
        .split(markup::PARA_CLOSE)
        .next()
        .unwrap_or(inner);
    Ok(inner.trim().to_string())
}

/// First substring matching `pattern`, or `""` when the line has none.
/// No match means "no contact info on file", which is a legitimate value.
pub fn extract_contact(line: &str, pattern: &Regex) -> String {
    pattern
        .find(line)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Trimmed interior of a `<li>…</li>` line, or None if the line is not a
/// list item.
pub fn list_item(line: &str) -> Option<String> {
    let inner = line.split_once(markup::ITEM_OPEN)?.1;
    let inner = inner.split(markup::ITEM_CLOSE).next().unwrap_or(inner);
    Some(inner.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::labels;

    #[test]
    fn empty_value_detected() {
        let line = "<p><strong>Akredytacja:</strong> </p>";
        assert!(is_empty_value(line, labels::ACCREDITATION));
    }

    #[test]
    fn nonempty_value_not_empty() {
        let line = "<p><strong>Akredytacja:</strong> AB 445</p>";
        assert!(!is_empty_value(line, labels::ACCREDITATION));
        assert_eq!(label_value(line, labels::ACCREDITATION).unwrap(), "AB 445");
    }

    #[test]
    fn label_value_requires_label() {
        assert!(label_value("<p>no label here</p>", labels::EXPIRY).is_err());
    }

    #[test]
    fn expiry_keeps_source_order() {
        let line = "<p><strong>Data ważności certyfikatu:</strong> 03-08-2018</p>";
        assert_eq!(extract_expiry(line, labels::EXPIRY).unwrap(), "03-08-2018");
    }

    #[test]
    fn certdate_is_reordered() {
        let line = "<p><strong>Akredytacja od:</strong> 03-08-2018</p>";
        assert_eq!(extract_certdate(line, labels::CERT_START).unwrap(), "2018-08-03");
    }

    #[test]
    fn empty_date_is_an_error() {
        let line = "<p><strong>Data ważności certyfikatu:</strong> </p>";
        assert!(extract_expiry(line, labels::EXPIRY).is_err());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let line = "<p><strong>Data ważności certyfikatu:</strong> 45-13-20XX</p>";
        assert!(extract_expiry(line, labels::EXPIRY).is_err());
    }

    #[test]
    fn expiry_strictly_after_today() {
        let today = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert!(validate_expiry(today.succ_opt().unwrap(), today));
        assert!(!validate_expiry(today, today));
        assert!(!validate_expiry(today.pred_opt().unwrap(), today));
    }

    #[test]
    fn paragraph_interior() {
        let line = "  <p>  Instytut Badawczy, ul. Polna 1  </p>";
        assert_eq!(paragraph_text(line).unwrap(), "Instytut Badawczy, ul. Polna 1");
    }

    #[test]
    fn paragraph_without_markup_is_an_error() {
        assert!(paragraph_text("Instytut Badawczy").is_err());
    }

    #[test]
    fn phone_with_noise_suffix() {
        let line = "13 432-59-23   wew.: brak   </p>";
        assert_eq!(extract_contact(line, &PHONE_RE), "13 432-59-23");
    }

    #[test]
    fn no_phone_yields_empty_string() {
        assert_eq!(extract_contact("brak danych </p>", &PHONE_RE), "");
    }

    #[test]
    fn email_shape() {
        let line = "<p>sekretariat@lab.example.pl </p>";
        assert_eq!(extract_contact(line, &EMAIL_RE), "sekretariat@lab.example.pl");
    }

    #[test]
    fn website_shape() {
        let line = "<p>www.lab-badawcze.pl</p>";
        assert_eq!(extract_contact(line, &WWW_RE), "www.lab-badawcze.pl");
    }

    #[test]
    fn list_item_interior() {
        assert_eq!(list_item("<li> Badania chemiczne </li>").unwrap(), "Badania chemiczne");
        assert!(list_item("<p>not an item</p>").is_none());
    }
}
