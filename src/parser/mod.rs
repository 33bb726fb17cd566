pub mod fields;
pub mod scan;

pub use scan::scan_page;

/// Label strings that introduce each field on a registry page.
///
/// The recognizers are brittle to upstream markup drift, so every label
/// lives here and nowhere else; the scan loop only refers to these names.
pub mod labels {
    pub const ACCREDITATION: &str = "Akredytacja:";
    pub const EXPIRY: &str = "Data ważności certyfikatu:";
    pub const CERT_START: &str = "Akredytacja od:";
    pub const ORGANIZATION: &str = "Dane organizacji:";
    pub const LABORATORY: &str = "Dane laboratorium:";
    pub const LANDLINE: &str = "Telefon:";
    pub const MOBILE: &str = "Telefon komórkowy:";
    pub const EMAIL: &str = "E-mail:";
    pub const WEBSITE: &str = "Strona www:";
    pub const RESEARCH_FIELDS: &str = "Dziedziny badań:";
    pub const RESEARCH_OBJECTS: &str = "Obiekty badań:";
}

/// Markup fragments the registry wraps values in.
pub mod markup {
    pub const PARA_OPEN: &str = "<p>";
    pub const PARA_CLOSE: &str = "</p>";
    pub const BOLD_OPEN: &str = "<strong>";
    pub const BOLD_CLOSE: &str = "</strong>";
    pub const ITEM_OPEN: &str = "<li>";
    pub const ITEM_CLOSE: &str = "</li>";
    pub const LIST_CLOSE: &str = "</ul>";
}
