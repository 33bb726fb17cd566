//! Registry page addresses for accreditation numbers.

const BASE_PREFIX: &str =
    "https://www.pca.gov.pl/akredytowane-podmioty/akredytacje-aktywne/laboratoria-badawcze/AB%20";
const BASE_SUFFIX: &str = ",podmiot.html";

/// Page address for accreditation number `id`. Numbers below 1000 are
/// zero-padded to three digits, matching how the registry forms its URLs.
pub fn address_for(id: u32) -> String {
    format!("{BASE_PREFIX}{id:03}{BASE_SUFFIX}")
}

/// Canonical record number, e.g. `number_for(7) == "AB 007"`.
pub fn number_for(id: u32) -> String {
    format!("AB {id:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_digit_number() {
        assert_eq!(
            address_for(445),
            "https://www.pca.gov.pl/akredytowane-podmioty/akredytacje-aktywne/laboratoria-badawcze/AB%20445,podmiot.html"
        );
    }

    #[test]
    fn single_digit_is_zero_padded() {
        assert!(address_for(7).ends_with("AB%20007,podmiot.html"));
        assert_eq!(number_for(7), "AB 007");
    }

    #[test]
    fn four_digit_number_is_unpadded() {
        assert!(address_for(1578).ends_with("AB%201578,podmiot.html"));
        assert_eq!(number_for(1578), "AB 1578");
    }
}
