//! Unit-of-measure codes for document lines.
//!
//! Provides a lookup of the unit codes Italian ERPs conventionally
//! preload for sales and transport documents. The set is the working
//! vocabulary, not an official registry; codes are uppercase.

/// Check whether `code` is a known unit-of-measure code.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Sorted list of unit codes accepted on document lines.
/// Sorted for binary search.
static UNIT_CODES: &[&str] = &[
    "BC", // Bancale (pallet)
    "CF", // Confezione
    "CM", // Centimetro
    "CP", // Coppia
    "CT", // Cartone
    "FL", // Flacone
    "GG", // Giorno
    "GR", // Grammo
    "H",  // Ora
    "KG", // Chilogrammo
    "KM", // Chilometro
    "LT", // Litro
    "MC", // Metro cubo
    "ML", // Metro lineare
    "MQ", // Metro quadrato
    "MT", // Metro
    "NR", // Numero
    "PA", // Paio
    "PZ", // Pezzo
    "QL", // Quintale
    "RT", // Rotolo
    "SC", // Scatola
    "TN", // Tonnellata
];
