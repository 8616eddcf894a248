//! Unit-of-measure inference
//!
//! The Polish layout prints a unit column (J.m.) that the data model does
//! not carry. The unit is inferred from the line description with a keyword
//! heuristic. This is a display heuristic, not a business rule: anything
//! that does not mention hours renders as pieces.

/// Unit of measure printed in the Polish items table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOfMeasure {
    /// Hours ("godz.")
    Hour,
    /// Pieces ("szt.")
    Piece,
}

impl UnitOfMeasure {
    /// Returns the Polish abbreviation printed in the J.m. column
    pub fn polish_abbrev(&self) -> &'static str {
        match self {
            UnitOfMeasure::Hour => "godz.",
            UnitOfMeasure::Piece => "szt.",
        }
    }
}

/// Infers the unit of measure from a line-item description.
///
/// Descriptions containing an hours keyword (Polish "godzin", English
/// "hour") map to [`UnitOfMeasure::Hour`]; everything else maps to
/// [`UnitOfMeasure::Piece`].
pub fn infer_unit(description: &str) -> UnitOfMeasure {
    let lowered = description.to_lowercase();
    if lowered.contains("godzin") || lowered.contains("hour") {
        UnitOfMeasure::Hour
    } else {
        UnitOfMeasure::Piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_hours_keyword() {
        assert_eq!(infer_unit("Development hours"), UnitOfMeasure::Hour);
        assert_eq!(infer_unit("Billable HOURS for May"), UnitOfMeasure::Hour);
    }

    #[test]
    fn test_polish_hours_keyword() {
        assert_eq!(infer_unit("Przepracowane godziny"), UnitOfMeasure::Hour);
        assert_eq!(infer_unit("5 godzin konsultacji"), UnitOfMeasure::Hour);
    }

    #[test]
    fn test_everything_else_is_pieces() {
        assert_eq!(infer_unit("Consulting services"), UnitOfMeasure::Piece);
        assert_eq!(infer_unit("Licencja roczna"), UnitOfMeasure::Piece);
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(UnitOfMeasure::Hour.polish_abbrev(), "godz.");
        assert_eq!(UnitOfMeasure::Piece.polish_abbrev(), "szt.");
    }
}
