// Filename resolution - year → accident_<year>.csv.bz2

use crate::coerce::{coerce_year, IntegerLike};
use crate::error::Result;

/// Prefix shared by every yearly FARS accident file.
pub const FILE_PREFIX: &str = "accident_";

/// Extension of the compressed yearly files.
pub const FILE_EXTENSION: &str = ".csv.bz2";

/// Build the expected data filename for a year.
///
/// The year is coerced to a whole number first, so `2015`, `2015.0` and
/// `"2015"` all give `accident_2015.csv.bz2`. No I/O is performed; the file
/// may or may not exist.
///
/// # Example:
/// ```
/// use fars_analysis::make_filename;
/// assert_eq!(make_filename(2015).unwrap(), "accident_2015.csv.bz2");
/// assert_eq!(make_filename("2013").unwrap(), "accident_2013.csv.bz2");
/// ```
pub fn make_filename<Y: IntegerLike>(year: Y) -> Result<String> {
    let year = coerce_year(&year)?;
    Ok(format!("{}{}{}", FILE_PREFIX, year, FILE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarsError;

    #[test]
    fn test_make_filename_from_integer() {
        assert_eq!(make_filename(2015).unwrap(), "accident_2015.csv.bz2");
    }

    #[test]
    fn test_make_filename_from_string() {
        assert_eq!(make_filename("2013").unwrap(), "accident_2013.csv.bz2");
        assert_eq!(make_filename(String::from("2014")).unwrap(), "accident_2014.csv.bz2");
    }

    #[test]
    fn test_make_filename_truncates_floats() {
        assert_eq!(make_filename(2014.9).unwrap(), "accident_2014.csv.bz2");
    }

    #[test]
    fn test_make_filename_has_no_leading_zeros() {
        assert_eq!(make_filename("0042").unwrap(), "accident_42.csv.bz2");
    }

    #[test]
    fn test_make_filename_rejects_non_numeric_year() {
        let err = make_filename("next year").unwrap_err();
        assert!(matches!(err, FarsError::InvalidYear { .. }));
    }
}
