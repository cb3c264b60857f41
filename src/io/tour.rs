//! Tour persistence as whitespace-separated vertex ids.

use std::path::Path;

use crate::error::ParseError;
use crate::problem::Tour;

/// Formats a tour as `v0 v1 ... vn-1`.
pub fn format_tour(tour: &Tour) -> String {
    tour.as_slice()
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses whitespace-separated vertex ids into a tour over `dimension` vertices.
pub fn parse_tour(text: &str, dimension: usize) -> Result<Tour, ParseError> {
    let mut vertices = Vec::with_capacity(dimension);
    for (idx, line) in text.lines().enumerate() {
        for tok in line.split_whitespace() {
            let v = tok.parse::<usize>().map_err(|_| ParseError::InvalidNumber {
                line: idx + 1,
                token: tok.to_string(),
            })?;
            vertices.push(v);
        }
    }
    Ok(Tour::for_dimension(vertices, dimension)?)
}

/// Writes a tour to `path`, followed by a newline.
pub fn save_tour<P: AsRef<Path>>(path: P, tour: &Tour) -> Result<(), ParseError> {
    let path = path.as_ref();
    let mut text = format_tour(tour);
    text.push('\n');
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), n = tour.as_slice().len(), "saved tour");
    Ok(())
}

/// Reads a tour previously written by [`save_tour`].
pub fn load_tour<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Tour, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_tour(&text, dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_format_tour() {
        let tour = Tour::new(vec![2, 0, 3, 1]).unwrap();
        assert_eq!(format_tour(&tour), "2 0 3 1");
    }

    #[test]
    fn test_parse_tour_accepts_trailing_space_and_newlines() {
        let tour = parse_tour("2 0 \n3 1 \n", 4).unwrap();
        assert_eq!(tour.as_slice(), &[2, 0, 3, 1]);
    }

    #[test]
    fn test_parse_tour_rejects_non_permutation() {
        let err = parse_tour("0 1 1", 3).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Tour(ValidationError::Duplicate { vertex: 1 })
        ));
        let err = parse_tour("0 1", 3).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Tour(ValidationError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_parse_tour_rejects_negative_ids() {
        assert!(matches!(
            parse_tour("0 -1 2", 3),
            Err(ParseError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn test_save_and_load_tour() {
        let path = std::env::temp_dir().join(format!("atsp-tour-{}.txt", std::process::id()));
        let tour = Tour::new(vec![4, 1, 0, 3, 2]).unwrap();
        save_tour(&path, &tour).unwrap();
        let loaded = load_tour(&path, 5).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, tour);
    }
}
