//! Cost-matrix loading.
//!
//! Two layouts are accepted:
//!
//! - TSPLIB (`TYPE: ATSP` or `TSP`, `EDGE_WEIGHT_TYPE: EXPLICIT`,
//!   `EDGE_WEIGHT_FORMAT: FULL_MATRIX`), values after `EDGE_WEIGHT_SECTION`.
//! - Plain: the dimension N followed by N×N row-major integers.
//!
//! Values may be split across lines arbitrarily in both layouts.

use std::path::Path;

use crate::error::ParseError;
use crate::problem::{Cost, CostMatrix};

/// Parses a matrix from text in either supported layout.
///
/// ```
/// use atsp_metaheur::io::parse_matrix;
///
/// let plain = "3\n0 1 2\n3 0 4\n5 6 0\n";
/// let tsplib = "NAME: tiny\nTYPE: ATSP\nDIMENSION: 3\nEDGE_WEIGHT_TYPE: EXPLICIT\n\
///               EDGE_WEIGHT_FORMAT: FULL_MATRIX\nEDGE_WEIGHT_SECTION\n\
///               0 1 2 3 0 4\n5 6 0\nEOF\n";
/// assert_eq!(parse_matrix(plain).unwrap(), parse_matrix(tsplib).unwrap());
/// ```
pub fn parse_matrix(text: &str) -> Result<CostMatrix, ParseError> {
    let first = text.split_whitespace().next();
    match first {
        Some(tok) if tok.parse::<usize>().is_ok() => parse_plain(text),
        _ => parse_tsplib(text),
    }
}

/// Reads and parses a matrix file.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<CostMatrix, ParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let matrix = parse_matrix(&text)?;
    tracing::debug!(path = %path.display(), n = matrix.dimension(), "loaded cost matrix");
    Ok(matrix)
}

fn parse_plain(text: &str) -> Result<CostMatrix, ParseError> {
    let mut tokens = numbered_tokens(text);
    let (line, tok) = tokens.next().ok_or(ParseError::MissingDimension)?;
    let n = parse_dimension(line, tok)?;
    let values = read_values(tokens, n)?;
    Ok(CostMatrix::from_flat(n, values)?)
}

fn parse_tsplib(text: &str) -> Result<CostMatrix, ParseError> {
    let mut dimension = None;
    let mut lines = text.lines().enumerate();

    for (idx, raw) in lines.by_ref() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("EDGE_WEIGHT_SECTION") {
            break;
        }
        if line == "EOF" {
            return Err(ParseError::UnsupportedFormat(
                "missing EDGE_WEIGHT_SECTION".into(),
            ));
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(ParseError::UnsupportedFormat(format!(
                "line {}: expected 'KEY: VALUE', got '{line}'",
                idx + 1
            )));
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "DIMENSION" => dimension = Some(parse_dimension(idx + 1, value)?),
            "TYPE" if value != "ATSP" && value != "TSP" => {
                return Err(ParseError::UnsupportedFormat(format!("TYPE {value}")));
            }
            "EDGE_WEIGHT_TYPE" if value != "EXPLICIT" => {
                return Err(ParseError::UnsupportedFormat(format!(
                    "EDGE_WEIGHT_TYPE {value}"
                )));
            }
            "EDGE_WEIGHT_FORMAT" if value != "FULL_MATRIX" => {
                return Err(ParseError::UnsupportedFormat(format!(
                    "EDGE_WEIGHT_FORMAT {value}"
                )));
            }
            _ => {}
        }
    }

    let n = dimension.ok_or(ParseError::MissingDimension)?;
    let body = lines
        .take_while(|(_, l)| l.trim() != "EOF")
        .flat_map(|(idx, l)| l.split_whitespace().map(move |t| (idx + 1, t)));
    let values = read_values(body, n)?;
    Ok(CostMatrix::from_flat(n, values)?)
}

fn numbered_tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .flat_map(|(idx, l)| l.split_whitespace().map(move |t| (idx + 1, t)))
}

fn parse_dimension(line: usize, tok: &str) -> Result<usize, ParseError> {
    tok.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: tok.to_string(),
    })
}

/// Upper bound on the up-front reservation; the declared dimension is untrusted.
const MAX_RESERVE: usize = 1 << 16;

fn read_values<'t, I>(mut tokens: I, n: usize) -> Result<Vec<Cost>, ParseError>
where
    I: Iterator<Item = (usize, &'t str)>,
{
    let expected = n.saturating_mul(n);
    let mut values = Vec::with_capacity(expected.min(MAX_RESERVE));
    for (line, tok) in tokens.by_ref().take(expected) {
        let v = tok.parse::<Cost>().map_err(|_| ParseError::InvalidNumber {
            line,
            token: tok.to_string(),
        })?;
        values.push(v);
    }
    if values.len() < expected {
        return Err(ParseError::Truncated {
            expected,
            found: values.len(),
        });
    }
    if let Some((line, tok)) = tokens.next() {
        return Err(ParseError::TrailingData {
            line,
            token: tok.to_string(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    const FTV_LIKE: &str = "NAME: tiny4
TYPE: ATSP
COMMENT: four cities
DIMENSION: 4
EDGE_WEIGHT_TYPE: EXPLICIT
EDGE_WEIGHT_FORMAT: FULL_MATRIX
EDGE_WEIGHT_SECTION
 100000000 3 8 2
 5 100000000 1 7
 4 6 100000000 9
 1 2 5 100000000
EOF
";

    #[test]
    fn test_parse_tsplib_full_matrix() {
        let m = parse_matrix(FTV_LIKE).unwrap();
        assert_eq!(m.dimension(), 4);
        assert_eq!(m.cost(0, 1), 3);
        assert_eq!(m.cost(3, 2), 5);
        assert_eq!(m.evaluate(&[0, 1, 2, 3]).unwrap(), 14);
    }

    #[test]
    fn test_parse_plain_across_lines() {
        let m = parse_matrix("2\n0 7\n3\n0").unwrap();
        assert_eq!(m.cost(0, 1), 7);
        assert_eq!(m.cost(1, 0), 3);
    }

    #[test]
    fn test_missing_dimension() {
        let text = "NAME: x\nTYPE: ATSP\nEDGE_WEIGHT_SECTION\n0 1\n1 0\nEOF\n";
        assert!(matches!(
            parse_matrix(text),
            Err(ParseError::MissingDimension)
        ));
    }

    #[test]
    fn test_unsupported_weight_format() {
        let text = "TYPE: ATSP\nDIMENSION: 3\nEDGE_WEIGHT_FORMAT: UPPER_ROW\nEDGE_WEIGHT_SECTION\n1 2 3\nEOF\n";
        assert!(matches!(
            parse_matrix(text),
            Err(ParseError::UnsupportedFormat(f)) if f.contains("UPPER_ROW")
        ));
    }

    #[test]
    fn test_truncated_body() {
        let err = parse_matrix("3\n0 1 2\n3 0 4\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Truncated {
                expected: 9,
                found: 6
            }
        ));
    }

    #[test]
    fn test_huge_plain_dimension_is_truncated() {
        assert!(matches!(
            parse_matrix("5000000000\n0 1\n1 0\n"),
            Err(ParseError::Truncated { found: 4, .. })
        ));
    }

    #[test]
    fn test_huge_tsplib_dimension_is_truncated() {
        let text = "TYPE: ATSP\nDIMENSION: 3000000\nEDGE_WEIGHT_SECTION\n0 1\n1 0\nEOF\n";
        assert!(matches!(
            parse_matrix(text),
            Err(ParseError::Truncated { found: 4, .. })
        ));
    }

    #[test]
    fn test_values_beyond_dimension_are_rejected() {
        let err = parse_matrix("2\n0 1\n1 0\n7\n").unwrap_err();
        assert!(matches!(err, ParseError::TrailingData { line: 4, ref token } if token == "7"));

        let text = "TYPE: ATSP\nDIMENSION: 2\nEDGE_WEIGHT_SECTION\n0 1 1 0 5\nEOF\n";
        assert!(matches!(
            parse_matrix(text),
            Err(ParseError::TrailingData { line: 4, .. })
        ));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse_matrix("2\n0 x\n1 0\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 2, ref token } if token == "x"));
    }

    #[test]
    fn test_matrix_validation_is_surfaced() {
        let err = parse_matrix("1\n0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Matrix(ConfigError::TooSmall { dimension: 1 })
        ));
    }

    #[test]
    fn test_load_matrix_from_file() {
        let path = std::env::temp_dir().join(format!("atsp-load-{}.atsp", std::process::id()));
        std::fs::write(&path, FTV_LIKE).unwrap();
        let m = load_matrix(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(m.dimension(), 4);
        assert!(matches!(load_matrix(&path), Err(ParseError::Io(_))));
    }
}
