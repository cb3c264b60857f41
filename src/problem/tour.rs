//! Validated tour representation.

use crate::error::ValidationError;

/// A closed tour: a permutation of `0..n`, where the last vertex connects
/// back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps `vertices` after checking it is a permutation of `0..vertices.len()`.
    pub fn new(vertices: Vec<usize>) -> Result<Self, ValidationError> {
        Self::check(&vertices, vertices.len())?;
        Ok(Self(vertices))
    }

    /// Like [`Tour::new`], but also requires exactly `dimension` vertices.
    pub fn for_dimension(vertices: Vec<usize>, dimension: usize) -> Result<Self, ValidationError> {
        Self::check(&vertices, dimension)?;
        Ok(Self(vertices))
    }

    pub(crate) fn from_vec_unchecked(vertices: Vec<usize>) -> Self {
        debug_assert!(Self::check(&vertices, vertices.len()).is_ok());
        Self(vertices)
    }

    /// Checks that `vertices` is a permutation of `0..dimension`.
    pub fn check(vertices: &[usize], dimension: usize) -> Result<(), ValidationError> {
        if vertices.len() != dimension {
            return Err(ValidationError::WrongLength {
                expected: dimension,
                actual: vertices.len(),
            });
        }
        let mut seen = vec![false; dimension];
        for &v in vertices {
            if v >= dimension {
                return Err(ValidationError::OutOfRange {
                    vertex: v,
                    dimension,
                });
            }
            if std::mem::replace(&mut seen[v], true) {
                return Err(ValidationError::Duplicate { vertex: v });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// The same cycle, started at `vertex`. Returns `None` if `vertex` is not
    /// in the tour.
    pub fn rotated_to(&self, vertex: usize) -> Option<Tour> {
        let pos = self.0.iter().position(|&v| v == vertex)?;
        let mut rotated = self.0.clone();
        rotated.rotate_left(pos);
        Some(Tour(rotated))
    }

    /// The cycle traversed in the opposite direction.
    pub fn reversed(&self) -> Tour {
        let mut rev = self.0.clone();
        rev.reverse();
        Tour(rev)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = ValidationError;

    fn try_from(vertices: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(t: Tour) -> Self {
        t.0
    }
}
