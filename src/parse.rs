use crate::error::{Error, ParseError};
use crate::ProblemData;

impl ProblemData<i64, usize> {
    /// Reads an exact cover problem over the integers from text.
    ///
    /// The universe is a list of integers separated by commas, such as
    /// `"1,2,3,4"`. The collection is a list of subsets separated by
    /// semicolons, each of which is in turn a list of integers separated by
    /// commas, such as `"1,3;2,4"`. Whitespace around the numbers is
    /// ignored. The subsets are identified by their positions in the
    /// collection, starting from 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_cover_solver::{Algorithm, ProblemData};
    ///
    /// let problem = ProblemData::parse("1, 2, 3, 4", "1,3; 2,4; 1,2")?;
    /// assert_eq!(problem.subset(&1), Some(&[2, 4][..]));
    ///
    /// let solutions = exact_cover_solver::solve(&problem, Algorithm::DancingLinks);
    /// assert_eq!(solutions.len(), 1);
    /// assert_eq!(solutions[0].canonical(), [0, 1]);
    /// # Ok::<(), exact_cover_solver::Error>(())
    /// ```
    pub fn parse(universe: &str, collection: &str) -> Result<Self, Error> {
        let elements = parse_list(universe).map_err(|token| ParseError::Universe {
            input: universe.to_owned(),
            token,
        })?;
        let subsets = collection
            .split(';')
            .map(parse_list)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|token| ParseError::Subset {
                input: collection.to_owned(),
                token,
            })?;
        Ok(ProblemData::new(elements, subsets.into_iter().enumerate())?)
    }
}

/// Parses a comma-separated list of integers, returning the offending token
/// if one of them is not an integer.
fn parse_list(list: &str) -> Result<Vec<i64>, String> {
    list.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse().map_err(|_| token.to_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvalidInput;

    #[test]
    fn parses_universe_and_collection() {
        let problem = ProblemData::parse("1,2,3,4,5", " 1, 2 ;3,4;5 ;1,2,3 ").unwrap();
        assert_eq!(problem.universe(), &[1, 2, 3, 4, 5]);
        let subsets: Vec<_> = problem.subsets().collect();
        assert_eq!(
            subsets,
            [
                (&0, &[1, 2][..]),
                (&1, &[3, 4][..]),
                (&2, &[5][..]),
                (&3, &[1, 2, 3][..])
            ]
        );
    }

    #[test]
    fn accepts_negative_numbers() {
        let problem = ProblemData::parse("-1,0,1", "-1,1;0").unwrap();
        assert_eq!(problem.subset(&0), Some(&[-1, 1][..]));
    }

    #[test]
    fn rejects_malformed_universe() {
        assert_eq!(
            ProblemData::parse("1,2,x", "1").unwrap_err(),
            Error::Parse(ParseError::Universe {
                input: "1,2,x".to_owned(),
                token: "x".to_owned(),
            })
        );
        assert_eq!(
            ProblemData::parse("", "1").unwrap_err(),
            Error::Parse(ParseError::Universe {
                input: String::new(),
                token: String::new(),
            })
        );
    }

    #[test]
    fn rejects_malformed_collection() {
        assert_eq!(
            ProblemData::parse("1,2", "1;2 3").unwrap_err(),
            Error::Parse(ParseError::Subset {
                input: "1;2 3".to_owned(),
                token: "2 3".to_owned(),
            })
        );
        // A trailing separator leaves an empty subset behind.
        assert!(matches!(
            ProblemData::parse("1,2", "1;2;").unwrap_err(),
            Error::Parse(ParseError::Subset { .. })
        ));
    }

    #[test]
    fn validates_parsed_problem() {
        assert_eq!(
            ProblemData::parse("1,2,2", "1").unwrap_err(),
            Error::InvalidInput(InvalidInput::DuplicateElement { position: 2 })
        );
        assert_eq!(
            ProblemData::parse("1,2", "1;3").unwrap_err(),
            Error::InvalidInput(InvalidInput::UnknownElement {
                subset: 1,
                position: 0
            })
        );
    }
}
