//! Line range arguments such as `2:5`, `:30`, `40:` or `7`.

use std::fmt;
use std::str::FromStr;

use crate::command::CommandError;

/// A possibly open-ended inclusive line range.
///
/// Missing bounds resolve to the first and last line of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSpec {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RangeSpec {
    /// The whole document.
    pub fn all() -> Self {
        RangeSpec::default()
    }

    pub fn single(line: usize) -> Self {
        RangeSpec {
            start: Some(line),
            end: Some(line),
        }
    }

    pub fn bounded(start: usize, end: usize) -> Self {
        RangeSpec {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Concrete `(start, end)` for a buffer with `num_lines` lines.
    ///
    /// ```
    /// use xvedit_core::RangeSpec;
    ///
    /// let range: RangeSpec = "40:".parse().unwrap();
    /// assert_eq!(range.resolve(55), (40, 55));
    /// ```
    pub fn resolve(&self, num_lines: usize) -> (usize, usize) {
        (self.start.unwrap_or(1), self.end.unwrap_or(num_lines))
    }
}

impl FromStr for RangeSpec {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(RangeSpec::all());
        }

        let bound = |part: &str| -> Result<Option<usize>, CommandError> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse::<usize>()
                .map(Some)
                .map_err(|_| CommandError::InvalidRange(trimmed.to_string()))
        };

        match trimmed.split_once(':') {
            Some((start, end)) => Ok(RangeSpec {
                start: bound(start)?,
                end: bound(end)?,
            }),
            None => match bound(trimmed)? {
                Some(line) => Ok(RangeSpec::single(line)),
                None => Ok(RangeSpec::all()),
            },
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start == end => write!(f, "{start}"),
            (start, end) => {
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                write!(f, ":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("".parse::<RangeSpec>().unwrap(), RangeSpec::all());
        assert_eq!(":".parse::<RangeSpec>().unwrap(), RangeSpec::all());
        assert_eq!("1:20".parse::<RangeSpec>().unwrap(), RangeSpec::bounded(1, 20));
        assert_eq!(
            ":30".parse::<RangeSpec>().unwrap(),
            RangeSpec {
                start: None,
                end: Some(30)
            }
        );
        assert_eq!(
            "40:".parse::<RangeSpec>().unwrap(),
            RangeSpec {
                start: Some(40),
                end: None
            }
        );
        assert_eq!("12".parse::<RangeSpec>().unwrap(), RangeSpec::single(12));
        assert_eq!(" 2 : 5 ".parse::<RangeSpec>().unwrap(), RangeSpec::bounded(2, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = "a:b".parse::<RangeSpec>();
        assert_eq!(result, Err(CommandError::InvalidRange("a:b".to_string())));

        assert!("1:2:3".parse::<RangeSpec>().is_err());
        assert!("-1".parse::<RangeSpec>().is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(RangeSpec::all().resolve(7), (1, 7));
        assert_eq!(":3".parse::<RangeSpec>().unwrap().resolve(7), (1, 3));
        assert_eq!("5:".parse::<RangeSpec>().unwrap().resolve(7), (5, 7));
        assert_eq!(RangeSpec::single(9).resolve(7), (9, 9));
        assert_eq!(RangeSpec::all().resolve(0), (1, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(RangeSpec::all().to_string(), ":");
        assert_eq!(RangeSpec::single(4).to_string(), "4");
        assert_eq!(RangeSpec::bounded(2, 5).to_string(), "2:5");
        assert_eq!("7:".parse::<RangeSpec>().unwrap().to_string(), "7:");
    }
}
