use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which course field the search text is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchOption {
    #[default]
    #[serde(rename = "1")]
    CourseCode,
    #[serde(rename = "2")]
    CourseName,
}

impl SearchOption {
    pub const ALL: [SearchOption; 2] = [SearchOption::CourseCode, SearchOption::CourseName];

    /// Positional argument understood by the downloader script.
    pub fn as_arg(self) -> &'static str {
        match self {
            SearchOption::CourseCode => "1",
            SearchOption::CourseName => "2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchOption::CourseCode => "Course Code",
            SearchOption::CourseName => "Course Name",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SearchOption::CourseCode => "Enter Course Code",
            SearchOption::CourseName => "Enter Course Name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExamFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "MST")]
    Mst,
    #[serde(rename = "EST")]
    Est,
    #[serde(rename = "AUX")]
    Aux,
}

impl ExamFilter {
    pub const ALL: [ExamFilter; 4] = [
        ExamFilter::All,
        ExamFilter::Mst,
        ExamFilter::Est,
        ExamFilter::Aux,
    ];

    pub fn as_arg(self) -> &'static str {
        match self {
            ExamFilter::All => "all",
            ExamFilter::Mst => "MST",
            ExamFilter::Est => "EST",
            ExamFilter::Aux => "AUX",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExamFilter::All => "All Types",
            ExamFilter::Mst => "MST Only",
            ExamFilter::Est => "EST Only",
            ExamFilter::Aux => "AUX Only",
        }
    }
}

impl fmt::Display for ExamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown exam filter '{0}' (expected all, MST, EST or AUX)")]
pub struct UnknownExamFilter(pub String);

impl FromStr for ExamFilter {
    type Err = UnknownExamFilter;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_arg().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| UnknownExamFilter(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_option_serializes_as_numeric_string() {
        assert_eq!(
            serde_json::to_string(&SearchOption::CourseCode).expect("json"),
            "\"1\""
        );
        assert_eq!(
            serde_json::from_str::<SearchOption>("\"2\"").expect("json"),
            SearchOption::CourseName
        );
    }

    #[test]
    fn exam_filter_parses_case_insensitively() {
        assert_eq!("mst".parse::<ExamFilter>(), Ok(ExamFilter::Mst));
        assert_eq!(" ALL ".parse::<ExamFilter>(), Ok(ExamFilter::All));
        assert!("final".parse::<ExamFilter>().is_err());
    }

    #[test]
    fn defaults_match_form_defaults() {
        assert_eq!(SearchOption::default(), SearchOption::CourseCode);
        assert_eq!(ExamFilter::default(), ExamFilter::All);
    }
}
