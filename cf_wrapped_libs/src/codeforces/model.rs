use crate::window::Timestamped;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Envelope wrapped around every Codeforces API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub handle: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub max_rating: Option<i32>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub max_rank: Option<String>,
    #[serde(default)]
    pub contribution: i32,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub registration_time_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default)]
    pub contest_id: Option<i64>,
    #[serde(default)]
    pub problemset_name: Option<String>,
    pub index: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Identity of a problem: the contest (or problemset) it belongs to plus its index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemKey<'a> {
    pub contest_id: Option<i64>,
    pub problemset_name: Option<&'a str>,
    pub index: &'a str,
}

impl Problem {
    pub fn key(&self) -> ProblemKey<'_> {
        ProblemKey {
            contest_id: self.contest_id,
            problemset_name: self.problemset_name.as_deref(),
            index: &self.index,
        }
    }
}

impl fmt::Display for ProblemKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.contest_id, self.problemset_name) {
            (Some(contest_id), _) => write!(f, "{}{}", contest_id, self.index),
            (None, Some(problemset)) => write!(f, "{}/{}", problemset, self.index),
            (None, None) => write!(f, "{}", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    #[serde(default)]
    pub contest_id: Option<i64>,
    pub creation_time_seconds: i64,
    #[serde(default)]
    pub relative_time_seconds: i64,
    pub problem: Problem,
    pub programming_language: String,
    /// Absent while the submission is still queued.
    #[serde(default)]
    pub verdict: Option<Verdict>,
    #[serde(default)]
    pub passed_test_count: i32,
    #[serde(default)]
    pub time_consumption_millis: i64,
    #[serde(default)]
    pub memory_consumption_bytes: i64,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self.verdict, Some(Verdict::Accepted))
    }
}

impl Timestamped for Submission {
    fn timestamp(&self) -> i64 {
        self.creation_time_seconds
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    #[serde(default)]
    pub handle: String,
    pub rank: i32,
    pub rating_update_time_seconds: i64,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl Timestamped for RatingChange {
    fn timestamp(&self) -> i64 {
        self.rating_update_time_seconds
    }
}

/// The three raw feeds of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_info: User,
    pub submissions: Vec<Submission>,
    pub rating_history: Vec<RatingChange>,
}

/// Outcome of a submission. Values the platform adds later land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    Challenged,
    Skipped,
    Testing,
    Rejected,
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Accepted => "OK",
            Verdict::WrongAnswer => "WRONG_ANSWER",
            Verdict::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Verdict::MemoryLimitExceeded => "MEMORY_LIMIT_EXCEEDED",
            Verdict::RuntimeError => "RUNTIME_ERROR",
            Verdict::CompilationError => "COMPILATION_ERROR",
            Verdict::Challenged => "CHALLENGED",
            Verdict::Skipped => "SKIPPED",
            Verdict::Testing => "TESTING",
            Verdict::Rejected => "REJECTED",
            Verdict::Other(other) => other,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &str {
        match self {
            Verdict::Accepted => "Accepted",
            Verdict::WrongAnswer => "Wrong Answer",
            Verdict::TimeLimitExceeded => "TLE",
            Verdict::MemoryLimitExceeded => "MLE",
            Verdict::RuntimeError => "Runtime Error",
            Verdict::CompilationError => "Compile Error",
            Verdict::Challenged => "Hacked",
            Verdict::Skipped => "Skipped",
            Verdict::Testing => "Testing",
            Verdict::Rejected => "Rejected",
            Verdict::Other(other) => other,
        }
    }
}

impl From<String> for Verdict {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => Verdict::Accepted,
            "WRONG_ANSWER" => Verdict::WrongAnswer,
            "TIME_LIMIT_EXCEEDED" => Verdict::TimeLimitExceeded,
            "MEMORY_LIMIT_EXCEEDED" => Verdict::MemoryLimitExceeded,
            "RUNTIME_ERROR" => Verdict::RuntimeError,
            "COMPILATION_ERROR" => Verdict::CompilationError,
            "CHALLENGED" => Verdict::Challenged,
            "SKIPPED" => Verdict::Skipped,
            "TESTING" => Verdict::Testing,
            "REJECTED" => Verdict::Rejected,
            _ => Verdict::Other(value),
        }
    }
}

impl From<Verdict> for String {
    fn from(value: Verdict) -> Self {
        match value {
            Verdict::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_submission() {
        let json = r#"
        {
            "id": 240000001,
            "contestId": 1915,
            "creationTimeSeconds": 1703867000,
            "relativeTimeSeconds": 2147483647,
            "problem": {
                "contestId": 1915,
                "index": "F",
                "name": "Greetings",
                "type": "PROGRAMMING",
                "rating": 1500,
                "tags": ["data structures", "sortings"]
            },
            "author": {"contestId": 1915, "members": [{"handle": "tourist"}], "participantType": "PRACTICE"},
            "programmingLanguage": "C++17 (GCC 7-32)",
            "verdict": "OK",
            "testset": "TESTS",
            "passedTestCount": 23,
            "timeConsumptionMillis": 171,
            "memoryConsumptionBytes": 6553600
        }
        "#;

        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.contest_id, Some(1915));
        assert!(submission.is_accepted());
        assert_eq!(submission.problem.rating, Some(1500));
        assert_eq!(submission.problem.kind.as_deref(), Some("PROGRAMMING"));
        assert_eq!(submission.problem.key().to_string(), "1915F");
    }

    #[test]
    fn test_queued_submission_has_no_verdict() {
        let json = r#"
        {
            "id": 1,
            "creationTimeSeconds": 1703867000,
            "problem": {"problemsetName": "acmsguru", "index": "100", "name": "A+B", "tags": []},
            "programmingLanguage": "Rust 2021"
        }
        "#;

        let submission: Submission = serde_json::from_str(json).unwrap();

        assert_eq!(submission.verdict, None);
        assert!(!submission.is_accepted());
        assert_eq!(submission.problem.key().to_string(), "acmsguru/100");
    }

    #[test]
    fn test_verdict_round_trips_unknown_values() {
        let verdicts: Vec<Verdict> =
            serde_json::from_str(r#"["OK", "CHALLENGED", "PARTIAL"]"#).unwrap();

        assert_eq!(
            verdicts,
            vec![
                Verdict::Accepted,
                Verdict::Challenged,
                Verdict::Other(String::from("PARTIAL"))
            ]
        );
        assert_eq!(
            serde_json::to_string(&verdicts).unwrap(),
            r#"["OK","CHALLENGED","PARTIAL"]"#
        );
    }

    #[test]
    fn test_problem_keys_do_not_collide() {
        let a = Problem {
            contest_id: Some(1),
            problemset_name: None,
            index: String::from("1A"),
            name: String::from("x"),
            kind: None,
            rating: None,
            tags: vec![],
        };
        let b = Problem {
            contest_id: Some(11),
            index: String::from("A"),
            ..a.clone()
        };

        assert_ne!(a.key(), b.key());
    }
}
