pub mod client;
pub mod model;

pub use client::{CodeforcesClient, CodeforcesError, UserDataSource, DEFAULT_API_URL};
pub use model::{Problem, RatingChange, Submission, User, UserData, Verdict};
