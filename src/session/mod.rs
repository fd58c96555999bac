pub mod options;
pub mod question;
pub mod selector;
pub mod study;
pub mod summary;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("the current question is already resolved")]
    AlreadyResolved,
    #[error("the current question has not been resolved yet")]
    Unresolved,
    #[error("every question in the session has been answered")]
    Finished,
    #[error("session still has {remaining} unanswered question(s)")]
    NotComplete { remaining: usize },
}
