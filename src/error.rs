use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("Event {0} not found")]
    EventNotFound(Uuid),
}
