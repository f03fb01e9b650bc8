use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    NotFound,
    Conflict,
    NoAvailableCopy,
    Authentication,
    Authorization,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::NotFound => write!(f, "Requested entity was not found"),
            KernelError::Conflict => write!(f, "Entity already exists"),
            KernelError::NoAvailableCopy => write!(f, "No available copy"),
            KernelError::Authentication => write!(f, "Authentication required"),
            KernelError::Authorization => write!(f, "Permission denied"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
