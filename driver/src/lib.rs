use error_stack::ResultExt;

use kernel::KernelError;

pub mod database;
mod error;
pub mod hash;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Env {key} not specified"))
}

/// Reads an optional setting. Unset and unreadable values both yield `None`.
pub fn env_or_none(key: &str) -> Option<String> {
    dotenvy::var(key).ok().filter(|value| !value.trim().is_empty())
}
