use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the Brownian simulation core.
///
/// Configuration problems are fatal and surface from constructors. A
/// degenerate collision is recovered inside the step that detects it and is
/// only ever observed through the step report and the log.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction or step parameter (N, dt, radius, shape, damping, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two particle centres coincide exactly, so the contact normal is undefined.
    #[error("degenerate collision: particles {i} and {j} have coincident centres")]
    DegenerateCollision { i: usize, j: usize },
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::config("effective radius must be > 0");
        let msg = format!("{e}");
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn degenerate_collision_names_both_particles() {
        let msg = Error::DegenerateCollision { i: 3, j: 7 }.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('7'));
    }

    #[test]
    fn result_type_alias_compiles() -> Result<()> {
        Ok(())
    }
}
