/// Crate level error.
///
/// Parsing failures keep their own [`crate::ParserError`] type; this enum covers
/// request validation, engine limits and configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Zero value not allowed")]
    ZeroValue,

    #[error("Critical value {0} is out of range 2..=10")]
    CriticalOutOfRange(u32),

    #[error("Dice count {pool} is above the limit of {max}")]
    PoolTooLarge {
        pool: u32,
        max: u32
    },

    #[error("Configuration error - {0}")]
    Config(#[from] Box<figment::Error>)
}

impl From<figment::Error> for Error {
    fn from(value: figment::Error) -> Self {
        Error::Config(Box::new(value))
    }
}
