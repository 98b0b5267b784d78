mod definition;
mod template;

use crate::error::ValidationError;

/// Validates a record in place, applying its normalization rules.
///
/// Must be called before a record is registered or executed.
pub trait Parse {
    fn parse(&mut self) -> Result<(), ValidationError>;
}
