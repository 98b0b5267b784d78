use crate::error::ValidationError;
use crate::types::{Definition, Method, DEFAULT_TIMEOUT};
use crate::validate::Parse;

impl Parse for Definition {
    fn parse(&mut self) -> Result<(), ValidationError> {
        let method: Method = self.method.parse()?;
        self.method = method.as_str().to_string();
        if !method.allows_body() {
            self.body.clear();
        }

        self.url = self.url.trim().to_string();
        if !self.url.is_empty() {
            self.urls.clear();
        } else {
            match self.urls.len() {
                0 => return Err(ValidationError::MissingTarget),
                1 => self.url = self.urls.remove(0),
                // Two or more endpoints: fallback mode.
                _ => {}
            }
        }

        if self.config.timeout.is_zero() {
            self.config.timeout = DEFAULT_TIMEOUT;
        }

        Ok(())
    }
}
