/// Knobs for a [`FormSession`](super::FormSession).
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Re-validate after every edit and blur, not only on submit.
    pub validate_on_change: bool,
    /// Submit once the script ends if it never submitted itself.
    pub submit_at_end: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            submit_at_end: true,
        }
    }
}

impl SessionOptions {
    pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    pub fn with_submit_at_end(mut self, enabled: bool) -> Self {
        self.submit_at_end = enabled;
        self
    }
}
