//! Quill library exports for the binary and integration tests

use clap::ValueEnum;

pub mod api;
pub mod core;
pub mod gateway;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "lmstudio")]
    LmStudio,
}

impl Provider {
    /// Name used in config files and `QUILL_PROVIDER`.
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::LmStudio => "lmstudio",
        }
    }
}
