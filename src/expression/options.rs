use crate::modifier::{Modifier, Modifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);
pub const DEFAULT_NEST_LIMIT: u32 = 250;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExpressionOptions {
    pub modifiers: Modifiers,
    pub close_open_captures: bool,
    pub size_limit: usize,
    pub dfa_size_limit: usize,
    pub nest_limit: u32,
}

impl Default for ExpressionOptions {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::default(),
            close_open_captures: true,
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }
}

impl ExpressionOptions {
    pub fn builder() -> ExpressionOptionsBuilder {
        ExpressionOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ExpressionOptionsError> {
        if self.size_limit == 0 {
            return Err(ExpressionOptionsError::SizeLimitInvalid);
        }
        if self.dfa_size_limit == 0 {
            return Err(ExpressionOptionsError::DfaSizeLimitInvalid);
        }
        if self.nest_limit == 0 {
            return Err(ExpressionOptionsError::NestLimitInvalid);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct ExpressionOptionsBuilder {
    options: ExpressionOptions,
}

impl ExpressionOptionsBuilder {
    pub fn modifiers(mut self, value: Modifiers) -> Self {
        self.options.modifiers = value;
        self
    }

    pub fn modifier(mut self, modifier: Modifier, enabled: bool) -> Self {
        self.options.modifiers.toggle_to(modifier, enabled);
        self
    }

    pub fn close_open_captures(mut self, value: bool) -> Self {
        self.options.close_open_captures = value;
        self
    }

    pub fn size_limit(mut self, value: usize) -> Self {
        self.options.size_limit = value;
        self
    }

    pub fn dfa_size_limit(mut self, value: usize) -> Self {
        self.options.dfa_size_limit = value;
        self
    }

    pub fn nest_limit(mut self, value: u32) -> Self {
        self.options.nest_limit = value;
        self
    }

    pub fn build(self) -> Result<ExpressionOptions, ExpressionOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionOptionsError {
    #[error("size_limit must be greater than zero")]
    SizeLimitInvalid,
    #[error("dfa_size_limit must be greater than zero")]
    DfaSizeLimitInvalid,
    #[error("nest_limit must be greater than zero")]
    NestLimitInvalid,
}
