mod action;
mod common;
mod execution;
mod team;

pub use action::{
    Action, ActionCategory, ActionParameter, ActionUpdate, ParameterOption, ParameterType,
    ParameterValidation,
};
pub use common::{AnyValue, ParameterMap};
pub use execution::{iso_timestamp, ExecutionContext, ExecutionResult};
pub use team::{TeamConfig, TeamUpdate};
