//! Built-in tool catalog, one module per resource family.

mod account;
mod connections;
mod data;
mod executions;
mod functions;
mod insights;
mod scenarios;
mod sdk;
mod workspace;

use crate::descriptor::ToolDescriptor;

/// Every built-in tool.
pub fn all() -> Vec<ToolDescriptor> {
    [
        account::tools(),
        scenarios::tools(),
        executions::tools(),
        connections::tools(),
        data::tools(),
        functions::tools(),
        workspace::tools(),
        insights::tools(),
        sdk::tools(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
