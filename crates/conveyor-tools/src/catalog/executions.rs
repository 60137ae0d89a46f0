//! Execution logs and incomplete executions.

use conveyor_client::ConveyorClient;
use conveyor_client::api::ListExecutionsQuery;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::{Result, ToolError};
use crate::params::{ParamExt, ParameterValidationError};
use crate::schema::{Schema, integer, string};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "executions_list",
            "List executions",
            "List execution logs of a scenario, newest first.",
            "executions",
            executions_list,
        )
        .scope("scenarios:read")
        .identifier("scenarioId")
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .optional("from", integer("Start of the window, epoch milliseconds"))
                .optional("to", integer("End of the window, epoch milliseconds"))
                .optional("status", integer("1 success, 2 warning, 3 error"))
                .paged(),
        ),
        ToolDescriptor::new(
            "executions_get",
            "Get execution",
            "Get the status and outputs of one scenario execution.",
            "executions",
            executions_get,
        )
        .scope("scenarios:read")
        .identifier("executionId")
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .required("executionId", string("Execution ID")),
        ),
        ToolDescriptor::new(
            "incomplete_executions_list",
            "List incomplete executions",
            "List executions of a scenario that stopped and await resolution.",
            "incomplete_executions",
            incomplete_executions_list,
        )
        .scope("dlqs:read")
        .identifier("scenarioId")
        .input(
            Schema::new()
                .required("scenarioId", integer("Scenario ID"))
                .paged(),
        ),
        ToolDescriptor::new(
            "incomplete_executions_get",
            "Get incomplete execution",
            "Get details of an incomplete execution.",
            "incomplete_executions",
            incomplete_executions_get,
        )
        .scope("dlqs:read")
        .identifier("incompleteExecutionId")
        .input(incomplete_id()),
        ToolDescriptor::new(
            "incomplete_executions_delete",
            "Delete incomplete execution",
            "Discard an incomplete execution.",
            "incomplete_executions",
            incomplete_executions_delete,
        )
        .scope("dlqs:write")
        .identifier("incompleteExecutionId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(incomplete_id()),
        ToolDescriptor::new(
            "incomplete_executions_retry",
            "Retry incomplete execution",
            "Run an incomplete execution again from where it stopped.",
            "incomplete_executions",
            incomplete_executions_retry,
        )
        .scope("dlqs:write")
        .identifier("incompleteExecutionId")
        .annotations(ToolAnnotations::WRITE)
        .input(incomplete_id()),
        ToolDescriptor::new(
            "incomplete_executions_blueprint",
            "Get incomplete execution blueprint",
            "Get the blueprint an incomplete execution ran with.",
            "incomplete_executions",
            incomplete_executions_blueprint,
        )
        .scope("dlqs:read")
        .identifier("incompleteExecutionId")
        .input(incomplete_id()),
        ToolDescriptor::new(
            "incomplete_executions_bundle",
            "Get incomplete execution bundle",
            "Get the data bundle an incomplete execution stopped on.",
            "incomplete_executions",
            incomplete_executions_bundle,
        )
        .scope("dlqs:read")
        .identifier("incompleteExecutionId")
        .input(incomplete_id()),
    ]
}

fn incomplete_id() -> Schema {
    Schema::new().required("incompleteExecutionId", string("Incomplete execution ID"))
}

fn executions_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let scenario_id = args.required_u64("scenarioId", "ID of the scenario")?;
        let options = args.list_options()?;
        let status = match args.optional_u64("status")? {
            None => None,
            Some(s @ 1..=3) => Some(s as u8),
            Some(other) => {
                return Err(ToolError::from(ParameterValidationError::invalid_value(
                    "status",
                    other.to_string(),
                    "use 1 (success), 2 (warning) or 3 (error)",
                )));
            }
        };
        let query = ListExecutionsQuery {
            from: args.optional_u64("from")?,
            to: args.optional_u64("to")?,
            status,
            pg: options.pg,
            cols: options.cols,
        };
        Ok(client.executions().list(scenario_id, &query).await?.into())
    }
    .boxed()
}

fn executions_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let scenario_id = args.required_u64("scenarioId", "ID of the scenario")?;
        let execution_id = args.required_str("executionId", "ID of the execution")?;
        Ok(client
            .executions()
            .get(scenario_id, execution_id)
            .await?
            .into())
    }
    .boxed()
}

fn incomplete_executions_list(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let scenario_id = args.required_u64("scenarioId", "ID of the scenario")?;
        let options = args.list_options()?;
        Ok(client
            .incomplete_executions()
            .list(scenario_id, &options)
            .await?
            .into())
    }
    .boxed()
}

fn incomplete_executions_get(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("incompleteExecutionId", "ID of the incomplete execution")?;
        Ok(client.incomplete_executions().get(id).await?.into())
    }
    .boxed()
}

fn incomplete_executions_delete(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("incompleteExecutionId", "ID of the incomplete execution")?;
        client.incomplete_executions().delete(id).await?;
        Ok(ToolOutput::text("Incomplete execution has been deleted."))
    }
    .boxed()
}

fn incomplete_executions_retry(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("incompleteExecutionId", "ID of the incomplete execution")?;
        client.incomplete_executions().retry(id).await?;
        Ok(ToolOutput::text("Incomplete execution has been queued for retry."))
    }
    .boxed()
}

fn incomplete_executions_blueprint(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("incompleteExecutionId", "ID of the incomplete execution")?;
        Ok(client.incomplete_executions().blueprint(id).await?.into())
    }
    .boxed()
}

fn incomplete_executions_bundle(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("incompleteExecutionId", "ID of the incomplete execution")?;
        Ok(client.incomplete_executions().bundle(id).await?.into())
    }
    .boxed()
}
