//! Analytics and audit logs.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{AnalyticsQuery, AuditLogQuery};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::{ParamExt, ParamResult, ParameterValidationError};
use crate::schema::{Schema, integer, integers, string, strings};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    let audit_filters = |schema: Schema| {
        schema
            .optional("team", integers("Only entries for these teams"))
            .optional("author", integers("Only entries caused by these users"))
            .optional("eventType", strings("Only these event names"))
            .optional("dateFrom", string("ISO 8601 lower bound"))
            .optional("dateTo", string("ISO 8601 upper bound"))
            .optional("pg", crate::schema::pagination())
    };
    vec![
        ToolDescriptor::new(
            "analytics_organization",
            "Organization analytics",
            "Operations and data transfer per scenario across an organization.",
            "analytics",
            analytics_organization,
        )
        .scope("analytics:read")
        .identifier("organizationId")
        .input(
            Schema::new()
                .required("organizationId", integer("Organization ID"))
                .optional("teamId", integers("Only these teams"))
                .optional("status", strings("Only scenarios with these statuses"))
                .optional("timeFrame", string("Window, e.g. \"last-30-days\""))
                .optional("pg", crate::schema::pagination()),
        ),
        ToolDescriptor::new(
            "audit_logs_organization",
            "Organization audit log",
            "List audit log entries of an organization.",
            "audit_logs",
            audit_logs_organization,
        )
        .scope("audit-logs:read")
        .identifier("organizationId")
        .input(audit_filters(
            Schema::new().required("organizationId", integer("Organization ID")),
        )),
        ToolDescriptor::new(
            "audit_logs_team",
            "Team audit log",
            "List audit log entries of a team.",
            "audit_logs",
            audit_logs_team,
        )
        .scope("audit-logs:read")
        .identifier("teamId")
        .input(audit_filters(Schema::new().required("teamId", integer("Team ID")))),
    ]
}

fn id_list(args: &Value, name: &'static str) -> ParamResult<Vec<u64>> {
    let Some(value) = args.optional_value(name) else {
        return Ok(Vec::new());
    };
    value
        .as_array()
        .and_then(|items| items.iter().map(Value::as_u64).collect())
        .ok_or_else(|| ParameterValidationError::invalid_type(name, "array of integers", value))
}

fn audit_query(args: &Value) -> ParamResult<AuditLogQuery> {
    Ok(AuditLogQuery {
        team: id_list(args, "team")?,
        author: id_list(args, "author")?,
        event_type: args.string_list("eventType")?,
        date_from: args.optional_str("dateFrom").map(str::to_string),
        date_to: args.optional_str("dateTo").map(str::to_string),
        pg: args.list_options()?.pg,
    })
}

fn analytics_organization(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("organizationId", "ID of the organization")?;
        let query = AnalyticsQuery {
            team_id: id_list(&args, "teamId")?,
            status: args.string_list("status")?,
            time_frame: args.optional_str("timeFrame").map(str::to_string),
            pg: args.list_options()?.pg,
        };
        Ok(client.analytics().organization(id, &query).await?.into())
    }
    .boxed()
}

fn audit_logs_organization(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("organizationId", "ID of the organization")?;
        let query = audit_query(&args)?;
        Ok(client.audit_logs().organization(id, &query).await?.into())
    }
    .boxed()
}

fn audit_logs_team(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("teamId", "ID of the team")?;
        let query = audit_query(&args)?;
        Ok(client.audit_logs().team(id, &query).await?.into())
    }
    .boxed()
}
