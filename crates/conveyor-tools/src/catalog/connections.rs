//! Connections, keys, hooks and credential requests.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{
    CreateConnection, CreateCredentialRequest, CreateHook, CreateKey, ListConnectionsQuery,
    ListHooksQuery, UpdateHook, UpdateKey,
};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::ParamExt;
use crate::schema::{Schema, boolean, columns, integer, object, one_of, string, strings};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    let mut tools = connection_tools();
    tools.extend(key_tools());
    tools.extend(hook_tools());
    tools.extend(credential_request_tools());
    tools
}

fn connection_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "connections_list",
            "List connections",
            "List connections in a team, optionally restricted to some types.",
            "connections",
            connections_list,
        )
        .scope("connections:read")
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .optional("type", strings("Connection types, e.g. [\"slack2\"]"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "connections_get",
            "Get connection",
            "Get details of a connection.",
            "connections",
            connections_get,
        )
        .scope("connections:read")
        .identifier("connectionId")
        .input(
            Schema::new()
                .required("connectionId", integer("Connection ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "connections_create",
            "Create connection",
            "Create a connection of a given type in a team.",
            "connections",
            connections_create,
        )
        .scope("connections:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Label shown to users"))
                .required("accountName", string("Connection type, e.g. \"slack2\""))
                .optional("scopes", strings("Scopes to request"))
                .optional("data", object("Type-specific connection data")),
        ),
        ToolDescriptor::new(
            "connections_update",
            "Update connection",
            "Rename a connection and/or replace its stored data.",
            "connections",
            connections_update,
        )
        .scope("connections:write")
        .identifier("connectionId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("connectionId", integer("Connection ID"))
                .optional("name", string("New label"))
                .optional("data", object("New connection data")),
        ),
        ToolDescriptor::new(
            "connections_verify",
            "Verify connection",
            "Check that a connection can reach its service.",
            "connections",
            connections_verify,
        )
        .scope("connections:write")
        .identifier("connectionId")
        .input(Schema::new().required("connectionId", integer("Connection ID"))),
        ToolDescriptor::new(
            "connections_scoped",
            "Check connection scopes",
            "Check whether a connection already grants the given scopes.",
            "connections",
            connections_scoped,
        )
        .scope("connections:read")
        .identifier("connectionId")
        .input(
            Schema::new()
                .required("connectionId", integer("Connection ID"))
                .required("scope", strings("Scopes to check")),
        ),
        ToolDescriptor::new(
            "connections_delete",
            "Delete connection",
            "Delete a connection.",
            "connections",
            connections_delete,
        )
        .scope("connections:write")
        .identifier("connectionId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("connectionId", integer("Connection ID"))),
    ]
}

fn key_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "keys_list",
            "List keys",
            "List keys in a team.",
            "keys",
            keys_list,
        )
        .scope("keys:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "keys_get",
            "Get key",
            "Get details of a key.",
            "keys",
            keys_get,
        )
        .scope("keys:read")
        .identifier("keyId")
        .input(
            Schema::new()
                .required("keyId", integer("Key ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "keys_create",
            "Create key",
            "Create a key (API key, certificate, ...) in a team.",
            "keys",
            keys_create,
        )
        .scope("keys:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Key name"))
                .required("typeName", string("Key type, e.g. \"apikeyauth\""))
                .required("parameters", object("Type-specific key material")),
        ),
        ToolDescriptor::new(
            "keys_update",
            "Update key",
            "Update a key.",
            "keys",
            keys_update,
        )
        .scope("keys:write")
        .identifier("keyId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("keyId", integer("Key ID"))
                .optional("name", string("New name"))
                .optional("parameters", object("New key material")),
        ),
        ToolDescriptor::new(
            "keys_delete",
            "Delete key",
            "Delete a key.",
            "keys",
            keys_delete,
        )
        .scope("keys:write")
        .identifier("keyId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("keyId", integer("Key ID"))),
    ]
}

fn hook_tools() -> Vec<ToolDescriptor> {
    let hook_id = || Schema::new().required("hookId", integer("Hook ID"));
    vec![
        ToolDescriptor::new(
            "hooks_list",
            "List hooks",
            "List webhooks and mailhooks in a team.",
            "hooks",
            hooks_list,
        )
        .scope("hooks:read")
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .optional(
                    "typeName",
                    one_of(&["web", "mail"], "Only hooks of this kind"),
                )
                .optional(
                    "assigned",
                    boolean("Only hooks attached (or not) to a scenario"),
                )
                .paged(),
        ),
        ToolDescriptor::new(
            "hooks_get",
            "Get hook",
            "Get details of a hook.",
            "hooks",
            hooks_get,
        )
        .scope("hooks:read")
        .identifier("hookId")
        .input(hook_id().optional("cols", columns())),
        ToolDescriptor::new(
            "hooks_create",
            "Create hook",
            "Create a webhook or mailhook in a team.",
            "hooks",
            hooks_create,
        )
        .scope("hooks:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Hook name"))
                .required("typeName", string("Hook type, e.g. \"gateway-webhook\""))
                .optional("data", object("Type-specific settings")),
        ),
        ToolDescriptor::new(
            "hooks_update",
            "Update hook",
            "Rename a hook and/or replace its settings.",
            "hooks",
            hooks_update,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            hook_id()
                .optional("name", string("New name"))
                .optional("data", object("New settings")),
        ),
        ToolDescriptor::new(
            "hooks_delete",
            "Delete hook",
            "Delete a hook.",
            "hooks",
            hooks_delete,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(hook_id()),
        ToolDescriptor::new(
            "hooks_enable",
            "Enable hook",
            "Start accepting data on a hook.",
            "hooks",
            hooks_enable,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::UPDATE)
        .input(hook_id()),
        ToolDescriptor::new(
            "hooks_disable",
            "Disable hook",
            "Stop accepting data on a hook.",
            "hooks",
            hooks_disable,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::UPDATE)
        .input(hook_id()),
        ToolDescriptor::new(
            "hooks_ping",
            "Ping hook",
            "Check whether a hook is reachable and attached.",
            "hooks",
            hooks_ping,
        )
        .scope("hooks:read")
        .identifier("hookId")
        .input(hook_id()),
        ToolDescriptor::new(
            "hooks_learn_start",
            "Start structure learning",
            "Determine the hook's data structure from the next payload it receives.",
            "hooks",
            hooks_learn_start,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::UPDATE)
        .input(hook_id()),
        ToolDescriptor::new(
            "hooks_learn_stop",
            "Stop structure learning",
            "Stop determining the hook's data structure.",
            "hooks",
            hooks_learn_stop,
        )
        .scope("hooks:write")
        .identifier("hookId")
        .annotations(ToolAnnotations::UPDATE)
        .input(hook_id()),
    ]
}

fn credential_request_tools() -> Vec<ToolDescriptor> {
    let request_id = || Schema::new().required("requestId", string("Credential request ID"));
    vec![
        ToolDescriptor::new(
            "credential_requests_list",
            "List credential requests",
            "List credential requests in a team.",
            "credential_requests",
            credential_requests_list,
        )
        .scope("credential-requests:read")
        .input(Schema::new().required("teamId", integer("Team ID")).paged()),
        ToolDescriptor::new(
            "credential_requests_get",
            "Get credential request",
            "Get a credential request and the credentials it asks for.",
            "credential_requests",
            credential_requests_get,
        )
        .scope("credential-requests:read")
        .identifier("requestId")
        .input(request_id()),
        ToolDescriptor::new(
            "credential_requests_create",
            "Create credential request",
            "Ask another user to authorize connections or keys. Returns a link to share with them.",
            "credential_requests",
            credential_requests_create,
        )
        .scope("credential-requests:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .required("name", string("Request name"))
                .optional("description", string("Message for the authorizing user"))
                .optional("connections", json_list("Connections to request"))
                .optional("keys", json_list("Keys to request")),
        ),
        ToolDescriptor::new(
            "credential_requests_decline",
            "Decline credential request",
            "Decline a pending credential request.",
            "credential_requests",
            credential_requests_decline,
        )
        .scope("credential-requests:write")
        .identifier("requestId")
        .annotations(ToolAnnotations::UPDATE)
        .input(request_id()),
        ToolDescriptor::new(
            "credential_requests_delete",
            "Delete credential request",
            "Delete a credential request.",
            "credential_requests",
            credential_requests_delete,
        )
        .scope("credential-requests:write")
        .identifier("requestId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(request_id()),
    ]
}

fn json_list(description: &str) -> Value {
    serde_json::json!({"type": "array", "items": {"type": "object"}, "description": description})
}

fn object_arg(args: &Value, name: &str) -> Map<String, Value> {
    args.get(name)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Connections
// ─────────────────────────────────────────────────────────────────────────────

fn connections_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let query = ListConnectionsQuery {
            team_id: args.required_u64("teamId", "ID of the team")?,
            types: args.string_list("type")?,
            cols: args.string_list("cols")?,
        };
        Ok(client.connections().list(&query).await?.into())
    }
    .boxed()
}

fn connections_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("connectionId", "ID of the connection")?;
        let cols = args.string_list("cols")?;
        Ok(client.connections().get(id, &cols).await?.into())
    }
    .boxed()
}

fn connections_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let request = CreateConnection {
            name: args.required_str("name", "label for the connection")?.to_string(),
            account_name: args
                .required_str("accountName", "connection type, e.g. slack2")?
                .to_string(),
            scopes: args.string_list("scopes")?,
            data: args.optional_value("data").cloned(),
        };
        Ok(client.connections().create(team_id, &request).await?.into())
    }
    .boxed()
}

fn connections_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("connectionId", "ID of the connection")?;
        let connections = client.connections();
        if let Some(name) = args.optional_str("name") {
            connections.rename(id, name).await?;
        }
        if let Some(data) = args.optional_value("data") {
            connections.set_data(id, data).await?;
        }
        Ok(ToolOutput::text("Connection has been updated."))
    }
    .boxed()
}

fn connections_verify(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("connectionId", "ID of the connection")?;
        let message = if client.connections().verify(id).await? {
            "Connection is valid."
        } else {
            "Connection is not valid."
        };
        Ok(ToolOutput::text(message))
    }
    .boxed()
}

fn connections_scoped(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("connectionId", "ID of the connection")?;
        let scopes = args.string_list("scope")?;
        Ok(client.connections().scoped(id, &scopes).await?.into())
    }
    .boxed()
}

fn connections_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("connectionId", "ID of the connection")?;
        client.connections().delete(id).await?;
        Ok(ToolOutput::text("Connection has been deleted."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

fn keys_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        Ok(client.keys().list(team_id, &options).await?.into())
    }
    .boxed()
}

fn keys_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("keyId", "ID of the key")?;
        let cols = args.string_list("cols")?;
        Ok(client.keys().get(id, &cols).await?.into())
    }
    .boxed()
}

fn keys_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let request = CreateKey {
            name: args.required_str("name", "name of the key")?.to_string(),
            type_name: args.required_str("typeName", "key type")?.to_string(),
            parameters: args
                .required_value("parameters", "key material for the type")?
                .clone(),
        };
        Ok(client.keys().create(team_id, &request).await?.into())
    }
    .boxed()
}

fn keys_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("keyId", "ID of the key")?;
        let request = UpdateKey {
            name: args.optional_str("name").map(str::to_string),
            parameters: args.optional_value("parameters").cloned(),
        };
        Ok(client.keys().update(id, &request).await?.into())
    }
    .boxed()
}

fn keys_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("keyId", "ID of the key")?;
        client.keys().delete(id).await?;
        Ok(ToolOutput::text("Key has been deleted."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Hooks
// ─────────────────────────────────────────────────────────────────────────────

fn hooks_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let options = args.list_options()?;
        let query = ListHooksQuery {
            team_id: args.required_u64("teamId", "ID of the team")?,
            type_name: args.optional_str("typeName").map(str::to_string),
            assigned: args.get("assigned").and_then(Value::as_bool),
            pg: options.pg,
            cols: options.cols,
        };
        Ok(client.hooks().list(&query).await?.into())
    }
    .boxed()
}

fn hooks_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        let cols = args.string_list("cols")?;
        Ok(client.hooks().get(id, &cols).await?.into())
    }
    .boxed()
}

fn hooks_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateHook {
            name: args.required_str("name", "name of the hook")?.to_string(),
            team_id: args.required_u64("teamId", "ID of the team")?,
            type_name: args.required_str("typeName", "hook type")?.to_string(),
            data: object_arg(&args, "data"),
        };
        Ok(client.hooks().create(&request).await?.into())
    }
    .boxed()
}

fn hooks_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        let hooks = client.hooks();
        if let Some(name) = args.optional_str("name") {
            hooks.rename(id, name).await?;
        }
        if args.optional_value("data").is_some() {
            let request = UpdateHook {
                data: object_arg(&args, "data"),
            };
            hooks.update(id, &request).await?;
        }
        Ok(ToolOutput::text("Hook has been updated."))
    }
    .boxed()
}

fn hooks_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        client.hooks().delete(id).await?;
        Ok(ToolOutput::text("Hook has been deleted."))
    }
    .boxed()
}

fn hooks_enable(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        client.hooks().enable(id).await?;
        Ok(ToolOutput::text("Hook has been enabled."))
    }
    .boxed()
}

fn hooks_disable(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        client.hooks().disable(id).await?;
        Ok(ToolOutput::text("Hook has been disabled."))
    }
    .boxed()
}

fn hooks_ping(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        Ok(client.hooks().ping(id).await?.into())
    }
    .boxed()
}

fn hooks_learn_start(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        client.hooks().learn_start(id).await?;
        Ok(ToolOutput::text("Hook is waiting for a payload to learn its structure."))
    }
    .boxed()
}

fn hooks_learn_stop(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("hookId", "ID of the hook")?;
        client.hooks().learn_stop(id).await?;
        Ok(ToolOutput::text("Hook structure learning has stopped."))
    }
    .boxed()
}

// ─────────────────────────────────────────────────────────────────────────────
// Credential requests
// ─────────────────────────────────────────────────────────────────────────────

fn credential_requests_list(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let team_id = args.required_u64("teamId", "ID of the team")?;
        let options = args.list_options()?;
        let value = client.credential_requests().list(team_id, &options).await?;
        Ok(value.into())
    }
    .boxed()
}

fn credential_requests_get(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("requestId", "ID of the credential request")?;
        Ok(client.credential_requests().get(id).await?.into())
    }
    .boxed()
}

fn credential_requests_create(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let list = |name: &str| {
            args.get(name)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };
        let request = CreateCredentialRequest {
            team_id: args.required_u64("teamId", "ID of the team")?,
            name: args.required_str("name", "name of the request")?.to_string(),
            description: args.optional_str("description").map(str::to_string),
            connections: list("connections"),
            keys: list("keys"),
        };
        Ok(client.credential_requests().create(&request).await?.into())
    }
    .boxed()
}

fn credential_requests_decline(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("requestId", "ID of the credential request")?;
        client.credential_requests().decline(id).await?;
        Ok(ToolOutput::text("Credential request has been declined."))
    }
    .boxed()
}

fn credential_requests_delete(
    client: &ConveyorClient,
    args: Value,
) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_str("requestId", "ID of the credential request")?;
        client.credential_requests().delete(id).await?;
        Ok(ToolOutput::text("Credential request has been deleted."))
    }
    .boxed()
}
