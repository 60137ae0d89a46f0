//! Users, organizations, teams and enumerations.

use conveyor_client::ConveyorClient;
use conveyor_client::api::{CreateOrganization, CreateTeam, UpdateOrganization};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::descriptor::{ToolAnnotations, ToolDescriptor, ToolOutput};
use crate::error::Result;
use crate::params::ParamExt;
use crate::schema::{Schema, columns, integer, string};

pub(super) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "users_me",
            "Current user",
            "Get the user the API credential belongs to.",
            "users",
            users_me,
        )
        .scope("user:read"),
        ToolDescriptor::new(
            "organizations_list",
            "List organizations",
            "List organizations the current user is a member of.",
            "organizations",
            organizations_list,
        )
        .scope("organizations:read")
        .input(Schema::new().paged()),
        ToolDescriptor::new(
            "organizations_get",
            "Get organization",
            "Get details of an organization.",
            "organizations",
            organizations_get,
        )
        .scope("organizations:read")
        .identifier("organizationId")
        .input(
            Schema::new()
                .required("organizationId", integer("Organization ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "organizations_create",
            "Create organization",
            "Create a new organization in a region.",
            "organizations",
            organizations_create,
        )
        .scope("organizations:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("name", string("Organization name"))
                .required("regionId", integer("Region ID, see enums_regions"))
                .required("timezoneId", integer("Timezone ID, see enums_timezones"))
                .required("countryId", integer("Country ID, see enums_countries")),
        ),
        ToolDescriptor::new(
            "organizations_update",
            "Update organization",
            "Change an organization's name, country or timezone.",
            "organizations",
            organizations_update,
        )
        .scope("organizations:write")
        .identifier("organizationId")
        .annotations(ToolAnnotations::UPDATE)
        .input(
            Schema::new()
                .required("organizationId", integer("Organization ID"))
                .optional("name", string("New name"))
                .optional("countryId", integer("Country ID"))
                .optional("timezoneId", integer("Timezone ID")),
        ),
        ToolDescriptor::new(
            "organizations_delete",
            "Delete organization",
            "Delete an organization and everything in it.",
            "organizations",
            organizations_delete,
        )
        .scope("organizations:write")
        .identifier("organizationId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("organizationId", integer("Organization ID"))),
        ToolDescriptor::new(
            "teams_list",
            "List teams",
            "List teams in an organization.",
            "teams",
            teams_list,
        )
        .scope("teams:read")
        .input(
            Schema::new()
                .required("organizationId", integer("Organization ID"))
                .paged(),
        ),
        ToolDescriptor::new(
            "teams_get",
            "Get team",
            "Get details of a team.",
            "teams",
            teams_get,
        )
        .scope("teams:read")
        .identifier("teamId")
        .input(
            Schema::new()
                .required("teamId", integer("Team ID"))
                .optional("cols", columns()),
        ),
        ToolDescriptor::new(
            "teams_create",
            "Create team",
            "Create a team in an organization.",
            "teams",
            teams_create,
        )
        .scope("teams:write")
        .annotations(ToolAnnotations::WRITE)
        .input(
            Schema::new()
                .required("name", string("Team name"))
                .required("organizationId", integer("Organization ID"))
                .optional(
                    "operationsLimit",
                    integer("Operations the team may consume"),
                ),
        ),
        ToolDescriptor::new(
            "teams_delete",
            "Delete team",
            "Delete a team and all of its scenarios.",
            "teams",
            teams_delete,
        )
        .scope("teams:write")
        .identifier("teamId")
        .annotations(ToolAnnotations::DESTRUCTIVE)
        .input(Schema::new().required("teamId", integer("Team ID"))),
        ToolDescriptor::new(
            "enums_countries",
            "List countries",
            "List countries and their IDs.",
            "enums",
            enums_countries,
        ),
        ToolDescriptor::new(
            "enums_regions",
            "List regions",
            "List regions (zones) organizations can be created in.",
            "enums",
            enums_regions,
        ),
        ToolDescriptor::new(
            "enums_timezones",
            "List timezones",
            "List timezones and their IDs.",
            "enums",
            enums_timezones,
        ),
    ]
}

fn users_me(client: &ConveyorClient, _args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        Ok(client.users().me().await?.into())
    }
    .boxed()
}

fn organizations_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let options = args.list_options()?;
        Ok(client.organizations().list(&options).await?.into())
    }
    .boxed()
}

fn organizations_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("organizationId", "ID of the organization")?;
        let cols = args.string_list("cols")?;
        Ok(client.organizations().get(id, &cols).await?.into())
    }
    .boxed()
}

fn organizations_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateOrganization {
            name: args.required_str("name", "name of the organization")?.to_string(),
            region_id: args.required_u64("regionId", "use enums_regions to find one")?,
            timezone_id: args.required_u64("timezoneId", "use enums_timezones to find one")?,
            country_id: args.required_u64("countryId", "use enums_countries to find one")?,
        };
        Ok(client.organizations().create(&request).await?.into())
    }
    .boxed()
}

fn organizations_update(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("organizationId", "ID of the organization")?;
        let request = UpdateOrganization {
            name: args.optional_str("name").map(str::to_string),
            country_id: args.optional_u64("countryId")?,
            timezone_id: args.optional_u64("timezoneId")?,
        };
        Ok(client.organizations().update(id, &request).await?.into())
    }
    .boxed()
}

fn organizations_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("organizationId", "ID of the organization")?;
        client.organizations().delete(id).await?;
        Ok(ToolOutput::text("Organization has been deleted."))
    }
    .boxed()
}

fn teams_list(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let organization_id = args.required_u64("organizationId", "ID of the organization")?;
        let options = args.list_options()?;
        Ok(client.teams().list(organization_id, &options).await?.into())
    }
    .boxed()
}

fn teams_get(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("teamId", "ID of the team")?;
        let cols = args.string_list("cols")?;
        Ok(client.teams().get(id, &cols).await?.into())
    }
    .boxed()
}

fn teams_create(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let request = CreateTeam {
            name: args.required_str("name", "name of the team")?.to_string(),
            organization_id: args.required_u64("organizationId", "ID of the organization")?,
            operations_limit: args.optional_u64("operationsLimit")?,
        };
        Ok(client.teams().create(&request).await?.into())
    }
    .boxed()
}

fn teams_delete(client: &ConveyorClient, args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        let id = args.required_u64("teamId", "ID of the team")?;
        client.teams().delete(id).await?;
        Ok(ToolOutput::text("Team has been deleted."))
    }
    .boxed()
}

fn enums_countries(client: &ConveyorClient, _args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        Ok(client.enums().countries().await?.into())
    }
    .boxed()
}

fn enums_regions(client: &ConveyorClient, _args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        Ok(client.enums().regions().await?.into())
    }
    .boxed()
}

fn enums_timezones(client: &ConveyorClient, _args: Value) -> BoxFuture<'_, Result<ToolOutput>> {
    async move {
        Ok(client.enums().timezones().await?.into())
    }
    .boxed()
}
