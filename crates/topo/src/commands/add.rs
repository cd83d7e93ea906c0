//! Interactive creation: walks a `CreationForm` with dialoguer prompts.
//!
//! Each answer is fed back into the form, so the next list only offers
//! children of what was just picked.

use dialoguer::{Input, Select};
use topo_core::{Choice, Controller, CreationForm, FieldPolicy, FormField, FormMode};

use crate::cli::{AddArgs, GlobalOpts};
use crate::error::CliError;

use super::util::prompt_err;

/// Ask the user to pick one entry; an empty list is an error with a hint.
fn pick<I: Copy + std::fmt::Display>(
    prompt: &str,
    field: FormField,
    options: &[Choice<I>],
    hint: &str,
) -> Result<I, CliError> {
    if options.is_empty() {
        return Err(CliError::NoOptions {
            field: field.to_string(),
            hint: hint.into(),
        });
    }
    let labels: Vec<String> = options
        .iter()
        .map(|c| format!("{} ({})", c.name, c.id))
        .collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    options
        .get(index)
        .map(|c| c.id)
        .ok_or_else(|| CliError::Prompt(format!("selection {index} out of range")))
}

/// Pickers the user is walked through for `mode`, in prompt order.
///
/// A field is asked for when the mode requires it or when it is the parent
/// of a required pick. Environment mode never asks for an existing
/// environment.
pub(crate) fn prompt_plan(mode: FormMode) -> Vec<FormField> {
    let required = FieldPolicy::for_mode(mode).required;
    let cluster = required.contains(FormField::Cluster);
    let environment = cluster || required.contains(FormField::Environment);
    let site = environment || required.contains(FormField::Site);

    [
        (FormField::Site, site),
        (FormField::Environment, environment),
        (FormField::Cluster, cluster),
        (FormField::EnvironmentType, required.contains(FormField::EnvironmentType)),
        (FormField::ClusterType, required.contains(FormField::ClusterType)),
    ]
    .into_iter()
    .filter_map(|(field, ask)| ask.then_some(field))
    .collect()
}

pub async fn handle(
    controller: &Controller,
    args: AddArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mode = args.mode;
    let snap = controller.snapshot();
    let mut form = CreationForm::new(mode);
    let plan = prompt_plan(mode);
    let asks =
        |form: &CreationForm, field: FormField| plan.contains(&field) && form.is_enabled(field);

    if asks(&form, FormField::Site) {
        let options = form.site_options(&snap);
        let hint = if mode == FormMode::SyncCluster {
            "Sync-clusters need a local site; none is flagged local on the server."
        } else {
            "Create one first: topo sites create <NAME>"
        };
        let id = pick("Site", FormField::Site, &options, hint)?;
        form.select_site(&snap, Some(id))?;
    }

    if asks(&form, FormField::Environment) {
        let options = form.environment_options().to_vec();
        let id = pick(
            "Environment",
            FormField::Environment,
            &options,
            "Create one first: topo environments create --site <ID> --type <TYPE_ID> <NAME>",
        )?;
        form.select_environment(&snap, Some(id))?;
    }

    if asks(&form, FormField::Cluster) {
        let options = form.cluster_options().to_vec();
        let id = pick(
            "Cluster",
            FormField::Cluster,
            &options,
            "Create one first: topo clusters create --environment <ID> --type <TYPE_ID> <NAME>",
        )?;
        form.select_cluster(Some(id))?;
    }

    if asks(&form, FormField::EnvironmentType) {
        let options: Vec<Choice<_>> = snap
            .environment_types
            .iter()
            .map(|t| Choice {
                id: t.id,
                name: t.name.clone(),
            })
            .collect();
        let id = pick(
            "Environment type",
            FormField::EnvironmentType,
            &options,
            "The server returned no environment types.",
        )?;
        form.set_environment_type(&snap, Some(id))?;
    }

    if asks(&form, FormField::ClusterType) {
        let options: Vec<Choice<_>> = snap
            .cluster_types
            .iter()
            .map(|t| Choice {
                id: t.id,
                name: t.name.clone(),
            })
            .collect();
        let id = pick(
            "Cluster type",
            FormField::ClusterType,
            &options,
            "The server returned no cluster types.",
        )?;
        form.set_cluster_type(&snap, Some(id))?;
    }

    let name: String = Input::new()
        .with_prompt("Name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    form.set_name(name);

    let command = form.submission()?;
    let label = command.name().to_owned();
    tracing::debug!(operation = command.operation(), "submitting form");
    controller.execute(command).await?;
    form.reset();

    if !global.quiet {
        eprintln!("Created {mode} '{label}'");
    }
    Ok(())
}
