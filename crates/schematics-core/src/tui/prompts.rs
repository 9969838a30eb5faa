//! Charm-style CLI prompts using cliclack

use crate::product::ProductConfig;
use crate::request::{ParsedRequest, ScaffoldRequest};
use crate::templates::{TemplateSet, TemplateSource};
use crate::tree::Action;
use crate::workflow::{self, GenerateArgs};
use anyhow::Result;
use std::path::Path;

/// Run the generate command with interactive prompts
pub fn run<C: ProductConfig>(config: &C, args: GenerateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve the library name
    let request = select_request(&args)?;

    // Step 2: Load templates
    let templates = setup_templates(config, &args, cli_version)?;

    // Step 3: Check the workspace root
    check_workspace(&args.root)?;

    // Step 4: Generate and configure
    let spinner = cliclack::spinner();
    spinner.start(format!("Generating library {}...", request.name()));

    let outcome = match workflow::generate(&args.root, templates, &request, args.dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.error("Scaffolding failed");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Generated {} in {}",
        request.project_root(),
        args.root.display()
    ));

    // Step 5: Report changes
    print_actions(&outcome.actions)?;

    if args.dry_run {
        cliclack::outro("Dry run: no changes were written.")?;
        return Ok(());
    }

    // Step 6: Show next steps
    print_next_steps(config, &args.root, &request)?;

    Ok(())
}

fn select_request(args: &GenerateArgs) -> Result<ScaffoldRequest> {
    if let Some(ParsedRequest { request, ignored }) = workflow::request_from_args(args)? {
        for key in &ignored {
            cliclack::log::warning(format!(
                "Option '{}' is not supported and was ignored",
                key
            ))?;
        }
        cliclack::log::info(format!("Library: {}", request.name()))?;
        return Ok(request);
    }

    let name: String = cliclack::input("Library name")
        .placeholder("ui")
        .validate(|input: &String| {
            ScaffoldRequest::new(input.as_str())
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;

    Ok(ScaffoldRequest::new(name)?)
}

fn setup_templates<C: ProductConfig>(
    config: &C,
    args: &GenerateArgs,
    cli_version: &str,
) -> Result<TemplateSet> {
    let (source, templates) = workflow::load_templates(config, args.template_dir.clone())?;

    match &source {
        TemplateSource::Local(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?
        }
        TemplateSource::Builtin => cliclack::log::info(format!(
            "Template: {} - {}",
            templates.manifest.name, templates.manifest.description
        ))?,
    }

    if let Some(warning) = workflow::version_warning(config, &templates, cli_version) {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    Ok(templates)
}

fn check_workspace(root: &Path) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("Workspace root does not exist: {}", root.display());
    }

    if !root.join("nx.json").is_file() {
        cliclack::log::warning(format!(
            "No nx.json found in {}; the library will not be registered as a project",
            root.display()
        ))?;
    }

    Ok(())
}

fn print_actions(actions: &[Action]) -> Result<()> {
    let lines: Vec<String> = actions.iter().map(workflow::format_action).collect();
    if !lines.is_empty() {
        cliclack::log::step(lines.join("\n"))?;
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    root: &Path,
    request: &ScaffoldRequest,
) -> Result<()> {
    let steps = config.next_steps(root, request);

    if !steps.is_empty() {
        println!();
        println!("  Next steps");
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
