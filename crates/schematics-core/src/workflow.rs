//! Generate and configure workflows shared by every front end
//!
//! These functions do the work and return what happened; printing is left
//! to the caller, except for `run` and `run_configure` which are the plain
//! (non-interactive) front end.

use crate::generator::TemplateGenerator;
use crate::product::ProductConfig;
use crate::request::{ParsedRequest, ScaffoldRequest};
use crate::scaffold::{configure_library, Scaffolder};
use crate::templates::{check_compatibility, TemplateSet, TemplateSource};
use crate::tree::{Action, ActionKind, HostTree, Tree};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Arguments of the generate command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Library name
    pub name: Option<String>,

    /// JSON options document; only its `name` is used
    pub options: Option<PathBuf>,

    /// Workspace root
    pub root: PathBuf,

    /// Local directory to use for templates instead of the builtin set
    pub template_dir: Option<PathBuf>,

    /// Report changes without writing them
    pub dry_run: bool,

    /// Non-interactive mode
    pub yes: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            name: None,
            options: None,
            root: PathBuf::from("."),
            template_dir: None,
            dry_run: false,
            yes: false,
        }
    }
}

/// Arguments of the configure command
#[derive(Debug, Clone)]
pub struct ConfigureArgs {
    pub name: String,
    pub root: PathBuf,
    pub dry_run: bool,
}

/// What a workflow changed
#[derive(Debug, Clone)]
pub struct Outcome {
    pub request: ScaffoldRequest,
    pub actions: Vec<Action>,
    /// Files persisted to disk (0 in dry-run mode)
    pub written: usize,
}

/// Build the request from `--options` and/or the name argument
///
/// The name argument wins over the document's `name`; keys the document
/// carries besides `name` are still reported as ignored.
pub fn request_from_args(args: &GenerateArgs) -> Result<Option<ParsedRequest>> {
    let from_options = match &args.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Some(ScaffoldRequest::from_options_json(&text)?)
        }
        None => None,
    };

    let parsed = match (&args.name, from_options) {
        (Some(name), Some(parsed)) => Some(ParsedRequest {
            request: ScaffoldRequest::new(name.as_str())?,
            ignored: parsed.ignored,
        }),
        (Some(name), None) => Some(ParsedRequest {
            request: ScaffoldRequest::new(name.as_str())?,
            ignored: Vec::new(),
        }),
        (None, parsed) => parsed,
    };

    Ok(parsed)
}

/// Resolve the template source and load it
pub fn load_templates<C: ProductConfig>(
    config: &C,
    template_dir: Option<PathBuf>,
) -> Result<(TemplateSource, TemplateSet)> {
    let source = TemplateSource::from_config(config, template_dir);
    let templates = source.load()?;
    Ok((source, templates))
}

/// Version warning for a template set, if the CLI is too old for it
pub fn version_warning<C: ProductConfig>(
    config: &C,
    templates: &TemplateSet,
    cli_version: &str,
) -> Option<String> {
    check_compatibility(
        cli_version,
        &templates.manifest.version,
        config.upgrade_command(),
    )
}

fn finish(mut tree: HostTree, request: ScaffoldRequest, dry_run: bool) -> Result<Outcome> {
    let actions = tree.actions().to_vec();
    let written = if dry_run {
        0
    } else {
        tree.commit().context("Failed to write changes to the workspace")?
    };
    Ok(Outcome {
        request,
        actions,
        written,
    })
}

/// Scaffold a library into the workspace at `root`
///
/// When generation succeeds but the config update fails, the generated
/// files are still written so the library can be repaired with `configure`.
pub fn generate(
    root: &Path,
    templates: TemplateSet,
    request: &ScaffoldRequest,
    dry_run: bool,
) -> Result<Outcome> {
    let mut tree = HostTree::new(root);
    let scaffolder = Scaffolder::new(TemplateGenerator::new(templates));

    match scaffolder.scaffold(&mut tree, request) {
        Ok(()) => finish(tree, request.clone(), dry_run),
        Err(e) if e.after_generation() => {
            if !dry_run {
                tree.commit()
                    .context("Failed to write the generated library")?;
            }
            Err(anyhow::Error::new(e).context(format!(
                "Library '{}' was generated but not configured; run `configure {}` to finish",
                request.name(),
                request.name()
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Re-apply the React compiler options to an existing library
pub fn configure(args: &ConfigureArgs) -> Result<Outcome> {
    let request = ScaffoldRequest::new(args.name.as_str())?;
    let mut tree = HostTree::new(&args.root);
    configure_library(&mut tree, &request)?;
    finish(tree, request, args.dry_run)
}

/// One `CREATE path (N bytes)` line
pub fn format_action(action: &Action) -> String {
    let kind = match action.kind {
        ActionKind::Create => action.kind.to_string().green(),
        ActionKind::Update => action.kind.to_string().cyan(),
    };
    format!("{} {} ({} bytes)", kind, action.path, action.size)
}

/// Print every recorded action
pub fn print_actions(actions: &[Action]) {
    for action in actions {
        println!("{}", format_action(action));
    }
}

/// Print warnings for options keys that were ignored
pub fn print_ignored(ignored: &[String]) {
    for key in ignored {
        eprintln!(
            "{} option '{}' is not supported and was ignored",
            "Warning:".yellow(),
            key
        );
    }
}

fn print_next_steps<C: ProductConfig>(config: &C, root: &Path, request: &ScaffoldRequest) {
    let steps = config.next_steps(root, request);
    if steps.is_empty() {
        return;
    }

    println!();
    println!("  {}", "Next steps".bold());
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}

/// Plain front end for the generate command
pub fn run<C: ProductConfig>(config: &C, args: GenerateArgs, cli_version: &str) -> Result<()> {
    let parsed = request_from_args(&args)?
        .ok_or_else(|| anyhow::anyhow!("A library name is required (pass NAME or --options)"))?;
    print_ignored(&parsed.ignored);

    let (source, templates) = load_templates(config, args.template_dir.clone())?;
    if let TemplateSource::Local(path) = &source {
        println!("{} {}", "Using local templates from".dimmed(), path.display());
    }
    if let Some(warning) = version_warning(config, &templates, cli_version) {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    let outcome = generate(&args.root, templates, &parsed.request, args.dry_run)?;
    print_actions(&outcome.actions);

    if args.dry_run {
        println!();
        println!("{}", "Dry run: no changes were written.".yellow());
        return Ok(());
    }

    println!();
    println!(
        "{} library {} in {}",
        "Created".green().bold(),
        outcome.request.name(),
        args.root.display()
    );
    print_next_steps(config, &args.root, &outcome.request);

    Ok(())
}

/// Plain front end for the configure command
pub fn run_configure(args: ConfigureArgs) -> Result<()> {
    let outcome = configure(&args)?;
    print_actions(&outcome.actions);

    if args.dry_run {
        println!("{}", "Dry run: no changes were written.".yellow());
    } else {
        println!(
            "{} {}",
            "Configured".green().bold(),
            outcome.request.config_path()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn template_dir_env(&self) -> &'static str {
            "SCHEMATICS_CORE_TEST_TEMPLATE_DIR_UNSET"
        }
        fn upgrade_command(&self) -> &'static str {
            "upgrade"
        }
        fn next_steps(&self, _root: &Path, _request: &ScaffoldRequest) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_request_from_name() {
        let args = GenerateArgs {
            name: Some("ui".to_string()),
            ..Default::default()
        };
        let parsed = request_from_args(&args).unwrap().unwrap();
        assert_eq!(parsed.request.name(), "ui");
        assert!(parsed.ignored.is_empty());
    }

    #[test]
    fn test_request_from_options_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("options.json");
        fs::write(&path, r#"{"name": "home", "tags": "x"}"#).unwrap();

        let args = GenerateArgs {
            options: Some(path.clone()),
            ..Default::default()
        };
        let parsed = request_from_args(&args).unwrap().unwrap();
        assert_eq!(parsed.request.name(), "home");
        assert_eq!(parsed.ignored, vec!["tags"]);

        let args = GenerateArgs {
            name: Some("ui".to_string()),
            options: Some(path),
            ..Default::default()
        };
        let parsed = request_from_args(&args).unwrap().unwrap();
        assert_eq!(parsed.request.name(), "ui");
        assert_eq!(parsed.ignored, vec!["tags"]);
    }

    #[test]
    fn test_request_missing() {
        assert!(request_from_args(&GenerateArgs::default()).unwrap().is_none());
    }

    #[test]
    fn test_run_without_name_fails_in_non_interactive_mode() {
        let args = GenerateArgs {
            yes: true,
            ..Default::default()
        };
        let err = run(&TestConfig, args, "0.1.0").unwrap_err();
        assert!(err.to_string().contains("library name is required"));
    }

    #[test]
    fn test_load_builtin_templates() {
        let (source, templates) = load_templates(&TestConfig, None).unwrap();
        assert_eq!(source, TemplateSource::Builtin);
        assert!(version_warning(&TestConfig, &templates, "99.0.0").is_none());
        assert!(version_warning(&TestConfig, &templates, "0.0.1").is_some());
    }

    #[test]
    fn test_generate_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let request = ScaffoldRequest::new("ui").unwrap();

        let templates = TemplateSet::builtin().unwrap();
        let outcome = generate(tmp.path(), templates, &request, true).unwrap();

        assert_eq!(outcome.written, 0);
        assert!(!outcome.actions.is_empty());
        assert!(!tmp.path().join("libs").exists());
    }

    #[test]
    fn test_generate_keeps_library_when_config_is_broken() {
        let tmp = TempDir::new().unwrap();
        let template_dir = tmp.path().join("template");
        fs::create_dir_all(&template_dir).unwrap();
        fs::write(
            template_dir.join("template.yaml"),
            "name: broken\ndescription: Broken\nversion: 0.1.0\n",
        )
        .unwrap();
        fs::write(template_dir.join("tsconfig.json"), "not-json").unwrap();

        let root = tmp.path().join("workspace");
        fs::create_dir_all(&root).unwrap();
        let request = ScaffoldRequest::new("ui").unwrap();

        let err = generate(&root, TemplateSet::from_dir(&template_dir).unwrap(), &request, false)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("invalid JSON"));
        assert_eq!(
            fs::read_to_string(root.join("libs/ui/tsconfig.json")).unwrap(),
            "not-json"
        );

        fs::write(root.join("libs/ui/tsconfig.json"), "{}").unwrap();
        let outcome = configure(&ConfigureArgs {
            name: "ui".to_string(),
            root: root.clone(),
            dry_run: false,
        })
        .unwrap();
        assert_eq!(outcome.written, 1);
        assert!(fs::read_to_string(root.join("libs/ui/tsconfig.json"))
            .unwrap()
            .contains("\"jsx\": \"react\""));
    }

    #[test]
    fn test_format_action() {
        colored::control::set_override(false);
        let action = Action {
            kind: ActionKind::Update,
            path: "libs/ui/tsconfig.json".to_string(),
            size: 42,
        };
        assert_eq!(format_action(&action), "UPDATE libs/ui/tsconfig.json (42 bytes)");
    }
}
