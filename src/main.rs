use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Arg, ArgMatches, Command};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::{Path, PathBuf};

use sbp_generator::{
    cameras::parse_camera_assignments,
    client_registry::{ClientRegistry, ClientStore},
    config::{AppConfig, AppPaths},
    errors::GeneratorError,
    generator::ProjectGenerator,
    models::{
        parse_project_date, Camera, CameraAssignment, CameraPurpose, MediaSelection, MediaType,
        ProjectRequest, WorkType, DATE_INPUT_FORMAT,
    },
    path_analyzer::{DirectoryAnalysis, PathAnalyzer},
    templates::TemplateStore,
    utils::{print_report, print_tree},
};

/// Everything loaded once at startup and handed to each command.
struct Context {
    paths: AppPaths,
    config: AppConfig,
    templates: TemplateStore,
}

impl Context {
    fn load() -> Result<Self> {
        let paths = AppPaths::discover()?;
        let config = AppConfig::load_or_create(&paths.config_file)?;
        let templates = TemplateStore::new(Some(paths.templates_dir.clone()));
        Ok(Self {
            paths,
            config,
            templates,
        })
    }

    fn registry(&self) -> Result<ClientRegistry> {
        ClientRegistry::open(&self.paths.clients_file)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("sbp-gen")
        .version("0.1.0")
        .about("Generate photo and video project folder structures")
        .subcommand_required(false)
        .subcommand(
            Command::new("create")
                .about("Create a new project folder structure")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .help("Project type")
                        .value_parser(["photo", "video", "both"])
                        .required(true),
                )
                .arg(
                    Arg::new("work-type")
                        .long("work-type")
                        .help("Client or personal work")
                        .value_parser(["client", "personal"])
                        .required(true),
                )
                .arg(
                    Arg::new("client")
                        .long("client")
                        .help("Client name (required for client work)"),
                )
                .arg(
                    Arg::new("project")
                        .long("project")
                        .help("Project name")
                        .required(true),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Project date (YYYY-MM-DD), defaults to today"),
                )
                .arg(
                    Arg::new("base-path")
                        .long("base-path")
                        .help("Directory to build the structure in (default: current directory)"),
                )
                .arg(
                    Arg::new("capture-one")
                        .long("capture-one")
                        .help("Include the Capture One folder for photo projects")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("proxies")
                        .long("proxies")
                        .help("Include the Proxies folder for video projects")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-smart-path")
                        .long("no-smart-path")
                        .help("Always create the full folder structure")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("cameras")
                        .long("cameras")
                        .help("Camera setup, e.g. main:lumix,BTS:DJI-POCKET"),
                )
                .arg(
                    Arg::new("show-tree")
                        .long("show-tree")
                        .help("Print the created project tree")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("interactive").about("Create a project with guided prompts"))
        .subcommand(
            Command::new("clients")
                .about("Manage clients")
                .subcommand(Command::new("list").about("List all clients"))
                .subcommand(
                    Command::new("add")
                        .about("Add a new client")
                        .arg(Arg::new("name").required(true).index(1))
                        .arg(
                            Arg::new("notes")
                                .long("notes")
                                .help("Optional notes about the client"),
                        ),
                )
                .subcommand(
                    Command::new("update")
                        .about("Replace a client's notes (clears them when --notes is omitted)")
                        .arg(Arg::new("name").required(true).index(1))
                        .arg(Arg::new("notes").long("notes").help("New notes for the client")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a client")
                        .arg(Arg::new("name").required(true).index(1)),
                )
                .subcommand(
                    Command::new("search")
                        .about("Search clients by name")
                        .arg(Arg::new("query").required(true).index(1)),
                ),
        )
        .subcommand(
            Command::new("setup-assets")
                .about("Create the Assets & Resources folder structure")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Where the assets folder should be created"),
                ),
        )
        .subcommand(Command::new("cameras").about("Show camera setup options and examples"))
        .subcommand(
            Command::new("config")
                .about("Configuration management")
                .subcommand(Command::new("show").about("Show current configuration"))
                .subcommand(Command::new("reset").about("Reset configuration to defaults")),
        )
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("create", sub_matches)) => run_create_command(&Context::load()?, sub_matches),
        Some(("interactive", _)) => run_interactive(&Context::load()?),
        Some(("clients", sub_matches)) => run_clients_command(&Context::load()?, sub_matches),
        Some(("setup-assets", sub_matches)) => {
            run_setup_assets(&Context::load()?, sub_matches)
        }
        Some(("cameras", _)) => {
            show_camera_guide(&Context::load()?.config);
            Ok(())
        }
        Some(("config", sub_matches)) => run_config_command(sub_matches),
        _ => {
            println!("{}", "🎬 SBP Folder Generator".cyan().bold());
            println!("Use 'sbp-gen --help' for usage information");
            println!("Quick start: sbp-gen interactive");
            Ok(())
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing required argument --{}", id))
}

fn run_create_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let media: MediaSelection = required(matches, "type")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let work_type: WorkType = required(matches, "work-type")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let project_date = match matches.get_one::<String>("date") {
        Some(date) => parse_project_date(date)?,
        None => Local::now().date_naive(),
    };

    let mut request = ProjectRequest::new(
        media,
        work_type,
        required(matches, "project")?,
        project_date,
    );
    if let Some(client) = matches.get_one::<String>("client") {
        request = request.with_client(client);
    }
    request.base_path = matches.get_one::<String>("base-path").map(PathBuf::from);
    request.include_capture_one =
        matches.get_flag("capture-one") || ctx.config.default_options.include_capture_one;
    request.include_proxies =
        matches.get_flag("proxies") || ctx.config.default_options.include_proxies;

    if let Some(cameras) = matches.get_one::<String>("cameras") {
        if media.includes(MediaType::Videography) {
            let assignments = parse_camera_assignments(cameras, &ctx.config.default_cameras)?;
            println!(
                "📹 Camera setup: {}",
                assignments
                    .iter()
                    .map(|a| a.folder_name())
                    .collect::<Vec<_>>()
                    .join(", ")
                    .cyan()
            );
            request = request.with_cameras(assignments);
        } else {
            println!(
                "{}: --cameras only applies to video projects, ignoring it",
                "Warning".yellow()
            );
        }
    }

    let current_dir = std::env::current_dir()?;
    let analysis = PathAnalyzer::new(&ctx.config).analyze(&current_dir);
    let smart = analysis.is_in_structure && !matches.get_flag("no-smart-path");
    if smart {
        print_analysis(&analysis);
    } else if analysis.is_in_structure {
        println!("📍 Smart path detection disabled by --no-smart-path");
    }
    let analysis = analysis.with_smart_detection(smart);

    create_project(ctx, &request, &analysis, current_dir, matches.get_flag("show-tree"))
}

fn create_project(
    ctx: &Context,
    request: &ProjectRequest,
    analysis: &DirectoryAnalysis,
    default_root: PathBuf,
    show_tree: bool,
) -> Result<()> {
    let generator = ProjectGenerator::new(&ctx.config, &ctx.templates, default_root);
    let mut registry = ctx.registry()?;

    let report = generator.generate_and_record(request, analysis, &mut registry)?;
    print_report(&report);
    if !report.success {
        std::process::exit(1);
    }

    if show_tree {
        for path in &report.project_paths {
            println!("\n{}", "Project Structure:".green().bold());
            print_tree(path, "", true);
        }
    }
    Ok(())
}

fn print_analysis(analysis: &DirectoryAnalysis) {
    println!("{}", "🔍 Smart path detection:".yellow().bold());
    println!("   Current directory: {}", analysis.current_path.display());
    if let Some(media) = analysis.detected_type {
        println!("   📁 Detected type: {}", media);
    }
    if let Some(work_type) = analysis.detected_work_type {
        println!("   💼 Detected work type: {}", work_type);
    }
    if let Some(client) = &analysis.detected_client {
        println!("   👥 Detected client: {}", client);
    }
    if let Some(year) = analysis.detected_year {
        println!("   📅 Detected year: {}", year);
    }
    if !analysis.discovered_clients.is_empty() {
        println!(
            "   📁 Found client folders: {}",
            analysis.discovered_clients.join(", ")
        );
    }
    let skipped: Vec<&str> = analysis.skip_levels.iter().map(|l| l.as_str()).collect();
    println!("   ⚡ Will skip creating: {}", skipped.join(", "));
}

/// Puts the detected choice first and marks it.
fn choices_with_detected<T: Copy + PartialEq>(
    options: &[(T, &str)],
    detected: Option<T>,
) -> (Vec<T>, Vec<String>) {
    let mut ordered: Vec<(T, String)> = options
        .iter()
        .map(|(value, label)| (*value, label.to_string()))
        .collect();
    if let Some(index) = ordered.iter().position(|(value, _)| Some(*value) == detected) {
        let (value, label) = ordered.remove(index);
        ordered.insert(0, (value, format!("✨ {} (detected)", label)));
    }
    ordered.into_iter().unzip()
}

fn select_one<T: Copy>(prompt: &str, values: &[T], labels: &[String]) -> Result<T> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact()?;
    values
        .get(selection)
        .copied()
        .ok_or_else(|| anyhow!("Invalid selection"))
}

fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(value)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn run_interactive(ctx: &Context) -> Result<()> {
    println!("{}", "🎬 SBP Folder Generator - Interactive Mode".cyan().bold());

    let current_dir = std::env::current_dir()?;
    let analyzer = PathAnalyzer::new(&ctx.config);
    let mut analysis = analyzer.analyze(&current_dir);

    let mut smart = false;
    if analysis.is_in_structure {
        println!();
        print_analysis(&analysis);
        smart = confirm(
            "Use smart path detection? (Skip creating folders that already exist in path)",
            true,
        )?;
        println!();
    }
    analysis = analysis.with_smart_detection(smart);

    let (values, labels) = choices_with_detected(
        &[
            (MediaSelection::Single(MediaType::Photography), "📸 Photo"),
            (MediaSelection::Single(MediaType::Videography), "🎥 Video"),
            (MediaSelection::Both, "📸🎥 Both (Photo + Video)"),
        ],
        analysis
            .detected_type
            .filter(|_| smart)
            .map(MediaSelection::Single),
    );
    let media = select_one("What type of project are you creating?", &values, &labels)?;

    let (values, labels) = choices_with_detected(
        &[
            (WorkType::Client, "👥 Client Work"),
            (WorkType::Personal, "🎨 Personal Work"),
        ],
        analysis.detected_work_type.filter(|_| smart),
    );
    let work_type = select_one("Is this client work or personal work?", &values, &labels)?;

    let client_name = match work_type {
        WorkType::Client => Some(select_client(ctx, &analyzer, &analysis, media)?),
        WorkType::Personal => None,
    };

    let project_name = prompt_text("Enter project name")?;

    let project_date = if confirm("Use today's date?", true)? {
        Local::now().date_naive()
    } else {
        let today = Local::now().format(DATE_INPUT_FORMAT).to_string();
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter project date (YYYY-MM-DD)")
            .default(today)
            .validate_with(|input: &String| -> Result<(), String> {
                parse_project_date(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;
        parse_project_date(&value)?
    };

    let mut request = ProjectRequest::new(media, work_type, &project_name, project_date);
    if let Some(client) = &client_name {
        request = request.with_client(client);
    }

    if media.includes(MediaType::Photography) {
        request.include_capture_one = confirm(
            "Include Capture One folder for photo projects?",
            ctx.config.default_options.include_capture_one,
        )?;
    }
    if media.includes(MediaType::Videography) {
        request.include_proxies = confirm(
            "Include Proxies folder for video projects?",
            ctx.config.default_options.include_proxies,
        )?;
        if confirm(
            "Set up multi-camera folders? (Creates folders like main-Lumix, BTS-DJI-POCKET)",
            false,
        )? {
            let assignments = prompt_camera_setup(&ctx.config.default_cameras)?;
            if assignments.is_empty() {
                println!("No camera assignments created, disabling camera folders.");
            }
            request = request.with_cameras(assignments);
        }
    }

    if !confirm("Create folders in current directory?", true)? {
        let base: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter base path")
            .allow_empty(true)
            .interact_text()?;
        if base.trim().is_empty() {
            println!("Using current directory.");
        } else {
            request.base_path = Some(PathBuf::from(base.trim()));
        }
    }

    print_summary(&request);
    if !confirm("Create this project structure?", true)? {
        println!("Project creation cancelled.");
        return Ok(());
    }

    create_project(ctx, &request, &analysis, current_dir, false)
}

fn select_client(
    ctx: &Context,
    analyzer: &PathAnalyzer,
    analysis: &DirectoryAnalysis,
    media: MediaSelection,
) -> Result<String> {
    let registry = ctx.registry()?;
    let candidates = analyzer.reconcile_clients(analysis, &registry.list_names(), media);

    if candidates.is_empty() {
        if let Some(detected) = analysis
            .detected_client
            .as_deref()
            .filter(|_| analysis.use_smart_detection)
        {
            if confirm(&format!("Use detected client '{}'?", detected), true)? {
                return Ok(detected.to_string());
            }
            return prompt_text("Enter client name");
        }
        return prompt_text("Enter client name (no existing clients found)");
    }

    let on_disk: Vec<&str> = candidates
        .iter()
        .filter(|c| c.on_disk)
        .map(|c| c.name.as_str())
        .collect();
    if !on_disk.is_empty() {
        println!(
            "\n💡 Found {} existing client folders: {}",
            on_disk.len(),
            on_disk.join(", ")
        );
    }

    let mut labels: Vec<String> = candidates
        .iter()
        .map(|candidate| {
            let marker = match (candidate.on_disk, candidate.in_registry) {
                (true, true) => "📁📋",
                (true, false) => "📁",
                _ => "📋",
            };
            if candidate.is_current {
                format!("✨ {} {} (current location)", marker, candidate.name)
            } else if candidate.on_disk && !candidate.in_registry {
                format!("{} {} (from folders)", marker, candidate.name)
            } else {
                format!("{} {}", marker, candidate.name)
            }
        })
        .collect();
    labels.push("➕ Add New Client".to_string());

    let default = candidates.iter().position(|c| c.is_current).unwrap_or(0);
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a client")
        .items(&labels)
        .default(default)
        .interact()?;

    match candidates.get(selection) {
        Some(candidate) => Ok(candidate.name.clone()),
        None => prompt_text("Enter new client name"),
    }
}

fn prompt_camera_setup(defaults: &[Camera]) -> Result<Vec<CameraAssignment>> {
    println!("\n{}", "📹 Camera Setup".blue().bold());
    println!("Set up your cameras and their purposes (main, BTS, secondary, etc.)");

    let mut assignments: Vec<CameraAssignment> = Vec::new();
    loop {
        if !assignments.is_empty() {
            println!("\n📋 Current Camera Setup:");
            for (i, assignment) in assignments.iter().enumerate() {
                println!("   {}. {}", i + 1, assignment.folder_name());
            }
        }

        let mut actions = vec!["➕ Add Camera Assignment", "✅ Done with Camera Setup"];
        if !assignments.is_empty() {
            actions.push("🗑️ Remove Assignment");
        }
        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&actions)
            .default(0)
            .interact()?;

        match action {
            0 => {
                let purposes: Vec<String> = CameraPurpose::ALL
                    .iter()
                    .map(|p| format!("🎬 {}", p.token()))
                    .collect();
                let purpose = select_one(
                    "What's this camera's purpose?",
                    &CameraPurpose::ALL,
                    &purposes,
                )?;

                let mut cameras: Vec<String> =
                    defaults.iter().map(|c| format!("📷 {}", c.name)).collect();
                cameras.push("➕ Add Custom Camera".to_string());
                let choice = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Which camera?")
                    .items(&cameras)
                    .default(0)
                    .interact()?;

                let camera = match defaults.get(choice) {
                    Some(camera) => camera.clone(),
                    None => {
                        let name = prompt_text("Enter camera name")?;
                        let brand: String = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt("Enter camera brand (optional)")
                            .allow_empty(true)
                            .interact_text()?;
                        match Camera::new(&name) {
                            Ok(camera) => camera.with_brand(Some(brand)),
                            Err(e) => {
                                println!("{}: {}", "Warning".yellow(), e);
                                continue;
                            }
                        }
                    }
                };

                let assignment = CameraAssignment::new(camera, purpose);
                let folder = assignment.folder_name();
                if assignments.iter().any(|a| a.folder_name() == folder) {
                    println!("{}: Assignment '{}' already exists!", "Warning".yellow(), folder);
                } else {
                    println!("{}", format!("Added: {}", folder).green());
                    assignments.push(assignment);
                }
            }
            2 => {
                let labels: Vec<String> = assignments.iter().map(|a| a.folder_name()).collect();
                let index = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Which assignment to remove?")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                if index < assignments.len() {
                    assignments.remove(index);
                }
            }
            _ => break,
        }
    }

    Ok(assignments)
}

fn print_summary(request: &ProjectRequest) {
    println!("\n{}", "=".repeat(50));
    println!("{}", "📋 Project Summary:".bold());
    println!("   Project Type: {}", request.media);
    println!("   Work Type: {}", request.work_type);
    if let Some(client) = &request.client_name {
        println!("   Client: {}", client);
    }
    println!("   Project Name: {}", request.project_name);
    println!("   Date: {}", request.project_date.format(DATE_INPUT_FORMAT));
    if let Some(base) = &request.base_path {
        println!("   Base Path: {}", base.display());
    }
    if request.include_capture_one {
        println!("   ✓ Include Capture One folder");
    }
    if request.include_proxies {
        println!("   ✓ Include Proxies folder");
    }
    if request.use_camera_folders && !request.camera_assignments.is_empty() {
        println!("   📹 Camera Folders:");
        for assignment in &request.camera_assignments {
            println!("      • {}", assignment.folder_name());
        }
    }
    println!("{}\n", "=".repeat(50));
}

/// Trimmed `--notes`; a missing or blank value clears the notes.
fn notes_arg(matches: &ArgMatches) -> Option<String> {
    matches
        .get_one::<String>("notes")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn run_clients_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let mut registry = ctx.registry()?;

    match matches.subcommand() {
        Some(("list", _)) => {
            let clients: Vec<_> = registry.clients().collect();
            if clients.is_empty() {
                println!("No clients found.");
                return Ok(());
            }
            println!("{}", "📋 Clients".cyan().bold());
            println!("{:<30} {:>8}  {}", "Name", "Projects", "Created");
            for client in clients {
                println!(
                    "{:<30} {:>8}  {}",
                    client.name.cyan(),
                    client.projects.len().to_string().green(),
                    client.created_date.format(DATE_INPUT_FORMAT).to_string().yellow()
                );
            }
        }
        Some(("add", sub_matches)) => {
            let name = required(sub_matches, "name")?;
            let notes = sub_matches.get_one::<String>("notes").cloned();
            match registry.add(name, notes) {
                Ok(client) => println!("{}", format!("✅ Added client: {}", client.name).green()),
                Err(e) => {
                    if let Some(err @ GeneratorError::DuplicateClient { .. }) =
                        e.downcast_ref::<GeneratorError>()
                    {
                        eprintln!("{}: {}", "Error".red().bold(), err);
                        std::process::exit(1);
                    }
                    return Err(e);
                }
            }
        }
        Some(("update", sub_matches)) => {
            let name = required(sub_matches, "name")?;
            if registry.update_notes(name, notes_arg(sub_matches))? {
                println!("{}", format!("✅ Updated client: {}", name).green());
            } else {
                eprintln!("{}: Client not found: {}", "Error".red().bold(), name);
                std::process::exit(1);
            }
        }
        Some(("remove", sub_matches)) => {
            let name = required(sub_matches, "name")?;
            if registry.remove(name)? {
                println!("{}", format!("✅ Removed client: {}", name).green());
            } else {
                eprintln!("{}: Client not found: {}", "Error".red().bold(), name);
                std::process::exit(1);
            }
        }
        Some(("search", sub_matches)) => {
            let query = required(sub_matches, "query")?;
            let results = registry.search(query);
            if results.is_empty() {
                println!("No clients found matching '{}'.", query);
                return Ok(());
            }
            println!("Found {} client(s) matching '{}':", results.len(), query);
            for name in results {
                println!("  📋 {}", name);
            }
        }
        _ => {
            println!("{}", "Client Management".cyan().bold());
            println!("Available commands:");
            println!("  list   - List all clients");
            println!("  add    - Add a new client");
            println!("  update - Replace a client's notes");
            println!("  remove - Remove a client");
            println!("  search - Search clients by name");
            println!("\nRegistry file: {}", registry.path().display());
        }
    }

    Ok(())
}

fn run_setup_assets(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let base = match matches.get_one::<String>("path") {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.is_dir() {
                return Err(anyhow!("Directory does not exist: {}", path.display()));
            }
            path
        }
        None => std::env::current_dir()?,
    };

    let generator = ProjectGenerator::new(&ctx.config, &ctx.templates, base.clone());
    let report = generator.generate_assets(Some(&base))?;
    print_report(&report);
    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}

fn show_camera_guide(config: &AppConfig) {
    println!("{}", "📹 Camera Setup Guide".blue().bold());

    println!("\n{}", "🎬 Available Camera Purposes:".bold());
    for purpose in CameraPurpose::ALL {
        println!("   • {}", purpose.token());
    }
    println!("   Aliases: PRIMARY → main, BEHIND → BTS, SEC → secondary, AERIAL → drone");

    println!("\n{}", "📷 Default Cameras:".bold());
    print_cameras(&config.default_cameras);

    println!("\n{}", "💡 Example Usage:".bold());
    println!("   sbp-gen interactive");
    println!("   sbp-gen create --type video --work-type client \\");
    println!("     --client 'ABC Corp' --project 'Commercial' \\");
    println!("     --cameras 'main:lumix,BTS:DJI POCKET,drone:drone'");

    println!("\n{}", "📁 This creates folders like:".bold());
    println!("   Footage/RAW/main-Lumix/");
    println!("   Footage/RAW/BTS-DJI-POCKET/");
    println!("   Footage/RAW/drone-Drone/");
    println!("   Footage/Proxies/main-Lumix/ (if proxies enabled)");
}

fn print_cameras(cameras: &[Camera]) {
    for camera in cameras {
        match &camera.brand {
            Some(brand) => println!("   • {} ({})", camera.name, brand),
            None => println!("   • {}", camera.name),
        }
    }
}

fn run_config_command(matches: &ArgMatches) -> Result<()> {
    let paths = AppPaths::discover()?;

    match matches.subcommand() {
        Some(("reset", _)) => config_reset(&paths),
        _ => config_show(&paths),
    }
}

fn config_show(paths: &AppPaths) -> Result<()> {
    let config = AppConfig::load_or_create(&paths.config_file)?;
    println!("{}", "⚙️ Current Configuration".cyan().bold());

    let rows = [
        ("Photo Folder", config.base_directories.photography.clone()),
        ("Video Folder", config.base_directories.videography.clone()),
        ("Assets Folder", config.base_directories.assets.clone()),
        ("Client Work Subfolder", config.client_work_subfolder.clone()),
        ("Personal Work Subfolder", config.personal_work_subfolder.clone()),
        ("Date Format", config.default_options.date_format.clone()),
        (
            "Include Capture One (default)",
            config.default_options.include_capture_one.to_string(),
        ),
        (
            "Include Proxies (default)",
            config.default_options.include_proxies.to_string(),
        ),
    ];
    for (setting, value) in rows {
        println!("{:<32} {}", setting, value.green());
    }

    println!("\n📷 Default Cameras:");
    print_cameras(&config.default_cameras);

    print_location("Config file", &paths.config_file);
    print_location("Clients database", &paths.clients_file);
    print_location("Template overrides", &paths.templates_dir);
    Ok(())
}

fn print_location(label: &str, path: &Path) {
    println!("{}: {}", label, path.display().to_string().yellow());
}

fn config_reset(paths: &AppPaths) -> Result<()> {
    let confirmed = confirm(
        "Reset configuration to defaults? This will update folder names to PHOTO/VIDEO.",
        false,
    )?;

    if confirmed {
        AppConfig::reset(&paths.config_file)?;
        println!("{}", "✅ Configuration reset to defaults!".green().bold());
        println!("Run 'sbp-gen config show' to see the updated settings.");
    } else {
        println!("Configuration reset cancelled.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clients_update(args: &[&str]) -> (String, Option<String>) {
        let mut argv = vec!["sbp-gen", "clients", "update"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        let (_, clients) = matches.subcommand().unwrap();
        let (name, update) = clients.subcommand().unwrap();
        assert_eq!(name, "update");
        (
            update.get_one::<String>("name").unwrap().clone(),
            notes_arg(update),
        )
    }

    #[test]
    fn test_clients_update_sets_and_clears_notes() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = ClientRegistry::open(&temp_dir.path().join("clients.json")).unwrap();
        registry.add("Acme", None).unwrap();

        let (name, notes) = clients_update(&["Acme", "--notes", "  Prefers RAW delivery "]);
        assert_eq!(notes.as_deref(), Some("Prefers RAW delivery"));
        assert!(registry.update_notes(&name, notes).unwrap());
        assert_eq!(
            registry.get("Acme").unwrap().notes.as_deref(),
            Some("Prefers RAW delivery")
        );

        let (name, notes) = clients_update(&["Acme"]);
        assert_eq!(notes, None);
        assert!(registry.update_notes(&name, notes).unwrap());
        assert_eq!(registry.get("Acme").unwrap().notes, None);

        let (name, notes) = clients_update(&["Nobody", "--notes", "x"]);
        assert!(!registry.update_notes(&name, notes).unwrap());
    }

    #[test]
    fn test_clients_update_requires_name() {
        assert!(build_cli()
            .try_get_matches_from(["sbp-gen", "clients", "update"])
            .is_err());
    }
}
