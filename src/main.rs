mod cleaner;
mod config;
mod forms;
mod html_renderer;
mod scanner;
mod security;
mod types;

use clap::Parser;
use colored::Colorize;
use comfy_table::Table;
use security::{CSRF_FIELD, SecurityContext, SessionSecurity};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const DEFAULT_MODULES_DIR: &str = "/site/modules";
const DEFAULT_ACTION_URL: &str = "./delete/";
const CONFIG_FILE: &str = ".cleaner_config";

/// Permission the host requires before any folder is deleted.
const ADMIN_PERMISSION: &str = "module-admin";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the installed module folders
    #[arg(long, short = 'm')]
    modules_dir: Option<String>,

    /// Print the listing fragment as HTML instead of a terminal table
    #[arg(long, short = 'H')]
    html: bool,

    /// Write the full admin page HTML to FILE
    #[arg(long, short = 'p', value_name = "FILE")]
    page: Option<String>,

    /// Form target embedded in the rendered page
    #[arg(long, value_name = "URL")]
    action_url: Option<String>,

    /// Handle a captured form submission: raw POST body file, or '-' for stdin
    #[arg(long, short = 'f', value_name = "FILE")]
    form: Option<String>,

    /// Grant a permission for this invocation (repeatable)
    #[arg(long, value_name = "PERM")]
    grant: Vec<String>,

    /// Config file (defaults to .cleaner_config inside the modules dir)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // The config file may itself relocate the modules dir, so it is looked
    // up next to whatever dir the flags point at first.
    let dir_candidate = args
        .modules_dir
        .clone()
        .unwrap_or_else(|| DEFAULT_MODULES_DIR.to_string());
    let config_path = args
        .config
        .clone()
        .map_or_else(|| Path::new(&dir_candidate).join(CONFIG_FILE), PathBuf::from);
    let cfg = config::CleanerConfig::load(&config_path).unwrap_or_default();

    let modules_dir = PathBuf::from(
        args.modules_dir
            .or(cfg.modules_dir)
            .unwrap_or_else(|| DEFAULT_MODULES_DIR.to_string()),
    );
    let action_url = args
        .action_url
        .or(cfg.action_url)
        .unwrap_or_else(|| DEFAULT_ACTION_URL.to_string());

    let mut granted = cfg.permissions;
    granted.extend(args.grant);
    let security = SessionSecurity::new(modules_dir.clone(), granted);

    // Write path: a captured form submission
    if let Some(form_source) = &args.form {
        let body = match read_form_body(form_source) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("{} cannot read form body from {form_source}: {e}", "Error:".red());
                std::process::exit(1);
            }
        };
        std::process::exit(handle_delete(&body, &modules_dir, &security));
    }

    // Read path: scan and present
    let folders = scanner::find_hidden_folders(&modules_dir);

    if let Some(output_file) = &args.page {
        let csrf = match security.csrf_token() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{} {e}", "Error:".red());
                std::process::exit(1);
            }
        };
        let html = html_renderer::render_page(&folders, &action_url, &csrf);
        if let Err(e) = fs::write(output_file, html) {
            eprintln!("{} writing page to {output_file}: {e}", "Error:".red());
            std::process::exit(1);
        }
        println!("Admin page written to: {output_file}");
        return;
    }

    if args.html {
        let csrf = match security.csrf_token() {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{} {e}", "Error:".red());
                std::process::exit(1);
            }
        };
        println!("{}", html_renderer::render_folder_list(&folders, &action_url, &csrf));
        return;
    }

    print_folder_table(&modules_dir, &folders);
}

fn read_form_body(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(source)
    }
}

fn handle_delete(body: &str, modules_dir: &Path, security: &dyn SecurityContext) -> i32 {
    if let Err(e) = security.require_permission(ADMIN_PERMISSION) {
        eprintln!("{} {e}", "Error:".red());
        return 1;
    }

    let token_value = forms::field(body, CSRF_FIELD).unwrap_or_default();
    if let Err(e) = security.validate_csrf(CSRF_FIELD, &token_value) {
        eprintln!("{} {e}", "Error:".red());
        return 1;
    }

    let folders = forms::folder_names(body);
    if folders.is_empty() {
        eprintln!("{}", "No folders selected.".red());
        return 1;
    }

    let count = cleaner::delete_folders(modules_dir, &folders);
    println!(
        "{}",
        format!("Successfully deleted {count} folders.").green()
    );
    0
}

fn print_folder_table(modules_dir: &Path, folders: &[types::FolderEntry]) {
    println!(
        "{}",
        format!("=== Orphaned Module Folders: {} ===", modules_dir.display()).cyan()
    );

    if folders.is_empty() {
        println!("{}", "No orphaned module folders found.".green());
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Directory Name", "Last Modified"]);
    for folder in folders {
        table.add_row(vec![
            folder.name.clone(),
            folder.modified.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{table}");

    println!(
        "Found {} folders. Render the page with --page and submit the form with --form to delete.",
        folders.len().to_string().yellow()
    );
}
