//! Kiosk Tour CLI
//!
//! Inspects the content tree the kiosk reads: monitor categories, documents and their
//! page images, and the component catalog.

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use kiosktour_content::{
    discover_pages, first_page_aspect_ratio, resolve_catalog_relative, ComponentCatalog,
    ComponentMetadata, LayoutConfig, MonitorIndex, ScreenFit,
};

/// Kiosk Tour - content inspector
#[derive(Parser)]
#[command(name = "kioskctl")]
#[command(
    author,
    version,
    about = "Kiosk Tour - inspect and validate kiosk content"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Asset root holding MonitorContent/ and ComponentMetadata/
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    /// Component catalog file (defaults to ComponentMetadata/cabinetData.json)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List monitor categories
    #[command(visible_alias = "cats")]
    Categories,

    /// List the files of one category
    Files {
        /// Category name (case-sensitive)
        category: String,
    },

    /// Count the pages of a document folder and show the screen layout it gets
    Pages {
        /// Document folder relative to the asset root
        document: String,
    },

    /// List catalog components, optionally only those of one cabinet
    Components {
        /// Parent cabinet name (case-sensitive)
        #[arg(long)]
        cabinet: Option<String>,
    },

    /// Show one component from the catalog
    Component {
        /// Component id
        id: String,
    },

    /// Check every document and catalog image referenced by the content
    Validate,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => fail(format!("Failed to encode JSON: {e}")),
    }
}

fn catalog_path(cli: &Cli) -> PathBuf {
    match &cli.catalog {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cli.assets.join(path),
        None => ComponentCatalog::default_path(&cli.assets),
    }
}

fn load_index(assets: &Path) -> MonitorIndex {
    MonitorIndex::load_from_file(&MonitorIndex::default_path(assets))
        .unwrap_or_else(|e| fail(format!("Monitor index could not be loaded: {e}")))
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Categories => run_categories(&cli),
        Commands::Files { category } => run_files(&cli, category),
        Commands::Pages { document } => run_pages(&cli, document),
        Commands::Components { cabinet } => run_components(&cli, cabinet.as_deref()),
        Commands::Component { id } => run_component(&cli, id),
        Commands::Validate => {
            let report = validate(&cli.assets, &catalog_path(&cli));
            if cli.json {
                print_json(&report);
            } else {
                print_report(&report);
            }
            if !report.problems.is_empty() {
                std::process::exit(1);
            }
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

#[derive(Debug, Serialize)]
struct CategorySummary<'a> {
    name: &'a str,
    files: usize,
}

fn run_categories(cli: &Cli) {
    let index = load_index(&cli.assets);
    let summary: Vec<CategorySummary> = index
        .categories
        .iter()
        .map(|c| CategorySummary {
            name: &c.name,
            files: c.files.len(),
        })
        .collect();

    if cli.json {
        print_json(&summary);
        return;
    }

    println!("{}", "Monitor categories".cyan().bold());
    for entry in &summary {
        println!("  {} {}", entry.name.bold(), format!("({} files)", entry.files).dimmed());
    }
    println!(
        "{} {} categories, {} files",
        "Total:".bold(),
        summary.len(),
        index.total_files()
    );
}

#[derive(Debug, Serialize)]
struct FileSummary {
    title: String,
    document: Option<String>,
    pages: usize,
}

fn run_files(cli: &Cli, category: &str) {
    let index = load_index(&cli.assets);
    let category = match index.category(category) {
        Ok(category) => category,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            eprintln!("Available categories: {}", index.category_names().join(", "));
            std::process::exit(1);
        }
    };

    let files: Vec<FileSummary> = category
        .files
        .iter()
        .map(|file| {
            let document = file.document_path(category);
            let pages = document
                .as_deref()
                .map(|doc| discover_pages(&cli.assets, doc).len())
                .unwrap_or(0);
            FileSummary {
                title: file.title.clone(),
                document,
                pages,
            }
        })
        .collect();

    if cli.json {
        print_json(&files);
        return;
    }

    println!("{}", category.name.cyan().bold());
    for file in &files {
        match &file.document {
            Some(doc) => {
                let pages = if file.pages == 0 {
                    "no pages".red().to_string()
                } else {
                    format!("{} pages", file.pages).green().to_string()
                };
                println!("  {} {} [{}]", file.title.bold(), doc.dimmed(), pages);
            }
            None => println!(
                "  {} {}",
                file.title.bold(),
                "(no resource path or file name)".yellow()
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct PagesSummary {
    document: String,
    pages: Vec<String>,
    first_page_aspect: Option<f32>,
    full_size: bool,
    aspect_ratio: f32,
}

fn run_pages(cli: &Cli, document: &str) {
    let pages = discover_pages(&cli.assets, document);
    let aspect = first_page_aspect_ratio(&cli.assets, document);
    let layout = LayoutConfig::default().choose(aspect);

    let summary = PagesSummary {
        document: document.to_string(),
        pages: pages.iter().map(|p| p.asset_path.clone()).collect(),
        first_page_aspect: aspect,
        full_size: layout.fit == ScreenFit::FullSize,
        aspect_ratio: layout.aspect_ratio,
    };

    if cli.json {
        print_json(&summary);
        return;
    }

    if summary.pages.is_empty() {
        fail(format!(
            "No pages found for {document} (expected page_001.png, page_002.png, ...)"
        ));
    }
    println!("{} {}", "Document:".bold(), document.cyan());
    for page in &summary.pages {
        println!("  {}", page);
    }
    println!(
        "{} {} | {} {:.3} ({})",
        "Pages:".bold(),
        summary.pages.len(),
        "Aspect:".bold(),
        summary.aspect_ratio,
        if summary.full_size {
            "full size"
        } else {
            "original rect"
        }
    );
}

fn load_catalog(path: &Path) -> ComponentCatalog {
    ComponentCatalog::load_from_file(path)
        .unwrap_or_else(|e| fail(format!("Component catalog could not be loaded: {e}")))
}

#[derive(Debug, Serialize)]
struct ComponentSummary<'a> {
    id: &'a str,
    name: &'a str,
    cabinet: &'a str,
    image: bool,
    ecad: bool,
}

fn component_summaries<'a>(
    catalog: &'a ComponentCatalog,
    cabinet: Option<&'a str>,
) -> Vec<ComponentSummary<'a>> {
    let components: Box<dyn Iterator<Item = &'a ComponentMetadata> + 'a> = match cabinet {
        Some(cabinet) => Box::new(catalog.in_cabinet(cabinet)),
        None => Box::new(catalog.components.iter()),
    };
    components
        .map(|c| ComponentSummary {
            id: &c.id,
            name: &c.name,
            cabinet: &c.parent_cabinet,
            image: c.has_image(),
            ecad: c.has_ecad(),
        })
        .collect()
}

fn run_components(cli: &Cli, cabinet: Option<&str>) {
    let catalog = load_catalog(&catalog_path(cli));
    let summary = component_summaries(&catalog, cabinet);

    if cli.json {
        print_json(&summary);
        return;
    }

    println!("{}", cabinet.unwrap_or("All components").cyan().bold());
    for entry in &summary {
        let mut extras = Vec::new();
        if entry.image {
            extras.push("image");
        }
        if entry.ecad {
            extras.push("ECAD");
        }
        println!(
            "  {} {} {}",
            entry.id.bold(),
            entry.name,
            format!("[{}]", extras.join(", ")).dimmed()
        );
    }
    println!("{} {} components", "Total:".bold(), summary.len());
}

fn run_component(cli: &Cli, id: &str) {
    let path = catalog_path(cli);
    let catalog = load_catalog(&path);
    let component = catalog.get(id).unwrap_or_else(|e| fail(e));

    if cli.json {
        print_json(component);
        return;
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    println!("{} {}", component.name.cyan().bold(), format!("[{}]", component.id).dimmed());
    if !component.kind.is_empty() {
        println!("{} {}", "Type:".bold(), component.kind);
    }
    if !component.parent_cabinet.is_empty() {
        println!("{} {}", "Cabinet:".bold(), component.parent_cabinet);
    }
    if !component.description.is_empty() {
        println!("{}", component.description);
    }
    print_image_line("Image:", dir, &component.image_path);
    print_image_line("ECAD:", dir, &component.ecad_path);
}

fn print_image_line(label: &str, dir: &Path, relative: &str) {
    if relative.trim().is_empty() {
        println!("{} {}", label.bold(), "none".dimmed());
        return;
    }
    let status = if resolve_catalog_relative(dir, relative).is_file() {
        "ok".green()
    } else {
        "missing".red()
    };
    println!("{} {} ({})", label.bold(), relative, status);
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Default, Serialize)]
struct ValidationReport {
    categories: usize,
    documents: usize,
    pages: usize,
    components: usize,
    problems: Vec<String>,
}

/// Walk the monitor index and the catalog, collecting every broken reference.
fn validate(assets: &Path, catalog_path: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    match MonitorIndex::load_from_file(&MonitorIndex::default_path(assets)) {
        Ok(index) => {
            report.categories = index.categories.len();
            for category in &index.categories {
                for file in &category.files {
                    let Some(document) = file.document_path(category) else {
                        report.problems.push(format!(
                            "{} / {}: no resource path or file name",
                            category.name, file.title
                        ));
                        continue;
                    };
                    report.documents += 1;
                    let pages = discover_pages(assets, &document).len();
                    if pages == 0 {
                        report
                            .problems
                            .push(format!("{} / {}: no pages in {}", category.name, file.title, document));
                    }
                    report.pages += pages;
                }
            }
        }
        Err(e) => report.problems.push(format!("monitor index: {e}")),
    }

    match ComponentCatalog::load_from_file(catalog_path) {
        Ok(catalog) => {
            report.components = catalog.components.len();
            let dir = catalog_path.parent().unwrap_or_else(|| Path::new("."));
            for component in &catalog.components {
                check_component(&mut report, dir, component);
            }
        }
        Err(e) => report.problems.push(format!("component catalog: {e}")),
    }

    report
}

fn check_component(report: &mut ValidationReport, dir: &Path, component: &ComponentMetadata) {
    if component.id.trim().is_empty() {
        report
            .problems
            .push(format!("component '{}' has an empty id", component.name));
    }
    for (what, relative) in [("image", &component.image_path), ("ECAD", &component.ecad_path)] {
        if relative.trim().is_empty() {
            continue;
        }
        if !resolve_catalog_relative(dir, relative).is_file() {
            report.problems.push(format!(
                "component {}: {} {} is missing",
                component.id, what, relative
            ));
        }
    }
}

fn print_report(report: &ValidationReport) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!(
        "{} {} categories, {} documents, {} pages, {} components",
        "Checked:".bold().white(),
        report.categories,
        report.documents,
        report.pages,
        report.components
    );
    if report.problems.is_empty() {
        println!("{}", "All content references resolve.".bright_green().bold());
    } else {
        for problem in &report.problems {
            println!("  {} {}", "-".red(), problem);
        }
        println!(
            "{} {} problem(s) found",
            "Error:".red().bold(),
            report.problems.len()
        );
    }
    println!("{}", "═══════════════════════════════════════".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_assets(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kioskctl_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("MonitorContent/Research/study")).unwrap();
        fs::create_dir_all(dir.join("ComponentMetadata")).unwrap();
        dir
    }

    #[test]
    fn test_validate_reports_missing_pages_and_images() {
        let assets = temp_assets("validate");
        fs::write(assets.join("MonitorContent/Research/study/page_001.png"), b"").unwrap();
        fs::write(
            assets.join("MonitorContent/monitorIndex.json"),
            r#"{ "categories": [ { "name": "Research Papers", "files": [
                { "title": "Study", "resourcePath": "MonitorContent/Research/study" },
                { "title": "Empty", "resourcePath": "MonitorContent/Research/empty" },
                { "title": "Broken" }
            ] } ] }"#,
        )
        .unwrap();
        fs::write(
            assets.join("ComponentMetadata/cabinetData.json"),
            r#"{ "components": [ { "id": "K1", "imagePath": "k1.png" } ] }"#,
        )
        .unwrap();

        let report = validate(&assets, &ComponentCatalog::default_path(&assets));
        assert_eq!(report.categories, 1);
        assert_eq!(report.documents, 2);
        assert_eq!(report.pages, 1);
        assert_eq!(report.components, 1);
        assert_eq!(report.problems.len(), 3, "{:?}", report.problems);

        let _ = fs::remove_dir_all(&assets);
    }

    #[test]
    fn test_validate_missing_files() {
        let assets = std::env::temp_dir().join(format!("kioskctl_none_{}", std::process::id()));
        let report = validate(&assets, &ComponentCatalog::default_path(&assets));
        assert_eq!(report.problems.len(), 2);
        assert!(report.problems[0].starts_with("monitor index"));
        assert!(report.problems[1].starts_with("component catalog"));
    }

    #[test]
    fn test_components_filtered_by_cabinet() {
        let catalog = ComponentCatalog::from_json_str(
            r#"{ "components": [
                { "id": "PLC-01", "parentCabinet": "Main Cabinet", "imagePath": "plc.png" },
                { "id": "PSU-01", "parentCabinet": "Main Cabinet", "ecadPath": "psu.png" },
                { "id": "K7", "parentCabinet": "Left Cabinet" }
            ] }"#,
            Path::new("cabinetData.json"),
        )
        .unwrap();

        let main = component_summaries(&catalog, Some("Main Cabinet"));
        let ids: Vec<_> = main.iter().map(|c| c.id).collect();
        assert_eq!(ids, ["PLC-01", "PSU-01"]);
        assert!(main[0].image && !main[0].ecad);
        assert!(!main[1].image && main[1].ecad);

        assert_eq!(component_summaries(&catalog, None).len(), 3);
        assert!(component_summaries(&catalog, Some("Nowhere")).is_empty());

        let cli = Cli::parse_from(["kioskctl", "components", "--cabinet", "Left Cabinet"]);
        assert!(matches!(cli.command, Commands::Components { cabinet: Some(ref c) } if c == "Left Cabinet"));
    }

    #[test]
    fn test_cli_parses_global_assets() {
        let cli = Cli::parse_from(["kioskctl", "files", "Research Papers", "--assets", "content"]);
        assert_eq!(cli.assets, PathBuf::from("content"));
        assert!(matches!(cli.command, Commands::Files { ref category } if category == "Research Papers"));
        assert_eq!(
            catalog_path(&cli),
            PathBuf::from("content/ComponentMetadata/cabinetData.json")
        );
    }
}
