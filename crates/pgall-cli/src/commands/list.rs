use crate::gallery;
use crate::GlobalOpts;
use colored::Colorize;
use pgall_manifest::PluginRegistry;

/// Scan the gallery and print a table of every discovered plugin.
///
/// Scan problems are reported but never fatal; an empty gallery is not an
/// error.
pub fn list_plugins(opts: &GlobalOpts) -> anyhow::Result<()> {
    let registry = gallery::load_registry(opts);
    print_registry(&registry);
    Ok(())
}

pub(crate) fn print_registry(registry: &PluginRegistry) {
    if registry.is_empty() {
        println!("No plugins installed.\n");
        println!(
            "Add plugin directories under the gallery root, e.g.:\n  {}",
            "plugins/<name>/plugin.json".bold().cyan()
        );
        return;
    }

    println!(
        "{} {} {} {} {}",
        format!("{:<25}", "Name").bold(),
        format!("{:<10}", "Version").bold(),
        format!("{:<10}", "Level").bold(),
        format!("{:<12}", "Language").bold(),
        "Description".bold()
    );
    println!("{}", "-".repeat(80));

    for name in registry.sorted_names() {
        if let Some(plugin) = registry.get(name) {
            println!(
                "{:<25} {:<10} {:<10} {:<12} {}",
                name, plugin.version, plugin.level, plugin.language, plugin.description
            );
        }
    }

    println!();
    println!("{}: {}", "Total plugins".bold(), registry.len());
}
