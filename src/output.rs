use console::Style;
use crate::processor::{Diagnostic, DiagnosticsMap};
use std::path::Path;

pub fn print_error(msg: &str) {
    let style = Style::new().red().bold();
    eprintln!("{} {}", style.apply_to("✗"), msg);
}

pub fn print_warning(msg: &str) {
    let style = Style::new().yellow().bold();
    eprintln!("{} {}", style.apply_to("!"), msg);
}

pub fn print_info(msg: &str) {
    let style = Style::new().cyan();
    eprintln!("{} {}", style.apply_to("·"), msg);
}

pub fn print_success(msg: &str) {
    let style = Style::new().green().bold();
    println!("{} {}", style.apply_to("✓"), msg);
}

pub fn print_cleared() {
    let dim = Style::new().dim();
    println!("{}", dim.apply_to("── diagnostics cleared ──"));
}

fn display_path<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

pub fn print_file_diagnostics(path: &Path, root: &Path, diagnostics: &[Diagnostic]) {
    let file_style = Style::new().bold();
    println!(
        "{} ({} surviving)",
        file_style.apply_to(display_path(path, root)),
        diagnostics.len()
    );

    for d in diagnostics {
        let loc_style = Style::new().yellow();
        let op_style = Style::new().magenta();
        let dim = Style::new().dim();

        // Editor ranges are 0-based; print them the way humans count.
        println!(
            "  {} {} {}",
            loc_style.apply_to(format!(
                "{}:{}-{}:{}",
                d.range.start.line + 1,
                d.range.start.character + 1,
                d.range.end.line + 1,
                d.range.end.character + 1,
            )),
            op_style.apply_to(format!("[{}]", d.mutator)),
            dim.apply_to(d.source),
        );
        for line in d.message.lines() {
            println!("      {}", line);
        }
        println!();
    }
}

pub fn print_file_json(path: &Path, diagnostics: &[Diagnostic]) {
    let entry = serde_json::json!({
        "file": path,
        "diagnostics": diagnostics,
    });
    println!("{}", entry);
}

pub fn print_diagnostics(map: &DiagnosticsMap, root: &Path) {
    if map.is_empty() {
        print_success("No surviving mutants.");
        return;
    }
    for (path, diagnostics) in map {
        print_file_diagnostics(path, root, diagnostics);
    }
    print_summary(map);
}

pub fn print_summary(map: &DiagnosticsMap) {
    let total: usize = map.values().map(Vec::len).sum();
    let style = Style::new().yellow().bold();
    println!(
        "{} {} surviving mutant{} in {} file{}",
        style.apply_to("!"),
        total,
        if total == 1 { "" } else { "s" },
        map.len(),
        if map.len() == 1 { "" } else { "s" },
    );
}

pub fn diagnostics_json(map: &DiagnosticsMap) -> serde_json::Result<String> {
    serde_json::to_string(map)
}
