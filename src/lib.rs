pub mod classify;
pub mod collect;
pub mod error;
pub mod merge;
pub mod template;

use std::path::Path;

use console::style;

use crate::classify::{classify, prune_answered, Markers};
use crate::collect::{collect, InputSource};
use crate::error::{RestampError, Result};
use crate::merge::merge;
use crate::template::Mapping;

pub struct RunOptions {
    pub template: std::path::PathBuf,
    pub deployment_name: String,
    pub deployment_count: u32,
    pub delimiter: String,
    pub sentinel: i64,
    pub debug: bool,
    pub skip_constants: bool,
}

/// Execute the whole pipeline: load and classify the template, run the
/// optional constants pass, then prompt, merge, and write one document per
/// deployment.
///
/// Every document is encoded in full before a single write, so output files
/// are either complete or never created; a write failure aborts the
/// remaining passes.
pub fn run(options: &RunOptions, input: &mut dyn InputSource) -> Result<()> {
    if options.deployment_count < 1 {
        return Err(RestampError::InvalidDeploymentCount {
            count: options.deployment_count,
        });
    }

    let template = template::load(&options.template)?;
    dump(options.debug, "template", &template);

    let markers = Markers::new(options.delimiter.as_str(), options.sentinel);
    let out_dir = options.template.parent().unwrap_or(Path::new(""));

    let mut shape = classify(&template, &markers);
    dump(options.debug, "shape", &shape);

    // Deployments merge against the constants document once that pass ran.
    let mut base = template.clone();

    if !options.skip_constants {
        banner("CONSTANTS");
        note("You will be prompted to enter a value for all placeholders.");
        note("Leave blank any placeholders which must be individually configured for each deployment.");
        println!();

        let answers = collect(&shape, &markers, input)?;
        dump(options.debug, "constants", &answers);

        let constants = merge(&template, &answers);
        let const_path = out_dir.join(format!("{}.const.yml", options.deployment_name));
        write_document(&constants, &const_path)?;

        println!();
        note(&format!("Wrote constants to: {}", const_path.display()));
        note(&format!(
            "To use this constants file, run 'restamp -t {} -s [options]'",
            const_path.display()
        ));

        shape = prune_answered(&shape, &answers);
        dump(options.debug, "remaining shape", &shape);
        base = constants;
    }

    banner("DEPLOYMENTS");
    note("You will now be prompted to fill the remaining placeholders.");
    note(&format!(
        "You will be prompted {} times for each placeholder, once for each deployment.",
        options.deployment_count
    ));

    for index in 1..=options.deployment_count {
        println!();
        note(&format!("Deployment {index}"));

        let answers = collect(&shape, &markers, input)?;
        dump(options.debug, "answers", &answers);

        let document = merge(&base, &answers);
        let path = out_dir.join(format!("{}.{index}.yml", options.deployment_name));
        write_document(&document, &path)?;
    }

    println!();
    note(&format!(
        "Wrote deployments to: {}",
        out_dir
            .join(format!("{}.*.yml", options.deployment_name))
            .display()
    ));
    note("Goodbye.");
    Ok(())
}

fn write_document(document: &Mapping, path: &Path) -> Result<()> {
    let text = template::encode(document)?;
    std::fs::write(path, text).map_err(|e| RestampError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn banner(title: &str) {
    let pad = " ".repeat(title.len());
    println!("\n\u{250c}  {pad}  \u{2510}");
    println!("   {}   ", style(title).bold());
    println!("\u{2514}  {pad}  \u{2518}\n");
}

fn note(text: &str) {
    println!("{}  {}", style("\u{25ba}").cyan(), text);
}

fn dump<T: std::fmt::Debug>(enabled: bool, label: &str, value: &T) {
    if enabled {
        eprintln!("{} {label}: {value:#?}", style("debug:").dim());
    }
}
