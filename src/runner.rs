//! Maker and reader flows.
//!
//! Each flow reads everything first, then builds, then writes once, so a
//! fatal error (missing required column, malformed XML, bad settings) leaves
//! no destination file behind. Progress lines go to stdout unless quiet;
//! diagnostics go through the logger.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use smk_core::maker::document::{self, json_string};
use smk_core::maker::settings::resolve_config_path;
use smk_core::maker::xml_tree::to_xml_string;
use smk_core::maker::{MakerResult, RdmSessionMaker, ScrtSessionMaker, Settings, SheetSource};
use smk_excel::excel::{ExcelBook, ExcelWriter};

use crate::cli::{MakerArgs, ReaderArgs, Target, DEFAULT_CONFIG};
use crate::paths::default_destination;

/// Progress printer.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn say(&self, message: impl Display) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}

/// Where a built document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    File(PathBuf),
    Stdout,
}

/// Settings from `requested`, falling back to `config.yaml`, then to the
/// built-in defaults when neither file exists.
pub fn load_settings(requested: &Path) -> MakerResult<Settings> {
    let path = resolve_config_path(Some(requested), Path::new(DEFAULT_CONFIG));
    if path.is_file() {
        Settings::load(&path)
    } else {
        tracing::warn!("Config file '{}' not found, using default settings.", path.display());
        Ok(Settings::default())
    }
}

// ─── session-maker ──────────────────────────────────────────────────

pub fn run_maker(args: &MakerArgs) -> MakerResult<()> {
    let console = Console::new(args.verbosity.quiet);
    console.say("Reading arguments...");

    let settings = load_settings(&args.config)?;
    let output = if args.print {
        Output::Stdout
    } else {
        Output::File(
            args.write
                .clone()
                .unwrap_or_else(|| default_destination(&args.source, args.target.extension())),
        )
    };
    console.say("Done.");

    console.say("Reading Excel book...");
    let mut book = ExcelBook::open(&args.source)?;
    match args.target {
        Target::Scrt => make_scrt(settings, &mut book, &output, console),
        Target::Rdm => make_rdm(settings, &mut book, &output, console),
    }
}

/// Workbook → SecureCRT XML.
pub fn make_scrt(
    settings: Settings,
    source: &mut dyn SheetSource,
    output: &Output,
    console: Console,
) -> MakerResult<()> {
    let mut maker = ScrtSessionMaker::from_settings(settings)?;
    maker.read_workbook(source)?;
    console.say(format!(
        "Done: {} sessions (ssh: {}), {} credential group(s), {} firewall group(s) from Excel.",
        maker.session_count(&[]),
        maker.session_count(&["ssh"]),
        maker.credential_count(),
        maker.firewall_count(),
    ));

    if maker.session_count(&[]) == 0 {
        console.say("No sessions. Exit.");
        return Ok(());
    }

    console.say("Building sessions...");
    let root = maker.build_xml();
    console.say("Done.");

    match output {
        Output::Stdout => {
            console.say("XML content...");
            print!("{}", to_xml_string(&root)?);
        }
        Output::File(path) => {
            console.say(format!("Writing to '{}'...", path.display()));
            document::write_xml(&root, path)?;
        }
    }
    console.say("Done.");
    Ok(())
}

/// Workbook → Devolutions RDM JSON.
pub fn make_rdm(
    settings: Settings,
    source: &mut dyn SheetSource,
    output: &Output,
    console: Console,
) -> MakerResult<()> {
    let mut maker = RdmSessionMaker::from_settings(settings)?;
    maker.read_workbook(source)?;
    console.say(format!(
        "Done. {} session(s) (ssh: {}, rdp: {}, web: {}), {} credential(s), {} host(s) from Excel.",
        maker.session_count(&["ssh", "rdp", "web"]),
        maker.session_count(&["ssh"]),
        maker.session_count(&["rdp"]),
        maker.session_count(&["web"]),
        maker.credential_count(),
        maker.host_count(),
    ));

    console.say("Building sessions...");
    let connections = maker.build_connections();
    if connections.is_empty() {
        console.say("No sessions. Exit.");
        return Ok(());
    }
    console.say("Done.");

    let doc = connections.to_document();
    match output {
        Output::Stdout => {
            console.say("JSON content...");
            print!("{}", json_string(&doc)?);
        }
        Output::File(path) => {
            console.say(format!("Writing to '{}'...", path.display()));
            document::write_json(&doc, path)?;
        }
    }
    console.say("Done.");
    Ok(())
}

// ─── session-reader ─────────────────────────────────────────────────

pub fn run_reader(args: &ReaderArgs) -> MakerResult<()> {
    let console = Console::new(args.verbosity.quiet);
    console.say("Reading arguments...");

    let settings = load_settings(&args.config)?;
    let destination = args
        .write
        .clone()
        .unwrap_or_else(|| default_destination(&args.source, "xlsx"));
    console.say("Done.");

    read_scrt(settings, &args.source, &destination, console)
}

/// SecureCRT XML → workbook.
pub fn read_scrt(settings: Settings, source: &Path, destination: &Path, console: Console) -> MakerResult<()> {
    console.say("Read SecureCRT sessions XML file...");
    let root = document::read_xml(source)?;

    let mut maker = ScrtSessionMaker::new(settings, Default::default());
    maker.import_xml(&root);
    console.say(format!(
        "Done. Imported: {} sessions, {} credential groups, {} firewall groups.",
        maker.session_count(&[]),
        maker.credential_count(),
        maker.firewall_count(),
    ));

    console.say("Writing Excel file...");
    let mut writer = ExcelWriter::new(destination);
    maker.write_workbook(&mut writer)?;
    writer.save()?;
    console.say("Done.");
    Ok(())
}
