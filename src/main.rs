// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Timegrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Timegrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Timegrid CLI entrypoint.
//!
//! By default this loads a timetable CSV and runs the interactive week grid in the terminal.
//! `--payload`, `--schema` and `--print` write to stdout instead and exit.

use std::error::Error;
use std::path::Path;

use timegrid::interact::Controller;
use timegrid::layout::{GridMetrics, Surface};
use timegrid::model::{fixtures::demo_timetable, Timetable};
use timegrid::present::{build_render_model_with_palette, snapshot_json_schema, Palette};
use timegrid::render::{canvas_to_string_trimmed, Canvas};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "TIMEGRID_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
const DEFAULT_SURFACE: (usize, usize) = (110, 44);
const PRINT_SURFACE: (usize, usize) = (100, 40);

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <timetable.csv>\n  {program} --demo\n  {program} (<timetable.csv> | --demo) --payload\n  {program} (<timetable.csv> | --demo) --print [--select-all]\n  {program} --schema\n\nThe CSV holds one subject per row: name,code,credits,session code,DAY:HH:MM-HH:MM,...\n--payload prints the render snapshot as JSON, --schema prints its JSON schema.\n--print prints the week grid as plain text; with --select-all it prints the export view\nof every session.\n\nEnvironment: TIMEGRID_PALETTE (comma-separated #RRGGBB), TIMEGRID_LOG (log filter)."
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Tui,
    Payload,
    Schema,
    Print,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    csv: Option<String>,
    demo: bool,
    output: Output,
    select_all: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            csv: None,
            demo: false,
            output: Output::Tui,
            select_all: false,
        }
    }
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--payload" | "--schema" | "--print" => {
                if options.output != Output::Tui {
                    return Err(());
                }
                options.output = match arg.as_str() {
                    "--payload" => Output::Payload,
                    "--schema" => Output::Schema,
                    _ => Output::Print,
                };
            }
            "--select-all" => {
                if options.select_all {
                    return Err(());
                }
                options.select_all = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.csv.is_some() {
                    return Err(());
                }
                options.csv = Some(arg);
            }
        }
    }

    if options.demo && options.csv.is_some() {
        return Err(());
    }
    if options.select_all && options.output != Output::Print {
        return Err(());
    }
    let has_source = options.demo || options.csv.is_some();
    match options.output {
        Output::Schema if has_source => Err(()),
        Output::Schema => Ok(options),
        _ if !has_source => Err(()),
        _ => Ok(options),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_timetable(options: &CliOptions) -> Result<(Timetable, String), Box<dyn Error>> {
    if let Some(csv) = options.csv.as_deref() {
        let path = Path::new(csv);
        let timetable = timegrid::format::load_timetable_csv(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| csv.to_owned());
        return Ok((timetable, source));
    }
    Ok((demo_timetable()?, "demo".to_owned()))
}

fn controller_for(
    timetable: &Timetable,
    source: String,
    palette: &Palette,
    (width, height): (usize, usize),
) -> Result<Controller, Box<dyn Error>> {
    let model = build_render_model_with_palette(timetable, palette).with_source(source);
    let metrics = GridMetrics::default();
    let surface = Surface::new(width, height, &metrics)?;
    Ok(Controller::new(model, surface, metrics)?)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "timegrid".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        if options.output == Output::Schema {
            println!("{}", serde_json::to_string_pretty(&snapshot_json_schema())?);
            return Ok(());
        }

        let palette = Palette::from_env()?;
        let (timetable, source) = load_timetable(&options)?;
        debug!(source = %source, subjects = timetable.subjects().len(), "timetable ready");

        match options.output {
            Output::Payload => {
                let model =
                    build_render_model_with_palette(&timetable, &palette).with_source(source);
                println!("{}", serde_json::to_string_pretty(&model.snapshot())?);
            }
            Output::Print => {
                let mut controller = controller_for(&timetable, source, &palette, PRINT_SURFACE)?;
                if options.select_all {
                    controller.select_all();
                    print!("{}", controller.export_selection()?.to_plain_text());
                } else {
                    let (width, height) = PRINT_SURFACE;
                    let mut canvas = Canvas::new(width, height)?;
                    controller.render(&mut canvas)?;
                    print!("{}", canvas_to_string_trimmed(&canvas));
                }
            }
            Output::Tui => {
                let controller = controller_for(&timetable, source, &palette, DEFAULT_SURFACE)?;
                timegrid::tui::run(controller, std::env::current_dir()?)?;
            }
            Output::Schema => {}
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("timegrid: {err}");
        std::process::exit(1);
    }
}
