//! This is the command line tool that loads '.dot' files, imports them into
//! the graph model, and prints or saves the result.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use dotgraph::dot::{ast_to_string, DotExport, DotImport, DotParser};
use dotgraph::model::Graph;
use std::fs;
use std::process;

struct CLIOptions {
    dump_ast: bool,
    export: bool,
    output_path: Option<String>,
    input_path: String,
}

fn count_subgraphs(graph: &Graph) -> (usize, usize) {
    let mut clusters = 0;
    let mut subgraphs = 0;
    for g in graph.graphs().skip(1) {
        if graph.is_cluster(g) {
            clusters += 1;
        } else {
            subgraphs += 1;
        }
    }
    (clusters, subgraphs)
}

fn log_summary(graphs: &[Graph]) {
    for graph in graphs {
        let (clusters, subgraphs) = count_subgraphs(graph);
        log::info!(
            "{} {}: {} nodes, {} edges, {} clusters, {} subgraphs",
            graph.kind().keyword(),
            graph.name(graph.root()).unwrap_or("<anonymous>"),
            graph.node_count() - clusters - subgraphs,
            graph.edge_count(),
            clusters,
            subgraphs
        );
    }
}

fn run(options: &CLIOptions) -> Result<(), String> {
    let contents = fs::read_to_string(&options.input_path)
        .map_err(|err| format!("Can't open {}: {}", options.input_path, err))?;

    if options.dump_ast {
        let mut parser = DotParser::new(&contents);
        let trees = parser
            .process()
            .map_err(|err| format!("{}\n{}", err.excerpt, err))?;
        for tree in &trees {
            print!("{}", ast_to_string(tree));
        }
    }

    let graphs = DotImport::new()
        .import_str(&contents)
        .map_err(|err| err.to_string())?;
    log_summary(&graphs);

    if !options.export {
        return Ok(());
    }

    let exporter = DotExport::new();
    let content: String = graphs.iter().map(|g| exporter.export(g)).collect();
    match &options.output_path {
        Some(path) => {
            fs::write(path, content)
                .map_err(|err| format!("Could not write the file {}: {}", path, err))?;
            log::info!("Wrote {}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn main() {
    let matches = Command::new("dotgraph")
        .version("0.1.0")
        .about("Imports GraphViz DOT files into an attributed graph model")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enables debug logging"),
        )
        .arg(
            Arg::new("ast")
                .short('a')
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST"),
        )
        .arg(
            Arg::new("export")
                .short('e')
                .long("export")
                .action(ArgAction::SetTrue)
                .help("Write the imported graphs as normalized DOT text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the exported file (default: stdout)"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(level)
        .parse_default_env()
        .init();

    let options = CLIOptions {
        dump_ast: matches.get_flag("ast"),
        export: matches.get_flag("export"),
        output_path: matches.get_one::<String>("output").cloned(),
        input_path: matches
            .get_one::<String>("INPUT")
            .cloned()
            .unwrap_or_default(),
    };

    if let Err(err) = run(&options) {
        // Printed directly, so that the message survives RUST_LOG=off.
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
