use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use env_logger::Env;

use vss2graphql_schema::emit::write_schema;
use vss2graphql_schema::filter::{self, TreeFilter};
use vss2graphql_schema::generators::assemble_schema;
use vss2graphql_schema::layer::Layer;
use vss2graphql_schema::options::GenerationOptions;
use vss2graphql_schema::vss;

const LOG_LEVEL_ENV_VAR: &str = "LOGGING_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_OUTPUT: &str = "resources/schema.graphql";

const HELP: &str = "\
vss2graphql-schema: generate a GraphQL schema from a VSS vspec file

USAGE:
    vss2graphql-schema [OPTIONS] <vspec_file>

OPTIONS:
    -o, --output <file>       Schema output file [default: resources/schema.graphql]
        --layer <file.depl>   Deployment layer restricting and annotating the output
    -I <dir>                  Extra include directory for vspec includes (repeatable)
        --regex-match <pat>   Keep only nodes whose qualified name matches
        --regex-filter <pat>  Drop nodes (and their subtrees) whose qualified name matches
        --custom-scalars      Declare and use VSS integer custom scalars
        --permission-directive
                              Attach @hasPermissions directives
        --range-directive     Attach @range directives for nodes with bounds
        --enums               Declare enum types for allowed-value lists
        --subscription-delivery-interval
                              Add the delivery-interval subscription parameter
    -h, --help                Print this help
";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV_VAR, DEFAULT_LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let options = GenerationOptions {
        custom_scalars: args.contains("--custom-scalars"),
        permission_directive: args.contains("--permission-directive"),
        range_directive: args.contains("--range-directive"),
        enums: args.contains("--enums"),
        subscription_delivery_interval: args.contains("--subscription-delivery-interval"),
    };

    let output: PathBuf = args
        .opt_value_from_str(["-o", "--output"])?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let layer_file: Option<PathBuf> = args.opt_value_from_str("--layer")?;
    let regex_match: Option<String> = args.opt_value_from_str("--regex-match")?;
    let regex_filter: Option<String> = args.opt_value_from_str("--regex-filter")?;
    // The current directory is always part of the include search path.
    let mut include_dirs: Vec<PathBuf> = vec![PathBuf::from(".")];
    include_dirs.extend(args.values_from_str::<_, PathBuf>("-I")?);

    let vspec_file: PathBuf = args
        .free_from_str()
        .map_err(|_| anyhow!("missing vspec file argument; see --help"))?;
    let stray = args.finish();
    if !stray.is_empty() {
        return Err(anyhow!("unexpected arguments: {stray:?}"));
    }

    let roots = vss::load_tree(&vspec_file, &include_dirs)
        .with_context(|| format!("loading {}", vspec_file.display()))?;
    log::info!(
        "loaded {} root(s) from {}",
        roots.len(),
        vspec_file.display()
    );

    let mut tree_filter = TreeFilter::new();
    if let Some(pattern) = &regex_match {
        tree_filter.add(filter::match_pattern(pattern)?);
    }
    if let Some(pattern) = &regex_filter {
        tree_filter.add(filter::filter_pattern(pattern)?);
    }
    let layer = layer_file
        .as_deref()
        .map(Layer::from_file)
        .transpose()
        .context("loading layer file")?;
    if let Some(layer) = &layer {
        tree_filter.add(filter::layer_membership(layer));
    }

    let roots = tree_filter.filter_forest(roots);
    if roots.is_empty() {
        log::warn!("all specification roots were filtered out; emitting an empty schema");
    }
    for root in &roots {
        vss::sort_children(root);
    }

    let declarations = assemble_schema(&roots, &options, layer.as_ref());

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file =
        File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_schema(&mut writer, &declarations)
        .with_context(|| format!("writing {}", output.display()))?;
    writer.flush()?;
    log::info!("schema written to {}", output.display());

    Ok(())
}
