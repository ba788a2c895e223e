//! Purpose: Map parsed CLI flags to facet evaluations and emit results.
//! Exports: `run_facets`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate facet output.
//! Invariants: Facets are evaluated in the flag-table order; the first
//! failing facet aborts remaining output.
//! Invariants: Plain mode prints one line per facet; `--json` prints one
//! object keyed by facet name.

use serde_json::{Map, Value};

use pyside2_config::core::config::ResolverConfig;
use pyside2_config::core::error::Error;
use pyside2_config::core::probe::Probe;
use pyside2_config::core::resolver::{ALL_FACETS, Facet, Resolver};

use super::Cli;

pub(super) fn run_facets(
    cli: &Cli,
    config: &ResolverConfig,
    probe: &dyn Probe,
) -> Result<i32, Error> {
    let resolver = Resolver::new(config, probe);
    let facets = selected_facets(cli);

    if cli.json {
        let mut object = Map::new();
        for facet in facets {
            object.insert(facet.key().to_string(), Value::from(facet.resolve(&resolver)?));
        }
        println!("{}", Value::Object(object));
    } else {
        for facet in facets {
            println!("{}", facet.resolve(&resolver)?);
        }
    }
    Ok(0)
}

fn selected_facets(cli: &Cli) -> Vec<Facet> {
    let requested: Vec<Facet> = ALL_FACETS
        .into_iter()
        .filter(|facet| match facet {
            Facet::PythonInclude => cli.python_include,
            Facet::PythonLink => cli.python_link,
            Facet::Pyside2Location => cli.pyside2,
            Facet::Pyside2Include => cli.pyside2_include,
            Facet::Pyside2Link => cli.pyside2_link,
            Facet::Pyside2SharedLibraries => cli.pyside2_shared_libraries,
            Facet::ClangBinDir => cli.clang_bin_dir,
        })
        .collect();

    if cli.all || requested.is_empty() {
        ALL_FACETS.to_vec()
    } else {
        requested
    }
}
