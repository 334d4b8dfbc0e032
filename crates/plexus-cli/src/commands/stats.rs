//! Stats command - Count elements per kind and group

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Result;
use plexus_config::PlexusConfig;
use plexus_core::{Element, ElementKind};
use serde::Serialize;

use super::print_json;
use crate::input::read_elements;
use crate::GlobalOptions;

/// Arguments for the stats command
#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Element file to read
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Element counts of one file
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ElementStats {
    /// Total number of elements
    pub total: usize,
    /// Number of entities
    pub entities: usize,
    /// Number of edges
    pub edges: usize,
    /// Entity count per group
    pub entity_groups: BTreeMap<String, usize>,
    /// Edge count per group
    pub edge_groups: BTreeMap<String, usize>,
    /// Every property name that occurs, in name order
    pub properties: BTreeSet<String>,
}

impl ElementStats {
    pub fn collect(elements: &[Element]) -> Self {
        let mut stats = Self {
            total: elements.len(),
            ..Default::default()
        };

        for element in elements {
            let (count, groups) = match element.kind() {
                ElementKind::Entity => (&mut stats.entities, &mut stats.entity_groups),
                ElementKind::Edge => (&mut stats.edges, &mut stats.edge_groups),
            };
            *count += 1;
            *groups.entry(element.group().to_string()).or_default() += 1;
            stats
                .properties
                .extend(element.properties().names().map(str::to_string));
        }

        stats
    }
}

/// Execute the stats command
pub fn execute(args: StatsArgs, _global: &GlobalOptions, config: &PlexusConfig) -> Result<()> {
    let elements = read_elements(&args.input, config.input.format)?;
    let stats = ElementStats::collect(&elements);

    if args.json {
        return print_json(&stats, config.output.pretty);
    }

    println!("Elements: {}", stats.total);
    println!("\nEntities: {}", stats.entities);
    for (group, count) in &stats.entity_groups {
        println!("  {}: {}", group, count);
    }
    println!("\nEdges: {}", stats.edges);
    for (group, count) in &stats.edge_groups {
        println!("  {}: {}", group, count);
    }
    if !stats.properties.is_empty() {
        let names: Vec<&str> = stats.properties.iter().map(String::as_str).collect();
        println!("\nProperties: {}", names.join(", "));
    }

    Ok(())
}
