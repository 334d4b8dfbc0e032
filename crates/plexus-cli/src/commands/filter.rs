//! Filter command - Run the filter operation over an element file
//!
//! Group flags register allow-list groups without tests. `--more-than`
//! adds a test applied to every element. Kept elements are written to
//! stdout as a JSON array, in input order.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use plexus_config::PlexusConfig;
use plexus_core::filter::IsMoreThan;
use plexus_core::{filter_elements, ElementFilter, FilterConfig, Value};
use tracing::debug;

use super::{print_info, print_json};
use crate::input::read_elements;
use crate::GlobalOptions;

/// Arguments for the filter command
#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// Element file to read
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Keep entities of this group (repeatable)
    #[arg(long = "entity", value_name = "GROUP")]
    entity_groups: Vec<String>,

    /// Keep edges of this group (repeatable)
    #[arg(long = "edge", value_name = "GROUP")]
    edge_groups: Vec<String>,

    /// Keep only elements whose property is more than the number
    #[arg(long, value_name = "PROPERTY=NUMBER")]
    more_than: Option<PropertyBound>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

/// A `PROPERTY=NUMBER` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBound {
    property: String,
    bound: Value,
}

impl FromStr for PropertyBound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, number) = s
            .split_once('=')
            .ok_or_else(|| format!("expected PROPERTY=NUMBER, got '{}'", s))?;
        let property = property.trim();
        if property.is_empty() {
            return Err(format!("missing property name in '{}'", s));
        }

        let number = number.trim();
        let bound = if let Ok(int) = number.parse::<i64>() {
            Value::Int(int)
        } else if let Ok(float) = number.parse::<f64>() {
            Value::Float(float)
        } else {
            return Err(format!("'{}' is not a number", number));
        };

        Ok(Self {
            property: property.to_string(),
            bound,
        })
    }
}

/// Build the filter configuration described by the arguments.
pub fn build_filter_config(args: &FilterArgs) -> FilterConfig {
    let mut builder = FilterConfig::builder();

    for group in &args.entity_groups {
        builder = builder.entity_group(group);
    }
    for group in &args.edge_groups {
        builder = builder.edge_group(group);
    }

    if let Some(ref more_than) = args.more_than {
        builder = builder.global_elements(
            ElementFilter::builder()
                .select([more_than.property.as_str()])
                .execute(IsMoreThan::new(more_than.bound.clone()))
                .build(),
        );
    }

    builder.build()
}

/// Execute the filter command
pub fn execute(args: FilterArgs, global: &GlobalOptions, config: &PlexusConfig) -> Result<()> {
    let elements = read_elements(&args.input, config.input.format)?;
    let filter_config = build_filter_config(&args);
    debug!("Filtering with {:?}", filter_config);

    if filter_config.is_unconfigured() {
        print_info(
            "No groups or tests given, the filter keeps nothing",
            global.quiet,
        );
    }

    let total = elements.len();
    let kept = filter_elements(Some(elements), &filter_config)
        .with_context(|| format!("Failed to filter '{}'", args.input.display()))?;

    print_json(&kept, args.pretty || config.output.pretty)?;
    print_info(&format!("Kept {} of {} elements", kept.len(), total), global.quiet);
    Ok(())
}
