#![forbid(unsafe_code)]

mod cli;
mod logging;
mod output;

use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;

use tccinspect::bundle::{resolve_target, AppTarget};
use tccinspect::tcc::{self, filter};

use crate::output::{AppPermissionReport, InspectOutput};

fn main() -> Result<()> {
    let options = cli::parse_args()?;

    logging::init(logging::level_for(options.verbose, options.quiet_mode))?;

    // Resolve every target before querying so a bad path fails fast
    let targets = options
        .targets
        .iter()
        .map(|target| resolve_target(target))
        .collect::<Result<Vec<AppTarget>, _>>()?;

    let start_time = Instant::now();

    let results: Vec<AppPermissionReport> = targets
        .par_iter()
        .map(|target| {
            let mut result = tcc::query_all_stores(&target.bundle_identifier);
            if !options.services.is_empty() {
                result.retain_records(|record| filter::record_matches_filters(record, &options.services));
            }
            AppPermissionReport::new(target, &result)
        })
        .collect();

    let duration_ms = start_time.elapsed().as_millis() as u64;
    let output = InspectOutput::new(results, duration_ms);

    if options.json_output {
        println!("{}", output::format_json(&output)?);
    } else {
        print!(
            "{}",
            output::format_human(&output, &options.date_format, !options.quiet_mode)
        );
    }

    Ok(())
}
