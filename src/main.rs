use anyhow::Context;
use parcel_combiner::combine_parcels;
use parcel_combiner::config::{build_cli, CombineConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();
    let config = CombineConfig::from_matches(&matches);

    let result = combine_parcels(&config).with_context(|| {
        format!(
            "failed to combine {} into {}",
            config.source_dir.display(),
            config.output_file.display()
        )
    });

    match result {
        Ok(summary) => log::info!(
            "{} created successfully ({} features)",
            config.output_file.display(),
            summary.features
        ),
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
