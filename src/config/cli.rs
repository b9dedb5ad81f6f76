//! Conversion of command-line arguments into partial settings
//!
//! Only flags the user actually passed become `Some`, so CLI values override
//! the configuration file without erasing it.

use crate::cli::args::Args;
use crate::models::config::PartialSettings;

impl From<&Args> for PartialSettings {
    fn from(args: &Args) -> Self {
        PartialSettings {
            target_path: args.path.clone(),
            exclude_dirs: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            include_external: args.external.then_some(true),
            output_format: args.output,
            output_file: args.output_file.clone(),
            quiet: args.quiet.then_some(true),
            verbose: args.verbose.then_some(true),
            use_colors: args.no_colors.then_some(false),
            parallel: args.no_parallel.then_some(false),
            show_progress: args.no_progress.then_some(false),
            cache_enabled: args.no_cache.then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn unset_flags_do_not_override() {
        let args = Args::parse_from(["depgraph"]);
        let partial = PartialSettings::from(&args);
        assert!(partial.include_external.is_none());
        assert!(partial.use_colors.is_none());
        assert!(partial.exclude_dirs.is_none());
    }

    #[test]
    fn negative_flags_map_to_false() {
        let args = Args::parse_from(["depgraph", "--no-colors", "--no-parallel"]);
        let partial = PartialSettings::from(&args);
        assert_eq!(partial.use_colors, Some(false));
        assert_eq!(partial.parallel, Some(false));
        assert!(partial.show_progress.is_none());
    }
}
