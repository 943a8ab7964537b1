use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The binary logs under its own target, so both crates are listed.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "scorm_cmi=debug,cmi_check=debug,info"
    } else {
        "scorm_cmi=info,cmi_check=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_binary_target() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(directives.contains("scorm_cmi="), "{directives}");
            assert!(directives.contains("cmi_check="), "{directives}");
            assert!(EnvFilter::try_new(directives).is_ok());
        }
        assert!(default_directives(false).contains("cmi_check=info"));
    }
}
