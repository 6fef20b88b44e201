//! Step entry point: provision the Nitro CLI, then publish the schema.

// The binary talks to the user and the pipeline host on stderr/stdout.
#![allow(clippy::print_stderr)]

mod cli;
mod trace;

use nitro_action_core::{ActionInputs, Error, Platform, Result, SearchPath, outputs};
use nitro_action_provision::{NitroInstaller, ReleaseClient, ToolCache};
use nitro_action_publish::{PublishRequest, invoke};
use tracing::info;

/// Successful step exit code.
const EXIT_OK: i32 = 0;
/// Any fatal error exit code.
const EXIT_FAILED: i32 = 1;

fn main() {
    // NOTE: eprintln! in the panic hook is intentional - tracing may be
    // unusable during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Step panicked: {panic_info}");
    }));

    let cli = cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Fatal error: failed to create tokio runtime: {e}");
            std::process::exit(EXIT_FAILED);
        }
    };

    let exit_code = runtime.block_on(run(cli));
    std::process::exit(exit_code);
}

async fn run(cli: cli::Cli) -> i32 {
    if let Err(report) = trace::init(cli.log_level, cli.log_format) {
        eprintln!("{report:?}");
        return EXIT_FAILED;
    }

    info!("Starting Nitro fusion publish step");

    match execute(cli).await {
        Ok(()) => {
            info!("Step completed successfully");
            EXIT_OK
        }
        Err(error) => {
            record_failure(&error);
            eprintln!("{:?}", miette::Report::new(error));
            EXIT_FAILED
        }
    }
}

/// Report a fatal error to the pipeline host.
///
/// Publish-phase failures additionally expose a machine-readable `success`
/// output so downstream steps can branch without parsing logs; provisioning
/// failures only get the annotation.
fn record_failure(error: &Error) {
    if matches!(
        error,
        Error::MissingConfiguration { .. }
            | Error::WorkingDirectoryChangeFailed { .. }
            | Error::PublishLaunchFailed { .. }
            | Error::PublishFailed { .. }
    ) {
        let _ = outputs::set_output("success", "false");
    }

    outputs::set_failed(&error.to_string());
}

/// The single orchestration flow: inputs, provisioning, publish, outputs.
async fn execute(cli: cli::Cli) -> Result<()> {
    let inputs = ActionInputs::from_env()?;

    let cache = cli
        .cache_dir
        .map_or_else(ToolCache::with_default_root, ToolCache::new);
    let installer = NitroInstaller::with_parts(ReleaseClient::new(), cache, Platform::current()?);

    let mut search_path = SearchPath::from_env();
    let tool_dir = installer
        .ensure_installed(&inputs.nitro_version, &mut search_path)
        .await?;

    // Later pipeline steps get the tool too.
    outputs::add_path(&tool_dir)?;

    let request = PublishRequest::from_inputs(&inputs)?;
    let result = invoke(&request, &search_path).await?;

    outputs::set_output("success", "true")?;
    if let Some(schema_id) = &result.schema_id {
        outputs::set_output("schema-id", schema_id)?;
    }

    Ok(())
}
